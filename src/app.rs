use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::config::ParserConfig;
use crate::data::{load_data_set, write_points, DataSet};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Command-line options
// ---------------------------------------------------------------------------

/// How the parsed points are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Per-series point counts and the overall bounds
    #[default]
    Summary,
    /// The data file format itself
    Text,
    Json,
    Csv,
}

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "kalman-grapher",
    version,
    about = "Parse named x/y point series for a Kalman filter graph",
    long_about = None
)]
pub struct Options {
    /// Data file: one series name followed by x y pairs per line
    pub data_file: PathBuf,
    /// JSON file overriding delimiters, quotes and comment character
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Help or version text to print as-is.
    Help(String),
    Run(Options),
}

/// Validate the raw arguments. `args[0]` is the program name.
pub fn validate_args(args: &[String]) -> std::result::Result<Command, Error> {
    let options = match Options::try_parse_from(args) {
        Ok(options) => options,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(Command::Help(err.render().to_string()));
        }
        Err(err) => {
            let message = err.render().to_string();
            return Err(Error::InvalidArgument(
                message.trim_start_matches("error: ").trim_end().to_string(),
            ));
        }
    };

    if !options.data_file.is_file() {
        return Err(Error::InvalidArgument(format!(
            "'{}' is not an existing file",
            options.data_file.display()
        )));
    }
    Ok(Command::Run(options))
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Validate `args`, parse the data file and write the result to `out`.
pub fn run<W: Write>(args: &[String], mut out: W) -> Result<()> {
    let options = match validate_args(args)? {
        Command::Help(text) => {
            out.write_all(text.as_bytes())?;
            return Ok(());
        }
        Command::Run(options) => options,
    };

    let config = match &options.config {
        Some(path) => ParserConfig::from_json_file(path)?,
        None => ParserConfig::default(),
    };

    let dataset = load_data_set(&options.data_file, &config)
        .with_context(|| format!("parsing {}", options.data_file.display()))?;
    log::info!(
        "Loaded {} points in {} series",
        dataset.len(),
        dataset.series_names.len()
    );

    match options.format {
        OutputFormat::Summary => write_summary(&mut out, &dataset)?,
        OutputFormat::Text => write_points(&mut out, &dataset.points, &config)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &dataset.points).map_err(Error::from)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut out);
            for p in &dataset.points {
                writer.serialize(p).map_err(Error::from)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, dataset: &DataSet) -> Result<()> {
    for name in &dataset.series_names {
        let count = dataset.series.get(name).map_or(0, Vec::len);
        writeln!(out, "{name}: {count} points")?;
    }
    match dataset.bounds() {
        Some(bounds) => writeln!(out, "x range: {}\ny range: {}", bounds.x, bounds.y)?,
        None if dataset.is_empty() => writeln!(out, "no points")?,
        None => writeln!(out, "bounds undefined (non-finite coordinates)")?,
    }
    Ok(())
}

/// Process exit status for a failed [`run`]: 2 for usage errors, 1 otherwise.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(Error::InvalidArgument(_)) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn invalid(result: std::result::Result<Command, Error>) -> bool {
        matches!(result, Err(Error::InvalidArgument(_)))
    }

    #[test]
    fn help_wins_over_everything() {
        let help = validate_args(&args(&["grapher", "--help"])).unwrap();
        let Command::Help(text) = help else {
            panic!("expected help text");
        };
        assert!(text.contains("--format"));
        assert!(matches!(
            validate_args(&args(&["grapher", "missing.txt", "-h"])),
            Ok(Command::Help(_))
        ));
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(invalid(validate_args(&args(&["grapher"]))));
        assert!(invalid(validate_args(&args(&["grapher", "--verbose", "x"]))));
        assert!(invalid(validate_args(&args(&["grapher", "x", "--format"]))));
        assert!(invalid(validate_args(&args(&["grapher", "--format", "xml", "x"]))));
        assert!(invalid(validate_args(&args(&["grapher", "x", "--config"]))));
        assert!(invalid(validate_args(&args(&["grapher", "a", "b"]))));
        assert!(invalid(validate_args(&args(&[
            "grapher",
            "/definitely/not/here.txt"
        ]))));
    }

    #[test]
    fn clap_messages_lose_their_prefix() {
        let Err(Error::InvalidArgument(message)) =
            validate_args(&args(&["grapher", "--format", "xml", "x"]))
        else {
            panic!("expected an invalid argument");
        };
        assert!(!message.starts_with("error:"));
        assert!(message.contains("xml"));
    }

    #[test]
    fn parses_formats() {
        assert_eq!(OutputFormat::from_str("csv", false).unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("text", false).unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("xml", false).is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Summary);
    }

    #[test]
    fn usage_errors_map_to_status_2() {
        let usage_err = anyhow::Error::from(Error::InvalidArgument("x".into()));
        assert_eq!(exit_status(&usage_err), 2);
        let other = anyhow::Error::from(Error::InvalidConfig("x".into())).context("loading");
        assert_eq!(exit_status(&other), 1);
    }

    #[test]
    fn summary_lists_series_and_bounds() {
        let dataset = DataSet::from_points(vec![
            crate::DataPoint::new("A", 1.0, 1.0),
            crate::DataPoint::new("B", 2.0, 2.0),
            crate::DataPoint::new("B", 3.0, -3.0),
        ]);
        let mut out = Vec::new();
        write_summary(&mut out, &dataset).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "A: 1 points\nB: 2 points\nx range: [1, 3]\ny range: [-3, 2]\n"
        );
    }
}
