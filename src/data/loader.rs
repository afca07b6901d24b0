use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ParserConfig;
use crate::error::{Error, Result};

use super::model::{DataPoint, DataSet};
use super::parser::LineParser;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse a data file with the default token conventions.
pub fn parse_data_file(path: &Path) -> Result<Vec<DataPoint>> {
    parse_data_file_with(path, &ParserConfig::default())
}

/// Parse a data file. The first malformed line aborts the whole file.
pub fn parse_data_file_with(path: &Path, config: &ParserConfig) -> Result<Vec<DataPoint>> {
    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Parsing data file {:?}", path);

    let points = parse_data_reader(BufReader::new(file), config).map_err(|err| match err {
        Error::Io(source) => Error::FileAccess {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    log::debug!("Parsed {:?}: {} points", path, points.len());
    Ok(points)
}

/// Parse a data file and index its series.
pub fn load_data_set(path: &Path, config: &ParserConfig) -> Result<DataSet> {
    let dataset = DataSet::from_points(parse_data_file_with(path, config)?);
    log::debug!(
        "Loaded {} points in {} series from {:?}",
        dataset.len(),
        dataset.series_names.len(),
        path
    );
    Ok(dataset)
}

/// Parse every line of `reader` until end of input.
///
/// Invalid UTF-8 surfaces as [`Error::Io`] with kind `InvalidData`.
pub fn parse_data_reader<R: BufRead>(reader: R, config: &ParserConfig) -> Result<Vec<DataPoint>> {
    config.validate()?;
    let parser = LineParser::new(config);
    let mut points = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let text = if i == 0 {
            line.strip_prefix('\u{feff}').unwrap_or(line.as_str())
        } else {
            line.as_str()
        };

        let parsed = parser.parse_line(text, i + 1)?;
        log::trace!("Line {}: {} points", i + 1, parsed.len());
        points.extend(parsed);
    }

    Ok(points)
}

/// Parse in-memory text.
pub fn parse_data_str(text: &str, config: &ParserConfig) -> Result<Vec<DataPoint>> {
    parse_data_reader(text.as_bytes(), config)
}
