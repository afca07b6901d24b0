use std::borrow::Cow;
use std::io::Write;

use crate::config::ParserConfig;
use crate::error::{Error, Result};

use super::model::DataPoint;

/// Write points in the line format the parser reads back.
///
/// Consecutive points sharing a name go on one line, so parsing the output
/// yields the same sequence.
pub fn write_points<W: Write>(mut out: W, points: &[DataPoint], config: &ParserConfig) -> Result<()> {
    for run in points.chunk_by(|a, b| a.name == b.name) {
        write!(out, "{}", format_name(&run[0].name, config)?)?;
        for p in run {
            write!(out, " {} {}", p.x, p.y)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render points to a string.
pub fn points_to_string(points: &[DataPoint], config: &ParserConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_points(&mut buf, points, config)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidArgument(e.to_string()))
}

/// The name as it has to appear in a data file, quoted when it contains
/// delimiters or would otherwise be mistaken for a quote or comment.
pub fn format_name<'n>(name: &'n str, config: &ParserConfig) -> Result<Cow<'n, str>> {
    if name.is_empty() || name.trim_matches(|c| config.is_delimiter(c)) != name {
        return Err(Error::InvalidArgument(format!(
            "name {name:?} cannot be written: empty or padded with delimiters"
        )));
    }

    let first = name.chars().next();
    let needs_quotes = name.chars().any(|c| config.is_delimiter(c))
        || first.is_some_and(|c| config.comment == Some(c) || config.quote_opened_by(c).is_some());
    if !needs_quotes {
        return Ok(Cow::Borrowed(name));
    }

    match config.quotes.iter().find(|q| !name.contains(q.close)) {
        Some(q) => Ok(Cow::Owned(format!("{}{}{}", q.open, name, q.close))),
        None => Err(Error::InvalidArgument(format!(
            "name {name:?} needs quoting but no configured quote pair can hold it"
        ))),
    }
}
