use crate::config::ParserConfig;
use crate::error::{ParseError, ParseErrorKind};

use super::model::DataPoint;
use super::token::LineCursor;

// ---------------------------------------------------------------------------
// LineParser – one line of text → named points
// ---------------------------------------------------------------------------

/// Parses lines of the form `<name> <x1> <y1> [<x2> <y2> ...]`.
#[derive(Debug, Clone, Copy)]
pub struct LineParser<'c> {
    config: &'c ParserConfig,
}

impl<'c> LineParser<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    /// Parse one line. Blank and comment-only lines yield no points.
    ///
    /// `line` is the 1-based line number reported in errors.
    pub fn parse_line(&self, text: &str, line: usize) -> Result<Vec<DataPoint>, ParseError> {
        let mut cursor = LineCursor::new(text, line);
        if !cursor.skip_delimiters(self.config) {
            return Ok(Vec::new());
        }

        let name = self.parse_name(&mut cursor)?;
        let mut points = Vec::new();

        while cursor.skip_delimiters(self.config) {
            let x_start = cursor.pos();
            let x = self.parse_point(&mut cursor)?;
            if !cursor.skip_delimiters(self.config) {
                return Err(cursor.error_at(x_start, ParseErrorKind::UnpairedCoordinate));
            }
            let y = self.parse_point(&mut cursor)?;
            points.push(DataPoint::new(name.clone(), x, y));
        }

        if points.is_empty() {
            return Err(cursor.error_here(ParseErrorKind::MissingCoordinates(name)));
        }
        Ok(points)
    }

    /// Parse the series name at the cursor: a bare token, or a run wrapped
    /// in one of the configured quote pairs.
    pub fn parse_name(&self, cursor: &mut LineCursor<'_>) -> Result<String, ParseError> {
        if !cursor.skip_delimiters(self.config) {
            return Err(cursor.error_here(ParseErrorKind::MissingName));
        }
        let start = cursor.pos();

        let raw = match cursor.peek().and_then(|c| self.config.quote_opened_by(c)) {
            Some(quote) => {
                let body_start = start + quote.open.len_utf8();
                let body = &cursor.text()[body_start..];
                let Some(len) = body.find(quote.close) else {
                    return Err(cursor.error_at(start, ParseErrorKind::UnterminatedName(quote.close)));
                };
                cursor.advance_to(body_start + len + quote.close.len_utf8());
                if let Some(c) = cursor.peek().filter(|&c| !self.config.is_delimiter(c)) {
                    return Err(cursor.error_here(ParseErrorKind::TrailingAfterName(c)));
                }
                &body[..len]
            }
            None => match cursor.find_next_token(self.config) {
                Some(span) => cursor.slice(span),
                None => return Err(cursor.error_here(ParseErrorKind::MissingName)),
            },
        };

        let name = raw.trim_matches(|c| self.config.is_delimiter(c));
        if name.is_empty() {
            return Err(cursor.error_at(start, ParseErrorKind::EmptyName));
        }
        Ok(name.to_string())
    }

    /// Parse the next token as a floating-point coordinate. The whole token
    /// must be a number.
    pub fn parse_point(&self, cursor: &mut LineCursor<'_>) -> Result<f64, ParseError> {
        let Some(span) = cursor.find_next_token(self.config) else {
            return Err(cursor.error_here(ParseErrorKind::MissingNumber));
        };
        let start = span.start;
        let token = cursor.slice(span);

        let value: f64 = token
            .parse()
            .map_err(|_| cursor.error_at(start, ParseErrorKind::InvalidNumber(token.to_string())))?;
        if !value.is_finite() && !self.config.allow_non_finite {
            return Err(cursor.error_at(start, ParseErrorKind::NonFiniteNumber(token.to_string())));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuotePair;

    fn parse(line: &str) -> Result<Vec<DataPoint>, ParseError> {
        LineParser::new(&ParserConfig::default()).parse_line(line, 1)
    }

    #[test]
    fn parses_every_pair_of_a_line() {
        assert_eq!(
            parse("SensorA 0.0 0.0 1.5 2.25").unwrap(),
            vec![
                DataPoint::new("SensorA", 0.0, 0.0),
                DataPoint::new("SensorA", 1.5, 2.25),
            ]
        );
        assert_eq!(
            parse("v, -1e3, +2.5E-1").unwrap(),
            vec![DataPoint::new("v", -1000.0, 0.25)]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \t").unwrap().is_empty());
        assert!(parse("  # header comment").unwrap().is_empty());
    }

    #[test]
    fn trailing_unpaired_x_fails() {
        let err = parse("A 1 1 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnpairedCoordinate);
        assert_eq!(err.column, 7);

        let err = parse("A 1 1 2 # comment").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnpairedCoordinate);
    }

    #[test]
    fn trailing_garbage_in_number_fails() {
        let err = parse("A 3.5abc 1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber("3.5abc".into()));
        assert_eq!(err.column, 3);

        let err = parse("A 1 1,5").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnpairedCoordinate);
    }

    #[test]
    fn name_without_coordinates_fails() {
        let err = parse("Lonely").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingCoordinates("Lonely".into()));
    }

    #[test]
    fn non_finite_values_need_opt_in() {
        let err = parse("A nan 1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NonFiniteNumber("nan".into()));
        let err = parse("A 1 1e400").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NonFiniteNumber("1e400".into()));

        let config = ParserConfig {
            allow_non_finite: true,
            ..Default::default()
        };
        let points = LineParser::new(&config).parse_line("A inf -inf", 1).unwrap();
        assert_eq!(points[0].x, f64::INFINITY);
        assert_eq!(points[0].y, f64::NEG_INFINITY);
    }

    #[test]
    fn quoted_names_may_contain_spaces() {
        let points = parse(r#""Sensor A" 1 2 3 4"#).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.name == "Sensor A"));

        let points = parse(r#""  padded, name " 1 2"#).unwrap();
        assert_eq!(points[0].name, "padded, name");
    }

    #[test]
    fn bad_quoted_names_fail() {
        let err = parse(r#""Sensor A 1 2"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedName('"'));
        assert_eq!(err.column, 1);

        let err = parse(r#"  " " 1 2"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyName);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn closing_quote_must_end_the_token() {
        let err = parse(r#""A"1 2"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingAfterName('1'));
        assert_eq!(err.column, 4);

        let err = parse(r#""A"1.5 2 3 4"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingAfterName('1'));

        let err = parse(r##""A"# note"##).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingAfterName('#'));

        let points = parse(r#""A",1,2"#).unwrap();
        assert_eq!(points, vec![DataPoint::new("A", 1.0, 2.0)]);
    }

    #[test]
    fn bracket_quotes_are_configurable() {
        let config = ParserConfig {
            quotes: vec![QuotePair {
                open: '[',
                close: ']',
            }],
            ..Default::default()
        };
        let points = LineParser::new(&config)
            .parse_line("[Kalman estimate] 0.5 0.25", 1)
            .unwrap();
        assert_eq!(points, vec![DataPoint::new("Kalman estimate", 0.5, 0.25)]);
    }

    #[test]
    fn parse_name_at_end_of_line_fails() {
        let config = ParserConfig::default();
        let parser = LineParser::new(&config);
        let mut cursor = LineCursor::new("   ", 2);
        let err = parser.parse_name(&mut cursor).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingName);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn parse_point_advances_the_cursor() {
        let config = ParserConfig::default();
        let parser = LineParser::new(&config);
        let mut cursor = LineCursor::new("1.25 -2", 1);
        assert_eq!(parser.parse_point(&mut cursor).unwrap(), 1.25);
        assert_eq!(cursor.pos(), 4);
        assert_eq!(parser.parse_point(&mut cursor).unwrap(), -2.0);
        let err = parser.parse_point(&mut cursor).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingNumber);
    }

    #[test]
    fn utf8_names_and_columns() {
        let points = parse("Ωmega 1 2").unwrap();
        assert_eq!(points[0].name, "Ωmega");

        let err = parse("Ωmega 1 zwei").unwrap_err();
        assert_eq!(err.column, 9);
    }
}
