use std::ops::Range;

use crate::config::ParserConfig;
use crate::error::{ParseError, ParseErrorKind};

/// Half-open byte range `[start, end)` into a line. Both ends always sit on
/// `char` boundaries.
pub type TokenSpan = Range<usize>;

// ---------------------------------------------------------------------------
// LineCursor – a line of text and a read position within it
// ---------------------------------------------------------------------------

/// A single line of input together with the position parsing has reached.
///
/// The position only ever moves forward and is only moved by the methods
/// below, so it is always a valid `char` boundary of `text`.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    text: &'a str,
    line: usize,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// `line` is the 1-based line number used in error positions.
    pub fn new(text: &'a str, line: usize) -> Self {
        Self { text, line, pos: 0 }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Text covered by `span`.
    pub(crate) fn slice(&self, span: TokenSpan) -> &'a str {
        &self.text[span]
    }

    /// Move to `pos`, which must lie ahead of the cursor on a char boundary.
    pub(crate) fn advance_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos && self.text.is_char_boundary(pos));
        self.pos = pos;
    }

    /// 1-based character column of byte offset `byte`.
    pub(crate) fn column_at(&self, byte: usize) -> usize {
        self.text[..byte].chars().count() + 1
    }

    /// A parse error located at byte offset `byte` of this line.
    pub(crate) fn error_at(&self, byte: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.line, self.column_at(byte), kind)
    }

    /// A parse error located at the current position.
    pub fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(self.pos, kind)
    }

    // -----------------------------------------------------------------------
    // Token finding
    // -----------------------------------------------------------------------

    /// Skip delimiters. Returns `true` when a token starts at the new
    /// position, `false` at end of line or at the start of a comment (the
    /// cursor is then moved to the end of the line).
    pub fn skip_delimiters(&mut self, config: &ParserConfig) -> bool {
        let rest = &self.text[self.pos..];
        match rest.char_indices().find(|&(_, c)| !config.is_delimiter(c)) {
            Some((i, c)) if config.comment != Some(c) => {
                self.pos += i;
                true
            }
            _ => {
                self.pos = self.text.len();
                false
            }
        }
    }

    /// Locate the next run of non-delimiter characters and move past it.
    ///
    /// `None` means the line holds no further tokens; whether that is an
    /// error is up to the caller.
    pub fn find_next_token(&mut self, config: &ParserConfig) -> Option<TokenSpan> {
        if !self.skip_delimiters(config) {
            return None;
        }
        let start = self.pos;
        let end = self.text[start..]
            .char_indices()
            .find(|&(_, c)| config.is_delimiter(c))
            .map_or(self.text.len(), |(i, _)| start + i);
        self.pos = end;
        Some(start..end)
    }
}
