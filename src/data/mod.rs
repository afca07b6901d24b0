//! Data layer: core types, tokenizing, parsing and writing.
//!
//! Architecture:
//! ```text
//!   data file (UTF-8 lines)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  open file, feed it line by line
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  parser   │  name + (x, y) pairs per line
//!   └──────────┘
//!        │  uses
//!        ▼
//!   ┌──────────┐
//!   │  token    │  LineCursor: delimiter / comment aware token spans
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model    │  Vec<DataPoint> → DataSet (series index, bounds)
//!   └──────────┘
//! ```
//!
//! `writer` goes the other way, from points back to lines.

pub mod loader;
pub mod model;
pub mod parser;
pub mod token;
pub mod writer;

pub use loader::{load_data_set, parse_data_file, parse_data_file_with, parse_data_reader, parse_data_str};
pub use model::{DataPoint, DataSet, Range, Range2D};
pub use parser::LineParser;
pub use token::{LineCursor, TokenSpan};
pub use writer::write_points;
