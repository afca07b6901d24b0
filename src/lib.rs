//! Reads files of named 2D point series, one series name followed by
//! `x y` coordinate pairs per line, for graphing Kalman filter output.
//!
//! ```text
//! # name    x1  y1   x2  y2 ...
//! Truth     0   0    1   0.84
//! "Kalman estimate" 0 0.1 1 0.79
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;

pub use config::{ParserConfig, QuotePair};
pub use data::{parse_data_file, DataPoint, DataSet};
pub use error::{Error, ParseError, ParseErrorKind, Result};
