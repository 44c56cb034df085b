//! Error types for grid, color and image operations

use std::fmt;
use std::io;
use thiserror::Error;

/// Which coordinate or color channel a range check was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
    Red,
    Green,
    Blue,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Row => "row",
            Axis::Column => "column",
            Axis::Red => "red",
            Axis::Green => "green",
            Axis::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Blockterm error type
#[derive(Error, Debug)]
pub enum Error {
    /// Grid size is negative or too large to allocate
    #[error("invalid grid dimension: {rows} rows x {columns} columns")]
    InvalidDimension { rows: i64, columns: i64 },

    /// Index or color channel outside its valid range `0..len`
    #[error("invalid {axis} [0..{len}): {value}")]
    OutOfRange { axis: Axis, value: i64, len: i64 },

    /// Cells always display something
    #[error("glyph must not be empty")]
    EmptyGlyph,

    /// Escape sequences are stored inline and have a fixed capacity
    #[error("escape sequence too long: {len} bytes")]
    SequenceTooLong { len: usize },

    /// RGBA buffer does not match the stated image size
    #[error("invalid image: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidImage {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for blockterm operations
pub type Result<T> = std::result::Result<T, Error>;
