//! Error types for FFI 1001 file operations.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when reading or writing FFI 1001 files.
#[derive(Debug, Error)]
pub enum Na1001Error {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// No candidate encoding could decode the input bytes.
    #[error("could not decode input (ASCII-only: {ascii_only})")]
    Encoding { ascii_only: bool },

    /// A header line does not match the grammar at its position.
    #[error("malformed line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    /// The format index in line 1 is not 1001.
    #[error("unsupported format index {ffi}, this codec handles FFI 1001 only")]
    UnsupportedFormat { ffi: i64 },

    /// The declared header line count is below the format floor.
    #[error("FFI 1001 has at least 15 header lines, header declares {declared}")]
    HeaderTooShort { declared: i64 },

    /// The document contains no data rows.
    #[error("no data found after header")]
    NoData,

    /// A block's length disagrees with its declared count.
    #[error("{block} count mismatch: expected {expected}, got {actual}")]
    CountMismatch {
        block: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The revision date predates the collection date.
    #[error("revision date {revision} predates collection date {collection}")]
    DateOrderViolation {
        collection: NaiveDate,
        revision: NaiveDate,
    },

    /// A data row has the wrong number of fields.
    #[error("row width mismatch at line {line}: expected {expected} fields, got {actual}")]
    RowWidthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// Variable blocks disagree in shape.
    #[error("variable shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// A data token could not be parsed as a number.
    #[error("failed to parse numeric field: {field}")]
    NumericParse { field: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FFI 1001 operations.
pub type Result<T> = std::result::Result<T, Na1001Error>;

impl Na1001Error {
    /// Create a MalformedLine error with a 1-based physical line number.
    pub fn malformed_line(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            message: message.into(),
        }
    }

    /// Create a CountMismatch error.
    pub fn count_mismatch(block: &'static str, expected: usize, actual: usize) -> Self {
        Self::CountMismatch {
            block,
            expected,
            actual,
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    /// Create a NumericParse error.
    pub fn numeric_parse(field: impl Into<String>) -> Self {
        Self::NumericParse {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Na1001Error::malformed_line(7, "expected 6 integers");
        assert_eq!(format!("{err}"), "malformed line 7: expected 6 integers");

        let err = Na1001Error::count_mismatch("VSCAL", 3, 2);
        assert_eq!(format!("{err}"), "VSCAL count mismatch: expected 3, got 2");

        let err = Na1001Error::UnsupportedFormat { ffi: 2110 };
        assert!(format!("{err}").contains("2110"));
    }

    #[test]
    fn test_date_order_display() {
        let err = Na1001Error::DateOrderViolation {
            collection: NaiveDate::from_ymd_opt(2020, 3, 4).unwrap(),
            revision: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        let text = format!("{err}");
        assert!(text.contains("2020-01-01"));
        assert!(text.contains("2020-03-04"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Na1001Error = io_err.into();
        assert!(matches!(err, Na1001Error::Io(_)));
    }
}
