//! NASA Ames FFI 1001 text format reader and writer.
//!
//! FFI 1001 ("File Format Index 1001") is a fixed-grammar, self-describing
//! ASCII format for exchanging time-series measurements with structural
//! metadata: provenance lines, per-variable scale factors and missing-value
//! markers, and variable-length comment blocks. This crate provides:
//!
//! - A strict decoder that validates every structural invariant (header
//!   line accounting, block lengths, date ordering, row widths) and fails
//!   with a precise, named error instead of guessing.
//! - An encoder that re-derives the header counts from the live block
//!   lengths and guards destructive writes behind an overwrite flag.
//! - A round-trip guarantee: decoding the output of encoding a record
//!   reproduces an equal record.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use na1001::{read_ffi1001, write_ffi1001, WriteOutcome};
//!
//! let record = read_ffi1001(Path::new("ozone_flight_591.na")).unwrap();
//! println!("{} rows of {}", record.num_rows(), record.independent_name);
//!
//! let outcome = write_ffi1001(Path::new("copy.na"), &record).unwrap();
//! assert_eq!(outcome, WriteOutcome::Written);
//! ```
//!
//! Values are kept as raw text tokens so that arbitrary numeric literal
//! styles survive the round-trip; numeric interpretation (scale factors,
//! missing-value substitution) is applied only at the tabular boundary
//! (see `Ffi1001::to_dataframe` with the `polars` feature).

mod encoding;
mod error;
mod reader;
mod types;
mod writer;

#[cfg(feature = "polars")]
mod polars_ext;

pub use error::{Na1001Error, Result};
pub use reader::{Ffi1001Reader, read_ffi1001, read_ffi1001_with_options};
pub use types::{FIXED_HEADER_LINES, Ffi1001, Interval, ReaderOptions, WriterOptions};
pub use writer::{Ffi1001Writer, WriteOutcome, write_ffi1001, write_ffi1001_with_options};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
