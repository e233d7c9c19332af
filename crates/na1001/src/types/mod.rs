//! Core types for FFI 1001 file handling.

mod interval;
mod options;
mod record;

pub use interval::Interval;
pub use options::{ReaderOptions, WriterOptions};
pub use record::{FIXED_HEADER_LINES, Ffi1001};
