//! FFI 1001 file writer.
//!
//! Serializes a record back to the exact FFI 1001 text layout. Counts are
//! re-derived from the live block lengths so records built by direct field
//! assignment still produce a consistent header; the one inconsistency the
//! writer refuses to repair is a variable-name block that disagrees with the
//! data columns, because neither side is authoritative.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Datelike;

use crate::error::{Na1001Error, Result};
use crate::types::{FIXED_HEADER_LINES, Ffi1001, WriterOptions};

/// Result of a path-level write. "Nothing happened" and "data replaced" are
/// distinct, expected outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Destination existed and overwrite was off; the file is untouched.
    Skipped,
    /// A new file was created.
    Written,
    /// An existing file was replaced.
    Overwritten,
}

impl WriteOutcome {
    /// Whether the destination was left untouched.
    #[must_use]
    pub fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// FFI 1001 file writer over any byte sink.
pub struct Ffi1001Writer<W: Write> {
    writer: BufWriter<W>,
    options: WriterOptions,
}

impl<W: Write> Ffi1001Writer<W> {
    /// Create a writer with default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, WriterOptions::default())
    }

    /// Create a writer with options.
    pub fn with_options(writer: W, options: WriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Serialize a record to the sink.
    ///
    /// VSCAL and VMISS are always emitted in the horizontal layout, one
    /// line per block; a record decoded from a vertical-layout file is
    /// converted, and its NLHEAD re-derived to match.
    ///
    /// Stream targets carry no overwrite semantics; use [`write_ffi1001`]
    /// for guarded path-level writes.
    pub fn write_record(mut self, record: &Ffi1001) -> Result<()> {
        let counts = derive_counts(record)?;
        let sep = self.options.separator.clone();

        writeln!(
            self.writer,
            "{}{sep}{}",
            counts.header_lines,
            Ffi1001::FFI
        )?;
        writeln!(self.writer, "{}", record.originator)?;
        writeln!(self.writer, "{}", record.organization)?;
        writeln!(self.writer, "{}", record.submitter)?;
        writeln!(self.writer, "{}", record.mission)?;
        writeln!(
            self.writer,
            "{}{sep}{}",
            record.volume_index, record.volume_count
        )?;

        let (c, r) = (record.collection_date, record.revision_date);
        writeln!(
            self.writer,
            "{:04}{sep}{:02}{sep}{:02}{sep}{:04}{sep}{:02}{sep}{:02}",
            c.year(),
            c.month(),
            c.day(),
            r.year(),
            r.month(),
            r.day()
        )?;

        writeln!(self.writer, "{}", record.interval)?;
        writeln!(self.writer, "{}", record.independent_name)?;
        writeln!(self.writer, "{}", counts.n_vars)?;
        writeln!(self.writer, "{}", record.var_scale.join(&sep))?;
        writeln!(self.writer, "{}", record.var_missing.join(&sep))?;
        for name in &record.var_names {
            writeln!(self.writer, "{name}")?;
        }

        writeln!(self.writer, "{}", counts.n_special)?;
        for comment in &record.special_comments {
            writeln!(self.writer, "{comment}")?;
        }
        writeln!(self.writer, "{}", counts.n_normal)?;
        for comment in &record.normal_comments {
            writeln!(self.writer, "{comment}")?;
        }

        let dsep = self.options.data_separator.clone();
        for (i, x) in record.independent_values.iter().enumerate() {
            write!(self.writer, "{x}")?;
            for (j, column) in record.dependent_values.iter().enumerate() {
                let token = match &column[i] {
                    Some(value) => value.as_str(),
                    None => record.var_missing[j].as_str(),
                };
                write!(self.writer, "{dsep}{token}")?;
            }
            writeln!(self.writer)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Write a record to a path, honoring the overwrite guard.
pub fn write_ffi1001(path: &Path, record: &Ffi1001) -> Result<WriteOutcome> {
    write_ffi1001_with_options(path, record, &WriterOptions::default())
}

/// Write a record to a path with options.
///
/// An existing destination with `overwrite` off yields
/// [`WriteOutcome::Skipped`] and leaves the file untouched.
pub fn write_ffi1001_with_options(
    path: &Path,
    record: &Ffi1001,
    options: &WriterOptions,
) -> Result<WriteOutcome> {
    let existed = path.exists();
    if existed && !options.overwrite {
        tracing::debug!(path = %path.display(), "destination exists, write skipped");
        return Ok(WriteOutcome::Skipped);
    }

    let file = File::create(path)?;
    Ffi1001Writer::with_options(file, options.clone()).write_record(record)?;

    Ok(if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Written
    })
}

struct DerivedCounts {
    n_vars: usize,
    n_special: usize,
    n_normal: usize,
    header_lines: usize,
}

/// Re-derive the header counts from the live block lengths, reporting any
/// correction of a stale stored count.
fn derive_counts(record: &Ffi1001) -> Result<DerivedCounts> {
    let n_vars = record.var_names.len();
    if n_vars != record.dependent_values.len() {
        return Err(Na1001Error::shape_mismatch(format!(
            "VNAME has {} entries, V has {} columns",
            n_vars,
            record.dependent_values.len()
        )));
    }
    if record.var_scale.len() != n_vars || record.var_missing.len() != n_vars {
        return Err(Na1001Error::shape_mismatch(format!(
            "{n_vars} variable(s), but VSCAL has {} entries and VMISS has {}",
            record.var_scale.len(),
            record.var_missing.len()
        )));
    }

    let rows = record.independent_values.len();
    for (j, column) in record.dependent_values.iter().enumerate() {
        if column.len() != rows {
            return Err(Na1001Error::shape_mismatch(format!(
                "variable {j} has {} values for {rows} data rows",
                column.len()
            )));
        }
    }

    if n_vars != record.n_vars {
        tracing::debug!(stored = record.n_vars, derived = n_vars, "NV corrected");
    }
    let n_special = record.special_comments.len();
    if n_special != record.n_special_comments {
        tracing::debug!(
            stored = record.n_special_comments,
            derived = n_special,
            "NSCOML corrected"
        );
    }
    let n_normal = record.normal_comments.len();
    if n_normal != record.n_normal_comments {
        tracing::debug!(
            stored = record.n_normal_comments,
            derived = n_normal,
            "NNCOML corrected"
        );
    }
    let header_lines = FIXED_HEADER_LINES + n_vars + n_special + n_normal;
    if header_lines != record.n_header_lines {
        tracing::debug!(
            stored = record.n_header_lines,
            derived = header_lines,
            "NLHEAD corrected"
        );
    }

    Ok(DerivedCounts {
        n_vars,
        n_special,
        n_normal,
        header_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Interval;
    use chrono::NaiveDate;

    fn sample_record() -> Ffi1001 {
        let mut record = Ffi1001 {
            collection_date: NaiveDate::from_ymd_opt(2020, 3, 4).unwrap(),
            revision_date: NaiveDate::from_ymd_opt(2020, 9, 22).unwrap(),
            interval: Interval::Int(1),
            independent_name: "Time; [s]".to_string(),
            ..Ffi1001::default()
        };
        record
            .set_variables(
                vec!["Ozone; [ppb]".to_string()],
                vec!["1".to_string()],
                vec!["9999".to_string()],
            )
            .unwrap();
        record.set_normal_comments(vec!["Time\tOzone".to_string()]);
        record.set_independent_values(vec!["0".to_string(), "1".to_string()]);
        record.dependent_values = vec![vec![Some("31.2".to_string()), None]];
        record
    }

    fn encode(record: &Ffi1001) -> String {
        let mut buffer = Vec::new();
        Ffi1001Writer::new(&mut buffer).write_record(record).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_emitted_layout() {
        let text = encode(&sample_record());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "16 1001");
        assert_eq!(lines[5], "1 1");
        assert_eq!(lines[6], "2020 03 04 2020 09 22");
        assert_eq!(lines[7], "1");
        assert_eq!(lines[9], "1");
        assert_eq!(lines[10], "1");
        assert_eq!(lines[11], "9999");
        assert_eq!(lines[12], "Ozone; [ppb]");
        assert_eq!(lines[13], "0");
        assert_eq!(lines[14], "1");
        assert_eq!(lines[15], "Time\tOzone");
        assert_eq!(lines[16], "0\t31.2");
        // a decoded missing sentinel is re-emitted as the VMISS token
        assert_eq!(lines[17], "1\t9999");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_stale_counts_are_corrected() {
        let mut record = sample_record();
        record.n_header_lines = 99;
        record.n_vars = 7;
        let text = encode(&record);
        assert!(text.starts_with("16 1001\n"));
    }

    #[test]
    fn test_name_data_mismatch_is_fatal() {
        let mut record = sample_record();
        record.var_names.push("Pressure; [hPa]".to_string());
        record.var_scale.push("1".to_string());
        record.var_missing.push("-1".to_string());
        let mut buffer = Vec::new();
        let result = Ffi1001Writer::new(&mut buffer).write_record(&record);
        assert!(matches!(result, Err(Na1001Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_ragged_column_is_fatal() {
        let mut record = sample_record();
        record.dependent_values[0].pop();
        let mut buffer = Vec::new();
        let result = Ffi1001Writer::new(&mut buffer).write_record(&record);
        assert!(matches!(result, Err(Na1001Error::ShapeMismatch { .. })));
    }
}
