//! FFI 1001 file reader.
//!
//! Parses the strictly positional header grammar and the data block in a
//! single pass over logical lines, validating every structural invariant
//! before returning. Malformed input is always rejected, never repaired.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;

use crate::encoding::decode_text;
use crate::error::{Na1001Error, Result};
use crate::types::{Ffi1001, Interval, ReaderOptions};

/// FFI 1001 file reader.
pub struct Ffi1001Reader<R: Read> {
    reader: BufReader<R>,
    options: ReaderOptions,
    source: String,
}

impl<R: Read> Ffi1001Reader<R> {
    /// Create a reader over an in-memory or streaming byte source.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReaderOptions::default())
    }

    /// Create a reader with options.
    pub fn with_options(reader: R, options: ReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
            source: "stream".to_string(),
        }
    }

    /// Read the entire source and parse it into a validated record.
    pub fn read_record(mut self) -> Result<Ffi1001> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        parse_ffi1001(&data, &self.source, &self.options)
    }
}

impl Ffi1001Reader<File> {
    /// Open an FFI 1001 file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    /// Open an FFI 1001 file with options.
    pub fn open_with_options(path: &Path, options: ReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Na1001Error::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Na1001Error::Io(e)
            }
        })?;
        let mut reader = Self::with_options(file, options);
        reader.source = path.display().to_string();
        Ok(reader)
    }
}

/// Read an FFI 1001 file from a path.
pub fn read_ffi1001(path: &Path) -> Result<Ffi1001> {
    Ffi1001Reader::open(path)?.read_record()
}

/// Read an FFI 1001 file with options.
pub fn read_ffi1001_with_options(path: &Path, options: ReaderOptions) -> Result<Ffi1001> {
    Ffi1001Reader::open_with_options(path, options)?.read_record()
}

/// Parse FFI 1001 bytes into a validated record.
fn parse_ffi1001(data: &[u8], source: &str, options: &ReaderOptions) -> Result<Ffi1001> {
    let text = decode_text(data, options.ascii_only, source)?;

    let mut lines: Vec<String> = text.split('\n').map(ToOwned::to_owned).collect();
    if options.strip_lines {
        for line in &mut lines {
            *line = line.trim().to_string();
        }
    }
    if options.collapse_separators && !options.separator.is_empty() {
        let doubled = format!("{0}{0}", options.separator);
        for line in &mut lines {
            while line.contains(&doubled) {
                *line = line.replace(&doubled, &options.separator);
            }
        }
    }

    // line 1: NLHEAD FFI
    let first = lines.first().map(String::as_str).unwrap_or("");
    let ident = parse_integers(first, 1, 2)?;
    if ident[1] != i64::from(Ffi1001::FFI) {
        return Err(Na1001Error::UnsupportedFormat { ffi: ident[1] });
    }
    if ident[0] < 15 {
        return Err(Na1001Error::HeaderTooShort { declared: ident[0] });
    }
    let nlhead = ident[0] as usize;

    if lines.len() < nlhead {
        return Err(Na1001Error::count_mismatch("header", nlhead, lines.len()));
    }
    let (header, data_lines) = lines.split_at(nlhead);
    let data_blank = data_lines.iter().all(|l| l.trim().is_empty());
    if data_blank && !options.allow_empty_data {
        return Err(Na1001Error::NoData);
    }

    // lines 2-5: free-text provenance
    let originator = header[1].clone();
    let organization = header[2].clone();
    let submitter = header[3].clone();
    let mission = header[4].clone();

    // line 6: IVOL NVOL
    let volume = parse_integers(&header[5], 6, 2)?;
    let volume_index = unsigned_field(volume[0], 6, "IVOL")?;
    let volume_count = unsigned_field(volume[1], 6, "NVOL")?;

    // line 7: collection and revision dates
    let dates = parse_integers(&header[6], 7, 6)?;
    let collection_date = date_field(&dates[0..3], 7)?;
    let revision_date = date_field(&dates[3..6], 7)?;
    if revision_date < collection_date {
        return Err(Na1001Error::DateOrderViolation {
            collection: collection_date,
            revision: revision_date,
        });
    }

    // line 8: DX
    let interval = Interval::parse(&header[7])
        .ok_or_else(|| Na1001Error::malformed_line(8, format!("invalid DX value '{}'", header[7])))?;

    // line 9: XNAME
    let independent_name = header[8].clone();

    // line 10: NV
    let n_vars = count_field(&header[9], 10, "NV")?;

    // VSCAL / VMISS, horizontal (one line per block) or vertical (one token
    // per line); the layout offset feeds all subsequent positions
    let (var_scale, var_missing, offset) = if options.vertical_scale_missing {
        let scale = header_block(header, 10, n_vars, "VSCAL")?;
        let missing = header_block(header, 10 + n_vars, n_vars, "VMISS")?;
        (scale, missing, 2 * n_vars)
    } else {
        let scale = split_fields(header_line(header, 10)?, &options.separator)
            .into_iter()
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();
        let missing = split_fields(header_line(header, 11)?, &options.separator)
            .into_iter()
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();
        (scale, missing, 2)
    };
    if var_scale.len() != n_vars {
        return Err(Na1001Error::count_mismatch("VSCAL", n_vars, var_scale.len()));
    }
    if var_missing.len() != n_vars {
        return Err(Na1001Error::count_mismatch("VMISS", n_vars, var_missing.len()));
    }

    let var_names = header_block(header, 10 + offset, n_vars, "VNAME")?;

    // NSCOML and the special comment block
    let nscoml_idx = 10 + n_vars + offset;
    let n_special = count_field(header_line(header, nscoml_idx)?, nscoml_idx + 1, "NSCOML")?;
    let special_comments = header_block(header, nscoml_idx + 1, n_special, "SCOM")?;

    // NNCOML and the normal comment block; the count line is physically
    // present either way, auto mode derives its value from NLHEAD instead
    // of trusting it
    let nncoml_idx = 11 + n_vars + n_special + offset;
    let n_normal = if options.auto_comment_count {
        nlhead
            .checked_sub(n_vars + n_special + 12 + offset)
            .ok_or_else(|| {
                Na1001Error::count_mismatch("header", n_vars + n_special + 12 + offset, nlhead)
            })?
    } else {
        count_field(header_line(header, nncoml_idx)?, nncoml_idx + 1, "NNCOML")?
    };
    let normal_comments = header_block(header, nncoml_idx + 1, n_normal, "NCOM")?;

    // NLHEAD must equal the sum of all block lengths; the 12 fixed lines
    // plus the layout-dependent VSCAL/VMISS lines
    let actual_header_lines = 12 + offset + n_vars + n_special + n_normal;
    if actual_header_lines != nlhead {
        return Err(Na1001Error::count_mismatch(
            "header",
            nlhead,
            actual_header_lines,
        ));
    }

    // data block: one row per non-blank line, NV + 1 fields each
    let mut independent_values = Vec::new();
    let mut dependent_values: Vec<Vec<Option<String>>> = vec![Vec::new(); n_vars];
    for (ix, line) in data_lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts = split_fields(line, &options.data_separator);
        if parts.len() != n_vars + 1 {
            return Err(Na1001Error::RowWidthMismatch {
                line: ix + nlhead + 1,
                expected: n_vars + 1,
                actual: parts.len(),
            });
        }
        independent_values.push(parts[0].trim().to_string());
        for (j, column) in dependent_values.iter_mut().enumerate() {
            let token = parts[j + 1].trim();
            if options.missing_to_none && token == var_missing[j] {
                column.push(None);
            } else {
                column.push(Some(token.to_string()));
            }
        }
    }

    Ok(Ffi1001 {
        n_header_lines: nlhead,
        originator,
        organization,
        submitter,
        mission,
        volume_index,
        volume_count,
        collection_date,
        revision_date,
        interval,
        independent_name,
        n_vars,
        var_scale,
        var_missing,
        var_names,
        n_special_comments: n_special,
        special_comments,
        n_normal_comments: n_normal,
        normal_comments,
        independent_values,
        dependent_values,
        source: source.to_string(),
        raw_header: header.to_vec(),
    })
}

/// Parse a line of exactly `expected` whitespace-separated integers.
fn parse_integers(line: &str, line_no: usize, expected: usize) -> Result<Vec<i64>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(Na1001Error::malformed_line(
            line_no,
            format!("expected {expected} integers, got '{line}'"),
        ));
    }
    fields
        .iter()
        .map(|f| {
            f.parse::<i64>().map_err(|_| {
                Na1001Error::malformed_line(line_no, format!("'{f}' is not an integer"))
            })
        })
        .collect()
}

/// Parse a single non-negative count line.
fn count_field(line: &str, line_no: usize, name: &str) -> Result<usize> {
    line.trim()
        .parse::<usize>()
        .map_err(|_| Na1001Error::malformed_line(line_no, format!("invalid {name} value '{line}'")))
}

fn unsigned_field(value: i64, line_no: usize, name: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Na1001Error::malformed_line(line_no, format!("invalid {name} value {value}")))
}

fn date_field(fields: &[i64], line_no: usize) -> Result<NaiveDate> {
    let parts = (
        i32::try_from(fields[0]).ok(),
        u32::try_from(fields[1]).ok(),
        u32::try_from(fields[2]).ok(),
    );
    match parts {
        (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    }
    .ok_or_else(|| {
        Na1001Error::malformed_line(
            line_no,
            format!(
                "invalid calendar date {} {} {}",
                fields[0], fields[1], fields[2]
            ),
        )
    })
}

/// Split on the configured separator; an empty separator means whitespace.
fn split_fields<'a>(line: &'a str, sep: &str) -> Vec<&'a str> {
    if sep.is_empty() {
        line.split_whitespace().collect()
    } else {
        line.split(sep).collect()
    }
}

fn header_line<'a>(header: &'a [String], idx: usize) -> Result<&'a str> {
    header
        .get(idx)
        .map(String::as_str)
        .ok_or_else(|| Na1001Error::count_mismatch("header", idx + 1, header.len()))
}

fn header_block(
    header: &[String],
    start: usize,
    len: usize,
    block: &'static str,
) -> Result<Vec<String>> {
    header
        .get(start..start + len)
        .map(<[String]>::to_vec)
        .ok_or_else(|| {
            Na1001Error::count_mismatch(block, len, header.len().saturating_sub(start))
        })
}
