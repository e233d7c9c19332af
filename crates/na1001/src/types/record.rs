//! The in-memory representation of one FFI 1001 document.

use std::fmt;

use chrono::NaiveDate;

use super::interval::Interval;
use crate::error::{Na1001Error, Result};

/// Number of fixed header lines; every valid header has this many lines plus
/// one per variable name and one per comment line.
pub const FIXED_HEADER_LINES: usize = 14;

/// One parsed FFI 1001 document.
///
/// All fields are public: records may be built by direct field assignment
/// before encoding, and the encoder re-derives the count fields from the
/// live block lengths. The `set_*` accessors keep the counts consistent on
/// block replacement, which is the preferred way to mutate a decoded record.
///
/// Data tokens (`var_scale`, `var_missing`, `independent_values`,
/// `dependent_values`) are kept as raw text so arbitrary numeric literal
/// styles round-trip exactly. A dependent value of `None` is the decoded
/// missing-value sentinel (see `ReaderOptions::missing_to_none`).
#[derive(Debug, Clone)]
pub struct Ffi1001 {
    /// Declared header line count (NLHEAD).
    pub n_header_lines: usize,
    /// Originator / PI line (ONAME).
    pub originator: String,
    /// Organization line (ORG).
    pub organization: String,
    /// Data submitter line (SNAME).
    pub submitter: String,
    /// Mission or project line (MNAME).
    pub mission: String,
    /// Volume number of this file (IVOL).
    pub volume_index: u32,
    /// Total number of volumes (NVOL).
    pub volume_count: u32,
    /// UTC date when the data collection began (DATE).
    pub collection_date: NaiveDate,
    /// UTC date of last revision (RDATE); never precedes `collection_date`.
    pub revision_date: NaiveDate,
    /// Nominal step of the independent variable (DX); 0 means non-uniform.
    pub interval: Interval,
    /// Description of the independent variable (XNAME).
    pub independent_name: String,
    /// Number of dependent variables (NV).
    pub n_vars: usize,
    /// Per-variable scale factors (VSCAL), raw tokens.
    pub var_scale: Vec<String>,
    /// Per-variable missing-value markers (VMISS), raw tokens.
    pub var_missing: Vec<String>,
    /// Per-variable description lines (VNAME).
    pub var_names: Vec<String>,
    /// Declared special-comment line count (NSCOML).
    pub n_special_comments: usize,
    /// Special comment block (SCOM).
    pub special_comments: Vec<String>,
    /// Declared normal-comment line count (NNCOML).
    pub n_normal_comments: usize,
    /// Normal comment block (NCOM); the last line conventionally holds a
    /// delimited column header.
    pub normal_comments: Vec<String>,
    /// Independent variable values (X), one raw token per data row.
    pub independent_values: Vec<String>,
    /// Dependent variable values (V), one inner vector per variable, each
    /// aligned 1:1 with `independent_values`.
    pub dependent_values: Vec<Vec<Option<String>>>,
    /// Origin descriptor: a file path, or `"stream"` for in-memory input.
    /// Provenance metadata only; not part of the on-disk grammar and not
    /// part of record equality.
    pub source: String,
    /// The verbatim header block as decoded, for diagnostics. Not part of
    /// record equality.
    pub raw_header: Vec<String>,
}

impl Ffi1001 {
    /// The format index; always 1001 for this record type.
    pub const FFI: u32 = 1001;

    /// Number of data rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.independent_values.len()
    }

    /// The conventional column-header line (last normal comment), if any.
    #[must_use]
    pub fn column_header(&self) -> Option<&str> {
        self.normal_comments.last().map(String::as_str)
    }

    /// Replace the special comment block, re-deriving NSCOML and NLHEAD.
    pub fn set_special_comments(&mut self, comments: Vec<String>) {
        self.n_special_comments = comments.len();
        self.special_comments = comments;
        self.recompute_header_count();
    }

    /// Replace the normal comment block, re-deriving NNCOML and NLHEAD.
    pub fn set_normal_comments(&mut self, comments: Vec<String>) {
        self.n_normal_comments = comments.len();
        self.normal_comments = comments;
        self.recompute_header_count();
    }

    /// Replace the variable name block, re-deriving NV and NLHEAD.
    pub fn set_var_names(&mut self, names: Vec<String>) {
        self.n_vars = names.len();
        self.var_names = names;
        self.recompute_header_count();
    }

    /// Replace the scale factor block.
    ///
    /// # Errors
    /// `ShapeMismatch` if the new block's length differs from `var_missing`;
    /// scale and missing markers must always pair up.
    pub fn set_var_scale(&mut self, scale: Vec<String>) -> Result<()> {
        if scale.len() != self.var_missing.len() {
            return Err(Na1001Error::shape_mismatch(format!(
                "VSCAL has {} entries, VMISS has {}",
                scale.len(),
                self.var_missing.len()
            )));
        }
        self.var_scale = scale;
        Ok(())
    }

    /// Replace the missing-value marker block.
    ///
    /// # Errors
    /// `ShapeMismatch` if the new block's length differs from `var_scale`.
    pub fn set_var_missing(&mut self, missing: Vec<String>) -> Result<()> {
        if missing.len() != self.var_scale.len() {
            return Err(Na1001Error::shape_mismatch(format!(
                "VMISS has {} entries, VSCAL has {}",
                missing.len(),
                self.var_scale.len()
            )));
        }
        self.var_missing = missing;
        Ok(())
    }

    /// Replace names, scale factors, and missing markers together,
    /// re-deriving NV and NLHEAD.
    ///
    /// # Errors
    /// `ShapeMismatch` if the three blocks do not have equal length.
    pub fn set_variables(
        &mut self,
        names: Vec<String>,
        scale: Vec<String>,
        missing: Vec<String>,
    ) -> Result<()> {
        if names.len() != scale.len() || names.len() != missing.len() {
            return Err(Na1001Error::shape_mismatch(format!(
                "VNAME has {} entries, VSCAL {}, VMISS {}",
                names.len(),
                scale.len(),
                missing.len()
            )));
        }
        self.n_vars = names.len();
        self.var_names = names;
        self.var_scale = scale;
        self.var_missing = missing;
        self.recompute_header_count();
        Ok(())
    }

    /// Replace the independent variable values, re-deriving DX from the
    /// actual spacing: one distinct rounded difference yields that step,
    /// anything else yields 0 (non-uniform).
    pub fn set_independent_values(&mut self, values: Vec<String>) {
        self.interval = Interval::from_values(&values);
        self.independent_values = values;
    }

    fn recompute_header_count(&mut self) {
        self.n_header_lines =
            FIXED_HEADER_LINES + self.n_vars + self.n_special_comments + self.n_normal_comments;
    }
}

impl Default for Ffi1001 {
    /// A minimal valid single-variable record with no comments or data.
    fn default() -> Self {
        Self {
            n_header_lines: FIXED_HEADER_LINES + 1,
            originator: "data origin".to_string(),
            organization: "organization".to_string(),
            submitter: "sampling description".to_string(),
            mission: "mission name".to_string(),
            volume_index: 1,
            volume_count: 1,
            collection_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default(),
            revision_date: chrono::Utc::now().date_naive(),
            interval: Interval::Int(0),
            independent_name: "independent variable".to_string(),
            n_vars: 1,
            var_scale: vec!["1".to_string()],
            var_missing: vec!["-9999".to_string()],
            var_names: vec!["dependent variable".to_string()],
            n_special_comments: 0,
            special_comments: Vec::new(),
            n_normal_comments: 0,
            normal_comments: Vec::new(),
            independent_values: Vec::new(),
            dependent_values: vec![Vec::new()],
            source: String::new(),
            raw_header: Vec::new(),
        }
    }
}

/// Structural equality: the round-trip contract compares document content,
/// so the provenance fields `source` and `raw_header` are excluded.
impl PartialEq for Ffi1001 {
    fn eq(&self, other: &Self) -> bool {
        self.n_header_lines == other.n_header_lines
            && self.originator == other.originator
            && self.organization == other.organization
            && self.submitter == other.submitter
            && self.mission == other.mission
            && self.volume_index == other.volume_index
            && self.volume_count == other.volume_count
            && self.collection_date == other.collection_date
            && self.revision_date == other.revision_date
            && self.interval == other.interval
            && self.independent_name == other.independent_name
            && self.n_vars == other.n_vars
            && self.var_scale == other.var_scale
            && self.var_missing == other.var_missing
            && self.var_names == other.var_names
            && self.n_special_comments == other.n_special_comments
            && self.special_comments == other.special_comments
            && self.n_normal_comments == other.n_normal_comments
            && self.normal_comments == other.normal_comments
            && self.independent_values == other.independent_values
            && self.dependent_values == other.dependent_values
    }
}

impl fmt::Display for Ffi1001 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NASA Ames FFI 1001")?;
        writeln!(f, "source: {}", self.source)?;
        writeln!(f, "{}", self.originator)?;
        writeln!(f, "{}", self.organization)?;
        writeln!(f, "{}", self.mission)?;
        writeln!(
            f,
            "collected {}, revised {}",
            self.collection_date, self.revision_date
        )?;
        write!(
            f,
            "{} variable(s), {} data row(s)",
            self.n_vars,
            self.num_rows()
        )
    }
}
