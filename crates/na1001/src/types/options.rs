//! Reader and writer options.

/// Options for reading FFI 1001 files.
///
/// The defaults parse a well-formed, tab-separated-data FFI 1001 document.
/// The layout switches exist because real-world producers disagree on header
/// details; picking the wrong layout surfaces as a count mismatch error, not
/// a silent misparse.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Field separator for header scalar/pair lines (default: `" "`).
    pub separator: String,
    /// Separator used exclusively within data rows (default: `"\t"`).
    pub data_separator: String,
    /// Derive NNCOML from NLHEAD instead of reading its own header line
    /// (default: true).
    pub auto_comment_count: bool,
    /// Trim surrounding whitespace from every line before parsing
    /// (default: true).
    pub strip_lines: bool,
    /// Collapse runs of the general separator to a single occurrence
    /// (default: false).
    ///
    /// Caution: with this enabled, empty fields silently vanish unless the
    /// producer wrote an explicit placeholder token.
    pub collapse_separators: bool,
    /// VSCAL and VMISS are laid out vertically, one token per line, instead
    /// of one line per block (default: false).
    pub vertical_scale_missing: bool,
    /// Replace data tokens equal to the variable's VMISS entry with `None`
    /// instead of keeping the literal text (default: false).
    pub missing_to_none: bool,
    /// Accept strict 7-bit ASCII only; when false, fall back to UTF-8,
    /// CP1252, and Latin-1 in order (default: true).
    pub ascii_only: bool,
    /// Accept a header-only document with zero data rows (default: false).
    pub allow_empty_data: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            data_separator: "\t".to_string(),
            auto_comment_count: true,
            strip_lines: true,
            collapse_separators: false,
            vertical_scale_missing: false,
            missing_to_none: false,
            ascii_only: true,
            allow_empty_data: false,
        }
    }
}

impl ReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the general separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the data-row separator.
    #[must_use]
    pub fn with_data_separator(mut self, separator: impl Into<String>) -> Self {
        self.data_separator = separator.into();
        self
    }

    /// Read NNCOML from its own header line instead of deriving it.
    #[must_use]
    pub fn explicit_comment_count(mut self) -> Self {
        self.auto_comment_count = false;
        self
    }

    /// Keep line whitespace as-is.
    #[must_use]
    pub fn keep_whitespace(mut self) -> Self {
        self.strip_lines = false;
        self
    }

    /// Collapse repeated general separators.
    #[must_use]
    pub fn collapse_separators(mut self) -> Self {
        self.collapse_separators = true;
        self
    }

    /// Expect the vertical VSCAL/VMISS layout.
    #[must_use]
    pub fn vertical_scale_missing(mut self) -> Self {
        self.vertical_scale_missing = true;
        self
    }

    /// Decode missing-value tokens to `None`.
    #[must_use]
    pub fn missing_to_none(mut self) -> Self {
        self.missing_to_none = true;
        self
    }

    /// Allow non-ASCII input via the encoding fallback chain.
    #[must_use]
    pub fn allow_non_ascii(mut self) -> Self {
        self.ascii_only = false;
        self
    }

    /// Accept header-only documents.
    #[must_use]
    pub fn allow_empty_data(mut self) -> Self {
        self.allow_empty_data = true;
        self
    }
}

/// Options for writing FFI 1001 files.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Field separator for header scalar/pair lines (default: `" "`).
    pub separator: String,
    /// Separator used exclusively within data rows (default: `"\t"`).
    pub data_separator: String,
    /// Replace an existing destination file (default: false; an existing
    /// file makes the write a no-op reported as `WriteOutcome::Skipped`).
    pub overwrite: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            data_separator: "\t".to_string(),
            overwrite: false,
        }
    }
}

impl WriterOptions {
    /// Create writer options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the general separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the data-row separator.
    #[must_use]
    pub fn with_data_separator(mut self, separator: impl Into<String>) -> Self {
        self.data_separator = separator.into();
        self
    }

    /// Replace the destination if it already exists.
    #[must_use]
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}
