//! Polars DataFrame conversion.
//!
//! Maps a decoded record's raw text values to numeric columns, applying the
//! per-variable scale factors and missing-value substitution. Column names
//! come from the conventional column-header line, the last normal comment.

use polars::prelude::{Column, DataFrame};

use crate::error::{Na1001Error, Result};
use crate::types::Ffi1001;

// numpy.isclose tolerances, matching the missing-value comparison
// downstream tooling has always used
const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

impl Ffi1001 {
    /// Build a DataFrame with one column for X and one per dependent
    /// variable, parsed as `f64`, scaled by VSCAL, with VMISS values null.
    ///
    /// `column_separator` splits the column-header line (conventionally the
    /// last normal comment); it must yield one name per column.
    ///
    /// # Errors
    /// `ShapeMismatch` if the scale or missing blocks do not pair up with
    /// the data columns; `CountMismatch` if the column-header line is
    /// absent or names the wrong number of columns; `NumericParse` if a
    /// data token, scale factor, or missing marker is not numeric.
    pub fn to_dataframe(&self, column_separator: &str) -> Result<DataFrame> {
        let n_columns = self.dependent_values.len();
        if self.var_scale.len() != n_columns || self.var_missing.len() != n_columns {
            return Err(Na1001Error::shape_mismatch(format!(
                "{n_columns} data column(s), but VSCAL has {} entries and VMISS has {}",
                self.var_scale.len(),
                self.var_missing.len()
            )));
        }

        let header = self.column_header().ok_or_else(|| {
            Na1001Error::count_mismatch("column header", self.var_names.len() + 1, 0)
        })?;
        let names: Vec<&str> = header.split(column_separator).collect();
        if names.len() != self.var_names.len() + 1 {
            return Err(Na1001Error::count_mismatch(
                "column header",
                self.var_names.len() + 1,
                names.len(),
            ));
        }

        let x: Vec<f64> = self
            .independent_values
            .iter()
            .map(|token| parse_numeric(token))
            .collect::<Result<_>>()?;

        let mut columns = vec![Column::new(names[0].into(), x)];
        for (j, values) in self.dependent_values.iter().enumerate() {
            let scale = parse_numeric(&self.var_scale[j])?;
            let missing = parse_numeric(&self.var_missing[j])?;

            let parsed: Vec<Option<f64>> = values
                .iter()
                .map(|token| match token {
                    None => Ok(None),
                    Some(text) => {
                        let value = parse_numeric(text)?;
                        if is_close(value, missing) {
                            Ok(None)
                        } else {
                            Ok(Some(value * scale))
                        }
                    }
                })
                .collect::<Result<_>>()?;
            columns.push(Column::new(names[j + 1].into(), parsed));
        }

        DataFrame::new(columns)
            .map_err(|e| Na1001Error::shape_mismatch(format!("DataFrame construction: {e}")))
    }
}

fn parse_numeric(token: &str) -> Result<f64> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| Na1001Error::numeric_parse(token))
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ATOL + RTOL * b.abs()
}
