//! The independent-variable interval (DX).
//!
//! DX of 0 marks a non-uniform independent variable. The format allows both
//! integer and decimal notation, and the distinction must survive a
//! round-trip, so the interval is a two-variant value type rather than a
//! plain float.

use std::fmt;

/// Tolerances of the integer-coercion check, matching `numpy.isclose`.
const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

/// Nominal step of the independent variable (the DX header field).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interval {
    /// Integer-valued step, emitted without a decimal point.
    Int(i64),
    /// Fractional step.
    Float(f64),
}

impl Interval {
    /// Parse the DX header token. Decimal notation yields `Float`, anything
    /// else must parse as an integer.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.contains('.') {
            token.parse::<f64>().ok().map(Self::Float)
        } else {
            token.parse::<i64>().ok().map(Self::Int)
        }
    }

    /// Whether this interval signals a non-uniform independent variable.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(v) => v == 0,
            Self::Float(v) => v == 0.0,
        }
    }

    /// Derive the interval from independent-variable values.
    ///
    /// Successive differences are rounded to 4 decimal places to absorb
    /// representation noise. Exactly one distinct rounded difference yields
    /// that step (coerced to an integer when within float tolerance);
    /// anything else, including non-numeric values, yields 0.
    #[must_use]
    pub fn from_values(values: &[String]) -> Self {
        if values.len() < 2 {
            return Self::Int(0);
        }

        let parsed: Option<Vec<f64>> = values
            .iter()
            .map(|v| v.trim().parse::<f64>().ok())
            .collect();
        let Some(parsed) = parsed else {
            return Self::Int(0);
        };

        let mut diffs: Vec<f64> = parsed
            .windows(2)
            .map(|w| ((w[1] - w[0]) * 1e4).round() / 1e4)
            .collect();
        diffs.sort_by(f64::total_cmp);
        diffs.dedup();

        if diffs.len() != 1 {
            return Self::Int(0);
        }

        let dx = diffs[0];
        let nearest = dx.round();
        if (dx - nearest).abs() <= ATOL + RTOL * nearest.abs() {
            Self::Int(nearest as i64)
        } else {
            Self::Float(dx)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // an integral Float must keep its decimal point, otherwise the
            // emitted token re-parses as Int
            Self::Float(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for Interval {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Interval {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!(Interval::parse("0"), Some(Interval::Int(0)));
        assert_eq!(Interval::parse("10"), Some(Interval::Int(10)));
        assert_eq!(Interval::parse("0.25"), Some(Interval::Float(0.25)));
        assert_eq!(Interval::parse(" 2 "), Some(Interval::Int(2)));
        assert_eq!(Interval::parse("abc"), None);
        assert_eq!(Interval::parse(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::Int(0).to_string(), "0");
        assert_eq!(Interval::Int(10).to_string(), "10");
        assert_eq!(Interval::Float(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_display_keeps_decimal_point_notation() {
        assert_eq!(Interval::Float(1.0).to_string(), "1.0");
        assert_eq!(
            Interval::parse(&Interval::Float(1.0).to_string()),
            Some(Interval::Float(1.0))
        );
    }

    #[test]
    fn test_uniform_integer_spacing() {
        let values = strings(&["1", "2", "3", "4", "5"]);
        assert_eq!(Interval::from_values(&values), Interval::Int(1));
    }

    #[test]
    fn test_uniform_fractional_spacing() {
        let values = strings(&["0.0", "0.25", "0.5", "0.75"]);
        assert_eq!(Interval::from_values(&values), Interval::Float(0.25));
    }

    #[test]
    fn test_non_uniform_spacing() {
        let values = strings(&["1", "2", "4", "8"]);
        assert_eq!(Interval::from_values(&values), Interval::Int(0));
    }

    #[test]
    fn test_noisy_uniform_spacing() {
        // representation noise below the 4-decimal rounding is absorbed
        let values = strings(&["0.1", "0.2", "0.30000000000000004", "0.4"]);
        assert_eq!(Interval::from_values(&values), Interval::Float(0.1));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(Interval::from_values(&[]), Interval::Int(0));
        assert_eq!(Interval::from_values(&strings(&["42"])), Interval::Int(0));
        assert_eq!(
            Interval::from_values(&strings(&["1", "x", "3"])),
            Interval::Int(0)
        );
    }
}
