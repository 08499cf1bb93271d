//! Validated query parameters for band-gap and summary lookups.

use thiserror::Error;

/// Tolerance applied by band-gap searches when the caller does not pick one.
pub const DEFAULT_TOLERANCE_PCT: f64 = 5.0;

/// Errors raised when query parameters fail validation.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum QueryError {
    /// A range bound was below zero.
    #[error("band gap bounds must not be negative (got min {min}, max {max})")]
    NegativeBound {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The lower bound exceeded the upper bound.
    #[error("band gap minimum {min} exceeds maximum {max}")]
    InvertedRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// A range bound was NaN or infinite.
    #[error("band gap bounds must be finite (got min {min}, max {max})")]
    NonFiniteBound {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// A summary was requested for fewer than one row.
    #[error("row count must be at least 1 (got {requested})")]
    NonPositiveRowCount {
        /// Requested number of rows.
        requested: i64,
    },
}

/// Inclusive band-gap interval used by range searches.
///
/// # Examples
///
/// ```
/// use matprops_core::BandGapWindow;
///
/// let window = BandGapWindow::around(2.0, 5.0);
/// assert!(window.contains(1.9));
/// assert!(window.contains(2.1));
/// assert!(!window.contains(2.11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGapWindow {
    min: f64,
    max: f64,
}

impl BandGapWindow {
    /// Window spanning `tolerance_pct` percent either side of `target`.
    ///
    /// The bounds scale the target itself, so a target of zero yields a
    /// zero-width window whatever the tolerance, and a negative target yields
    /// a window whose minimum exceeds its maximum and therefore matches
    /// nothing. Neither case is rejected.
    #[must_use]
    pub fn around(target: f64, tolerance_pct: f64) -> Self {
        let fraction = tolerance_pct / 100.0;
        Self {
            min: target * (1.0 - fraction),
            max: target * (1.0 + fraction),
        }
    }

    /// Window over explicit inclusive bounds.
    ///
    /// Rejects negative, non-finite, or inverted bounds.
    pub fn between(min: f64, max: f64) -> Result<Self, QueryError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(QueryError::NonFiniteBound { min, max });
        }
        if min < 0.0 || max < 0.0 {
            return Err(QueryError::NegativeBound { min, max });
        }
        if min > max {
            return Err(QueryError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Whether `band_gap` lies inside the window, boundaries included.
    #[must_use]
    pub fn contains(&self, band_gap: f64) -> bool {
        self.min <= band_gap && band_gap <= self.max
    }
}

/// Number of rows to fetch for a summary; always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLimit(u32);

impl RowLimit {
    /// Validate a requested row count.
    pub fn new(requested: i64) -> Result<Self, QueryError> {
        if requested < 1 {
            return Err(QueryError::NonPositiveRowCount { requested });
        }
        let count = u32::try_from(requested).unwrap_or(u32::MAX);
        Ok(Self(count))
    }

    /// The validated row count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn tolerance_window_includes_its_boundaries() {
        let window = BandGapWindow::around(2.0, DEFAULT_TOLERANCE_PCT);
        assert_eq!(window.min(), 1.9);
        assert_eq!(window.max(), 2.1);
        assert!(window.contains(1.9));
        assert!(window.contains(2.1));
        assert!(!window.contains(1.89));
    }

    #[rstest]
    #[case(5.0)]
    #[case(50.0)]
    fn zero_target_collapses_the_window(#[case] tolerance: f64) {
        let window = BandGapWindow::around(0.0, tolerance);
        assert_eq!(window.min(), 0.0);
        assert_eq!(window.max(), 0.0);
    }

    #[rstest]
    fn negative_target_matches_nothing() {
        let window = BandGapWindow::around(-2.0, 5.0);
        assert!(window.min() > window.max());
        assert!(!window.contains(-2.0));
    }

    #[rstest]
    #[case(1.5, 2.0)]
    #[case(0.0, 0.0)]
    #[case(2.0, 2.0)]
    fn accepts_ordered_non_negative_bounds(#[case] min: f64, #[case] max: f64) {
        let window = BandGapWindow::between(min, max).expect("valid bounds");
        assert_eq!((window.min(), window.max()), (min, max));
    }

    #[rstest]
    fn rejects_inverted_range() {
        assert_eq!(
            BandGapWindow::between(2.0, 1.0),
            Err(QueryError::InvertedRange { min: 2.0, max: 1.0 })
        );
    }

    #[rstest]
    #[case(-1.0, 5.0)]
    #[case(1.0, -5.0)]
    fn rejects_negative_bounds(#[case] min: f64, #[case] max: f64) {
        assert!(matches!(
            BandGapWindow::between(min, max),
            Err(QueryError::NegativeBound { .. })
        ));
    }

    #[rstest]
    #[case(f64::NAN, 1.0)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_non_finite_bounds(#[case] min: f64, #[case] max: f64) {
        assert!(matches!(
            BandGapWindow::between(min, max),
            Err(QueryError::NonFiniteBound { .. })
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn row_limit_rejects_non_positive_counts(#[case] requested: i64) {
        assert_eq!(
            RowLimit::new(requested),
            Err(QueryError::NonPositiveRowCount { requested })
        );
    }

    #[rstest]
    fn row_limit_saturates_large_requests() {
        let limit = RowLimit::new(i64::MAX).expect("large counts are valid");
        assert_eq!(limit.get(), u32::MAX);
    }
}
