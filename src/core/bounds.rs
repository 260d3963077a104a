//! Column extrema + terminal size plumbing.

use terminal_size::{Width, terminal_size};

use crate::core::{
    constants::{CHART_GUTTER, DECIMAL_PRECISION, MIN_CHART_SYMBOLS},
    data::round_to,
};

/// Descriptive statistics of one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Summary {
    /// `None` for an empty slice or one holding no finite value.
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut sum, mut n) = (0.0, 0usize);

        for &v in values.iter().filter(|v| v.is_finite()) {
            low = low.min(v);
            high = high.max(v);
            sum += v;
            n += 1;
        }

        if n == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / n as f64;
        Some(Self {
            min: low,
            mean,
            max: high,
        })
    }

    /// Mean rounded the way every average on screen is.
    #[must_use]
    pub fn rounded_mean(&self) -> f64 {
        round_to(self.mean, DECIMAL_PRECISION)
    }
}

/// Current terminal width in columns (80 fallback).
#[inline]
#[must_use]
pub fn terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| usize::from(w))
}

/// Longest bar that still fits next to `label_width` label characters and a
/// `count_digits`-wide count on a `term_width`-column screen.
#[inline]
#[must_use]
pub fn fit_max_symbols(
    requested: usize,
    term_width: usize,
    label_width: usize,
    count_digits: usize,
) -> usize {
    let room = term_width.saturating_sub(label_width + count_digits + CHART_GUTTER);
    requested.min(room.max(MIN_CHART_SYMBOLS)).max(1)
}
