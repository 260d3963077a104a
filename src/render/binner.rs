//! Turns a numeric column into labeled counts.
//!
//! * Strategy::Frequency  - one bucket per distinct value
//! * Strategy::Histogram  - equal-width, right-closed intervals
//!
//! Counting in histogram mode uses the exact edges; only the labels are
//! rounded, so the counts always add up to the number of finite inputs.

use std::cmp::Ordering;

use crate::core::{config::HistogramSpec, data::round_to, error::ConfigError};

/// One bar of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub label: String,
    /// Numeric position used when sorting by label.
    pub key: f64,
    pub count: usize,
}

impl Bucket {
    pub fn new(label: impl Into<String>, key: f64, count: usize) -> Self {
        Self {
            label: label.into(),
            key,
            count,
        }
    }
}

/// Selectable algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    Frequency,
    Histogram(HistogramSpec),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Frequency
    }
}

impl Strategy {
    /// Non-finite values are ignored; no finite value gives no buckets.
    ///
    /// # Errors
    /// A histogram whose bucket count exceeds the cap, see
    /// [`HistogramSpec::bucket_count`].
    pub fn bin(&self, values: &[f64]) -> Result<Vec<Bucket>, ConfigError> {
        match self {
            Self::Frequency => Ok(frequency(values)),
            Self::Histogram(spec) => histogram(values, spec),
        }
    }
}

fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

// --- Frequency ---

/// Most common first, ties in ascending value order.
pub(crate) fn frequency(values: &[f64]) -> Vec<Bucket> {
    let mut values = finite(values);
    values.sort_by(f64::total_cmp);

    let mut out: Vec<Bucket> = Vec::new();
    for v in values {
        match out.last_mut() {
            Some(b) if b.key.total_cmp(&v) == Ordering::Equal => b.count += 1,
            _ => out.push(Bucket::new(v.to_string(), v, 1)),
        }
    }
    out.sort_by(|l, r| r.count.cmp(&l.count));
    out
}

// --- Histogram ---

/// `n + 1` edges spanning `[lo, hi]`. The lowest edge sits 0.1 % of the
/// range below `lo` so the minimum falls inside the first right-closed
/// interval; a flat column is widened on both sides instead.
fn edges(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let (lo, hi, pad_low) = if (hi - lo).abs() < f64::EPSILON {
        let widen = |v: f64| if v == 0.0 { 0.001 } else { 0.001 * v.abs() };
        (lo - widen(lo), hi + widen(hi), 0.0)
    } else {
        (lo, hi, (hi - lo) * 0.001)
    };

    #[allow(clippy::cast_precision_loss)]
    let step = (hi - lo) / n as f64;
    let mut out: Vec<f64> = (0..=n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            i.mul_add(step, lo)
        })
        .collect();
    out[0] -= pad_low;
    out[n] = hi;
    out
}

/// Index of the interval `(edges[i], edges[i + 1]]` holding `v`.
#[inline]
fn bucket_index(edges: &[f64], v: f64) -> usize {
    let n = edges.len() - 1;
    edges[1..].partition_point(|&e| e < v).min(n - 1)
}

fn edge_label(edge: f64, precision: i32) -> String {
    let rounded = round_to(edge, precision);
    // avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let decimals = usize::try_from(precision).unwrap_or(0);
    format!("{rounded:.decimals$}")
}

fn histogram(values: &[f64], spec: &HistogramSpec) -> Result<Vec<Bucket>, ConfigError> {
    let values = finite(values);
    if values.is_empty() {
        return Ok(Vec::new());
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(l, h), &v| {
            (l.min(v), h.max(v))
        });
    let n = spec.bucket_count(lo, hi)?;
    let edges = edges(lo, hi, n);

    let mut counts = vec![0usize; n];
    for &v in &values {
        counts[bucket_index(&edges, v)] += 1;
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let label = format!(
                "({}, {}]",
                edge_label(edges[i], spec.precision),
                edge_label(edges[i + 1], spec.precision)
            );
            Bucket::new(label, edges[i], count)
        })
        .collect();
    Ok(buckets)
}
