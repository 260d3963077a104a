//! Chart settings + fluent builders.

use crate::core::{
    constants::{DEFAULT_BIN_PRECISION, DEFAULT_BINS, DEFAULT_MAX_SYMBOLS, DEFAULT_SYMBOL, MAX_BINS},
    error::ConfigError,
};

/// Immutable formatting parameters handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    /// Headers of the label column and the value column.
    pub labels: (String, String),
    pub symbol: String,
    /// Cap on the length of the longest bar, in symbols.
    pub max_symbols: usize,
}

impl ChartConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> ChartConfigBuilder {
        ChartConfigBuilder::new()
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            labels: (String::new(), "COUNT".into()),
            symbol: DEFAULT_SYMBOL.into(),
            max_symbols: DEFAULT_MAX_SYMBOLS,
        }
    }
}

/// Every setter is infallible; all checks happen in `build`.
#[derive(Debug, Default)]
pub struct ChartConfigBuilder {
    labels: Option<(String, String)>,
    symbol: Option<String>,
    max_symbols: Option<usize>,
}

impl ChartConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn labels(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels = Some((label.into(), value.into()));
        self
    }
    #[inline]
    #[must_use]
    pub fn symbol(mut self, s: impl Into<String>) -> Self {
        self.symbol = Some(s.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn symbol_opt(mut self, s: Option<&str>) -> Self {
        if let Some(t) = s {
            self.symbol = Some(t.to_owned());
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn max_symbols(mut self, n: usize) -> Self {
        self.max_symbols = Some(n);
        self
    }

    /// # Errors
    /// [`ConfigError`] when the symbol is empty or `max_symbols` is zero.
    pub fn build(self) -> Result<ChartConfig, ConfigError> {
        let defaults = ChartConfig::default();
        let symbol = self.symbol.unwrap_or(defaults.symbol);
        if symbol.is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        let max_symbols = self.max_symbols.unwrap_or(defaults.max_symbols);
        if max_symbols == 0 {
            return Err(ConfigError::MaxSymbols(max_symbols));
        }
        Ok(ChartConfig {
            labels: self.labels.unwrap_or(defaults.labels),
            symbol,
            max_symbols,
        })
    }
}

/// How the histogram splits its range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bins {
    /// Exactly this many equal-width buckets.
    Count(usize),
    /// Roughly this wide; the count is derived from the data range.
    Width(f64),
}

/// Validated histogram parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramSpec {
    pub bins: Bins,
    /// Decimal places kept on bucket edges. Negative rounds to tens, hundreds...
    pub precision: i32,
}

impl Default for HistogramSpec {
    fn default() -> Self {
        Self {
            bins: Bins::Count(DEFAULT_BINS),
            precision: DEFAULT_BIN_PRECISION,
        }
    }
}

impl HistogramSpec {
    /// # Errors
    /// [`ConfigError::BinCount`] unless `1 <= n <= MAX_BINS`.
    pub fn with_count(n: usize, precision: i32) -> Result<Self, ConfigError> {
        if n == 0 || n > MAX_BINS {
            return Err(ConfigError::BinCount(n));
        }
        Ok(Self {
            bins: Bins::Count(n),
            precision,
        })
    }

    /// # Errors
    /// [`ConfigError::BinWidth`] unless `width` is finite and positive.
    pub fn with_width(width: f64, precision: i32) -> Result<Self, ConfigError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::BinWidth(width));
        }
        Ok(Self {
            bins: Bins::Width(width),
            precision,
        })
    }

    /// Number of buckets for a column spanning `[lo, hi]`, at least 1.
    ///
    /// # Errors
    /// [`ConfigError::BinCount`] for a count above `MAX_BINS` (only reachable
    /// by building `bins` by hand), [`ConfigError::TooManyBins`] when the
    /// width splits the range into more than `MAX_BINS` buckets.
    pub fn bucket_count(&self, lo: f64, hi: f64) -> Result<usize, ConfigError> {
        match self.bins {
            Bins::Count(n) if n > MAX_BINS => Err(ConfigError::BinCount(n)),
            Bins::Count(n) => Ok(n.max(1)),
            Bins::Width(width) => {
                let needed = ((hi - lo) / width).ceil();
                #[allow(clippy::cast_precision_loss)]
                let cap = MAX_BINS as f64;
                if needed.is_nan() || needed > cap {
                    return Err(ConfigError::TooManyBins { width, needed });
                }
                // 1 <= needed <= MAX_BINS here, the cast is exact
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let n = needed.max(1.0) as usize;
                Ok(n)
            }
        }
    }
}

/// Ergonomic `?` on a builder chain.
impl From<ChartConfigBuilder> for Result<ChartConfig, ConfigError> {
    fn from(b: ChartConfigBuilder) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let cfg = ChartConfig::builder().build().unwrap();
        assert_eq!(cfg, ChartConfig::default());
        assert_eq!(cfg.max_symbols, 100);
        assert_eq!(cfg.symbol, "#");
    }

    #[test]
    fn builder_rejects_bad_settings() {
        assert_eq!(
            ChartConfig::builder().max_symbols(0).build(),
            Err(ConfigError::MaxSymbols(0))
        );
        assert_eq!(
            ChartConfig::builder().symbol("").build(),
            Err(ConfigError::EmptySymbol)
        );
    }

    #[test]
    fn histogram_spec_validates() {
        assert!(HistogramSpec::with_count(0, 0).is_err());
        assert!(HistogramSpec::with_width(0.0, 0).is_err());
        assert!(HistogramSpec::with_width(f64::NAN, 0).is_err());
        assert!(HistogramSpec::with_width(-2.0, 0).is_err());
        assert!(HistogramSpec::with_width(0.5, 0).is_ok());
    }

    #[test]
    fn bin_width_derives_count() {
        let spec = HistogramSpec::with_width(2.5, 0).unwrap();
        assert_eq!(spec.bucket_count(0.0, 10.0), Ok(4));
        assert_eq!(spec.bucket_count(0.0, 11.0), Ok(5));
        // range narrower than one bin, or flat
        assert_eq!(spec.bucket_count(3.0, 4.0), Ok(1));
        assert_eq!(spec.bucket_count(3.0, 3.0), Ok(1));
    }

    #[test]
    fn bin_count_is_capped() {
        assert!(HistogramSpec::with_count(MAX_BINS, 0).is_ok());
        assert_eq!(
            HistogramSpec::with_count(MAX_BINS + 1, 0),
            Err(ConfigError::BinCount(MAX_BINS + 1))
        );
        assert_eq!(
            HistogramSpec::with_count(usize::MAX, 0),
            Err(ConfigError::BinCount(usize::MAX))
        );

        let by_hand = HistogramSpec {
            bins: Bins::Count(usize::MAX),
            precision: 0,
        };
        assert_eq!(
            by_hand.bucket_count(0.0, 1.0),
            Err(ConfigError::BinCount(usize::MAX))
        );
    }

    #[test]
    fn tiny_bin_width_is_rejected_not_saturated() {
        let spec = HistogramSpec::with_width(1e-300, 0).unwrap();
        assert!(matches!(
            spec.bucket_count(1.0, 2.0),
            Err(ConfigError::TooManyBins { .. })
        ));

        // a hundred-second range at microsecond width
        let spec = HistogramSpec::with_width(1e-6, 0).unwrap();
        assert!(matches!(
            spec.bucket_count(0.0, 100.0),
            Err(ConfigError::TooManyBins { .. })
        ));

        // exactly at the cap is fine
        let spec = HistogramSpec::with_width(0.5, 0).unwrap();
        assert_eq!(spec.bucket_count(0.0, 500.0), Ok(MAX_BINS));
    }
}
