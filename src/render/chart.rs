//! Horizontal ASCII bar chart.
//!
//! ```text
//! GUESSES|GAMES 
//! ---------------
//!  (3, 6]|## 2
//!  (6, 8]|#### 4
//! ---------------
//! Min: 3 Mean: 6.17 Max: 8
//! ```

use crate::{
    core::{
        bounds::{Summary, fit_max_symbols},
        config::{ChartConfig, HistogramSpec},
        error::{ChartError, ConfigError},
    },
    render::binner::{self, Bucket, Strategy},
};

/// What to order the buckets by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Bucket labels, in their numeric order.
    Index,
    /// Bucket counts.
    #[default]
    Values,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// Buckets plus everything needed to draw them.
#[derive(Clone, Debug)]
pub struct Chart {
    buckets: Vec<Bucket>,
    /// Statistics of the source column, not of the counts.
    summary: Option<Summary>,
    config: ChartConfig,
}

impl Chart {
    /// Chart pre-built buckets as given. Without a source column there is
    /// no summary line.
    #[must_use]
    pub fn from_buckets(buckets: Vec<Bucket>, config: ChartConfig) -> Self {
        Self {
            buckets,
            summary: None,
            config,
        }
    }

    /// Labeled counts in the given order, e.g. `[("A", 1), ("B", 2)]`.
    pub fn from_counts<L: Into<String>>(
        counts: impl IntoIterator<Item = (L, usize)>,
        config: ChartConfig,
    ) -> Self {
        let buckets = counts
            .into_iter()
            .enumerate()
            .map(|(i, (label, count))| {
                #[allow(clippy::cast_precision_loss)]
                let key = i as f64;
                Bucket::new(label, key, count)
            })
            .collect();
        Self::from_buckets(buckets, config)
    }

    /// Bin `values` with `strategy`, sorted by count ascending.
    ///
    /// # Errors
    /// Histogram settings that would need too many buckets for this column.
    pub fn from_column(
        values: &[f64],
        strategy: Strategy,
        config: ChartConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::summarised(strategy.bin(values)?, values, config))
    }

    fn summarised(buckets: Vec<Bucket>, values: &[f64], config: ChartConfig) -> Self {
        let mut chart = Self {
            buckets,
            summary: Summary::of(values),
            config,
        };
        chart.sort(SortBy::default(), Order::default());
        chart
    }

    /// One bar per distinct value.
    #[must_use]
    pub fn frequency(values: &[f64], config: ChartConfig) -> Self {
        Self::summarised(binner::frequency(values), values, config)
    }

    /// # Errors
    /// See [`from_column`](Self::from_column).
    pub fn histogram(
        values: &[f64],
        spec: HistogramSpec,
        config: ChartConfig,
    ) -> Result<Self, ConfigError> {
        Self::from_column(values, Strategy::Histogram(spec), config)
    }

    /// Stable reorder of the buckets.
    pub fn sort(&mut self, by: SortBy, order: Order) -> &mut Self {
        let directed = |o: std::cmp::Ordering| match order {
            Order::Ascending => o,
            Order::Descending => o.reverse(),
        };
        match by {
            SortBy::Index => self
                .buckets
                .sort_by(|l, r| directed(l.key.total_cmp(&r.key))),
            SortBy::Values => self.buckets.sort_by(|l, r| directed(l.count.cmp(&r.count))),
        }
        self
    }

    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
    #[must_use]
    pub fn summary(&self) -> Option<Summary> {
        self.summary
    }
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Shrink `max_symbols` so every row fits on a `columns`-wide screen.
    pub fn fit_width(&mut self, columns: usize) -> &mut Self {
        let digits = self.max_count().to_string().len();
        self.config.max_symbols = fit_max_symbols(
            self.config.max_symbols,
            columns,
            self.label_width(),
            digits,
        );
        self
    }

    /// Counts per symbol, chosen so no bar exceeds `max_symbols`.
    #[must_use]
    pub fn value_per_symbol(&self) -> usize {
        self.max_count() / self.config.max_symbols.max(1) + 1
    }

    fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Widest label or the label header, whichever is wider.
    #[must_use]
    pub fn label_width(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.config.labels.0.chars().count())
    }

    /// Longest bar, a space and the largest count, or the value header.
    #[must_use]
    pub fn value_width(&self) -> usize {
        let max = self.max_count();
        let bar = max / self.value_per_symbol();
        (bar + max.to_string().len() + 1).max(self.config.labels.1.chars().count())
    }

    /// Draw the chart.
    ///
    /// # Errors
    /// [`ChartError::EmptyData`] when there are no buckets.
    pub fn render(&self) -> Result<String, ChartError> {
        if self.buckets.is_empty() {
            return Err(ChartError::EmptyData);
        }

        let vps = self.value_per_symbol();
        let lw = self.label_width();
        let vw = self.value_width();
        let sep = "-".repeat(lw + vw + 2);
        let (label_head, value_head) = &self.config.labels;

        let mut lines = vec![format!("{label_head:^lw$}|{value_head:^vw$}"), sep.clone()];
        lines.extend(self.buckets.iter().map(|b| {
            let bar = self.config.symbol.repeat(b.count / vps);
            format!("{:>lw$}|{bar} {}", b.label, b.count)
        }));
        lines.push(sep);

        if let Some(s) = self.summary {
            lines.push(format!(
                "Min: {} Mean: {} Max: {}",
                s.min,
                s.rounded_mean(),
                s.max
            ));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ChartConfig {
        ChartConfig::builder()
            .labels("KEY", "COUNT")
            .symbol("#")
            .max_symbols(100)
            .build()
            .unwrap()
    }

    #[test]
    fn small_counts_draw_one_symbol_each() {
        let chart = Chart::from_counts([("A", 1), ("B", 2)], cfg());
        assert_eq!(chart.value_per_symbol(), 1);
        let text = chart.render().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "KEY|COUNT");
        assert_eq!(lines[1], "-".repeat(10));
        assert_eq!(lines[2], "  A|# 1");
        assert_eq!(lines[3], "  B|## 2");
        assert_eq!(lines[4], "-".repeat(10));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn value_column_fits_bar_and_count() {
        let cfg = ChartConfig::builder().labels("K", "V").build().unwrap();
        let chart = Chart::from_counts([("A", 1), ("B", 2)], cfg);
        // two symbols, a space, one digit
        assert_eq!(chart.value_width(), 4);
        assert!(chart.render().unwrap().contains("B|## 2"));
    }

    #[test]
    fn bars_are_capped() {
        let cfg = ChartConfig::builder().max_symbols(10).build().unwrap();
        let chart = Chart::from_counts([("few", 7), ("many", 95)], cfg);
        // 95 / 10 + 1
        assert_eq!(chart.value_per_symbol(), 10);
        let text = chart.render().unwrap();
        let longest = text
            .lines()
            .map(|l| l.chars().filter(|c| *c == '#').count())
            .max()
            .unwrap();
        assert!(longest <= 10);
        assert!(text.contains("many|######### 95"));
    }

    #[test]
    fn narrow_terminal_shrinks_bars() {
        let cfg = ChartConfig::builder().max_symbols(100).build().unwrap();
        let mut chart = Chart::from_counts([("A", 90)], cfg);
        chart.fit_width(40);
        assert!(chart.config().max_symbols < 40);
        let text = chart.render().unwrap();
        assert!(text.lines().all(|l| l.chars().count() <= 40));
    }

    #[test]
    fn oversized_histogram_is_a_config_error() {
        let spec = HistogramSpec::with_width(1e-6, -1).unwrap();
        let err = Chart::histogram(&[0.5, 100.5], spec, cfg()).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyBins { .. }));
    }

    #[test]
    fn header_is_centred() {
        let cfg = ChartConfig::builder()
            .labels("G", "GAMES")
            .build()
            .unwrap();
        let chart = Chart::from_counts([("label", 3)], cfg);
        let text = chart.render().unwrap();
        assert_eq!(text.lines().next().unwrap(), "  G  |GAMES");
    }

    #[test]
    fn empty_chart_is_an_error() {
        let chart = Chart::frequency(&[], cfg());
        assert_eq!(chart.render(), Err(ChartError::EmptyData));
    }

    #[test]
    fn summary_describes_source_column() {
        let chart = Chart::frequency(&[3.0, 5.0, 5.0], cfg());
        let text = chart.render().unwrap();
        assert_eq!(text.lines().last().unwrap(), "Min: 3 Mean: 4.33 Max: 5");
    }

    #[test]
    fn default_sort_is_count_ascending() {
        let chart = Chart::frequency(&[1.0, 2.0, 2.0, 3.0, 3.0, 3.0], cfg());
        let counts: Vec<usize> = chart.buckets().iter().map(|b| b.count).collect();
        assert_eq!(counts, [1, 2, 3]);
    }

    #[test]
    fn sort_by_index_and_descending() {
        let mut chart = Chart::frequency(&[10.0, 2.0, 2.0, 7.0, 7.0, 7.0], cfg());
        chart.sort(SortBy::Index, Order::Ascending);
        let labels: Vec<&str> = chart.buckets().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["2", "7", "10"]);

        chart.sort(SortBy::Index, Order::Descending);
        let labels: Vec<&str> = chart.buckets().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["10", "7", "2"]);

        chart.sort(SortBy::Values, Order::Descending);
        let counts: Vec<usize> = chart.buckets().iter().map(|b| b.count).collect();
        assert_eq!(counts, [3, 2, 1]);
    }

    #[test]
    fn histogram_chart_keeps_every_row() {
        let values = [3.0, 4.0, 4.0, 5.0, 6.0, 9.0, 12.0];
        let spec = HistogramSpec::with_count(3, 0).unwrap();
        let mut chart = Chart::histogram(&values, spec, cfg()).unwrap();
        chart.sort(SortBy::Index, Order::Ascending);
        let total: usize = chart.buckets().iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());
        assert_eq!(chart.buckets()[0].label, "(3, 6]");
    }
}
