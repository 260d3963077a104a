//! Public-facing crate root: re-exports plus one-shot helpers.

pub mod cli;
pub mod core;
pub mod render;

pub use core::{
    config::{ChartConfig, ChartConfigBuilder, HistogramSpec},
    constants::DECIMAL_PRECISION,
    data::{GameResult, StatColumn},
    error::{AppError, ChartError, ConfigError, GameError, GuessError, StoreError},
    game::{Game, Outcome, ScoreTally},
    rng::SecretNumber,
    stats::StatsStore,
};

pub use render::{Chart, Order, SortBy};

/// Chart the distinct values of one stats column, counts ascending.
///
/// # Errors
/// [`AppError::Store`] for a column name outside the schema, or
/// [`AppError::Chart`] when the store holds no games.
pub fn chart_column(store: &StatsStore, column: &str, config: ChartConfig) -> Result<String, AppError> {
    let values = store.column_by_name(column)?;
    Ok(Chart::frequency(&values, config).render()?)
}
