//! Aggregates the “business logic” layer.

pub mod bounds;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod game;
pub mod rng;
pub mod stats;

// re-export frequently-used items for convenience
pub use bounds::Summary;
pub use config::{Bins, ChartConfig, ChartConfigBuilder, HistogramSpec};
pub use constants::{ABORT_TOKEN, DECIMAL_PRECISION, DEFAULT_STATS_FILE, SECRET_LEN};
pub use data::{GameResult, StatColumn};
pub use error::{AppError, ChartError, ConfigError, GameError, GuessError, StoreError};
pub use game::{Game, GameState, Outcome, ScoreTally, validate_guess};
pub use rng::{SecretNumber, game_rng};
pub use stats::{RepairReport, StatsStore, StoreIssue};
