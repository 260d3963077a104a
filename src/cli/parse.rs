use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    core::constants::DEFAULT_STATS_FILE,
    render::chart::{Order, SortBy},
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "bulls-cows",
    version,
    about = "Bulls and Cows in the terminal, with a stats log and ASCII charts"
)]
pub struct Cli {
    /// Stats file (CSV with `game_id,n_guesses,time_to_win`)
    #[arg(short, long, global = true, default_value = DEFAULT_STATS_FILE)]
    pub file: PathBuf,

    /// Seed the secret number generator for a reproducible game
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log debug output to stderr (`RUST_LOG` overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never clear the screen between menus
    #[arg(long, global = true)]
    pub no_clear: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive menu (the default)
    Menu,
    /// Play rounds straight away
    Play,
    /// Show stored games or chart them
    Stats(StatsArgs),
    /// Create an empty stats file
    Init,
}

/// `bulls-cows stats …`
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(value_enum, default_value_t = StatsView::Raw)]
    pub view: StatsView,

    #[command(flatten)]
    pub chart: ChartArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsView {
    /// Every stored game as a table
    Raw,
    /// Histogram of guesses per game
    Guesses,
    /// Histogram of time to win
    Time,
}

/// Chart tweaks; unset fields fall back to the per-chart presets.
#[derive(Args, Debug, Default, Clone)]
pub struct ChartArgs {
    /// Number of histogram buckets
    #[arg(long, conflicts_with = "binwidth")]
    pub bins: Option<usize>,

    /// Approximate bucket width instead of a bucket count
    #[arg(long)]
    pub binwidth: Option<f64>,

    /// Decimal places on bucket edges (negative rounds to tens, hundreds…)
    #[arg(long, allow_negative_numbers = true)]
    pub precision: Option<i32>,

    /// Bar glyph
    #[arg(long)]
    pub symbol: Option<String>,

    /// Longest bar, in symbols
    #[arg(long)]
    pub max_symbols: Option<usize>,

    /// Order buckets by label or by count
    #[arg(long, value_enum, default_value_t = SortKey::Index)]
    pub sort: SortKey,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Index,
    Values,
}

impl From<SortKey> for SortBy {
    fn from(k: SortKey) -> Self {
        match k {
            SortKey::Index => SortBy::Index,
            SortKey::Values => SortBy::Values,
        }
    }
}

impl ChartArgs {
    #[must_use]
    pub fn order(&self) -> Order {
        if self.desc {
            Order::Descending
        } else {
            Order::Ascending
        }
    }
}
