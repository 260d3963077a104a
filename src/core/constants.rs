//! A collection of constants.

/// Number of digits in the secret and in every guess.
pub const SECRET_LEN: usize = 4;

/// Typing this instead of a guess gives up the current round.
pub const ABORT_TOKEN: &str = "*";

/// Winning times and averages are rounded to two decimal places.
///
/// 14.832 becomes 14.83
pub const DECIMAL_PRECISION: i32 = 2;

/// Shortest winning time that will be recorded, in seconds.
pub const MIN_TIME_TO_WIN: f64 = 0.01;

/// Stats file used when `--file` is not given.
pub const DEFAULT_STATS_FILE: &str = "global_game_stats.csv";

/// Header row of the persisted stats table.
pub const STATS_COLUMNS: [&str; 3] = ["game_id", "n_guesses", "time_to_win"];

/// Longest bar the chart renderer draws unless told otherwise.
pub const DEFAULT_MAX_SYMBOLS: usize = 100;
/// Default bar glyph.
pub const DEFAULT_SYMBOL: &str = "#";

/// Histogram bucket count when neither `n` nor a bin width is given.
pub const DEFAULT_BINS: usize = 10;
/// Upper bound on histogram buckets, whether asked for or derived from a width.
pub const MAX_BINS: usize = 1000;
/// Decimal places kept on histogram bucket edges by default.
pub const DEFAULT_BIN_PRECISION: i32 = 3;

/// Columns reserved next to the bars: label separator, space and count.
pub const CHART_GUTTER: usize = 3;
/// Never shrink bars below this, even on a tiny terminal.
pub const MIN_CHART_SYMBOLS: usize = 10;
