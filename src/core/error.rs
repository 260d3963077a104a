//! Centralised error types used across the crate.

use std::{error::Error, fmt, io, path::PathBuf};

use crate::core::constants::MAX_BINS;

/// One broken guess rule. A single guess can break several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    NotNumeric,
    WrongLength,
    LeadingZero,
    RepeatedDigit,
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GuessError::NotNumeric => "Guess must be a number!",
            GuessError::WrongLength => "Guessed number must be 4 digits long!",
            GuessError::LeadingZero => "Guessed number must not start with a 0!",
            GuessError::RepeatedDigit => "Each digit must be unique!",
        };
        f.write_str(msg)
    }
}
impl Error for GuessError {}

/// Rejected chart / histogram settings.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptySymbol,
    MaxSymbols(usize),
    BinCount(usize),
    BinWidth(f64),
    /// A bin width that splits the data range into more than `MAX_BINS`.
    TooManyBins { width: f64, needed: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySymbol => write!(f, "invalid setting: `symbol` must not be empty"),
            ConfigError::MaxSymbols(n) => {
                write!(f, "invalid setting: `max_symbols` must be > 0, got {n}")
            }
            ConfigError::BinCount(n) => write!(
                f,
                "invalid setting: `n` must be between 1 and {MAX_BINS}, got {n}"
            ),
            ConfigError::BinWidth(w) => {
                write!(f, "invalid setting: `binwidth` must be a number > 0, got {w}")
            }
            ConfigError::TooManyBins { width, needed } => write!(
                f,
                "invalid setting: `binwidth` {width} needs {needed} buckets, at most {MAX_BINS} allowed"
            ),
        }
    }
}
impl Error for ConfigError {}

/// Failures of the statistics store that callers must act on.
#[derive(Debug)]
pub enum StoreError {
    /// Loading failed earlier; the store refuses to write.
    Unavailable,
    /// Only finalized results may be persisted.
    MalformedResult(String),
    UnknownColumn(String),
    AlreadyExists(PathBuf),
    Io(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "stats are unavailable, nothing was saved"),
            StoreError::MalformedResult(why) => write!(f, "refusing to store result: {why}"),
            StoreError::UnknownColumn(c) => write!(f, "no column `{c}` in stats"),
            StoreError::AlreadyExists(p) => write!(f, "'{}' already exists", p.display()),
            StoreError::Io(e) => write!(f, "{e}"),
        }
    }
}
impl Error for StoreError {}

/// Charts that cannot be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartError {
    EmptyData,
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::EmptyData => write!(f, "invalid input: nothing to chart"),
        }
    }
}
impl Error for ChartError {}

/// Misuse of a game round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The round already ended in a win or an abort.
    Finished,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Finished => write!(f, "the game is already over"),
        }
    }
}
impl Error for GameError {}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Config(ConfigError),
    Store(StoreError),
    Chart(ChartError),
    Game(GameError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "{e}"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Store(e) => write!(f, "{e}"),
            AppError::Chart(e) => write!(f, "{e}"),
            AppError::Game(e) => write!(f, "{e}"),
        }
    }
}
impl Error for AppError {}

// automatic conversions
impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
impl From<ChartError> for AppError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}
impl From<GameError> for AppError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}
