//! Game records and the plain-text table they are persisted in.

use std::{
    error::Error,
    fmt::{self, Display},
    io::{BufRead, BufReader, Read},
};

use crate::core::constants::{DECIMAL_PRECISION, STATS_COLUMNS};

// --- Public Row Structs ---

/// Counters of one round. Provisional until the round is won.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameResult {
    pub game_id: u64,
    pub n_guesses: u32,
    /// Seconds from the first prompt to the winning guess.
    pub time_to_win: f64,
}

impl GameResult {
    #[must_use]
    pub fn provisional(game_id: u64) -> Self {
        Self {
            game_id,
            n_guesses: 0,
            time_to_win: 0.0,
        }
    }

    /// Only a won round has positive counters on every column.
    ///
    /// # Errors
    /// A human-readable reason naming the first offending field.
    pub fn check_finalized(&self) -> Result<(), String> {
        if self.game_id == 0 {
            return Err("game_id must be positive".into());
        }
        if self.n_guesses == 0 {
            return Err("n_guesses must be positive".into());
        }
        if !self.time_to_win.is_finite() || self.time_to_win <= 0.0 {
            return Err(format!(
                "time_to_win must be a positive number, got {}",
                self.time_to_win
            ));
        }
        Ok(())
    }

    /// One persisted line in canonical column order, without the terminator.
    #[must_use]
    pub fn to_csv_row(&self) -> String {
        StatColumn::ALL
            .iter()
            .map(|c| c.format_cell(self))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The three persisted columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatColumn {
    GameId,
    NGuesses,
    TimeToWin,
}

impl StatColumn {
    pub const ALL: [StatColumn; 3] = [Self::GameId, Self::NGuesses, Self::TimeToWin];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GameId => STATS_COLUMNS[0],
            Self::NGuesses => STATS_COLUMNS[1],
            Self::TimeToWin => STATS_COLUMNS[2],
        }
    }

    /// Look a column up by its header name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    #[must_use]
    pub fn value(self, r: &GameResult) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::GameId => r.game_id as f64,
            Self::NGuesses => f64::from(r.n_guesses),
            Self::TimeToWin => r.time_to_win,
        }
    }

    #[must_use]
    pub fn format_cell(self, r: &GameResult) -> String {
        match self {
            Self::GameId => r.game_id.to_string(),
            Self::NGuesses => r.n_guesses.to_string(),
            Self::TimeToWin => {
                let decimals = DECIMAL_PRECISION.unsigned_abs() as usize;
                format!("{:.decimals$}", r.time_to_win)
            }
        }
    }
}

impl fmt::Display for StatColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header line of a fresh stats file, without the terminator.
#[must_use]
pub fn csv_header() -> String {
    STATS_COLUMNS.join(",")
}

/// Round half away from zero to `digits` decimal places. Negative `digits`
/// rounds to tens, hundreds, ...
#[must_use]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let rounded = if digits >= 0 {
        let scale = 10f64.powi(digits);
        (value * scale).round() / scale
    } else {
        let scale = 10f64.powi(-digits);
        (value / scale).round() * scale
    };
    if rounded.is_finite() { rounded } else { value }
}

// --- Error Handling ---
#[derive(Debug)]
pub struct ParseCsvError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug)]
pub enum ParseErrorKind {
    Io(std::io::Error),
    NoHeader,
    TooManyFields { expected: usize, got: usize },
}

impl Display for ParseCsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Io(e) => write!(f, "I/O error on line {}: {}", self.line, e),
            ParseErrorKind::NoHeader => write!(f, "no header row"),
            ParseErrorKind::TooManyFields { expected, got } => write!(
                f,
                "line {}: expected {} fields, saw {}",
                self.line, expected, got
            ),
        }
    }
}
impl Error for ParseCsvError {}

// --- Raw table ---

/// Untyped cells exactly as found in the file, one `Vec` per data line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

#[inline]
fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|f| unquote(f.trim()).to_owned()).collect()
}

#[inline]
fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

/// Read a comma-separated table. Blank lines are skipped; short rows are
/// padded with empty cells, which later fail coercion.
///
/// # Errors
/// I/O failures, a missing header, or a data row wider than the header.
pub fn read_table<R: Read>(src: R) -> Result<RawTable, ParseCsvError> {
    let mut rdr = BufReader::new(src);
    let mut buf = Vec::<u8>::with_capacity(64);
    let mut table = RawTable::default();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = rdr.read_until(b'\n', &mut buf).map_err(|e| ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::Io(e),
        })?;
        if n == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = split_fields(line);
        if table.header.is_empty() {
            table.header = fields;
            continue;
        }
        let width = table.header.len();
        if fields.len() > width {
            return Err(ParseCsvError {
                line: line_no,
                kind: ParseErrorKind::TooManyFields {
                    expected: width,
                    got: fields.len(),
                },
            });
        }
        fields.resize(width, String::new());
        table.rows.push(fields);
    }

    if table.header.is_empty() {
        return Err(ParseCsvError {
            line: 0,
            kind: ParseErrorKind::NoHeader,
        });
    }
    Ok(table)
}

// --- Coercion ---

/// Integer cell, accepting integral floats such as `3.0`. `None` is the
/// missing marker.
#[must_use]
pub fn coerce_int(cell: &str) -> Option<i64> {
    if let Ok(v) = lexical_core::parse::<i64>(cell.as_bytes()) {
        return Some(v);
    }
    let v = coerce_float(cell)?;
    #[allow(clippy::cast_precision_loss)]
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    if v.fract() != 0.0 || !in_range {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = v as i64;
    Some(whole)
}

/// Finite float cell. `None` is the missing marker.
#[must_use]
pub fn coerce_float(cell: &str) -> Option<f64> {
    lexical_core::parse::<f64>(cell.as_bytes())
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let src = "game_id,n_guesses,time_to_win\n1,5,12.5\r\n\n2,7,30\n";
        let t = read_table(src.as_bytes()).unwrap();
        assert_eq!(t.header, ["game_id", "n_guesses", "time_to_win"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1], ["2", "7", "30"]);
        assert_eq!(t.column_index("time_to_win"), Some(2));
        assert_eq!(t.column_index("nope"), None);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = read_table("a,b,c\n1,2\n".as_bytes()).unwrap();
        assert_eq!(t.rows[0], ["1", "2", ""]);
    }

    #[test]
    fn wide_rows_are_fatal() {
        let err = read_table("a,b\n1,2\n1,2,3\n".as_bytes()).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(matches!(
            err.kind,
            ParseErrorKind::TooManyFields {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = read_table("\n\n".as_bytes()).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::NoHeader));
    }

    #[test]
    fn coercion_marks_missing() {
        assert_eq!(coerce_int("42"), Some(42));
        assert_eq!(coerce_int("-3"), Some(-3));
        assert_eq!(coerce_int("3.0"), Some(3));
        assert_eq!(coerce_int("3.5"), None);
        assert_eq!(coerce_int("abc"), None);
        assert_eq!(coerce_int(""), None);
        assert_eq!(coerce_float("12.25"), Some(12.25));
        assert_eq!(coerce_float("7"), Some(7.0));
        assert_eq!(coerce_float("NaN"), None);
        assert_eq!(coerce_float("x1"), None);
    }

    #[test]
    fn quoted_cells_are_unwrapped() {
        let t = read_table("\"game_id\",b\n\"4\",5\n".as_bytes()).unwrap();
        assert_eq!(t.header[0], "game_id");
        assert_eq!(t.rows[0][0], "4");
    }

    #[test]
    fn rows_use_two_decimals() {
        let r = GameResult {
            game_id: 3,
            n_guesses: 9,
            time_to_win: 41.5,
        };
        assert_eq!(r.to_csv_row(), "3,9,41.50");
        assert_eq!(csv_header(), "game_id,n_guesses,time_to_win");
    }

    #[test]
    fn columns_by_name() {
        assert_eq!(StatColumn::from_name("n_guesses"), Some(StatColumn::NGuesses));
        assert_eq!(StatColumn::from_name("guesses"), None);
        let r = GameResult {
            game_id: 2,
            n_guesses: 6,
            time_to_win: 3.25,
        };
        assert!((StatColumn::TimeToWin.value(&r) - 3.25).abs() < f64::EPSILON);
        assert_eq!(StatColumn::GameId.format_cell(&r), "2");
    }

    #[test]
    fn finalized_check() {
        assert!(GameResult::provisional(1).check_finalized().is_err());
        let ok = GameResult {
            game_id: 1,
            n_guesses: 1,
            time_to_win: 0.01,
        };
        assert!(ok.check_finalized().is_ok());
        let zero_id = GameResult { game_id: 0, ..ok };
        assert!(zero_id.check_finalized().is_err());
    }

    #[test]
    fn rounding_supports_negative_precision() {
        assert!((round_to(14.832, 2) - 14.83).abs() < 1e-9);
        assert!((round_to(1234.0, -1) - 1230.0).abs() < 1e-9);
        assert!((round_to(1250.0, -2) - 1300.0).abs() < 1e-9);
        assert!((round_to(2.5, 0) - 3.0).abs() < 1e-9);
    }
}
