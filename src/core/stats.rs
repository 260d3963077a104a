//! Append-only store of finished games.
//!
//! Loading never fails outright. A missing or unparseable file, or one
//! without the required columns, leaves an empty table and a store that
//! refuses to write. Rows with unusable cells are dropped with a warning and
//! the store stays writable.

use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::core::{
    bounds::Summary,
    data::{GameResult, RawTable, StatColumn, coerce_float, coerce_int, csv_header, read_table},
    error::StoreError,
};

/// Something worth telling the player about the stats file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreIssue {
    MissingFile(PathBuf),
    BadLines(String),
    MissingColumns(Vec<&'static str>),
    DroppedWrongType(usize),
    DroppedInvalid(usize),
}

impl StoreIssue {
    /// Warnings describe a cleanup; everything else disables the store.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::DroppedWrongType(_) | Self::DroppedInvalid(_))
    }
}

impl fmt::Display for StoreIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile(p) => write!(
                f,
                "Stats import failed! File '{}' does not exist!",
                p.display()
            ),
            Self::BadLines(why) => write!(f, "Stats import failed! Bad lines in file! ({why})"),
            Self::MissingColumns(cols) => write!(
                f,
                "Stats validation Error! Column(s) {} are missing!",
                cols.join(", ")
            ),
            Self::DroppedWrongType(n) => write!(
                f,
                "Warning! Removed {n} rows with wrong data type from global stats"
            ),
            Self::DroppedInvalid(n) => write!(
                f,
                "Warning! Removed {n} rows with invalid values from global stats"
            ),
        }
    }
}

/// Rows removed by [`repair`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RepairReport {
    /// A cell failed type coercion.
    pub wrong_type: usize,
    /// Every cell coerced but one of them was `<= 0`.
    pub invalid_value: usize,
}

impl RepairReport {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.wrong_type + self.invalid_value
    }
}

/// Turn raw cells into typed rows, dropping what cannot be trusted.
///
/// # Errors
/// The names of the required columns absent from the header.
pub fn repair(table: &RawTable) -> Result<(Vec<GameResult>, RepairReport), Vec<&'static str>> {
    let mut idx = [0usize; 3];
    let mut missing = Vec::new();
    for (slot, col) in idx.iter_mut().zip(StatColumn::ALL) {
        match table.column_index(col.name()) {
            Some(i) => *slot = i,
            None => missing.push(col.name()),
        }
    }
    if !missing.is_empty() {
        return Err(missing);
    }

    let mut report = RepairReport::default();

    // pass 1: coerce, `None` marks a missing cell
    let typed: Vec<(i64, i64, f64)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let id = coerce_int(&row[idx[0]]);
            let guesses = coerce_int(&row[idx[1]]);
            let time = coerce_float(&row[idx[2]]);
            let coerced = id.zip(guesses).zip(time).map(|((a, b), c)| (a, b, c));
            if coerced.is_none() {
                report.wrong_type += 1;
            }
            coerced
        })
        .collect();

    // pass 2: every column must be strictly positive
    let rows: Vec<GameResult> = typed
        .into_iter()
        .filter_map(|(id, guesses, time)| {
            let row = positive_row(id, guesses, time);
            if row.is_none() {
                report.invalid_value += 1;
            }
            row
        })
        .collect();

    Ok((rows, report))
}

fn positive_row(id: i64, guesses: i64, time: f64) -> Option<GameResult> {
    if id <= 0 || guesses <= 0 || time <= 0.0 {
        return None;
    }
    Some(GameResult {
        game_id: u64::try_from(id).ok()?,
        n_guesses: u32::try_from(guesses).ok()?,
        time_to_win: time,
    })
}

/// Single owner of the stats table and its backing file.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    /// Header as found on disk; appended rows follow its column order.
    header: Vec<String>,
    rows: Vec<GameResult>,
    valid: bool,
    issues: Vec<StoreIssue>,
    report: RepairReport,
}

impl StatsStore {
    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            header: Vec::new(),
            rows: Vec::new(),
            valid: false,
            issues: Vec::new(),
            report: RepairReport::default(),
        }
    }

    fn invalidate(&mut self, issue: StoreIssue) {
        warn!("{issue}");
        self.valid = false;
        self.rows.clear();
        self.issues.push(issue);
    }

    /// Load and repair the table at `path`. Problems are recorded as
    /// [`issues`](Self::issues), never returned.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match File::open(&path) {
            Ok(file) => Self::from_reader(path, file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let mut store = Self::empty(path.clone());
                store.invalidate(StoreIssue::MissingFile(path));
                store
            }
            Err(e) => {
                let mut store = Self::empty(path);
                store.invalidate(StoreIssue::BadLines(e.to_string()));
                store
            }
        }
    }

    /// Same as [`load`](Self::load) with the content supplied by `src`;
    /// `path` is where appends will go.
    pub fn from_reader<R: Read>(path: impl Into<PathBuf>, src: R) -> Self {
        let mut store = Self::empty(path.into());
        let table = match read_table(src) {
            Ok(t) => t,
            Err(e) => {
                store.invalidate(StoreIssue::BadLines(e.to_string()));
                return store;
            }
        };
        store.header.clone_from(&table.header);

        match repair(&table) {
            Ok((rows, report)) => {
                store.valid = true;
                store.rows = rows;
                store.report = report;
                if report.wrong_type > 0 {
                    let issue = StoreIssue::DroppedWrongType(report.wrong_type);
                    warn!("{issue}");
                    store.issues.push(issue);
                }
                if report.invalid_value > 0 {
                    let issue = StoreIssue::DroppedInvalid(report.invalid_value);
                    warn!("{issue}");
                    store.issues.push(issue);
                }
                debug!(
                    "loaded {} games from '{}', dropped {}",
                    store.rows.len(),
                    store.path.display(),
                    report.dropped()
                );
            }
            Err(missing) => store.invalidate(StoreIssue::MissingColumns(missing)),
        }
        store
    }

    /// Create a header-only stats file at `path` and open it.
    ///
    /// # Errors
    /// [`StoreError::AlreadyExists`] if something is already there, or I/O.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(path));
            }
            Err(e) => return Err(e.into()),
        };
        writeln!(file, "{}", csv_header())?;
        debug!("created stats file '{}'", path.display());

        let mut store = Self::empty(path);
        store.header = StatColumn::ALL.iter().map(|c| c.name().to_owned()).collect();
        store.valid = true;
        Ok(store)
    }

    // --- Accessors ---

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Whether appends will be persisted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
    #[must_use]
    pub fn issues(&self) -> &[StoreIssue] {
        &self.issues
    }
    #[must_use]
    pub fn report(&self) -> RepairReport {
        self.report
    }
    #[must_use]
    pub fn rows(&self) -> &[GameResult] {
        &self.rows
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Id for the next game: one past the largest seen, or 1.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.rows.iter().map(|r| r.game_id).max().map_or(1, |m| m + 1)
    }

    #[must_use]
    pub fn column(&self, col: StatColumn) -> Vec<f64> {
        self.rows.iter().map(|r| col.value(r)).collect()
    }

    /// # Errors
    /// [`StoreError::UnknownColumn`] for a name outside the fixed schema.
    pub fn column_by_name(&self, name: &str) -> Result<Vec<f64>, StoreError> {
        StatColumn::from_name(name)
            .map(|c| self.column(c))
            .ok_or_else(|| StoreError::UnknownColumn(name.to_owned()))
    }

    /// Min / mean / max of a column, `None` when there are no rows.
    #[must_use]
    pub fn summary(&self, col: StatColumn) -> Option<Summary> {
        Summary::of(&self.column(col))
    }

    // --- Writes ---

    /// Persist one finished game, then keep it in memory.
    ///
    /// # Errors
    /// [`StoreError::Unavailable`] on an invalid store,
    /// [`StoreError::MalformedResult`] for a result that is not finalized,
    /// or I/O.
    pub fn append(&mut self, result: GameResult) -> Result<(), StoreError> {
        if !self.valid {
            return Err(StoreError::Unavailable);
        }
        result
            .check_finalized()
            .map_err(StoreError::MalformedResult)?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)?;
        let mut line = String::new();
        if !ends_with_newline(&mut file)? {
            line.push('\n');
        }
        line.push_str(&self.row_for_file(&result));
        line.push('\n');
        file.write_all(line.as_bytes())?;

        debug!(
            "appended game {} to '{}'",
            result.game_id,
            self.path.display()
        );
        self.rows.push(result);
        Ok(())
    }

    /// Lay the result out in the file's own column order; unknown columns
    /// get an empty cell.
    fn row_for_file(&self, r: &GameResult) -> String {
        self.header
            .iter()
            .map(|h| StatColumn::from_name(h).map_or_else(String::new, |c| c.format_cell(r)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
