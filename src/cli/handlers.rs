use std::io::{BufRead, Write};

use log::{debug, error};
use rand::Rng;

use crate::{
    core::{
        config::{ChartConfig, HistogramSpec},
        constants::{ABORT_TOKEN, DEFAULT_BINS, DEFAULT_MAX_SYMBOLS},
        data::{GameResult, StatColumn},
        error::{AppError, StoreError},
        game::{Game, Outcome},
        stats::StatsStore,
    },
    render::{chart::Chart, table::render_raw_table},
};

use super::{
    parse::{ChartArgs, StatsView},
    tty::Console,
};

const RULE: &str = "--------------------";

/// Print every load problem of `store`.
///
/// # Errors
/// I/O on the console.
pub fn report_issues<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    store: &StatsStore,
) -> Result<(), AppError> {
    for issue in store.issues() {
        con.say(issue)?;
    }
    if !store.is_valid() {
        con.say("Stats are unavailable; games will not be saved.")?;
    }
    Ok(())
}

/// One round from the first prompt to a win or an abort. End of input
/// counts as an abort.
///
/// # Errors
/// I/O on the console, or a finished game that could not be stored
/// because it was malformed.
pub fn play_round<R: BufRead, W: Write, G: Rng + ?Sized>(
    con: &mut Console<R, W>,
    store: &mut StatsStore,
    rng: &mut G,
) -> Result<Option<GameResult>, AppError> {
    let mut game = Game::new(store.next_id(), rng);
    debug!("starting game {}", game.game_id());

    con.say(format!("Enter your guess ('{ABORT_TOKEN}' to quit):"))?;
    con.say(RULE)?;
    game.start_clock();

    loop {
        let line = con.prompt()?.unwrap_or_else(|| ABORT_TOKEN.to_owned());
        match game.submit(&line)? {
            Outcome::Invalid(errors) => {
                for e in errors {
                    con.say(e)?;
                }
            }
            Outcome::Scored(tally) => con.say(tally.to_string().trim_end())?,
            Outcome::Won { tally, result } => {
                con.say(tally.to_string().trim_end())?;
                victory(con, store, &result)?;
                persist(con, store, result)?;
                return Ok(Some(result));
            }
            Outcome::Aborted { secret } => {
                con.say("-game aborted-")?;
                con.say(format!("The number was {secret}"))?;
                return Ok(None);
            }
        }
    }
}

/// Averages come from the games stored before this one.
fn victory<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    store: &StatsStore,
    result: &GameResult,
) -> Result<(), AppError> {
    con.say("Success!")?;

    let average = |col: StatColumn, unit: &str| {
        store
            .summary(col)
            .filter(|_| store.is_valid())
            .map_or_else(String::new, |s| {
                format!(" (average: {}{unit})", s.rounded_mean())
            })
    };
    con.say(format!(
        "Guesses: {}{}",
        result.n_guesses,
        average(StatColumn::NGuesses, "")
    ))?;
    con.say(format!(
        "Game time: {}s{}",
        StatColumn::TimeToWin.format_cell(result),
        average(StatColumn::TimeToWin, "s")
    ))?;
    Ok(())
}

fn persist<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    store: &mut StatsStore,
    result: GameResult,
) -> Result<(), AppError> {
    match store.append(result) {
        Ok(()) => Ok(()),
        Err(StoreError::Unavailable) => {
            con.say("Stats are unavailable; this game was not saved.")?;
            Ok(())
        }
        Err(e @ StoreError::MalformedResult(_)) => Err(e.into()),
        Err(e) => {
            error!("could not save game {}: {e}", result.game_id);
            con.say(format!("Could not save this game: {e}"))?;
            Ok(())
        }
    }
}

/// Rounds until the player declines another.
///
/// # Errors
/// See [`play_round`].
pub fn play_session<R: BufRead, W: Write, G: Rng + ?Sized>(
    con: &mut Console<R, W>,
    store: &mut StatsStore,
    rng: &mut G,
) -> Result<(), AppError> {
    loop {
        play_round(con, store, rng)?;
        con.say(RULE)?;
        con.say("Play again? (1)Yes (0)No")?;
        if con.prompt()?.as_deref().map(str::trim) != Some("1") {
            return Ok(());
        }
        con.clear()?;
    }
}

/// Column, axis label and default edge precision of a chart view.
fn chart_preset(view: StatsView) -> Option<(StatColumn, &'static str, i32)> {
    match view {
        StatsView::Raw => None,
        StatsView::Guesses => Some((StatColumn::NGuesses, "GUESSES", 0)),
        StatsView::Time => Some((StatColumn::TimeToWin, "TIME TO WIN(s)", -1)),
    }
}

/// Histogram of one stats column, ordered and fitted for display.
///
/// # Errors
/// [`AppError::Config`] for invalid chart settings.
pub fn build_chart(
    store: &StatsStore,
    col: StatColumn,
    label: &str,
    default_precision: i32,
    args: &ChartArgs,
) -> Result<Chart, AppError> {
    let precision = args.precision.unwrap_or(default_precision);
    let spec = match args.binwidth {
        Some(w) => HistogramSpec::with_width(w, precision)?,
        None => HistogramSpec::with_count(args.bins.unwrap_or(DEFAULT_BINS), precision)?,
    };
    let cfg = ChartConfig::builder()
        .labels(label, "GAMES")
        .symbol_opt(args.symbol.as_deref())
        .max_symbols(args.max_symbols.unwrap_or(DEFAULT_MAX_SYMBOLS))
        .build()?;

    let mut chart = Chart::histogram(&store.column(col), spec, cfg)?;
    chart.sort(args.sort.into(), args.order());
    Ok(chart)
}

/// Print the raw table or one of the charts.
///
/// # Errors
/// I/O on the console or invalid chart settings.
pub fn show_stats<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    store: &StatsStore,
    view: StatsView,
    args: &ChartArgs,
    columns: usize,
) -> Result<(), AppError> {
    if !store.is_valid() {
        con.say("No stats to show.")?;
        return Ok(());
    }

    let Some((col, label, precision)) = chart_preset(view) else {
        con.say(render_raw_table(store.rows()))?;
        return Ok(());
    };
    let mut chart = build_chart(store, col, label, precision, args)?;
    chart.fit_width(columns);
    match chart.render() {
        Ok(text) => con.say(text)?,
        Err(e) => con.say(e)?,
    }
    Ok(())
}

/// `bulls-cows init`
///
/// # Errors
/// The file already exists, or I/O.
pub fn init<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    path: &std::path::Path,
) -> Result<(), AppError> {
    let store = StatsStore::init(path)?;
    con.say(format!("Created '{}'", store.path().display()))?;
    Ok(())
}
