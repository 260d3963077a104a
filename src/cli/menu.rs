//! Numbered text menus around the game and the stats views.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::core::{constants::ABORT_TOKEN, error::AppError, stats::StatsStore};

use super::{
    handlers,
    parse::{ChartArgs, StatsView},
    tty::Console,
};

const MENU_WIDTH: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Main,
    Stats,
}

impl Screen {
    fn title(self) -> &'static str {
        match self {
            Screen::Main => "BULLS AND COWS",
            Screen::Stats => "STATS",
        }
    }

    fn items(self) -> &'static [&'static str] {
        match self {
            Screen::Main => &["New Game", "Stats", "Quit Game"],
            Screen::Stats => &["Raw Data", "Number of Guesses", "Time to win", "Main Menu"],
        }
    }

    fn render(self) -> String {
        let rule = "=".repeat(MENU_WIDTH);
        let mut lines = vec![
            rule.clone(),
            format!("{:^MENU_WIDTH$}", self.title()),
            rule.clone(),
        ];
        lines.extend(
            self.items()
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}) {item}", i + 1)),
        );
        lines.push(rule);
        lines.join("\n")
    }
}

/// Interactive loop; returns when the player quits or input ends.
///
/// # Errors
/// Whatever the game or stats handlers fail with.
pub fn run_menu<R: BufRead, W: Write, G: Rng + ?Sized>(
    con: &mut Console<R, W>,
    store: &mut StatsStore,
    rng: &mut G,
    columns: usize,
) -> Result<(), AppError> {
    let chart = ChartArgs::default();
    let mut screen = Screen::Main;
    let mut redraw = true;

    loop {
        if redraw {
            con.say(screen.render())?;
        }
        redraw = true;
        let Some(line) = con.prompt()? else {
            return Ok(());
        };
        let choice = line.trim();

        match (screen, choice) {
            (_, ABORT_TOKEN) | (Screen::Main, "3") => {
                con.say("Goodbye!")?;
                return Ok(());
            }
            (Screen::Main, "1") => {
                con.clear()?;
                handlers::play_session(con, store, rng)?;
                con.clear()?;
            }
            (Screen::Main, "2") => {
                con.clear()?;
                screen = Screen::Stats;
            }
            (Screen::Stats, "1") => {
                handlers::show_stats(con, store, StatsView::Raw, &chart, columns)?;
            }
            (Screen::Stats, "2") => {
                handlers::show_stats(con, store, StatsView::Guesses, &chart, columns)?;
            }
            (Screen::Stats, "3") => {
                handlers::show_stats(con, store, StatsView::Time, &chart, columns)?;
            }
            (Screen::Stats, "4") => {
                con.clear()?;
                screen = Screen::Main;
            }
            (_, other) => {
                con.say(format!("'{other}' is not a valid selection!"))?;
                redraw = false;
            }
        }
    }
}
