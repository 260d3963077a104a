pub mod handlers;
pub mod menu;
pub mod parse;
pub mod tty;

use std::io;

use clap::Parser;
pub use parse::Cli;

use crate::core::{bounds::terminal_width, error::AppError, rng::game_rng, stats::StatsStore};
use parse::Command;
use tty::Console;

/// Default filter `error`, `debug` with `--verbose`; `RUST_LOG` overrides.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Parse the command line and run the chosen command on stdin / stdout.
///
/// # Errors
/// Anything a command fails with; the caller reports it.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut con = Console::new(io::stdin().lock(), io::stdout().lock()).with_clear(!cli.no_clear);
    let mut rng = game_rng(cli.seed);

    match cli.cmd.unwrap_or(Command::Menu) {
        Command::Init => handlers::init(&mut con, &cli.file),
        Command::Menu => {
            let mut store = StatsStore::load(&cli.file);
            handlers::report_issues(&mut con, &store)?;
            menu::run_menu(&mut con, &mut store, &mut rng, terminal_width())
        }
        Command::Play => {
            let mut store = StatsStore::load(&cli.file);
            handlers::report_issues(&mut con, &store)?;
            handlers::play_session(&mut con, &mut store, &mut rng)
        }
        Command::Stats(a) => {
            let store = StatsStore::load(&cli.file);
            handlers::report_issues(&mut con, &store)?;
            handlers::show_stats(&mut con, &store, a.view, &a.chart, terminal_width())
        }
    }
}
