use std::process::ExitCode;

fn main() -> ExitCode {
    match bulls_cows::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
