use std::io;
use std::process::ExitCode;

use car_ranking::cli::{self, Cli};
use clap::Parser;

fn main() -> ExitCode {
    let args = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();

    match cli::run(&args, stdin.lock(), stdout.lock()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
