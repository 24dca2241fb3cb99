mod args;
mod check;
mod cli;
mod logging;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run(std::env::args()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}
