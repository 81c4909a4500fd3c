//! stringsweep - In-place translation of quoted string literals
//!
//! Entry point for the stringsweep CLI application.

use clap::Parser;
use stringsweep::{cli::Cli, error::ExitCode};
use yansi::Paint;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();
    if cli.no_color {
        yansi::disable();
    }

    // Run the application logic
    match stringsweep::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            let prefix = format!("[{}] Error:", exit_code.code_prefix());
            eprintln!("{} {:#}", prefix.red().bold(), err);
            log::error!("{:#}", err);

            std::process::exit(exit_code.as_i32());
        }
    }
}
