//! Starts an emulator on a game and exits without waiting for it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use romshelf_launcher::{LaunchRequest, launch};
use romshelf_settings::init_console_logging;

#[derive(Parser)]
#[command(name = "launch-game", version)]
#[command(about = "Launch an emulator fullscreen on a game file", long_about = None)]
struct Cli {
    /// Path to the emulator executable
    emulator_path: PathBuf,
    /// Path to the game file
    game_path: PathBuf,
}

fn main() -> ExitCode {
    init_console_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let request = LaunchRequest::new(cli.emulator_path, cli.game_path);
    println!("Executing: {}", request.command_line());

    match launch(&request) {
        Ok(pid) => {
            tracing::info!(pid, "emulator started");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
