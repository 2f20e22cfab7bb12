//! Brings the first visible window whose title starts with the given text to
//! the foreground.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use romshelf_focus::{FocusOutcome, NativeWindows, force_focus};
use romshelf_settings::{LogMode, Settings, init_file_logging};

#[derive(Parser)]
#[command(name = "focus-window", version)]
#[command(about = "Restore and focus a window by the start of its title", long_about = None)]
struct Cli {
    /// Leading part of the window title, e.g. "Dolphin"
    partial_title: String,
}

fn main() -> ExitCode {
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    init_file_logging(&settings.log_file(), LogMode::Truncate);
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "invalid settings, using defaults");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            tracing::warn!("no window title given");
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    match force_focus(&NativeWindows, &cli.partial_title) {
        FocusOutcome::Focused(window) => {
            tracing::info!(title = %window.title, "window focused");
        }
        FocusOutcome::Refused(window) => {
            tracing::warn!(title = %window.title, "window restored but not brought to front");
        }
        FocusOutcome::NotFound | FocusOutcome::Failed => {}
    }
    ExitCode::SUCCESS
}
