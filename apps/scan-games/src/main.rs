//! Reads an emulator's config, finds its games and writes the JSON manifest
//! the front end loads.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use romshelf_scanner::{Platform, ScanOutcome, ScanRequest, resolver_from_settings, scan};
use romshelf_settings::{Settings, init_file_logging};

#[derive(Parser)]
#[command(name = "scan-games", version)]
#[command(about = "Scan an emulator's library and write a game manifest", long_about = None)]
struct Cli {
    #[command(subcommand)]
    platform: PlatformCommand,
}

#[derive(Subcommand)]
enum PlatformCommand {
    /// Eden (qt-config.ini)
    Switch(Locations),
    /// Dolphin (Dolphin.ini)
    Wii(Locations),
    /// RPCS3 (games.yml)
    Ps3(Locations),
}

#[derive(Args)]
struct Locations {
    /// Emulator config directory (default: the emulator's usual location)
    config_dir: Option<PathBuf>,
    /// Manifest path (default: data/<platform>_games.json next to the executable)
    output_path: Option<PathBuf>,
}

impl PlatformCommand {
    fn into_request(self) -> ScanRequest {
        let (platform, locations) = match self {
            PlatformCommand::Switch(l) => (Platform::Switch, l),
            PlatformCommand::Wii(l) => (Platform::Wii, l),
            PlatformCommand::Ps3(l) => (Platform::Ps3, l),
        };
        ScanRequest::with_defaults(platform, locations.config_dir, locations.output_path)
    }
}

fn main() -> ExitCode {
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
    let request = cli.platform.into_request();

    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    init_file_logging(&settings.log_file(), request.platform.log_mode());
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "invalid settings, using defaults");
    }

    match run(&request, &settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(request: &ScanRequest, settings: &Settings) -> anyhow::Result<ScanOutcome> {
    let icons = resolver_from_settings(settings);
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    // The scan logs its own failure.
    Ok(rt.block_on(scan(request, icons.as_ref()))?)
}
