//! Fire-and-forget emulator launcher.
//!
//! Starts an emulator in fullscreen on a game file and returns straight away,
//! leaving the child running on its own.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Flags passed ahead of the game path: fullscreen, then the game to boot.
pub const EMULATOR_FLAGS: &[&str] = &["-f", "-g"];

/// Errors from launching an emulator.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// An emulator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub emulator: PathBuf,
    pub game: PathBuf,
}

impl LaunchRequest {
    pub fn new(emulator: impl Into<PathBuf>, game: impl Into<PathBuf>) -> Self {
        Self {
            emulator: emulator.into(),
            game: game.into(),
        }
    }

    /// Arguments handed to the emulator.
    pub fn args(&self) -> Vec<OsString> {
        EMULATOR_FLAGS
            .iter()
            .map(OsString::from)
            .chain(std::iter::once(self.game.clone().into_os_string()))
            .collect()
    }

    /// Human-readable command line, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.emulator.as_os_str().to_string_lossy())
            .chain(EMULATOR_FLAGS.iter().map(|f| (*f).into()))
            .chain(std::iter::once(self.game.as_os_str().to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.emulator);
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut cmd);
        cmd
    }
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows_sys::Win32::System::Threading::{CREATE_NEW_PROCESS_GROUP, DETACHED_PROCESS};

    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(windows))]
fn detach(_cmd: &mut Command) {}

/// Spawns the emulator without waiting for it. Returns the child's PID.
pub fn launch(request: &LaunchRequest) -> Result<u32, LaunchError> {
    tracing::info!(command = %request.command_line(), "executing command");

    let child = request
        .command()
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: request.emulator.clone(),
            source,
        })?;

    let pid = child.id();
    tracing::info!(pid, "process started");
    // Dropping the handle does not kill or wait on the child.
    drop(child);
    Ok(pid)
}
