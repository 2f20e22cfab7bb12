//! Scan orchestration: config → library directories → games → manifest.

use std::path::{Path, PathBuf};

use crate::artwork::IconResolver;
use crate::config::{ConfigKeyBinding, parse_game_mapping, parse_indexed_paths};
use crate::error::ScanError;
use crate::manifest::{GameEntry, Manifest, normalize_path};
use crate::platform::{ConfigLayout, Platform};
use crate::title::{clean_file_title, clean_title};

/// One scan invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub platform: Platform,
    /// Directory holding the emulator's config file.
    pub config_dir: PathBuf,
    /// Where the manifest is written.
    pub output_path: PathBuf,
}

impl ScanRequest {
    /// Request using the platform's default config directory and output path
    /// for any value not given.
    pub fn with_defaults(
        platform: Platform,
        config_dir: Option<PathBuf>,
        output_path: Option<PathBuf>,
    ) -> Self {
        Self {
            platform,
            config_dir: config_dir.unwrap_or_else(|| platform.default_config_dir()),
            output_path: output_path.unwrap_or_else(|| platform.default_output_path()),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(self.platform.config_file_name())
    }
}

/// What a successful scan produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The manifest was written with this many games.
    Written { path: PathBuf, games: usize },
    /// Nothing was found; no file was written.
    Empty,
}

/// Runs a scan and writes the manifest.
///
/// Failures are logged here, once, before being returned.
pub async fn scan(
    request: &ScanRequest,
    icons: &dyn IconResolver,
) -> Result<ScanOutcome, ScanError> {
    tracing::info!(
        platform = %request.platform,
        config_dir = %request.config_dir.display(),
        output = %request.output_path.display(),
        "scan started"
    );

    let result = run(request, icons).await;
    match &result {
        Ok(ScanOutcome::Written { path, games }) => {
            tracing::info!(path = %path.display(), games, "manifest written");
        }
        Ok(ScanOutcome::Empty) => {
            tracing::info!(platform = %request.platform, "nothing found, no manifest written");
        }
        Err(e) => tracing::error!(platform = %request.platform, error = %e, "scan failed"),
    }
    result
}

async fn run(request: &ScanRequest, icons: &dyn IconResolver) -> Result<ScanOutcome, ScanError> {
    let config_file = request.config_file();
    if !config_file.is_file() {
        return Err(ScanError::ConfigNotFound(config_file));
    }
    let text = std::fs::read_to_string(&config_file)?;

    let manifest = match request.platform.layout() {
        ConfigLayout::Indexed { .. } => {
            let bindings = parse_indexed_paths(&text, request.platform);
            scan_library_dirs(&bindings, request.platform, icons).await
        }
        ConfigLayout::Mapping => {
            let bindings = parse_game_mapping(&text)?;
            scan_game_folders(&request.config_dir, &bindings, icons).await
        }
    };

    if manifest.is_empty() {
        return Ok(ScanOutcome::Empty);
    }

    manifest.write_to(&request.output_path)?;
    Ok(ScanOutcome::Written {
        path: request.output_path.clone(),
        games: manifest.game_count(),
    })
}

async fn scan_library_dirs(
    bindings: &[ConfigKeyBinding],
    platform: Platform,
    icons: &dyn IconResolver,
) -> Manifest {
    let mut manifest = Manifest::new();

    for binding in bindings {
        if binding.directory.is_empty() {
            tracing::info!(key = %binding.key, "empty library path, skipping");
            continue;
        }

        let dir = Path::new(&binding.directory);
        if !dir.is_dir() {
            tracing::warn!(path = %binding.directory, "library directory not found, skipping");
            continue;
        }

        let files = match list_game_files(dir, platform.extensions()) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(path = %binding.directory, error = %e, "cannot list library directory");
                continue;
            }
        };
        tracing::info!(path = %binding.directory, count = files.len(), "games found");

        let mut games = Vec::with_capacity(files.len());
        for filename in files {
            let icon_path = lookup_icon(icons, &filename).await;
            games.push(GameEntry::File {
                filename,
                icon_path,
            });
        }
        manifest.insert(&binding.directory, games);
    }

    manifest
}

/// Names of the files in `dir` (links to files included) with one of
/// `extensions`, sorted.
fn list_game_files(dir: &Path, extensions: &[&str]) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks; links to game files count, directories never do.
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if matches_extension(&name, extensions) {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

fn matches_extension(name: &str, extensions: &[&str]) -> bool {
    let lower = name.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext))
}

async fn scan_game_folders(
    config_dir: &Path,
    bindings: &[ConfigKeyBinding],
    icons: &dyn IconResolver,
) -> Manifest {
    let mut games = Vec::new();

    for binding in bindings {
        let folder = binding.directory.trim_end_matches(['/', '\\']);
        if folder.is_empty() {
            tracing::warn!(id = %binding.key, "empty game path, skipping");
            continue;
        }
        if !Path::new(folder).is_dir() {
            tracing::warn!(id = %binding.key, path = folder, "game folder not found, skipping");
            continue;
        }

        let folder = normalize_path(folder);
        let base = folder.rsplit('/').next().unwrap_or(&folder).to_string();
        let cleaned = clean_title(&base);
        let name = if cleaned.is_empty() { base.clone() } else { cleaned };

        let icon_path = lookup_icon(icons, &base).await;
        games.push(GameEntry::Folder {
            name,
            path: folder,
            id: binding.key.clone(),
            icon_path,
        });
    }
    tracing::info!(count = games.len(), "game folders found");

    let mut manifest = Manifest::new();
    manifest.insert(&config_dir.to_string_lossy(), games);
    manifest
}

async fn lookup_icon(icons: &dyn IconResolver, raw_name: &str) -> Option<String> {
    if clean_file_title(raw_name).is_empty() {
        tracing::debug!(name = raw_name, "no searchable title, skipping artwork");
        return None;
    }
    icons.resolve_icon(raw_name).await
}
