//! Icon lookup for discovered games.
//!
//! Artwork is best effort: every failure is logged and turns into "no icon",
//! never into a scan error.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use romshelf_settings::Settings;
use romshelf_steamgriddb::cache::to_forward_slashes;
use romshelf_steamgriddb::client::Error as GridError;
use romshelf_steamgriddb::{Client, IconCache};

use crate::title::clean_file_title;

/// Boxed future returned by [`IconResolver::resolve_icon`].
pub type IconFuture<'a> = Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>>;

/// Turns a game file name into a local icon path.
///
/// Implemented by [`SteamGridDbArtwork`] and [`NoArtwork`]; tests plug in
/// their own.
pub trait IconResolver: Send + Sync {
    /// Returns the local icon path (forward slashes) or `None`.
    fn resolve_icon<'a>(&'a self, raw_game_filename: &'a str) -> IconFuture<'a>;
}

/// Resolver used when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoArtwork;

impl IconResolver for NoArtwork {
    fn resolve_icon<'a>(&'a self, _raw_game_filename: &'a str) -> IconFuture<'a> {
        Box::pin(async { None })
    }
}

/// Resolves icons through SteamGridDB and stores them in an [`IconCache`].
pub struct SteamGridDbArtwork {
    client: Client,
    cache: IconCache,
}

impl SteamGridDbArtwork {
    pub fn new(client: Client, cache: IconCache) -> Self {
        Self { client, cache }
    }

    /// Search → first game → first icon → download.
    async fn fetch(&self, title: &str) -> Result<Option<PathBuf>, GridError> {
        let results = self.client.search(title).await?;
        let Some(game) = results.first() else {
            tracing::warn!(title, "no search results");
            return Ok(None);
        };

        let icons = self.client.get_icons(game.id).await?;
        let Some(icon) = icons.first().filter(|icon| !icon.url.is_empty()) else {
            tracing::warn!(title, game_id = game.id, "no icons available");
            return Ok(None);
        };

        let dest = self.cache.prepare(title)?;
        let bytes = self.client.download_to(&icon.url, &dest).await?;
        tracing::debug!(title, bytes, "icon downloaded");
        Ok(Some(dest))
    }

    async fn resolve(&self, raw_game_filename: &str) -> Option<String> {
        let title = clean_file_title(raw_game_filename);
        if title.is_empty() {
            return None;
        }

        tracing::info!(title = %title, "searching artwork");
        match self.fetch(&title).await {
            Ok(Some(path)) => {
                let path = to_forward_slashes(&path);
                tracing::info!(path = %path, "icon saved");
                Some(path)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!(title = %title, error = %e, "artwork request or download failed");
                None
            }
        }
    }
}

impl IconResolver for SteamGridDbArtwork {
    fn resolve_icon<'a>(&'a self, raw_game_filename: &'a str) -> IconFuture<'a> {
        Box::pin(self.resolve(raw_game_filename))
    }
}

/// Builds the resolver described by `settings`.
///
/// Without a usable API key (or with one the HTTP layer rejects) icons are
/// skipped entirely.
pub fn resolver_from_settings(settings: &Settings) -> Box<dyn IconResolver> {
    let Some(api_key) = settings.api_key() else {
        tracing::warn!("SteamGridDB API key is not set, skipping icon search");
        return Box::new(NoArtwork);
    };

    let client = match Client::new(api_key) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "cannot create SteamGridDB client, skipping icon search");
            return Box::new(NoArtwork);
        }
    };
    let client = match &settings.steamgriddb_base_url {
        Some(url) => client.with_base_url(url.clone()),
        None => client,
    };

    let cache = IconCache::new(settings.icon_cache_dir());
    tracing::debug!(cache = %cache.dir().display(), "icon lookup enabled");
    Box::new(SteamGridDbArtwork::new(client, cache))
}
