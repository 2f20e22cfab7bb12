//! SteamGridDB API client.
//!
//! Async HTTP client using `reqwest` with Bearer token authentication.

use std::path::Path;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::types::{ApiResponse, ImageData, SearchResult};

pub const DEFAULT_BASE_URL: &str = "https://www.steamgriddb.com/api/v2";

/// Write buffer used when streaming images to disk.
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Errors from the SteamGridDB client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid API key")]
    InvalidKey,
}

/// SteamGridDB API client.
pub struct Client {
    http: reqwest::Client,
    auth: HeaderValue,
    base_url: String,
}

impl Client {
    /// Creates a new client with the given API key.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        let mut auth =
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| Error::InvalidKey)?;
        auth.set_sensitive(true);

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            auth,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different API root (mirrors, local test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Performs an authenticated GET request and decodes the `data` payload.
    async fn get<T>(&self, endpoint: &str) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.auth.clone())
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        let parsed: ApiResponse<T> = serde_json::from_slice(&body)?;
        if !parsed.success {
            tracing::warn!(endpoint, errors = ?parsed.errors, "SteamGridDB reported failure");
            return Ok(T::default());
        }
        Ok(parsed.data)
    }

    /// Searches for games by name.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, Error> {
        let encoded = utf8_percent_encode(term, NON_ALPHANUMERIC).to_string();
        self.get(&format!("/search/autocomplete/{encoded}")).await
    }

    /// Returns icon images for a game.
    pub async fn get_icons(&self, game_id: i32) -> Result<Vec<ImageData>, Error> {
        self.get(&format!("/icons/game/{game_id}")).await
    }

    /// Streams an image from `url` into `dest`, returning the number of bytes written.
    ///
    /// The destination is truncated if it already exists and removed again if
    /// the transfer fails part way. Image hosts are not sent the API key.
    pub async fn download_to(&self, url: &str, dest: &Path) -> Result<u64, Error> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: "download failed".into(),
            });
        }

        let result = stream_to_file(resp, dest).await;
        if result.is_err() {
            if let Err(e) = tokio::fs::remove_file(dest).await {
                tracing::debug!(path = %dest.display(), error = %e, "could not remove partial download");
            }
        }
        result
    }
}

async fn stream_to_file(mut resp: reqwest::Response, dest: &Path) -> Result<u64, Error> {
    let file = tokio::fs::File::create(dest).await?;
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
    let mut written = 0u64;
    while let Some(chunk) = resp.chunk().await? {
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;
    Ok(written)
}
