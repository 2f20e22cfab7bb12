//! SteamGridDB API client for icon search and download.
//!
//! Provides an async client for the [SteamGridDB](https://www.steamgriddb.com)
//! API v2 and the naming rules for the on-disk icon cache.

pub mod cache;
pub mod client;
pub mod types;

pub use cache::IconCache;
pub use client::Client;
pub use types::{ImageData, SearchResult};
