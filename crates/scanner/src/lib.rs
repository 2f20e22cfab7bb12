//! Emulator config scanning, icon enrichment and game manifest output.
//!
//! # Pipeline
//!
//! 1. **Read**: load the emulator's config file from its config directory
//! 2. **Extract**: pull library directories (indexed keys) or game folders
//!    (id → path mapping) out of it
//! 3. **List**: keep files matching the platform's extensions
//! 4. **Artwork**: resolve an icon per game through an [`IconResolver`]
//! 5. **Write**: serialize the [`Manifest`] as pretty JSON, unless empty

pub mod artwork;
pub mod config;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod scan;
pub mod title;

pub use artwork::{IconResolver, NoArtwork, SteamGridDbArtwork, resolver_from_settings};
pub use config::{ConfigKeyBinding, parse_game_mapping, parse_indexed_paths};
pub use error::ScanError;
pub use manifest::{GameEntry, Manifest, normalize_path};
pub use platform::{ConfigLayout, Platform};
pub use scan::{ScanOutcome, ScanRequest, scan};
pub use title::{clean_file_title, clean_title, strip_game_extension};
