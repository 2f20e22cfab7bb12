//! On-disk icon cache.
//!
//! Icons are stored flat under the cache directory as
//! `<sanitized title>.png`. The cache is write-through: nothing is looked up
//! before a download, so resolving the same title twice overwrites the file.

use std::path::{Path, PathBuf};

/// Characters that are not allowed in a file name on at least one platform.
const ILLEGAL_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Extension given to every cached icon.
pub const ICON_EXTENSION: &str = "png";

/// Location of downloaded icons.
#[derive(Debug, Clone)]
pub struct IconCache {
    dir: PathBuf,
}

impl IconCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns where the icon for `title` is stored. Does not touch the disk.
    pub fn icon_path(&self, title: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{ICON_EXTENSION}", sanitize_file_name(title)))
    }

    /// Creates the cache directory if needed and returns the icon path for `title`.
    pub fn prepare(&self, title: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(self.icon_path(title))
    }
}

/// Replaces characters that are illegal in path components with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if ILLEGAL_FILE_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Renders a path with `/` separators, whatever the host uses.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_illegal_chars() {
        assert_eq!(
            sanitize_file_name(r#"Zelda: A/B\C <x> "q" |?*"#),
            "Zelda_ A_B_C _x_ _q_ ___"
        );
    }

    #[test]
    fn sanitize_keeps_clean_names() {
        assert_eq!(sanitize_file_name("Metroid Prime 2"), "Metroid Prime 2");
    }

    #[test]
    fn icon_path_uses_png_extension() {
        let cache = IconCache::new("/tmp/icons");
        let path = cache.icon_path("Pikmin: 2");
        assert_eq!(path.file_name().unwrap(), "Pikmin_ 2.png");
        assert!(path.starts_with("/tmp/icons"));
    }

    #[test]
    fn prepare_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = IconCache::new(tmp.path().join("media").join("icon"));
        assert!(!cache.dir().exists());

        let path = cache.prepare("F-Zero GX").unwrap();
        assert!(cache.dir().is_dir());
        assert_eq!(path, cache.dir().join("F-Zero GX.png"));
    }

    #[test]
    fn same_title_same_path() {
        let cache = IconCache::new("icons");
        assert_eq!(cache.icon_path("Wii Sports"), cache.icon_path("Wii Sports"));
    }

    #[test]
    fn forward_slashes() {
        assert_eq!(
            to_forward_slashes(Path::new(r"C:\romshelf\media\icon\a.png")),
            "C:/romshelf/media/icon/a.png"
        );
    }
}
