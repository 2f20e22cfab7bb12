//! Library location extraction from emulator config files.
//!
//! INI-style configs are matched line by line on a whole-line key prefix; no
//! section handling is needed for the fixed key set. RPCS3's game list is a
//! YAML mapping.

use crate::error::ScanError;
use crate::platform::{ConfigLayout, Platform};

/// A config key and the directory it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKeyBinding {
    /// The key as written in the config (slot key or game id).
    pub key: String,
    /// Slot number for indexed configs.
    pub slot: Option<u32>,
    /// Raw directory value, separators untouched.
    pub directory: String,
}

/// Returns the value of the first line assigning `key`.
///
/// The line is trimmed, must start with `key`, and may have spaces before
/// the `=`. Only the first `=` splits; the value is trimmed.
pub fn find_key_value<'a>(lines: &[&'a str], key: &str) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        let rest = line.trim().strip_prefix(key)?;
        let value = rest.trim_start().strip_prefix('=')?;
        Some(value.trim())
    })
}

/// Extracts the library directory of every configured slot.
///
/// Slots are returned in index order; absent slots are skipped.
pub fn parse_indexed_paths(text: &str, platform: Platform) -> Vec<ConfigKeyBinding> {
    let ConfigLayout::Indexed { slots } = platform.layout() else {
        return Vec::new();
    };

    let lines: Vec<&str> = text.lines().collect();
    let mut bindings = Vec::new();

    for slot in slots {
        let Some(key) = platform.slot_key(slot) else {
            continue;
        };
        match find_key_value(&lines, &key) {
            Some(value) => {
                tracing::info!(slot, value, "library path found");
                bindings.push(ConfigKeyBinding {
                    key,
                    slot: Some(slot),
                    directory: value.to_string(),
                });
            }
            None => tracing::info!(slot, "library path not set"),
        }
    }

    bindings
}

/// Parses a YAML mapping of game id to game folder.
///
/// Entries whose key or value is not a string are skipped with a warning.
pub fn parse_game_mapping(text: &str) -> Result<Vec<ConfigKeyBinding>, ScanError> {
    let doc: serde_yml::Value = serde_yml::from_str(text)?;
    let serde_yml::Value::Mapping(mapping) = doc else {
        return Err(ScanError::InvalidGameList);
    };

    let mut bindings = Vec::with_capacity(mapping.len());
    for (key, value) in mapping.iter() {
        match (key.as_str(), value.as_str()) {
            (Some(id), Some(path)) => bindings.push(ConfigKeyBinding {
                key: id.to_string(),
                slot: None,
                directory: path.trim().to_string(),
            }),
            _ => tracing::warn!(key = ?key, value = ?value, "skipping malformed game entry"),
        }
    }

    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_split_on_first_equals() {
        let lines = vec![r"Paths\gamedirs\1\path=D:/odd=name"];
        assert_eq!(
            find_key_value(&lines, r"Paths\gamedirs\1\path"),
            Some("D:/odd=name")
        );
    }

    #[test]
    fn key_value_allows_spaces_and_indent() {
        let lines = vec!["   ISOPath0 = /mnt/games  "];
        assert_eq!(find_key_value(&lines, "ISOPath0"), Some("/mnt/games"));
    }

    #[test]
    fn key_value_needs_equals_right_after_key() {
        let lines = vec!["ISOPath10 = /mnt/ten", r"Paths\gamedirs\1\path\default=true"];
        assert_eq!(find_key_value(&lines, "ISOPath1"), None);
        assert_eq!(find_key_value(&lines, r"Paths\gamedirs\1\path"), None);
    }

    #[test]
    fn switch_slots() {
        let text = "[UI]\n\
            Paths\\gamedirs\\size=3\n\
            Paths\\gamedirs\\1\\deep_scan=false\n\
            Paths\\gamedirs\\1\\path=E:\\Games\n\
            Paths\\gamedirs\\3\\path=F:/More Games\n\
            Paths\\gamedirs\\6\\path=G:/ignored\n";

        let bindings = parse_indexed_paths(text, Platform::Switch);

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].slot, Some(1));
        assert_eq!(bindings[0].directory, r"E:\Games");
        assert_eq!(bindings[0].key, r"Paths\gamedirs\1\path");
        assert_eq!(bindings[1].slot, Some(3));
        assert_eq!(bindings[1].directory, "F:/More Games");
    }

    #[test]
    fn duplicate_slot_uses_first_line() {
        let text = "ISOPath0 = /first\nISOPath0 = /second\n";
        let bindings = parse_indexed_paths(text, Platform::Wii);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].directory, "/first");
    }

    #[test]
    fn wii_ten_slots() {
        let text = (0..12)
            .map(|i| format!("ISOPath{i} = /games/{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bindings = parse_indexed_paths(&text, Platform::Wii);
        assert_eq!(bindings.len(), 10);
        assert_eq!(bindings[9].directory, "/games/9");
    }

    #[test]
    fn empty_value_kept_for_caller() {
        let bindings = parse_indexed_paths("ISOPath2 =\n", Platform::Wii);
        assert_eq!(bindings.len(), 1);
        assert!(bindings[0].directory.is_empty());
    }

    #[test]
    fn indexed_parse_on_mapping_platform_is_empty() {
        assert!(parse_indexed_paths("ISOPath0 = /x", Platform::Ps3).is_empty());
    }

    #[test]
    fn game_mapping_in_order() {
        let text = "BLUS30443: /games/Demon's Souls [BLUS30443]/\n\
                    NPUB30910: \"D:\\\\PS3\\\\Journey\"\n";
        let bindings = parse_game_mapping(text).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].key, "BLUS30443");
        assert_eq!(bindings[0].directory, "/games/Demon's Souls [BLUS30443]/");
        assert_eq!(bindings[1].key, "NPUB30910");
        assert_eq!(bindings[1].directory, r"D:\PS3\Journey");
        assert!(bindings.iter().all(|b| b.slot.is_none()));
    }

    #[test]
    fn game_mapping_skips_non_string_values() {
        let text = "GOOD00001: /games/good\nBAD00002:\n  - nested\n";
        let bindings = parse_game_mapping(text).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].key, "GOOD00001");
    }

    #[test]
    fn game_mapping_rejects_lists() {
        let err = parse_game_mapping("- /games/a\n- /games/b\n").unwrap_err();
        assert!(matches!(err, ScanError::InvalidGameList));
    }

    #[test]
    fn game_mapping_rejects_empty_document() {
        assert!(parse_game_mapping("").is_err());
    }
}
