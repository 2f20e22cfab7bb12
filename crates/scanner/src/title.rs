//! Display/search title cleanup for game names.

use std::sync::LazyLock;

use regex::Regex;

use crate::platform::Platform;

/// `[...]` and `(...)` annotations such as regions, revisions and dump tags.
static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").expect("valid tag pattern"));

/// Strips bracketed/parenthesized tags from a name, then trims whitespace.
///
/// Dots are left alone, so folder names and titles like `Dr.Who` survive.
/// An empty result means there is nothing worth searching for.
pub fn clean_title(raw: &str) -> String {
    TAGS.replace_all(raw, "").trim().to_string()
}

/// [`clean_title`] for a game file name: a trailing game-file extension of
/// any supported platform is removed first.
pub fn clean_file_title(filename: &str) -> String {
    clean_title(strip_game_extension(filename.trim()))
}

/// Removes a trailing extension if it is one the scanner lists as a game file
/// (case-insensitive). Anything else is returned unchanged.
pub fn strip_game_extension(filename: &str) -> &str {
    let Some(dot) = filename.rfind('.') else {
        return filename;
    };
    let ext = filename[dot..].to_lowercase();
    let known = Platform::all()
        .iter()
        .flat_map(|p| p.extensions())
        .any(|known| *known == ext);
    if known { &filename[..dot] } else { filename }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_extension_from_files() {
        assert_eq!(clean_file_title("Metroid Prime (USA) [!].iso"), "Metroid Prime");
        assert_eq!(
            clean_file_title("Super Mario Odyssey [0100000000010000][v0].nsp"),
            "Super Mario Odyssey"
        );
        assert_eq!(clean_file_title("Pikmin 2 (Europe) (En,Fr).RVZ"), "Pikmin 2");
    }

    #[test]
    fn clean_title_is_unchanged() {
        for title in [
            "Metroid Prime",
            "Super Mario Bros. 3",
            "F.E.A.R",
            "Wii Sports",
            "Dr.Who",
            "Mr.Bean",
            "Final Fantasy Vol.III",
        ] {
            assert_eq!(clean_title(title), title);
            assert_eq!(clean_title(&clean_title(title)), title);
            assert_eq!(clean_file_title(title), title);
        }
    }

    #[test]
    fn dotted_titles_keep_their_dots_as_files() {
        assert_eq!(clean_file_title("Dr.Who.iso"), "Dr.Who");
        assert_eq!(clean_file_title("Final Fantasy Vol.III (USA).wbfs"), "Final Fantasy Vol.III");
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        assert_eq!(clean_title("  Wii Play  "), "Wii Play");
        assert_eq!(clean_file_title("  Wii Play.iso  "), "Wii Play");
    }

    #[test]
    fn tags_only_yield_empty() {
        assert_eq!(clean_file_title("(Demo) [b].iso"), "");
        assert_eq!(clean_file_title(".iso"), "");
        assert_eq!(clean_title(""), "");
    }

    #[test]
    fn only_last_extension_removed() {
        assert_eq!(clean_file_title("Game.part1.wbfs"), "Game.part1");
    }

    #[test]
    fn unknown_extensions_are_kept() {
        assert_eq!(strip_game_extension("notes.txt"), "notes.txt");
        assert_eq!(strip_game_extension("Game.XCI"), "Game");
        assert_eq!(strip_game_extension("NoDot"), "NoDot");
    }

    #[test]
    fn folder_names_keep_their_text() {
        assert_eq!(clean_title("Demon's Souls [BLUS30443]"), "Demon's Souls");
        assert_eq!(clean_title("Dr.Who [BLES00001]"), "Dr.Who");
    }
}
