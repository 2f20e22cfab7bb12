use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use romshelf_settings::LogMode;
#[cfg(target_os = "windows")]
use romshelf_settings::paths::home_dir;
use romshelf_settings::paths::{install_dir, user_config_dir};

/// An emulator family the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Eden, `qt-config.ini` with `Paths\gamedirs\N\path` slots.
    Switch,
    /// Dolphin, `Dolphin.ini` with `ISOPathN` slots.
    Wii,
    /// RPCS3, `games.yml` mapping game ids to game folders.
    Ps3,
}

/// How library locations are stored in a platform's config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayout {
    /// `key=value` lines, one key per numbered slot.
    Indexed { slots: RangeInclusive<u32> },
    /// YAML mapping of game id to game folder.
    Mapping,
}

impl Platform {
    /// Returns all platforms.
    pub fn all() -> &'static [Platform] {
        &[Platform::Switch, Platform::Wii, Platform::Ps3]
    }

    /// Short identifier used on the command line and in file names.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Switch => "switch",
            Platform::Wii => "wii",
            Platform::Ps3 => "ps3",
        }
    }

    pub fn emulator(&self) -> &'static str {
        match self {
            Platform::Switch => "Eden",
            Platform::Wii => "Dolphin",
            Platform::Ps3 => "RPCS3",
        }
    }

    /// Name of the config file inside the emulator's config directory.
    pub fn config_file_name(&self) -> &'static str {
        match self {
            Platform::Switch => "qt-config.ini",
            Platform::Wii => "Dolphin.ini",
            Platform::Ps3 => "games.yml",
        }
    }

    pub fn layout(&self) -> ConfigLayout {
        match self {
            Platform::Switch => ConfigLayout::Indexed { slots: 1..=5 },
            Platform::Wii => ConfigLayout::Indexed { slots: 0..=9 },
            Platform::Ps3 => ConfigLayout::Mapping,
        }
    }

    /// Config key holding the library directory of `slot`.
    ///
    /// Returns `None` for platforms without indexed slots.
    pub fn slot_key(&self, slot: u32) -> Option<String> {
        match self {
            Platform::Switch => Some(format!(r"Paths\gamedirs\{slot}\path")),
            Platform::Wii => Some(format!("ISOPath{slot}")),
            Platform::Ps3 => None,
        }
    }

    /// Lowercase game file extensions, dot included.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Platform::Switch => &[".nsp", ".xci"],
            Platform::Wii => &[".iso", ".gcm", ".wbfs", ".rvz", ".wad", ".dol", ".elf"],
            Platform::Ps3 => &[],
        }
    }

    /// Where the emulator keeps its config on this machine by default.
    pub fn default_config_dir(&self) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            match self {
                Platform::Switch => user_config_dir().join("eden").join("config"),
                Platform::Wii => home_dir()
                    .join("Documents")
                    .join("Dolphin Emulator")
                    .join("Config"),
                Platform::Ps3 => user_config_dir().join("rpcs3").join("config"),
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            match self {
                Platform::Switch => user_config_dir().join("eden"),
                Platform::Wii => user_config_dir().join("dolphin-emu"),
                Platform::Ps3 => user_config_dir().join("rpcs3"),
            }
        }
    }

    /// Manifest location used when the caller does not pass one.
    pub fn default_output_path(&self) -> PathBuf {
        install_dir()
            .join("data")
            .join(format!("{}_games.json", self.id()))
    }

    /// Whether this scanner starts a fresh log or appends to the shared one.
    pub fn log_mode(&self) -> LogMode {
        match self {
            Platform::Switch => LogMode::Truncate,
            Platform::Wii | Platform::Ps3 => LogMode::Append,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.emulator())
    }
}
