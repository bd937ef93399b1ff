//! Settings loaded from TOML
//!
//! Read from ~/.config/blockfall/settings.toml (or platform equivalent). A missing file
//! means defaults; a broken one is logged and ignored.

use crate::game_loop::DEFAULT_TICK;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Game settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Gameplay settings
    pub gameplay: GameplaySettings,
    /// Visual settings
    pub visual: VisualSettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub pause: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub restart: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Gameplay settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Gravity interval in milliseconds
    pub tick_ms: u64,
    /// Fixed piece sequence seed; random when absent
    pub seed: Option<u64>,
}

/// Visual settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string(), "a".to_string()],
            move_right: vec!["Right".to_string(), "d".to_string()],
            soft_drop: vec!["Down".to_string(), "s".to_string()],
            hard_drop: vec!["Space".to_string()],
            rotate_right: vec!["Up".to_string(), "w".to_string()],
            rotate_left: vec!["z".to_string()],
            pause: vec!["p".to_string()],
            restart: vec!["r".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK.as_millis() as u64,
            seed: None,
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the config directory, or fall back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`. Never fails: problems are logged and defaults used.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::debug!("no settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self, String> {
        let settings: Settings = toml::from_str(contents).map_err(|e| e.to_string())?;
        if settings.gameplay.tick_ms == 0 {
            return Err("gameplay.tick_ms must be greater than zero".to_string());
        }
        Ok(settings)
    }

    /// Gravity interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.gameplay.tick_ms)
    }
}

impl VisualSettings {
    /// Get the block characters based on style
    pub fn block_char(&self) -> &'static str {
        match self.block_style.as_str() {
            "bracket" => "[]",
            "round" => "()",
            _ => "██", // "solid" or default
        }
    }
}
