//! Persisted crosshair settings document
//!
//! Flat JSON object with fixed keys. Missing keys fall back to the named
//! defaults; a document that does not parse is rejected as a whole.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::color::Rgba;
use crate::constants::{config, defaults};
use crate::crosshair::CrosshairStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(default = "default_size")]
    pub size: i32,

    #[serde(default = "default_width")]
    pub width: i32,

    #[serde(default = "default_cross_length")]
    pub cross_length: i32,

    #[serde(default = "default_x_length")]
    pub x_length: i32,

    /// `#RRGGBB`
    #[serde(default = "default_color", with = "hex_color")]
    pub color: Rgba,

    #[serde(default = "default_show_outline")]
    pub show_outline: bool,

    #[serde(default)]
    pub style: CrosshairStyle,

    /// Image path; empty (or `null`) when no custom image is chosen
    #[serde(default = "default_custom_image", deserialize_with = "string_or_null")]
    pub custom_image: String,
}

// Default value functions
fn default_size() -> i32 {
    defaults::SIZE
}

fn default_width() -> i32 {
    defaults::WIDTH
}

fn default_cross_length() -> i32 {
    defaults::CROSS_LENGTH
}

fn default_x_length() -> i32 {
    defaults::X_LENGTH
}

fn default_color() -> Rgba {
    Rgba::parse_hex(defaults::COLOR).unwrap_or(Rgba::WHITE)
}

fn default_show_outline() -> bool {
    defaults::SHOW_OUTLINE
}

fn default_custom_image() -> String {
    defaults::CUSTOM_IMAGE.to_string()
}

/// Older files store `null` when no image was ever chosen
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

mod hex_color {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::color::Rgba;

    pub fn serialize<S>(color: &Rgba, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Rgba, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Rgba::parse_hex(&hex).map_err(D::Error::custom)
    }
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self {
            size: default_size(),
            width: default_width(),
            cross_length: default_cross_length(),
            x_length: default_x_length(),
            color: default_color(),
            show_outline: default_show_outline(),
            style: CrosshairStyle::default(),
            custom_image: default_custom_image(),
        }
    }
}

impl SettingsDocument {
    /// Default location: `<config dir>/crossglobal/settings.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(config::FILENAME);
        path
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse settings JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")
    }

    /// Read the document; `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "Settings file not found, keeping defaults");
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read settings from {}", path.display()))
            }
        };

        let document = Self::from_json(&contents)
            .with_context(|| format!("Malformed settings file {}", path.display()))?;
        info!(path = %path.display(), "Loaded settings");
        Ok(Some(document))
    }

    /// Overwrite the settings file, creating its directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
        }
        let contents = self.to_json()?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }
}
