//! Preset files.
//!
//! JSON and TOML files hold the preset document itself. `.syx` files hold
//! the encoded messages and need a codec to read back.

use crate::error::{Error, Result};
use crate::Preset;
use jvsx_sysex::SysExCodec;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetFormat {
    Json,
    Toml,
    Syx,
}

impl PresetFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(PresetFormat::Json),
            Some("toml") => Ok(PresetFormat::Toml),
            Some("syx") => Ok(PresetFormat::Syx),
            other => Err(Error::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Preset {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Write the preset in the format named by the file extension.
    pub fn save(&self, path: impl AsRef<Path>, codec: &SysExCodec) -> Result<()> {
        let path = path.as_ref();
        match PresetFormat::from_path(path)? {
            PresetFormat::Json => std::fs::write(path, self.to_json()?)?,
            PresetFormat::Toml => std::fs::write(path, self.to_toml()?)?,
            PresetFormat::Syx => std::fs::write(path, self.to_syx(codec)?)?,
        }
        info!("Saved preset '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Read a preset and check it against the codec's table.
    ///
    /// Presets read from `.syx` are named after the file stem.
    pub fn load(path: impl AsRef<Path>, codec: &SysExCodec) -> Result<Self> {
        let path = path.as_ref();
        let preset = match PresetFormat::from_path(path)? {
            PresetFormat::Json => Self::from_json(&std::fs::read_to_string(path)?)?,
            PresetFormat::Toml => Self::from_toml(&std::fs::read_to_string(path)?)?,
            PresetFormat::Syx => {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Self::from_syx(name, codec, &std::fs::read(path)?)
            }
        };
        preset.validate(codec.table())?;

        info!(
            "Loaded preset '{}' ({} parameters) from {}",
            preset.name,
            preset.len(),
            path.display()
        );
        Ok(preset)
    }
}
