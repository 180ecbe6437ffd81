//! Presets as raw SysEx dumps.

use crate::error::Result;
use crate::Preset;
use jvsx_sysex::SysExCodec;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl Preset {
    /// All messages of the preset concatenated, ready to write as `.syx`.
    pub fn to_syx(&self, codec: &SysExCodec) -> Result<Vec<u8>> {
        Ok(self.to_messages(codec)?.concat())
    }

    /// Rebuild a preset from a dump. Messages that fail to decode are
    /// logged and left out.
    pub fn from_syx(name: impl Into<String>, codec: &SysExCodec, bytes: &[u8]) -> Self {
        let report = codec.parse_stream(bytes);
        let preset = Self::from_report(name, &report);
        if !report.is_clean() {
            warn!(
                "Preset '{}': {} message(s) could not be decoded",
                preset.name,
                report.skipped.len()
            );
        }
        preset
    }
}

/// Import every `.syx` file in `dir` as a preset named after the file.
///
/// Files are visited in name order. Dumps without a single decodable
/// parameter are skipped.
pub fn import_directory(
    dir: impl AsRef<Path>,
    codec: &SysExCodec,
) -> Result<Vec<(PathBuf, Preset)>> {
    let dir = dir.as_ref();
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("syx"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        warn!("No .syx files found in {}", dir.display());
    }

    let mut presets = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let preset = Preset::from_syx(name, codec, &std::fs::read(&path)?);
        if preset.is_empty() {
            warn!("No parameters decoded from {}", path.display());
            continue;
        }
        presets.push((path, preset));
    }

    info!("Imported {} preset(s) from {}", presets.len(), dir.display());
    Ok(presets)
}
