use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of the synth a set of parameters configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetMode {
    Performance,
    Patch,
    Rhythm,
    System,
    #[default]
    Unknown,
}

impl PresetMode {
    /// Infer the mode from the groups a parameter set touches.
    ///
    /// Performance wins over patch, patch over rhythm.
    pub fn infer<'a>(groups: impl IntoIterator<Item = &'a str>) -> Self {
        let mut mode = PresetMode::Unknown;
        for group in groups {
            let group = group.to_ascii_lowercase();
            if group.contains("performance") {
                return PresetMode::Performance;
            } else if group.contains("patch") {
                mode = PresetMode::Patch;
            } else if group.contains("rhythm") && mode == PresetMode::Unknown {
                mode = PresetMode::Rhythm;
            }
        }
        mode
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetMode::Performance => "performance",
            PresetMode::Patch => "patch",
            PresetMode::Rhythm => "rhythm",
            PresetMode::System => "system",
            PresetMode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PresetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "performance" => Ok(PresetMode::Performance),
            "patch" => Ok(PresetMode::Patch),
            "rhythm" => Ok(PresetMode::Rhythm),
            "system" => Ok(PresetMode::System),
            "unknown" => Ok(PresetMode::Unknown),
            other => Err(format!("unknown preset mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_priority() {
        assert_eq!(
            PresetMode::infer(["temp_patch_common", "temp_performance_part_1"]),
            PresetMode::Performance
        );
        assert_eq!(
            PresetMode::infer(["rhythm_note_35", "temp_patch_tone_1"]),
            PresetMode::Patch
        );
        assert_eq!(PresetMode::infer(["rhythm_note_35"]), PresetMode::Rhythm);
        assert_eq!(PresetMode::infer(["system_common"]), PresetMode::Unknown);
        assert_eq!(PresetMode::infer([]), PresetMode::Unknown);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Patch".parse::<PresetMode>().unwrap(), PresetMode::Patch);
        assert_eq!(PresetMode::Rhythm.to_string(), "rhythm");
        assert!("drums".parse::<PresetMode>().is_err());
    }
}
