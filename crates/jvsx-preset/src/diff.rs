//! Comparing two presets parameter by parameter.

use crate::Preset;
use jvsx_sysex::ParameterValue;
use serde::Serialize;

/// A parameter set in both presets to different values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedParameter {
    pub group: String,
    pub parameter: String,
    pub left: i32,
    pub right: i32,
}

/// Result of [`Preset::diff`]. Every list follows the left preset's entry
/// order, then the right's for `only_right`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresetDiff {
    pub changed: Vec<ChangedParameter>,
    pub common: Vec<ParameterValue>,
    pub only_left: Vec<ParameterValue>,
    pub only_right: Vec<ParameterValue>,
}

impl PresetDiff {
    /// Both presets set the same parameters to the same values.
    pub fn is_identical(&self) -> bool {
        self.changed.is_empty() && self.only_left.is_empty() && self.only_right.is_empty()
    }
}

impl Preset {
    /// Compare the parameters of `self` (left) with `other` (right).
    /// Metadata is not compared.
    pub fn diff(&self, other: &Preset) -> PresetDiff {
        let mut diff = PresetDiff::default();

        for entry in self.entries() {
            let value = ParameterValue::new(&entry.group, &entry.parameter, entry.value);
            match other.get(&entry.group, &entry.parameter) {
                Some(right) if right == entry.value => diff.common.push(value),
                Some(right) => diff.changed.push(ChangedParameter {
                    group: entry.group.clone(),
                    parameter: entry.parameter.clone(),
                    left: entry.value,
                    right,
                }),
                None => diff.only_left.push(value),
            }
        }

        diff.only_right = other
            .entries()
            .iter()
            .filter(|e| self.get(&e.group, &e.parameter).is_none())
            .map(|e| ParameterValue::new(&e.group, &e.parameter, e.value))
            .collect();

        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jvsx_sysex::PresetMode;

    #[test]
    fn test_diff_categories() {
        let left = Preset::new("A", PresetMode::Patch)
            .with_parameter("temp_patch_common", "Patch level", 100)
            .with_parameter("temp_patch_common", "Patch pan", 64)
            .with_parameter("temp_patch_common", "Chorus level", 20);
        let right = Preset::new("B", PresetMode::Patch)
            .with_parameter("temp_patch_common", "Reverb level", 40)
            .with_parameter("temp_patch_common", "Patch pan", 64)
            .with_parameter("temp_patch_common", "Patch level", 90);

        let diff = left.diff(&right);
        assert_eq!(
            diff.changed,
            vec![ChangedParameter {
                group: "temp_patch_common".to_string(),
                parameter: "Patch level".to_string(),
                left: 100,
                right: 90,
            }]
        );
        assert_eq!(
            diff.common,
            vec![ParameterValue::new("temp_patch_common", "Patch pan", 64)]
        );
        assert_eq!(
            diff.only_left,
            vec![ParameterValue::new("temp_patch_common", "Chorus level", 20)]
        );
        assert_eq!(
            diff.only_right,
            vec![ParameterValue::new("temp_patch_common", "Reverb level", 40)]
        );
        assert!(!diff.is_identical());
    }

    #[test]
    fn test_diff_ignores_metadata() {
        let left = Preset::new("A", PresetMode::Patch)
            .with_author("one")
            .with_parameter("temp_patch_common", "Patch level", 100);
        let right = Preset::new("B", PresetMode::Performance)
            .with_parameter("temp_patch_common", "Patch level", 100);

        let diff = left.diff(&right);
        assert!(diff.is_identical());
        assert_eq!(diff.common.len(), 1);
    }
}
