//! Named, ordered collections of parameter settings.

use crate::error::Result;
use jvsx_sysex::{validate, ParseReport, PresetMode, SysExCodec};
use jvsx_table::builtin::{TEMP_PATCH_COMMON, TEMP_PERFORMANCE_COMMON};
use jvsx_table::ParameterTable;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

/// Characters in a performance name.
pub const PERFORMANCE_NAME_LEN: usize = 12;

/// EFX parameters following "EFX:Type".
pub const EFX_PARAMETER_COUNT: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    pub group: String,
    pub parameter: String,
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PresetEntry {
    fn matches(&self, group: &str, parameter: &str) -> bool {
        self.group == group && self.parameter == parameter
    }
}

/// A preset: metadata plus `(group, parameter, value)` entries in send order.
///
/// Each `(group, parameter)` appears at most once. Setting it again
/// replaces the value and keeps the entry's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub mode: PresetMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_entries")]
    parameters: Vec<PresetEntry>,
}

/// Documents may repeat a parameter; merge them the way `upsert` would.
fn deserialize_entries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<PresetEntry>, D::Error> {
    let raw = Vec::<PresetEntry>::deserialize(deserializer)?;
    let mut entries: Vec<PresetEntry> = Vec::with_capacity(raw.len());
    for entry in raw {
        match entries
            .iter_mut()
            .find(|e| e.matches(&entry.group, &entry.parameter))
        {
            Some(existing) => {
                warn!(
                    "Duplicate entry {}/{} in preset document, keeping the last value",
                    entry.group, entry.parameter
                );
                existing.value = entry.value;
                if entry.description.is_some() {
                    existing.description = entry.description;
                }
            }
            None => entries.push(entry),
        }
    }
    Ok(entries)
}

impl Preset {
    pub fn new(name: impl Into<String>, mode: PresetMode) -> Self {
        Self {
            name: name.into(),
            mode,
            description: None,
            author: None,
            tags: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set a parameter without checking it against a table.
    ///
    /// Values are still validated when the preset is encoded.
    pub fn with_parameter(mut self, group: &str, parameter: &str, value: i32) -> Self {
        self.upsert(group, parameter, value);
        self
    }

    /// Attach a note to a parameter set earlier in the chain.
    pub fn with_note(mut self, group: &str, parameter: &str, note: impl Into<String>) -> Self {
        if !self.annotate(group, parameter, note) {
            warn!("Note for unset parameter {}/{} dropped", group, parameter);
        }
        self
    }

    /// Set a parameter after checking it exists and `value` is in range.
    pub fn add_parameter(
        &mut self,
        table: &ParameterTable,
        group: &str,
        parameter: &str,
        value: i32,
    ) -> Result<()> {
        let definition = table.parameter(group, parameter)?;
        validate(definition, value)?;
        self.upsert(group, parameter, value);
        Ok(())
    }

    fn upsert(&mut self, group: &str, parameter: &str, value: i32) {
        match self.parameters.iter_mut().find(|e| e.matches(group, parameter)) {
            Some(entry) => {
                debug!("Updated {}/{}: {} -> {}", group, parameter, entry.value, value);
                entry.value = value;
            }
            None => {
                debug!("Added {}/{} = {}", group, parameter, value);
                self.parameters.push(PresetEntry {
                    group: group.to_string(),
                    parameter: parameter.to_string(),
                    value,
                    description: None,
                });
            }
        }
    }

    /// Returns `false` if the parameter was not set.
    pub fn remove_parameter(&mut self, group: &str, parameter: &str) -> bool {
        match self.parameters.iter().position(|e| e.matches(group, parameter)) {
            Some(pos) => {
                self.parameters.remove(pos);
                true
            }
            None => {
                warn!("Parameter not in preset: {}/{}", group, parameter);
                false
            }
        }
    }

    pub fn get(&self, group: &str, parameter: &str) -> Option<i32> {
        self.parameters
            .iter()
            .find(|e| e.matches(group, parameter))
            .map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn entries(&self) -> &[PresetEntry] {
        &self.parameters
    }

    /// Attach a free-text note to a parameter already in the preset.
    pub fn annotate(&mut self, group: &str, parameter: &str, note: impl Into<String>) -> bool {
        match self.parameters.iter_mut().find(|e| e.matches(group, parameter)) {
            Some(entry) => {
                entry.description = Some(note.into());
                true
            }
            None => false,
        }
    }

    /// Write `name` into "Performance name 1".."12", space padded.
    ///
    /// Longer names are truncated. Characters outside printable ASCII are
    /// rejected by the parameter range.
    pub fn set_performance_name(&mut self, table: &ParameterTable, name: &str) -> Result<()> {
        let codes = name
            .chars()
            .chain(std::iter::repeat(' '))
            .take(PERFORMANCE_NAME_LEN)
            .map(|c| c as u32 as i32);

        let values: Vec<(String, i32)> = codes
            .enumerate()
            .map(|(i, code)| (format!("Performance name {}", i + 1), code))
            .collect();
        self.set_all(table, TEMP_PERFORMANCE_COMMON, &values)
    }

    /// Set "EFX:Type" and all twelve "EFX:Parameter n", zero-filling the
    /// ones not given.
    ///
    /// Patch presets write the patch common block, everything else the
    /// performance common block.
    pub fn set_efx(&mut self, table: &ParameterTable, efx_type: i32, params: &[i32]) -> Result<()> {
        let group = match self.mode {
            PresetMode::Patch => TEMP_PATCH_COMMON,
            _ => TEMP_PERFORMANCE_COMMON,
        };
        if params.len() > EFX_PARAMETER_COUNT {
            warn!(
                "Ignoring {} EFX parameter(s) beyond {}",
                params.len() - EFX_PARAMETER_COUNT,
                EFX_PARAMETER_COUNT
            );
        }

        let mut values = vec![("EFX:Type".to_string(), efx_type)];
        let params = params.iter().copied().chain(std::iter::repeat(0));
        for (i, value) in params.take(EFX_PARAMETER_COUNT).enumerate() {
            values.push((format!("EFX:Parameter {}", i + 1), value));
        }
        self.set_all(table, group, &values)
    }

    /// Set several parameters of one group. Nothing changes unless every
    /// value is valid.
    fn set_all(
        &mut self,
        table: &ParameterTable,
        group: &str,
        values: &[(String, i32)],
    ) -> Result<()> {
        for (parameter, value) in values {
            validate(table.parameter(group, parameter)?, *value)?;
        }
        for (parameter, value) in values {
            self.upsert(group, parameter, *value);
        }
        Ok(())
    }

    /// Check every entry against `table`.
    pub fn validate(&self, table: &ParameterTable) -> Result<()> {
        for entry in &self.parameters {
            let definition = table.parameter(&entry.group, &entry.parameter)?;
            validate(definition, entry.value)?;
        }
        Ok(())
    }

    /// Encode every entry, in order. Fails on the first invalid entry.
    pub fn to_messages(&self, codec: &SysExCodec) -> Result<Vec<Vec<u8>>> {
        self.parameters
            .iter()
            .map(|e| Ok(codec.encode(&e.group, &e.parameter, e.value)?))
            .collect()
    }

    /// Build a preset from parsed entries. A parameter seen twice keeps
    /// its last value.
    pub fn from_report(name: impl Into<String>, report: &ParseReport) -> Self {
        let mut preset = Self::new(name, report.infer_mode());
        for entry in &report.entries {
            preset.upsert(&entry.group, &entry.parameter, entry.value);
        }
        preset
    }
}
