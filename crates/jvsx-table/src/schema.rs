//! Serialized table documents.
//!
//! The document keeps the field names of the device's published parameter
//! lists: identification bytes and offsets are hex strings, addresses are
//! given as the three leading bytes of each group.
//!
//! ```toml
//! [sysex_common_info]
//! manufacturer_id_hex = "41"
//! model_id_hex = "6A"
//! command_id_dt1_hex = "12"
//!
//! [sysex_parameter_groups.temp_performance_common]
//! address_bytes_1_3_hex = ["01", "00", "00"]
//!
//! [[sysex_parameter_groups.temp_performance_common.parameters]]
//! name = "EFX:Type"
//! offset_hex = "0C"
//! min = 0
//! max = 39
//! ```
//!
//! Groups are keyed by name and kept in document order. A list of groups
//! each carrying a `name` field is read as well.

use crate::error::{Error, Result};
use crate::{DeviceInfo, ParameterDefinition, ParameterGroup, ParameterTable, ValueKind};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub sysex_common_info: CommonInfoDocument,
    #[serde(
        default,
        serialize_with = "serialize_groups",
        deserialize_with = "deserialize_groups"
    )]
    pub sysex_parameter_groups: Vec<GroupDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonInfoDocument {
    pub manufacturer_id_hex: String,
    pub model_id_hex: String,
    pub command_id_dt1_hex: String,
    #[serde(default = "default_rq1_hex")]
    pub command_id_rq1_hex: String,
    #[serde(default = "default_device_id_hex")]
    pub default_device_id_hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDocument {
    /// Taken from the map key in keyed documents.
    #[serde(default, skip_serializing)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address_bytes_1_3_hex: [String; 3],
    #[serde(default)]
    pub parameters: Vec<ParameterDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDocument {
    pub name: String,
    pub offset_hex: String,
    pub min: i32,
    pub max: i32,
    #[serde(default = "default_bytes")]
    pub bytes: u8,
    #[serde(default, rename = "type")]
    pub kind: ValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn serialize_groups<S: Serializer>(
    groups: &[GroupDocument],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(groups.len()))?;
    for group in groups {
        map.serialize_entry(&group.name, group)?;
    }
    map.end()
}

fn deserialize_groups<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<GroupDocument>, D::Error> {
    struct GroupsVisitor;

    impl<'de> Visitor<'de> for GroupsVisitor {
        type Value = Vec<GroupDocument>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of groups keyed by name or a list of named groups")
        }

        fn visit_map<A: MapAccess<'de>>(
            self,
            mut access: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, mut group)) = access.next_entry::<String, GroupDocument>()? {
                group.name = name;
                groups.push(group);
            }
            Ok(groups)
        }

        fn visit_seq<A: SeqAccess<'de>>(
            self,
            mut access: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(group) = access.next_element::<GroupDocument>()? {
                if group.name.is_empty() {
                    return Err(serde::de::Error::missing_field("name"));
                }
                groups.push(group);
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_any(GroupsVisitor)
}

fn default_rq1_hex() -> String {
    hex_byte(DeviceInfo::JV1080.rq1_command)
}

fn default_device_id_hex() -> String {
    hex_byte(DeviceInfo::JV1080.default_device_id)
}

fn default_bytes() -> u8 {
    1
}

fn hex_byte(value: u8) -> String {
    format!("{:02X}", value)
}

fn hex_byte_wide(value: u16) -> String {
    format!("{:02X}", value)
}

fn parse_hex(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u16::from_str_radix(digits, 16).map_err(|_| Error::InvalidHex(text.to_string()))
}

fn parse_hex_byte(text: &str) -> Result<u8> {
    let value = parse_hex(text)?;
    u8::try_from(value).map_err(|_| Error::InvalidHex(text.to_string()))
}

impl TableDocument {
    pub fn into_table(self) -> Result<ParameterTable> {
        let info = &self.sysex_common_info;
        let device = DeviceInfo {
            manufacturer_id: parse_hex_byte(&info.manufacturer_id_hex)?,
            model_id: parse_hex_byte(&info.model_id_hex)?,
            dt1_command: parse_hex_byte(&info.command_id_dt1_hex)?,
            rq1_command: parse_hex_byte(&info.command_id_rq1_hex)?,
            default_device_id: parse_hex_byte(&info.default_device_id_hex)?,
        };

        let mut groups = Vec::with_capacity(self.sysex_parameter_groups.len());
        for group_doc in self.sysex_parameter_groups {
            let [a1, a2, a3] = &group_doc.address_bytes_1_3_hex;
            let base = [parse_hex_byte(a1)?, parse_hex_byte(a2)?, parse_hex_byte(a3)?];

            let mut parameters = Vec::with_capacity(group_doc.parameters.len());
            for param in group_doc.parameters {
                parameters.push(ParameterDefinition {
                    offset: parse_hex(&param.offset_hex)?,
                    name: param.name,
                    min: param.min,
                    max: param.max,
                    size: param.bytes,
                    kind: param.kind,
                    description: param.description,
                });
            }

            groups.push(ParameterGroup {
                name: group_doc.name,
                base_address: base,
                description: group_doc.description,
                parameters,
            });
        }

        ParameterTable::new(device, groups)
    }

    pub fn from_table(table: &ParameterTable) -> Self {
        let device = table.device();
        Self {
            sysex_common_info: CommonInfoDocument {
                manufacturer_id_hex: hex_byte(device.manufacturer_id),
                model_id_hex: hex_byte(device.model_id),
                command_id_dt1_hex: hex_byte(device.dt1_command),
                command_id_rq1_hex: hex_byte(device.rq1_command),
                default_device_id_hex: hex_byte(device.default_device_id),
            },
            sysex_parameter_groups: table
                .groups()
                .iter()
                .map(|group| GroupDocument {
                    name: group.name.clone(),
                    description: group.description.clone(),
                    address_bytes_1_3_hex: group.base_address.map(hex_byte),
                    parameters: group
                        .parameters
                        .iter()
                        .map(|p| ParameterDocument {
                            name: p.name.clone(),
                            offset_hex: hex_byte_wide(p.offset),
                            min: p.min,
                            max: p.max,
                            bytes: p.size,
                            kind: p.kind,
                            description: p.description.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl ParameterTable {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let doc: TableDocument = toml::from_str(text)?;
        doc.into_table()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: TableDocument = serde_json::from_str(text)?;
        doc.into_table()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&TableDocument::from_table(self))?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&TableDocument::from_table(self))?)
    }

    /// Load a table from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let table = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            other => {
                return Err(Error::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        info!(
            "Loaded parameter table from {}: {} groups, {} parameters",
            path.display(),
            table.groups().len(),
            table.parameter_count()
        );
        Ok(table)
    }
}
