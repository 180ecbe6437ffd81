//! Parameter, group and device descriptions.

use crate::{Address, BaseAddress};
use serde::{Deserialize, Serialize};

/// How raw data bytes map to a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Unsigned,
    /// Two's complement over the field width.
    Signed,
}

/// A single addressable parameter within a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefinition {
    pub name: String,
    /// Position relative to the group's base address
    pub offset: u16,
    pub min: i32,
    pub max: i32,
    /// Number of data bytes (1-4). Values wider than one byte are nibblized.
    pub size: u8,
    pub kind: ValueKind,
    pub description: Option<String>,
}

impl ParameterDefinition {
    /// Single-byte unsigned parameter.
    pub fn new(name: impl Into<String>, offset: u16, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            offset,
            min,
            max,
            size: 1,
            kind: ValueKind::Unsigned,
            description: None,
        }
    }

    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    pub fn signed(mut self) -> Self {
        self.kind = ValueKind::Signed;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Usable value bits carried by the data bytes.
    ///
    /// A single data byte carries 7 bits; nibblized values carry 4 bits per byte.
    pub fn value_bits(&self) -> u32 {
        if self.size <= 1 {
            7
        } else {
            4 * self.size as u32
        }
    }

    /// Smallest and largest value the data bytes can represent.
    pub fn representable_range(&self) -> (i64, i64) {
        let bits = self.value_bits();
        match self.kind {
            ValueKind::Unsigned => (0, (1i64 << bits) - 1),
            ValueKind::Signed => (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1),
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A named block of parameters sharing one base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGroup {
    pub name: String,
    pub base_address: BaseAddress,
    pub description: Option<String>,
    pub parameters: Vec<ParameterDefinition>,
}

impl ParameterGroup {
    pub fn new(name: impl Into<String>, base_address: BaseAddress) -> Self {
        Self {
            name: name.into(),
            base_address,
            description: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parameter(mut self, definition: ParameterDefinition) -> Self {
        self.parameters.push(definition);
        self
    }

    pub fn parameters(mut self, definitions: impl IntoIterator<Item = ParameterDefinition>) -> Self {
        self.parameters.extend(definitions);
        self
    }

    pub fn address_of(&self, definition: &ParameterDefinition) -> Option<Address> {
        Address::from_base(self.base_address, definition.offset)
    }
}

/// Fixed identification bytes of the message format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub manufacturer_id: u8,
    pub model_id: u8,
    /// Data set 1
    pub dt1_command: u8,
    /// Data request 1
    pub rq1_command: u8,
    pub default_device_id: u8,
}

impl DeviceInfo {
    /// Roland JV-1080.
    pub const JV1080: DeviceInfo = DeviceInfo {
        manufacturer_id: 0x41,
        model_id: 0x6A,
        dt1_command: 0x12,
        rq1_command: 0x11,
        default_device_id: 0x10,
    };
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self::JV1080
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bits() {
        assert_eq!(ParameterDefinition::new("a", 0, 0, 127).value_bits(), 7);
        assert_eq!(
            ParameterDefinition::new("b", 0, 0, 255).with_size(2).value_bits(),
            8
        );
        assert_eq!(
            ParameterDefinition::new("c", 0, 0, 0xFFFF).with_size(4).value_bits(),
            16
        );
    }

    #[test]
    fn test_representable_range() {
        let unsigned = ParameterDefinition::new("a", 0, 0, 127);
        assert_eq!(unsigned.representable_range(), (0, 127));

        let signed = ParameterDefinition::new("b", 0, -48, 48).signed();
        assert_eq!(signed.representable_range(), (-64, 63));

        let wide = ParameterDefinition::new("c", 0, 20, 250).with_size(2);
        assert_eq!(wide.representable_range(), (0, 255));
    }

    #[test]
    fn test_group_address_of() {
        let group = ParameterGroup::new("temp_performance_part_3", [0x01, 0x00, 0x12])
            .parameter(ParameterDefinition::new("Part level", 0x04, 0, 127));
        let addr = group.address_of(&group.parameters[0]).unwrap();
        assert_eq!(addr.bytes(), [0x01, 0x00, 0x12, 0x04]);
    }
}
