//! Parameter values and their data byte encoding.
//!
//! A single data byte carries a 7-bit value. Wider parameters are
//! nibblized: 4 bits per data byte, most significant nibble first. Signed
//! parameters use two's complement over the field width.

use crate::error::{Error, Result};
use jvsx_table::{ParameterDefinition, ValueKind};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Data bytes of one message. Single parameters never need more than four.
pub type DataBytes = SmallVec<[u8; 4]>;

/// A decoded `(group, parameter, value)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterValue {
    pub group: String,
    pub parameter: String,
    pub value: i32,
}

impl ParameterValue {
    pub fn new(group: impl Into<String>, parameter: impl Into<String>, value: i32) -> Self {
        Self {
            group: group.into(),
            parameter: parameter.into(),
            value,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} = {}", self.group, self.parameter, self.value)
    }
}

/// Pack an already validated value into `definition.size` data bytes.
pub fn pack(definition: &ParameterDefinition, value: i32) -> DataBytes {
    let bits = definition.value_bits();
    let raw = (value as i64 & ((1i64 << bits) - 1)) as u32;

    if definition.size <= 1 {
        return SmallVec::from_slice(&[(raw & 0x7F) as u8]);
    }

    (0..definition.size as u32)
        .rev()
        .map(|nibble| ((raw >> (4 * nibble)) & 0x0F) as u8)
        .collect()
}

/// Inverse of [`pack`].
pub fn unpack(definition: &ParameterDefinition, data: &[u8]) -> Result<i32> {
    if data.len() != definition.size as usize {
        return Err(Error::malformed(format!(
            "{} expects {} data byte(s), got {}",
            definition.name,
            definition.size,
            data.len()
        )));
    }

    let raw = if definition.size <= 1 {
        data[0] as u32 & 0x7F
    } else {
        let mut raw = 0u32;
        for byte in data {
            if *byte > 0x0F {
                return Err(Error::malformed(format!(
                    "{}: nibblized data byte 0x{:02X} above 0x0F",
                    definition.name, byte
                )));
            }
            raw = (raw << 4) | *byte as u32;
        }
        raw
    };

    let value = match definition.kind {
        ValueKind::Unsigned => raw as i64,
        ValueKind::Signed => {
            let bits = definition.value_bits();
            let raw = raw as i64;
            if raw >= 1 << (bits - 1) {
                raw - (1 << bits)
            } else {
                raw
            }
        }
    };
    Ok(value as i32)
}
