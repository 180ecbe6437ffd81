//! Table-driven encoder and decoder.

use crate::error::{Error, Result};
use crate::message::{to_hex, Command, SysExMessage};
use crate::validate::validate;
use crate::value::{pack, unpack, ParameterValue};
use jvsx_table::ParameterTable;
use std::sync::Arc;
use tracing::debug;

/// Highest device ID the JV-1080 can be set to.
pub const MAX_DEVICE_ID: u8 = 0x1F;

/// Encodes parameter writes and requests, and decodes DT1 messages, against
/// a shared [`ParameterTable`].
#[derive(Debug, Clone)]
pub struct SysExCodec {
    table: Arc<ParameterTable>,
    device_id: u8,
}

impl SysExCodec {
    /// Codec using the table's default device ID.
    pub fn new(table: Arc<ParameterTable>) -> Self {
        let device_id = table.device().default_device_id;
        Self { table, device_id }
    }

    pub fn with_device_id(mut self, device_id: u8) -> Result<Self> {
        if device_id > MAX_DEVICE_ID {
            return Err(Error::InvalidDeviceId(device_id));
        }
        self.device_id = device_id;
        Ok(self)
    }

    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    pub fn table(&self) -> &Arc<ParameterTable> {
        &self.table
    }

    /// Build the DT1 message setting `group`/`parameter` to `value`.
    pub fn encode_message(&self, group: &str, parameter: &str, value: i32) -> Result<SysExMessage> {
        let resolved = self.table.lookup(group, parameter)?;
        validate(resolved.definition, value)?;

        let data = pack(resolved.definition, value);
        Ok(SysExMessage::data_set(self.device_id, resolved.address, data))
    }

    pub fn encode(&self, group: &str, parameter: &str, value: i32) -> Result<Vec<u8>> {
        let bytes = self
            .encode_message(group, parameter, value)?
            .to_bytes(self.table.device());
        debug!("Encoded {}/{} = {}: {}", group, parameter, value, to_hex(&bytes));
        Ok(bytes)
    }

    /// Build the RQ1 message asking the device for one parameter.
    pub fn encode_request(&self, group: &str, parameter: &str) -> Result<Vec<u8>> {
        let resolved = self.table.lookup(group, parameter)?;
        let msg = SysExMessage::data_request(
            self.device_id,
            resolved.address,
            resolved.definition.size as u32,
        );
        Ok(msg.to_bytes(self.table.device()))
    }

    /// Decode a DT1 message carrying exactly one parameter.
    pub fn decode(&self, raw: &[u8]) -> Result<ParameterValue> {
        let msg = self.parse_data_set(raw)?;
        let resolved = self
            .table
            .resolve_address(msg.address)
            .ok_or(Error::UnrecognizedAddress(msg.address))?;

        let value = unpack(resolved.definition, &msg.data)?;
        Ok(ParameterValue::new(
            &resolved.group.name,
            &resolved.definition.name,
            value,
        ))
    }

    /// Decode a DT1 message whose data may span several consecutive
    /// parameters, as in bulk dumps.
    ///
    /// The data is walked from the start address; bytes at addresses the
    /// table does not know are skipped. Fails with
    /// [`Error::UnrecognizedAddress`] if nothing in the message is known.
    pub fn decode_all(&self, raw: &[u8]) -> Result<Vec<ParameterValue>> {
        let msg = self.parse_data_set(raw)?;
        let data = msg.data.as_slice();

        let mut values = Vec::new();
        let mut pos = 0usize;
        while pos < data.len() {
            let Some(address) = msg.address.offset_by(pos as u32) else {
                break;
            };
            let Some(resolved) = self.table.resolve_address(address) else {
                pos += 1;
                continue;
            };

            let end = pos + resolved.definition.size as usize;
            if end > data.len() {
                debug!(
                    "Truncated {}/{} at {}",
                    resolved.group.name, resolved.definition.name, address
                );
                break;
            }

            match unpack(resolved.definition, &data[pos..end]) {
                Ok(value) => {
                    values.push(ParameterValue::new(
                        &resolved.group.name,
                        &resolved.definition.name,
                        value,
                    ));
                    pos = end;
                }
                Err(e) => {
                    debug!("Skipping byte at {}: {}", address, e);
                    pos += 1;
                }
            }
        }

        if values.is_empty() {
            return Err(Error::UnrecognizedAddress(msg.address));
        }
        debug!("Decoded {} parameter(s) from {}", values.len(), msg.address);
        Ok(values)
    }

    fn parse_data_set(&self, raw: &[u8]) -> Result<SysExMessage> {
        let msg = SysExMessage::parse(raw, self.table.device())?;
        if msg.command != Command::DataSet {
            return Err(Error::malformed("expected a DT1 data set message"));
        }
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jvsx_table::builtin;

    fn codec() -> SysExCodec {
        SysExCodec::new(Arc::new(builtin::jv1080().unwrap()))
    }

    #[test]
    fn test_encode_efx_type() {
        let bytes = codec().encode("temp_performance_common", "EFX:Type", 5).unwrap();
        insta::assert_snapshot!(to_hex(&bytes), @"F0 41 10 6A 12 01 00 00 0C 05 6E F7");
    }

    #[test]
    fn test_encode_tempo_is_nibblized() {
        let bytes = codec()
            .encode("temp_performance_common", "Performance tempo", 120)
            .unwrap();
        assert_eq!(&bytes[5..11], &[0x01, 0x00, 0x00, 0x2C, 0x07, 0x08]);
    }

    #[test]
    fn test_encode_errors() {
        let codec = codec();
        assert!(matches!(
            codec.encode("temp_performance_common", "EFX:Type", 40),
            Err(Error::ValueOutOfRange { value: 40, .. })
        ));
        assert!(matches!(
            codec.encode("no_such_group", "EFX:Type", 0),
            Err(Error::Table(jvsx_table::Error::UnknownGroup(_)))
        ));
        assert!(matches!(
            codec.encode("temp_performance_common", "No such thing", 0),
            Err(Error::Table(jvsx_table::Error::UnknownParameter { .. }))
        ));
    }

    #[test]
    fn test_device_id() {
        let codec = codec().with_device_id(0x11).unwrap();
        let bytes = codec.encode("system_common", "Panel mode", 1).unwrap();
        assert_eq!(bytes[2], 0x11);

        assert!(matches!(
            self::codec().with_device_id(0x20),
            Err(Error::InvalidDeviceId(0x20))
        ));
    }

    #[test]
    fn test_encode_request() {
        let bytes = codec()
            .encode_request("temp_performance_common", "Performance tempo")
            .unwrap();
        insta::assert_snapshot!(to_hex(&bytes), @"F0 41 10 6A 11 01 00 00 2C 00 00 00 02 51 F7");
    }

    #[test]
    fn test_decode() {
        let codec = codec();
        let raw = codec
            .encode("temp_performance_part_2", "Part coarse tune", -12)
            .unwrap();
        let decoded = codec.decode(&raw).unwrap();
        assert_eq!(
            decoded,
            ParameterValue::new("temp_performance_part_2", "Part coarse tune", -12)
        );
    }

    #[test]
    fn test_decode_unrecognized_address() {
        let codec = codec();
        let msg = SysExMessage::data_set(
            0x10,
            jvsx_table::Address::new([0x01, 0x00, 0x00, 0x7F]).unwrap(),
            smallvec::smallvec![0x00],
        );
        let raw = msg.to_bytes(&jvsx_table::DeviceInfo::JV1080);
        assert!(matches!(
            codec.decode(&raw),
            Err(Error::UnrecognizedAddress(_))
        ));
    }

    #[test]
    fn test_decode_rejects_request() {
        let codec = codec();
        let raw = codec.encode_request("system_common", "Panel mode").unwrap();
        assert!(matches!(
            codec.decode(&raw),
            Err(Error::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_decode_all_bulk() {
        let codec = codec();
        // Performance name 1-4
        let mut data: Vec<u8> = b"JV-1".to_vec();
        let msg = SysExMessage::data_set(
            0x10,
            jvsx_table::Address::new([0x01, 0x00, 0x00, 0x00]).unwrap(),
            smallvec::SmallVec::from_slice(&data),
        );
        let values = codec
            .decode_all(&msg.to_bytes(&jvsx_table::DeviceInfo::JV1080))
            .unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0].parameter, "Performance name 1");
        assert_eq!(values[0].value, b'J' as i32);
        assert_eq!(values[3].value, b'1' as i32);

        // Spanning a nibblized parameter
        data = vec![0x05, 0x00, 0x07, 0x08, 0x01];
        let msg = SysExMessage::data_set(
            0x10,
            jvsx_table::Address::new([0x01, 0x00, 0x00, 0x2A]).unwrap(),
            smallvec::SmallVec::from_slice(&data),
        );
        let values = codec
            .decode_all(&msg.to_bytes(&jvsx_table::DeviceInfo::JV1080))
            .unwrap();
        let names: Vec<_> = values.iter().map(|v| v.parameter.as_str()).collect();
        assert_eq!(
            names,
            vec!["Reverb HF damp", "Delay feedback", "Performance tempo", "Key range switch"]
        );
        assert_eq!(values[2].value, 120);
    }
}
