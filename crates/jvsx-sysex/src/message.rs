//! DT1/RQ1 message framing.
//!
//! ```text
//! F0 41 <dev> 6A 12 a1 a2 a3 a4 <data..> <sum> F7    data set (DT1)
//! F0 41 <dev> 6A 11 a1 a2 a3 a4 s1 s2 s3 s4 <sum> F7  data request (RQ1)
//! ```

use crate::checksum::{message_checksum, verify_checksum};
use crate::error::{Error, Result};
use crate::value::DataBytes;
use jvsx_table::{Address, DeviceInfo};
use smallvec::SmallVec;
use std::fmt::Write;

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;

/// F0, manufacturer, device, model, command, four address bytes.
const HEADER_LEN: usize = 9;
/// Header plus checksum and F7.
const FRAME_OVERHEAD: usize = HEADER_LEN + 2;
/// RQ1 size field width.
const SIZE_FIELD_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// DT1
    DataSet,
    /// RQ1
    DataRequest,
}

impl Command {
    pub fn id(self, device: &DeviceInfo) -> u8 {
        match self {
            Command::DataSet => device.dt1_command,
            Command::DataRequest => device.rq1_command,
        }
    }

    pub fn from_id(id: u8, device: &DeviceInfo) -> Option<Self> {
        if id == device.dt1_command {
            Some(Command::DataSet)
        } else if id == device.rq1_command {
            Some(Command::DataRequest)
        } else {
            None
        }
    }
}

/// One framed SysEx message with its checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysExMessage {
    pub device_id: u8,
    pub command: Command,
    pub address: Address,
    /// Data bytes for DT1; the 4-byte size field for RQ1.
    pub data: DataBytes,
    pub checksum: u8,
}

impl SysExMessage {
    pub fn data_set(device_id: u8, address: Address, data: DataBytes) -> Self {
        let checksum = message_checksum(&address, &data);
        Self {
            device_id,
            command: Command::DataSet,
            address,
            data,
            checksum,
        }
    }

    /// Request `size` bytes starting at `address`.
    pub fn data_request(device_id: u8, address: Address, size: u32) -> Self {
        let data: DataBytes = (0..SIZE_FIELD_LEN as u32)
            .rev()
            .map(|i| ((size >> (7 * i)) & 0x7F) as u8)
            .collect();
        let checksum = message_checksum(&address, &data);
        Self {
            device_id,
            command: Command::DataRequest,
            address,
            data,
            checksum,
        }
    }

    /// Size field of an RQ1 message.
    pub fn requested_size(&self) -> Option<u32> {
        match self.command {
            Command::DataRequest => Some(
                self.data
                    .iter()
                    .fold(0u32, |acc, b| (acc << 7) | (*b as u32 & 0x7F)),
            ),
            Command::DataSet => None,
        }
    }

    pub fn to_bytes(&self, device: &DeviceInfo) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FRAME_OVERHEAD + self.data.len());
        bytes.extend_from_slice(&[
            SYSEX_START,
            device.manufacturer_id,
            self.device_id,
            device.model_id,
            self.command.id(device),
        ]);
        bytes.extend_from_slice(self.address.as_slice());
        bytes.extend_from_slice(&self.data);
        bytes.push(self.checksum);
        bytes.push(SYSEX_END);
        bytes
    }

    /// Parse and verify one complete message.
    ///
    /// Frame, header and command problems are [`Error::MalformedMessage`];
    /// a bad checksum is [`Error::ChecksumMismatch`]. Any 7-bit device ID is
    /// accepted.
    pub fn parse(raw: &[u8], device: &DeviceInfo) -> Result<Self> {
        if raw.len() < FRAME_OVERHEAD + 1 {
            return Err(Error::malformed(format!(
                "message too short ({} bytes)",
                raw.len()
            )));
        }
        if raw[0] != SYSEX_START || raw[raw.len() - 1] != SYSEX_END {
            return Err(Error::malformed("missing F0/F7 framing"));
        }

        let body = &raw[1..raw.len() - 1];
        if let Some(pos) = body.iter().position(|b| *b > 0x7F) {
            return Err(Error::malformed(format!(
                "status byte 0x{:02X} inside message at offset {}",
                body[pos],
                pos + 1
            )));
        }

        if raw[1] != device.manufacturer_id {
            return Err(Error::malformed(format!(
                "manufacturer ID 0x{:02X}",
                raw[1]
            )));
        }
        let device_id = raw[2];
        if raw[3] != device.model_id {
            return Err(Error::malformed(format!("model ID 0x{:02X}", raw[3])));
        }
        let command = Command::from_id(raw[4], device)
            .ok_or_else(|| Error::malformed(format!("command ID 0x{:02X}", raw[4])))?;

        let address = Address::try_from(&raw[5..HEADER_LEN])
            .map_err(|_| Error::malformed("invalid address"))?;
        let data = &raw[HEADER_LEN..raw.len() - 2];
        let checksum = raw[raw.len() - 2];

        if command == Command::DataRequest && data.len() != SIZE_FIELD_LEN {
            return Err(Error::malformed(format!(
                "RQ1 size field has {} bytes",
                data.len()
            )));
        }

        verify_checksum(&address, data, checksum)?;

        Ok(Self {
            device_id,
            command,
            address,
            data: SmallVec::from_slice(data),
            checksum,
        })
    }
}

/// Format bytes as uppercase hex pairs separated by spaces.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02X}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EFX_TYPE_5: [u8; 12] = [
        0xF0, 0x41, 0x10, 0x6A, 0x12, 0x01, 0x00, 0x00, 0x0C, 0x05, 0x6E, 0xF7,
    ];

    fn efx_address() -> Address {
        Address::new([0x01, 0x00, 0x00, 0x0C]).unwrap()
    }

    #[test]
    fn test_data_set_bytes() {
        let msg = SysExMessage::data_set(0x10, efx_address(), SmallVec::from_slice(&[0x05]));
        assert_eq!(msg.checksum, 0x6E);
        assert_eq!(msg.to_bytes(&DeviceInfo::JV1080), EFX_TYPE_5);
    }

    #[test]
    fn test_data_request_size_field() {
        let msg = SysExMessage::data_request(0x10, efx_address(), 0x81);
        assert_eq!(msg.data.as_slice(), &[0x00, 0x00, 0x01, 0x01]);
        assert_eq!(msg.requested_size(), Some(0x81));

        let bytes = msg.to_bytes(&DeviceInfo::JV1080);
        assert_eq!(bytes[4], 0x11);
        assert_eq!(bytes.len(), 15);
        assert_eq!(SysExMessage::parse(&bytes, &DeviceInfo::JV1080).unwrap(), msg);
    }

    #[test]
    fn test_parse_reports_device_id() {
        let mut raw = EFX_TYPE_5;
        raw[2] = 0x1F;
        let msg = SysExMessage::parse(&raw, &DeviceInfo::JV1080).unwrap();
        assert_eq!(msg.device_id, 0x1F);
        assert_eq!(msg.command, Command::DataSet);
        assert_eq!(msg.data.as_slice(), &[0x05]);
    }

    #[test]
    fn test_parse_rejects_bad_frames() {
        let device = DeviceInfo::JV1080;
        let malformed = |raw: &[u8]| {
            matches!(
                SysExMessage::parse(raw, &device),
                Err(Error::MalformedMessage(_))
            )
        };

        assert!(malformed(&EFX_TYPE_5[..11]));
        assert!(malformed(&EFX_TYPE_5[1..]));

        let mut roland_other_model = EFX_TYPE_5;
        roland_other_model[3] = 0x42;
        assert!(malformed(&roland_other_model));

        let mut yamaha = EFX_TYPE_5;
        yamaha[1] = 0x43;
        assert!(malformed(&yamaha));

        let mut unknown_command = EFX_TYPE_5;
        unknown_command[4] = 0x13;
        assert!(malformed(&unknown_command));

        let mut high_bit = EFX_TYPE_5;
        high_bit[9] = 0x85;
        assert!(malformed(&high_bit));
    }

    #[test]
    fn test_parse_checksum_mismatch() {
        let mut raw = EFX_TYPE_5;
        raw[10] = 0x6F;
        assert!(matches!(
            SysExMessage::parse(&raw, &DeviceInfo::JV1080),
            Err(Error::ChecksumMismatch {
                expected: 0x6E,
                found: 0x6F
            })
        ));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&EFX_TYPE_5), "F0 41 10 6A 12 01 00 00 0C 05 6E F7");
        assert_eq!(to_hex(&[]), "");
    }
}
