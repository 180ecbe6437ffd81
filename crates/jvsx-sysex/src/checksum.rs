//! Roland checksum.
//!
//! The checksum covers the address and data bytes: added to their sum it
//! must give zero modulo 128.

use crate::error::{Error, Result};
use jvsx_table::Address;

/// Checksum over an arbitrary run of address and data bytes.
pub fn checksum(bytes: &[u8]) -> u8 {
    from_sum(bytes.iter().map(|b| *b as u32).sum())
}

pub fn message_checksum(address: &Address, data: &[u8]) -> u8 {
    let data_sum: u32 = data.iter().map(|b| *b as u32).sum();
    from_sum(address.byte_sum() + data_sum)
}

pub fn verify_checksum(address: &Address, data: &[u8], found: u8) -> Result<()> {
    let expected = message_checksum(address, data);
    if expected != found {
        return Err(Error::ChecksumMismatch { expected, found });
    }
    Ok(())
}

fn from_sum(sum: u32) -> u8 {
    ((0x80 - sum % 0x80) % 0x80) as u8
}
