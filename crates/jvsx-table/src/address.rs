//! Four-byte, 7-bit parameter addresses.
//!
//! The JV-1080 address space is four bytes wide with only the low seven bits
//! of each byte in use. Groups are anchored at a three-byte base address and
//! a parameter's offset is added to the fourth byte, carrying into the
//! higher bytes in base 128.

use std::fmt;

/// Three leading address bytes shared by every parameter of a group.
pub type BaseAddress = [u8; 3];

/// Number of distinct addresses (2^28).
const ADDRESS_SPACE: u32 = 1 << 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 4]);

impl Address {
    /// Returns `None` if any byte has its high bit set.
    pub fn new(bytes: [u8; 4]) -> Option<Self> {
        if bytes.iter().any(|b| *b > 0x7F) {
            return None;
        }
        Some(Self(bytes))
    }

    /// Address of `offset` within the block starting at `base`.
    ///
    /// Returns `None` when the base has a byte above 0x7F or the carry runs
    /// past the most significant byte.
    pub fn from_base(base: BaseAddress, offset: u16) -> Option<Self> {
        Self::new([base[0], base[1], base[2], 0])?.offset_by(offset as u32)
    }

    /// Address `n` positions after this one.
    pub fn offset_by(self, n: u32) -> Option<Self> {
        let linear = self.to_linear().checked_add(n)?;
        Self::from_linear(linear)
    }

    pub fn from_linear(linear: u32) -> Option<Self> {
        if linear >= ADDRESS_SPACE {
            return None;
        }
        Some(Self([
            ((linear >> 21) & 0x7F) as u8,
            ((linear >> 14) & 0x7F) as u8,
            ((linear >> 7) & 0x7F) as u8,
            (linear & 0x7F) as u8,
        ]))
    }

    pub fn to_linear(self) -> u32 {
        let [a1, a2, a3, a4] = self.0;
        (a1 as u32) << 21 | (a2 as u32) << 14 | (a3 as u32) << 7 | a4 as u32
    }

    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Sum of the address bytes, as used by the checksum.
    pub fn byte_sum(&self) -> u32 {
        self.0.iter().map(|b| *b as u32).sum()
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = ();

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 4] = bytes.try_into().map_err(|_| ())?;
        Self::new(bytes).ok_or(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a1, a2, a3, a4] = self.0;
        write!(f, "{:02X} {:02X} {:02X} {:02X}", a1, a2, a3, a4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_without_carry() {
        let addr = Address::from_base([0x01, 0x00, 0x00], 0x0C).unwrap();
        assert_eq!(addr.bytes(), [0x01, 0x00, 0x00, 0x0C]);
    }

    #[test]
    fn test_from_base_carries_in_base_128() {
        let addr = Address::from_base([0x01, 0x00, 0x10], 0x85).unwrap();
        assert_eq!(addr.bytes(), [0x01, 0x00, 0x11, 0x05]);

        // Carry ripples through several bytes
        let addr = Address::from_base([0x01, 0x7F, 0x7F], 0x80).unwrap();
        assert_eq!(addr.bytes(), [0x02, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_from_base_overflow() {
        assert!(Address::from_base([0x7F, 0x7F, 0x7F], 0x80).is_none());
        assert!(Address::from_base([0x80, 0x00, 0x00], 0).is_none());
    }

    #[test]
    fn test_linear_roundtrip_and_offset() {
        let addr = Address::new([0x03, 0x00, 0x10, 0x7F]).unwrap();
        assert_eq!(Address::from_linear(addr.to_linear()), Some(addr));
        assert_eq!(
            addr.offset_by(1).unwrap().bytes(),
            [0x03, 0x00, 0x11, 0x00]
        );
    }

    #[test]
    fn test_display_and_sum() {
        let addr = Address::new([0x01, 0x00, 0x1F, 0x0A]).unwrap();
        assert_eq!(addr.to_string(), "01 00 1F 0A");
        assert_eq!(addr.byte_sum(), 0x01 + 0x1F + 0x0A);
    }

    #[test]
    fn test_try_from_slice() {
        assert!(Address::try_from(&[0x01u8, 0x00, 0x00][..]).is_err());
        assert!(Address::try_from(&[0x01u8, 0x00, 0x00, 0xF0][..]).is_err());
        assert!(Address::try_from(&[0x01u8, 0x00, 0x00, 0x00][..]).is_ok());
    }
}
