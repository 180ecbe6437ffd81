//! Error types for encoding and decoding SysEx messages.

use jvsx_table::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Unknown group or parameter, raised by the table lookup.
    #[error(transparent)]
    Table(#[from] jvsx_table::Error),

    #[error("Value {value} out of range [{min}, {max}] for parameter {parameter}")]
    ValueOutOfRange {
        parameter: String,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("Checksum mismatch: expected 0x{expected:02X}, found 0x{found:02X}")]
    ChecksumMismatch { expected: u8, found: u8 },

    #[error("Unrecognized address: {0}")]
    UnrecognizedAddress(Address),

    #[error("Malformed SysEx message: {0}")]
    MalformedMessage(String),

    #[error("Invalid device ID 0x{0:02X} (expected 0x00-0x1F)")]
    InvalidDeviceId(u8),

    #[error("MIDI file parse error: {0}")]
    MidiFileParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedMessage(reason.into())
    }
}

impl From<midly::Error> for Error {
    fn from(e: midly::Error) -> Self {
        Error::MidiFileParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
