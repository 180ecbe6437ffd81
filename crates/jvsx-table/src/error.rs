//! Error types for parameter table construction and lookup.

use crate::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown parameter group: {0}")]
    UnknownGroup(String),

    #[error("Unknown parameter: {parameter} in group {group}")]
    UnknownParameter { group: String, parameter: String },

    #[error("Duplicate parameter group: {0}")]
    DuplicateGroup(String),

    #[error("Duplicate parameter {parameter} in group {group}")]
    DuplicateParameter { group: String, parameter: String },

    #[error("Duplicate offset 0x{offset:02X} in group {group}")]
    DuplicateOffset { group: String, offset: u16 },

    #[error("Address {address} of {group}/{parameter} is already used by {other}")]
    AddressCollision {
        address: Address,
        group: String,
        parameter: String,
        other: String,
    },

    #[error("Address of {group}/{parameter} does not fit in four 7-bit bytes")]
    AddressOverflow { group: String, parameter: String },

    #[error("Base address of group {0} has a byte above 0x7F")]
    InvalidBaseAddress(String),

    #[error("Invalid range [{min}, {max}] for {group}/{parameter}")]
    InvalidRange {
        group: String,
        parameter: String,
        min: i32,
        max: i32,
    },

    #[error("Invalid data size {size} for {group}/{parameter} (expected 1-4 bytes)")]
    InvalidSize {
        group: String,
        parameter: String,
        size: u8,
    },

    #[error("Invalid hex value: {0:?}")]
    InvalidHex(String),

    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
