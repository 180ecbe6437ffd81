//! Error types for preset assembly and persistence.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] jvsx_table::Error),

    #[error(transparent)]
    SysEx(#[from] jvsx_sysex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Unsupported preset format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid preset source at byte {position}: {message}")]
    RustImport { position: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
