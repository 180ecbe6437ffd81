//! Centralized error type for the jvsx umbrella crate.
//!
//! Wraps all subcrate errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] jvsx_table::Error),

    #[error(transparent)]
    SysEx(#[from] jvsx_sysex::Error),

    #[error("Preset: {0}")]
    Preset(#[from] jvsx_preset::Error),

    #[error("MIDI: {0}")]
    MidiIo(#[from] jvsx_midi_io::Error),

    /// The device answered a request with a different parameter.
    #[error("Expected {expected}, device replied with {found}")]
    UnexpectedReply { expected: String, found: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
