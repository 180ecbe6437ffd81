//! Error types for SysEx transports.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No MIDI output ports available")]
    NoPorts,

    #[error("No MIDI output port matching '{0}'")]
    PortNotFound(String),

    #[error("MIDI connection error: {0}")]
    Connect(String),

    #[error("MIDI send error: {0}")]
    Send(String),

    #[error("MIDI receive error: {0}")]
    Receive(String),

    #[error("No reply within {0:?}")]
    Timeout(Duration),

    #[error("Connection closed")]
    Closed,
}

#[cfg(feature = "midi-io")]
impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::Connect(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::Connect(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::Connect(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::Send(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
