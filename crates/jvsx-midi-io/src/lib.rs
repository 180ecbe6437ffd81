//! SysEx transports for the JV-1080 toolkit.
//!
//! [`SysExTransport`] lists and opens ports, [`SysExConnection`] sends and
//! receives complete SysEx messages. Two backends ship: [`MemoryTransport`]
//! for dry runs and tests, and `MidirTransport` for hardware.
//!
//! Feature gates: `midi-io` (hardware ports through midir, on by default).

pub mod error;
pub use error::{Error, Result};

mod transport;
pub use transport::{select_port, SysExConnection, SysExTransport};

mod memory;
pub use memory::{MemoryConnection, MemoryTransport};

#[cfg(feature = "midi-io")]
mod hardware;
#[cfg(feature = "midi-io")]
pub use hardware::{MidirConnection, MidirTransport};
