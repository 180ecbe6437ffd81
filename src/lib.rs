//! # jvsx - Roland JV-1080 SysEx toolkit
//!
//! Encode, decode, validate and send JV-1080 parameters over System
//! Exclusive, driven by a declarative parameter table.
//!
//! ## Architecture
//!
//! jvsx is an umbrella crate that coordinates:
//! - **jvsx-table** - Parameter table (groups, offsets, ranges, address arithmetic, TOML/JSON loading)
//! - **jvsx-sysex** - DT1/RQ1 codec, checksum, validation, `.syx` and SMF stream parsing
//! - **jvsx-preset** - Presets (JSON/TOML/`.syx` persistence, Rust source export)
//! - **jvsx-midi-io** - Transports (midir hardware ports, in-memory loopback)
//!
//! ## Quick Start
//!
//! ```ignore
//! use jvsx::prelude::*;
//!
//! let mut synth = SynthController::builder()
//!     .port("UM-ONE")
//!     .connect(&MidirTransport::new())?;
//!
//! synth.switch_mode(PanelMode::Performance)?;
//! synth.send_parameter("temp_performance_common", "EFX:Type", 5)?;
//!
//! let preset = Preset::load("presets/warm_pad.toml", synth.codec())?;
//! synth.apply_preset(&preset)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Everything, including hardware I/O
//! - `midi-io` - Hardware MIDI ports through midir

pub use jvsx_midi_io as midi_io;
pub use jvsx_preset as preset;
pub use jvsx_sysex as sysex;
pub use jvsx_table as table;

pub use jvsx_midi_io::{MemoryTransport, SysExConnection, SysExTransport};
#[cfg(feature = "midi-io")]
pub use jvsx_midi_io::MidirTransport;
pub use jvsx_preset::{Preset, PresetEntry, PresetFormat};
pub use jvsx_sysex::{ParameterValue, ParseReport, PresetMode, SysExCodec, SysExMessage};
pub use jvsx_table::{Address, ParameterDefinition, ParameterGroup, ParameterTable};

pub mod error;
pub use error::{Error, Result};

mod builder;
mod controller;
pub use builder::{SynthControllerBuilder, DEFAULT_MESSAGE_DELAY};
pub use controller::{PanelMode, SynthController};

/// Convenience prelude for common imports
pub mod prelude {
    // Controller
    pub use crate::{PanelMode, SynthController, SynthControllerBuilder};

    // Table and codec
    pub use crate::sysex::{ParameterValue, SysExCodec};
    pub use crate::table::{builtin, ParameterTable};

    // Presets
    pub use crate::preset::{Preset, PresetMode};

    // Transports
    #[cfg(feature = "midi-io")]
    pub use crate::midi_io::MidirTransport;
    pub use crate::midi_io::{MemoryTransport, SysExConnection, SysExTransport};
}
