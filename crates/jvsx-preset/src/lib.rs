//! JV-1080 presets.
//!
//! A [`Preset`] is a named, ordered set of `(group, parameter, value)`
//! entries. Presets can be built by hand or from parsed dumps, stored as
//! JSON, TOML or `.syx`, exported as Rust source and compared with
//! [`Preset::diff`].

pub mod error;
pub use error::{Error, Result};

mod preset;
pub use preset::{Preset, PresetEntry, EFX_PARAMETER_COUNT, PERFORMANCE_NAME_LEN};

mod diff;
pub use diff::{ChangedParameter, PresetDiff};

pub mod export;
pub use export::{export_rust, import_rust};

mod persist;
pub use persist::PresetFormat;

mod syx;
pub use syx::import_directory;

pub use jvsx_sysex::PresetMode;
