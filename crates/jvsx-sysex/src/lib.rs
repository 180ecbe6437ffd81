//! Roland JV-1080 SysEx codec.
//!
//! Encodes parameter writes (DT1) and requests (RQ1), decodes DT1 messages
//! back into `(group, parameter, value)` triples, and parses recorded
//! streams (`.syx` files, SysEx in Standard MIDI Files) tolerating bad
//! messages.
//!
//! ```
//! use jvsx_sysex::SysExCodec;
//! use jvsx_table::builtin;
//! use std::sync::Arc;
//!
//! let codec = SysExCodec::new(Arc::new(builtin::jv1080().unwrap()));
//! let bytes = codec.encode("temp_performance_common", "EFX:Type", 5).unwrap();
//! assert_eq!(bytes, [0xF0, 0x41, 0x10, 0x6A, 0x12, 0x01, 0x00, 0x00, 0x0C, 0x05, 0x6E, 0xF7]);
//!
//! let decoded = codec.decode(&bytes).unwrap();
//! assert_eq!(decoded.value, 5);
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod checksum;
pub use checksum::{checksum, message_checksum, verify_checksum};

mod codec;
pub use codec::{SysExCodec, MAX_DEVICE_ID};

pub mod message;
pub use message::{to_hex, Command, SysExMessage};

mod mode;
pub use mode::PresetMode;

pub mod parser;
pub use parser::{split_messages, ParseReport, RawChunk, SkippedChunk};

pub mod smf;
pub use smf::extract_sysex;

mod validate;
pub use validate::validate;

pub mod value;
pub use value::{pack, unpack, DataBytes, ParameterValue};
