//! SynthController: sends parameters and presets to a connected JV-1080.

use crate::builder::SynthControllerBuilder;
use crate::midi_io::{SysExConnection, SysExTransport};
use crate::preset::{Preset, PresetMode};
use crate::sysex::{to_hex, SysExCodec, SysExMessage};
use crate::table::builtin::SYSTEM_COMMON;
use crate::table::ParameterTable;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Front-panel mode of the synth, the "Panel mode" system parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelMode {
    Performance,
    Patch,
    /// General MIDI
    Gm,
}

impl PanelMode {
    pub fn value(self) -> i32 {
        match self {
            PanelMode::Performance => 0,
            PanelMode::Patch => 1,
            PanelMode::Gm => 2,
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PanelMode::Performance => "performance",
            PanelMode::Patch => "patch",
            PanelMode::Gm => "GM",
        })
    }
}

/// A codec bound to an open port.
///
/// All calls block on the transport. Bulk sends pause `message_delay`
/// between messages so the synth's receive buffer keeps up.
///
/// # Example
///
/// ```
/// use jvsx::prelude::*;
///
/// # fn main() -> jvsx::Result<()> {
/// let transport = MemoryTransport::new();
/// let mut synth = SynthController::builder()
///     .message_delay(std::time::Duration::ZERO)
///     .connect(&transport)?;
///
/// synth.send_parameter("temp_performance_common", "EFX:Type", 5)?;
/// assert_eq!(transport.sent().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct SynthController {
    codec: SysExCodec,
    connection: Box<dyn SysExConnection>,
    message_delay: Duration,
}

impl fmt::Debug for SynthController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthController")
            .field("codec", &self.codec)
            .field("message_delay", &self.message_delay)
            .finish_non_exhaustive()
    }
}

impl SynthController {
    pub fn builder() -> SynthControllerBuilder {
        SynthControllerBuilder::default()
    }

    pub(crate) fn from_parts(
        codec: SysExCodec,
        connection: Box<dyn SysExConnection>,
        message_delay: Duration,
    ) -> Self {
        Self {
            codec,
            connection,
            message_delay,
        }
    }

    /// Port names offered by `transport`.
    pub fn list_ports<T: SysExTransport>(transport: &T) -> Result<Vec<String>> {
        Ok(transport.list_ports()?)
    }

    pub fn table(&self) -> &Arc<ParameterTable> {
        self.codec.table()
    }

    pub fn codec(&self) -> &SysExCodec {
        &self.codec
    }

    pub fn port_name(&self) -> &str {
        self.connection.port_name()
    }

    pub fn message_delay(&self) -> Duration {
        self.message_delay
    }

    /// Validate, encode and send a single parameter.
    pub fn send_parameter(&mut self, group: &str, parameter: &str, value: i32) -> Result<()> {
        let message = self.codec.encode(group, parameter, value)?;
        self.connection.send(&message)?;
        debug!("Sent {}/{} = {}", group, parameter, value);
        Ok(())
    }

    /// Send every entry of `preset` in order and return how many were sent.
    ///
    /// All messages are encoded before the first one is sent, so an invalid
    /// entry sends nothing. A transport failure stops the send.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<usize> {
        let messages = preset.to_messages(&self.codec)?;
        info!(
            "Sending preset '{}' ({} messages) to {}",
            preset.name,
            messages.len(),
            self.port_name()
        );
        self.send_all(&messages)?;
        Ok(messages.len())
    }

    pub fn switch_mode(&mut self, mode: PanelMode) -> Result<()> {
        self.send_parameter(SYSTEM_COMMON, "Panel mode", mode.value())?;
        info!("Switched to {} mode", mode);
        Ok(())
    }

    /// Write the 12 performance name characters, space padded.
    pub fn set_performance_name(&mut self, name: &str) -> Result<()> {
        let mut preset = Preset::new(name, PresetMode::Performance);
        preset.set_performance_name(self.codec.table(), name)?;
        self.apply_preset(&preset)?;
        Ok(())
    }

    /// Ask the synth for the current value of one parameter.
    ///
    /// Sends an RQ1 and waits for the DT1 answer. Incoming messages that do
    /// not decode (other devices, stray SysEx) and answers from units with
    /// another device ID are skipped; the wait ends with the transport's
    /// timeout.
    pub fn query_parameter(&mut self, group: &str, parameter: &str) -> Result<i32> {
        let request = self.codec.encode_request(group, parameter)?;
        self.connection.send(&request)?;
        debug!("Requested {}/{}: {}", group, parameter, to_hex(&request));

        loop {
            let reply = self.connection.receive()?;
            let device_id = SysExMessage::parse(&reply, self.codec.table().device())
                .map(|msg| msg.device_id);
            if let Ok(id) = device_id {
                if id != self.codec.device_id() {
                    debug!("Ignoring reply from device 0x{:02X}", id);
                    continue;
                }
            }
            let decoded = match self.codec.decode(&reply) {
                Ok(decoded) => decoded,
                Err(e) => {
                    debug!("Ignoring reply {}: {}", to_hex(&reply), e);
                    continue;
                }
            };
            if decoded.group != group || decoded.parameter != parameter {
                return Err(Error::UnexpectedReply {
                    expected: format!("{}/{}", group, parameter),
                    found: decoded.to_string(),
                });
            }
            return Ok(decoded.value);
        }
    }

    pub fn close(&mut self) -> Result<()> {
        self.connection.close()?;
        info!("Controller disconnected from {}", self.port_name());
        Ok(())
    }

    fn send_all(&mut self, messages: &[Vec<u8>]) -> Result<()> {
        for (i, message) in messages.iter().enumerate() {
            if i > 0 && !self.message_delay.is_zero() {
                thread::sleep(self.message_delay);
            }
            self.connection.send(message)?;
        }
        Ok(())
    }
}
