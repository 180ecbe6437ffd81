//! Builder for configuring and connecting a `SynthController`.

use crate::controller::SynthController;
use crate::midi_io::{Error as TransportError, SysExConnection, SysExTransport};
use crate::sysex::SysExCodec;
use crate::table::{builtin, ParameterTable};
use crate::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Default pause between consecutive messages of a bulk send.
pub const DEFAULT_MESSAGE_DELAY: Duration = Duration::from_millis(40);

/// Without a table the built-in JV-1080 table is used. Without a port the
/// first port the transport lists is opened.
///
/// # Example
///
/// ```ignore
/// use jvsx::prelude::*;
///
/// let mut synth = SynthController::builder()
///     .device_id(0x10)
///     .port("UM-ONE")
///     .connect(&MidirTransport::new())?;
///
/// synth.send_parameter("temp_performance_common", "EFX:Type", 5)?;
/// ```
#[derive(Debug, Clone)]
pub struct SynthControllerBuilder {
    table: Option<Arc<ParameterTable>>,
    device_id: Option<u8>,
    message_delay: Duration,
    port: Option<String>,
}

impl Default for SynthControllerBuilder {
    fn default() -> Self {
        Self {
            table: None,
            device_id: None,
            message_delay: DEFAULT_MESSAGE_DELAY,
            port: None,
        }
    }
}

impl SynthControllerBuilder {
    pub fn table(mut self, table: impl Into<Arc<ParameterTable>>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Load the table from a `.toml` or `.json` file.
    pub fn table_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let table = ParameterTable::load(path)?;
        Ok(self.table(table))
    }

    /// Default: the table's default device ID (0x10 for the JV-1080)
    pub fn device_id(mut self, device_id: u8) -> Self {
        self.device_id = Some(device_id);
        self
    }

    /// Default: 40 ms
    pub fn message_delay(mut self, delay: Duration) -> Self {
        self.message_delay = delay;
        self
    }

    /// Exact port name or a case-insensitive part of it.
    pub fn port(mut self, name: impl Into<String>) -> Self {
        self.port = Some(name.into());
        self
    }

    pub fn connect<T: SysExTransport>(self, transport: &T) -> Result<SynthController> {
        let table = match self.table {
            Some(table) => table,
            None => Arc::new(builtin::jv1080()?),
        };
        let mut codec = SysExCodec::new(table);
        if let Some(device_id) = self.device_id {
            codec = codec.with_device_id(device_id)?;
        }

        let port = match self.port {
            Some(port) => port,
            None => transport
                .list_ports()?
                .into_iter()
                .next()
                .ok_or(TransportError::NoPorts)?,
        };
        let connection = transport.open(&port)?;
        info!(
            "Controller connected to {} (device ID 0x{:02X})",
            connection.port_name(),
            codec.device_id()
        );

        Ok(SynthController::from_parts(
            codec,
            Box::new(connection),
            self.message_delay,
        ))
    }
}
