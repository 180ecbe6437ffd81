//! Hardware ports via midir.
//!
//! Messages go out through a midir output connection. Replies are read from
//! the input port of the same name (when there is one) with SysEx
//! reception enabled; the input callback reassembles fragmented SysEx and
//! hands complete messages to the connection through a channel.

use crate::error::{Error, Result};
use crate::transport::{select_port, SysExConnection, SysExTransport};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use std::time::Duration;
use tracing::{debug, info, warn};

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

#[derive(Debug, Clone)]
pub struct MidirTransport {
    client_name: String,
    receive_timeout: Option<Duration>,
}

impl MidirTransport {
    pub fn new() -> Self {
        Self {
            client_name: "jvsx".to_string(),
            receive_timeout: Some(Duration::from_secs(1)),
        }
    }

    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// `None` makes `receive` wait forever.
    pub fn receive_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.receive_timeout = timeout;
        self
    }

    fn output_port_names(output: &MidiOutput) -> Vec<String> {
        output
            .ports()
            .iter()
            .enumerate()
            .map(|(index, port)| {
                output
                    .port_name(port)
                    .unwrap_or_else(|_| format!("Unknown Device {}", index))
            })
            .collect()
    }

    fn connect_input(&self, port_name: &str, sender: Sender<Vec<u8>>) -> Option<MidiInputConnection<()>> {
        let mut input = match MidiInput::new(&format!("{}-input", self.client_name)) {
            Ok(input) => input,
            Err(e) => {
                warn!("MIDI input unavailable: {}", e);
                return None;
            }
        };
        input.ignore(Ignore::None);

        let ports = input.ports();
        let names: Vec<String> = ports
            .iter()
            .map(|p| input.port_name(p).unwrap_or_default())
            .collect();
        let (index, name) = match select_port(&names, port_name) {
            Some(found) => found,
            None => {
                debug!("No MIDI input port matching '{}', receive disabled", port_name);
                return None;
            }
        };
        let name = name.to_string();

        let mut pending: Vec<u8> = Vec::new();
        let connection = input.connect(
            &ports[index],
            "jvsx-input",
            move |_timestamp, message, _| {
                if message.first() == Some(&SYSEX_START) {
                    pending.clear();
                }
                if message.first() == Some(&SYSEX_START) || !pending.is_empty() {
                    pending.extend_from_slice(message);
                }
                if pending.last() == Some(&SYSEX_END) {
                    if sender.send(std::mem::take(&mut pending)).is_err() {
                        debug!("SysEx receiver dropped");
                    }
                }
            },
            (),
        );

        match connection {
            Ok(conn) => {
                debug!("Listening for SysEx on {}", name);
                Some(conn)
            }
            Err(e) => {
                warn!("Failed to connect MIDI input {}: {}", name, e);
                None
            }
        }
    }
}

impl Default for MidirTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SysExTransport for MidirTransport {
    type Connection = MidirConnection;

    fn list_ports(&self) -> Result<Vec<String>> {
        let output = MidiOutput::new(&format!("{}-list", self.client_name))?;
        Ok(Self::output_port_names(&output))
    }

    fn open(&self, port_name: &str) -> Result<MidirConnection> {
        let output = MidiOutput::new(&format!("{}-output", self.client_name))?;
        let names = Self::output_port_names(&output);
        if names.is_empty() {
            return Err(Error::NoPorts);
        }
        let (index, name) =
            select_port(&names, port_name).ok_or_else(|| Error::PortNotFound(port_name.to_string()))?;
        let name = name.to_string();

        let ports = output.ports();
        let port = ports
            .get(index)
            .ok_or_else(|| Error::PortNotFound(port_name.to_string()))?;
        let connection = output.connect(port, "jvsx-output")?;
        info!("Connected to MIDI output {}", name);

        let (sender, receiver) = unbounded();
        let input = self.connect_input(&name, sender);

        Ok(MidirConnection {
            port_name: name,
            output: Some(connection),
            input,
            receiver,
            receive_timeout: self.receive_timeout,
        })
    }
}

pub struct MidirConnection {
    port_name: String,
    output: Option<MidiOutputConnection>,
    input: Option<MidiInputConnection<()>>,
    receiver: Receiver<Vec<u8>>,
    receive_timeout: Option<Duration>,
}

impl SysExConnection for MidirConnection {
    fn port_name(&self) -> &str {
        &self.port_name
    }

    fn send(&mut self, message: &[u8]) -> Result<()> {
        let output = self.output.as_mut().ok_or(Error::Closed)?;
        output.send(message)?;
        Ok(())
    }

    fn receive(&mut self) -> Result<Vec<u8>> {
        if self.output.is_none() {
            return Err(Error::Closed);
        }
        if self.input.is_none() {
            return Err(Error::Receive(format!(
                "no MIDI input port matching '{}'",
                self.port_name
            )));
        }

        match self.receive_timeout {
            Some(timeout) => self.receiver.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => Error::Timeout(timeout),
                RecvTimeoutError::Disconnected => Error::Closed,
            }),
            None => self.receiver.recv().map_err(|_| Error::Closed),
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(input) = self.input.take() {
            input.close();
        }
        if let Some(output) = self.output.take() {
            output.close();
            info!("Disconnected from MIDI output {}", self.port_name);
        }
        Ok(())
    }
}

impl Drop for MidirConnection {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
