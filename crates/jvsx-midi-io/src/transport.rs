//! Transport traits shared by the hardware and in-memory backends.

use crate::error::Result;

/// An open port that SysEx messages are sent through.
pub trait SysExConnection {
    fn port_name(&self) -> &str;

    /// Send one complete message, `F0` through `F7`.
    fn send(&mut self, message: &[u8]) -> Result<()>;

    /// Block until the next complete SysEx message arrives.
    fn receive(&mut self) -> Result<Vec<u8>>;

    fn close(&mut self) -> Result<()>;
}

/// A source of ports.
pub trait SysExTransport {
    type Connection: SysExConnection + 'static;

    fn list_ports(&self) -> Result<Vec<String>>;

    /// Open the port matching `port_name`; see [`select_port`].
    fn open(&self, port_name: &str) -> Result<Self::Connection>;
}

/// Pick a port by exact name, falling back to the first case-insensitive
/// partial match.
pub fn select_port<'a>(ports: &'a [String], name: &str) -> Option<(usize, &'a str)> {
    if let Some(index) = ports.iter().position(|p| p == name) {
        return Some((index, ports[index].as_str()));
    }
    let needle = name.to_lowercase();
    ports
        .iter()
        .enumerate()
        .find(|(_, p)| p.to_lowercase().contains(&needle))
        .map(|(i, p)| (i, p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_port() {
        let ports = vec![
            "IAC Driver Bus 1".to_string(),
            "UM-ONE".to_string(),
            "UM-ONE MIDI 2".to_string(),
        ];
        assert_eq!(select_port(&ports, "UM-ONE MIDI 2"), Some((2, "UM-ONE MIDI 2")));
        assert_eq!(select_port(&ports, "UM-ONE"), Some((1, "UM-ONE")));
        assert_eq!(select_port(&ports, "iac"), Some((0, "IAC Driver Bus 1")));
        assert_eq!(select_port(&ports, "JV-1080"), None);
    }
}
