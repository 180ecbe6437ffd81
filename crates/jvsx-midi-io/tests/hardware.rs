//! Hardware tests against a loopback MIDI port.
//!
//! Needs a port that echoes what is sent to it (IAC Driver on macOS, a
//! `snd-virmidi` loopback on Linux). Set `JVSX_LOOPBACK_PORT` to its name.
//! All tests are `#[ignore]` so CI doesn't fail without hardware.
//!
//! Run with:
//!   JVSX_LOOPBACK_PORT="IAC Driver Bus 1" cargo test -p jvsx-midi-io --test hardware -- --ignored --test-threads=1

#![cfg(feature = "midi-io")]

use jvsx_midi_io::{Error, MidirTransport, SysExConnection, SysExTransport};
use std::time::Duration;

fn loopback_port() -> String {
    std::env::var("JVSX_LOOPBACK_PORT").unwrap_or_else(|_| "IAC Driver Bus 1".to_string())
}

fn transport() -> MidirTransport {
    MidirTransport::new().receive_timeout(Some(Duration::from_millis(500)))
}

#[test]
#[ignore]
fn test_list_ports() {
    let ports = transport().list_ports().expect("Failed to enumerate MIDI ports");
    println!("MIDI output ports: {:?}", ports);
    assert!(ports.iter().any(|p| p.contains(&loopback_port())));
}

#[test]
#[ignore]
fn test_sysex_loopback() {
    let mut conn = transport()
        .open(&loopback_port())
        .expect("Failed to open loopback port");

    let message = [
        0xF0, 0x41, 0x10, 0x6A, 0x12, 0x01, 0x00, 0x00, 0x0C, 0x05, 0x6E, 0xF7,
    ];
    conn.send(&message).unwrap();
    assert_eq!(conn.receive().unwrap(), message.to_vec());
    conn.close().unwrap();
}

#[test]
#[ignore]
fn test_receive_timeout() {
    let mut conn = transport()
        .open(&loopback_port())
        .expect("Failed to open loopback port");
    assert!(matches!(conn.receive(), Err(Error::Timeout(_))));
}

#[test]
#[ignore]
fn test_unknown_port() {
    assert!(matches!(
        transport().open("No Such Port 0xDEADBEEF"),
        Err(Error::PortNotFound(_)) | Err(Error::NoPorts)
    ));
}
