//! # 01 - List Ports
//!
//! Enumerate MIDI output ports and send one parameter to a JV-1080.
//!
//! **Concepts:** Port enumeration, port selection by partial name, `midi-io` feature
//!
//! ```bash
//! cargo run --example 01_list_ports
//! cargo run --example 01_list_ports -- "UM-ONE"
//! ```

use jvsx::prelude::*;

fn main() -> jvsx::Result<()> {
    tracing_subscriber::fmt::init();

    let transport = MidirTransport::new();
    let ports = SynthController::list_ports(&transport)?;
    println!("MIDI output ports:");
    if ports.is_empty() {
        println!("  (none found - connect a MIDI interface and try again)");
        return Ok(());
    }
    for (i, name) in ports.iter().enumerate() {
        println!("  [{i}] {name}");
    }

    let Some(port) = std::env::args().nth(1) else {
        println!("\nPass a port name to send a test parameter.");
        return Ok(());
    };

    let mut synth = SynthController::builder().port(port).connect(&transport)?;
    println!("\nConnected to: {}", synth.port_name());

    synth.switch_mode(PanelMode::Performance)?;
    synth.send_parameter("temp_performance_common", "EFX:Type", 5)?;
    println!("Sent EFX:Type = 5");

    match synth.query_parameter("temp_performance_common", "EFX:Type") {
        Ok(value) => println!("Synth reports EFX:Type = {value}"),
        Err(e) => println!("No reply: {e}"),
    }

    synth.close()?;
    Ok(())
}
