//! # 02 - Basic Usage
//!
//! Encode, decode and validate parameters with the built-in JV-1080 table,
//! then send them through an in-memory transport.
//!
//! **Concepts:** `SysExCodec`, range validation, dry-run controller
//!
//! ```bash
//! cargo run --example 02_basic_usage
//! ```

use jvsx::prelude::*;
use jvsx::sysex::to_hex;
use std::sync::Arc;
use std::time::Duration;

fn main() -> jvsx::Result<()> {
    tracing_subscriber::fmt::init();

    let table = Arc::new(builtin::jv1080()?);
    println!(
        "Built-in table: {} groups, {} parameters",
        table.groups().len(),
        table.parameter_count()
    );

    // Encode
    let codec = SysExCodec::new(Arc::clone(&table));
    let message = codec.encode("temp_performance_common", "EFX:Type", 5)?;
    println!("EFX:Type = 5          -> {}", to_hex(&message));

    let tempo = codec.encode("temp_performance_common", "Performance tempo", 120)?;
    println!("Performance tempo 120 -> {}", to_hex(&tempo));

    // Decode
    let decoded = codec.decode(&message)?;
    println!("Decoded: {decoded}");

    // Validate
    if let Err(e) = codec.encode("temp_performance_part_1", "Part level", 200) {
        println!("Rejected: {e}");
    }

    // Dry run through a controller
    let transport = MemoryTransport::new();
    let mut synth = SynthController::builder()
        .table(table)
        .message_delay(Duration::ZERO)
        .connect(&transport)?;

    synth.switch_mode(PanelMode::Performance)?;
    synth.set_performance_name("Dry Run")?;
    synth.send_parameter("temp_performance_part_1", "Part level", 100)?;

    println!("\nMessages sent to {}:", synth.port_name());
    for message in transport.sent() {
        println!("  {}", to_hex(&message));
    }

    Ok(())
}
