//! # 04 - Preset Management
//!
//! Build a performance preset, save it in every format, load it back and
//! export it as Rust source.
//!
//! **Concepts:** `Preset` builder, JSON/TOML/`.syx` persistence, directory import, Rust export
//!
//! ```bash
//! cargo run --example 04_preset_management
//! ```

use jvsx::preset::{export_rust, import_directory, import_rust};
use jvsx::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn main() -> jvsx::Result<()> {
    tracing_subscriber::fmt::init();

    let table = Arc::new(builtin::jv1080()?);
    let codec = SysExCodec::new(Arc::clone(&table));

    let mut preset = Preset::new("Warm Pad", PresetMode::Performance)
        .with_description("Slow strings with chorus")
        .with_author("jvsx")
        .with_tag("pad");
    preset.set_performance_name(&table, "Warm Pad")?;
    preset.set_efx(&table, 5, &[64, 32])?;
    preset.add_parameter(&table, "temp_performance_part_1", "Part level", 110)?;
    preset.add_parameter(&table, "temp_performance_part_1", "Part pan", 48)?;
    preset.annotate("temp_performance_part_1", "Part pan", "slightly left");
    println!("Built '{}' with {} parameters", preset.name, preset.len());

    // Save and reload in every format
    let dir = std::env::temp_dir().join("jvsx-presets");
    std::fs::create_dir_all(&dir)?;
    for file in ["warm_pad.json", "warm_pad.toml", "warm_pad.syx"] {
        let path = dir.join(file);
        preset.save(&path, &codec)?;
        let loaded = Preset::load(&path, &codec)?;
        println!("  {} -> {} parameters", path.display(), loaded.len());
    }

    // Every .syx in the directory
    for (path, imported) in import_directory(&dir, &codec)? {
        println!("Imported {} ({}) from {}", imported.name, imported.mode, path.display());
    }

    // Rust source round trip
    let source = export_rust(&preset);
    println!("\n{source}");
    assert_eq!(import_rust(&source)?, preset);

    // Send it through a dry-run transport
    let transport = MemoryTransport::new();
    let mut synth = SynthController::builder()
        .table(table)
        .message_delay(Duration::ZERO)
        .connect(&transport)?;
    let sent = synth.apply_preset(&preset)?;
    println!("Sent {sent} messages to {}", synth.port_name());

    Ok(())
}
