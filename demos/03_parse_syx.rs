//! # 03 - Parse SysEx Dumps
//!
//! Turn a `.syx` dump or a Standard MIDI File into readable parameters.
//! Without an argument a small dump with one corrupted message is parsed.
//!
//! **Concepts:** Stream parsing, skipped chunks, SMF extraction, mode inference
//!
//! ```bash
//! cargo run --example 03_parse_syx
//! cargo run --example 03_parse_syx -- dumps/strings.syx
//! cargo run --example 03_parse_syx -- songs/intro.mid
//! ```

use jvsx::prelude::*;
use std::path::Path;
use std::sync::Arc;

fn main() -> jvsx::Result<()> {
    tracing_subscriber::fmt::init();

    let codec = SysExCodec::new(Arc::new(builtin::jv1080()?));

    let report = match std::env::args().nth(1) {
        Some(path) => {
            let is_smf = Path::new(&path)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("mid"));
            if is_smf {
                codec.parse_smf_file(&path)?
            } else {
                codec.parse_file(&path)?
            }
        }
        None => codec.parse_stream(&sample_dump(&codec)?),
    };

    println!("Mode: {}", report.infer_mode());
    for (group, values) in report.by_group() {
        println!("[{group}]");
        for value in values {
            println!("  {:<24} {}", value.parameter, value.value);
        }
    }

    if !report.is_clean() {
        println!("\nSkipped {} message(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!(
                "  #{} at byte {}: {}",
                skipped.index, skipped.offset, skipped.error
            );
        }
    }

    Ok(())
}

fn sample_dump(codec: &SysExCodec) -> jvsx::Result<Vec<u8>> {
    let mut dump = Vec::new();
    dump.extend(codec.encode("temp_performance_common", "EFX:Type", 5)?);
    dump.extend(codec.encode("temp_performance_common", "Performance tempo", 120)?);
    dump.extend(codec.encode("temp_performance_part_1", "Part level", 110)?);

    let mut corrupted = codec.encode("temp_performance_part_2", "Part pan", 64)?;
    corrupted[9] ^= 0x01;
    dump.extend(corrupted);
    Ok(dump)
}
