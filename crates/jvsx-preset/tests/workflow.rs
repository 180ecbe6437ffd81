//! Build, store and re-import presets end to end.

use jvsx_preset::{export_rust, import_rust, Preset, PresetMode};
use jvsx_sysex::SysExCodec;
use jvsx_table::builtin;
use std::sync::Arc;

fn codec() -> SysExCodec {
    SysExCodec::new(Arc::new(builtin::jv1080().unwrap()))
}

fn performance(codec: &SysExCodec) -> Preset {
    let table = codec.table();
    let mut preset = Preset::new("Big Strings", PresetMode::Performance)
        .with_author("studio")
        .with_tag("strings");
    preset.set_performance_name(table, "Big Strings").unwrap();
    preset.set_efx(table, 9, &[64, 32, 16]).unwrap();
    preset
        .add_parameter(table, "temp_performance_common", "Performance tempo", 92)
        .unwrap();
    for part in 1..=3u8 {
        let group = builtin::performance_part_group(part);
        preset.add_parameter(table, &group, "Part level", 100).unwrap();
        preset
            .add_parameter(table, &group, "Part coarse tune", -12 * (part as i32 - 1))
            .unwrap();
    }
    preset
}

#[test]
fn test_three_entry_preset_survives_json() {
    let table = builtin::jv1080().unwrap();
    let mut preset = Preset::new("Three", PresetMode::Patch);
    preset.add_parameter(&table, "temp_patch_common", "Patch level", 110).unwrap();
    preset.add_parameter(&table, "temp_patch_tone_1", "Cutoff frequency", 45).unwrap();
    preset.add_parameter(&table, "temp_patch_tone_2", "Fine tune", -7).unwrap();

    let restored = Preset::from_json(&preset.to_json().unwrap()).unwrap();
    assert_eq!(restored, preset);
    let params: Vec<_> = restored.entries().iter().map(|e| e.parameter.as_str()).collect();
    assert_eq!(params, vec!["Patch level", "Cutoff frequency", "Fine tune"]);
}

#[test]
fn test_rust_export_reproduces_preset() {
    let codec = codec();
    let preset = performance(&codec);
    let src = export_rust(&preset);

    assert!(src.contains(".with_parameter(\"temp_performance_common\", \"EFX:Type\", 9)"));
    assert_eq!(import_rust(&src).unwrap(), preset);
}

#[test]
fn test_syx_dump_reproduces_entries() {
    let codec = codec();
    let preset = performance(&codec);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Big Strings.syx");

    preset.save(&path, &codec).unwrap();
    let loaded = Preset::load(&path, &codec).unwrap();

    assert_eq!(loaded.name, "Big Strings");
    assert_eq!(loaded.mode, PresetMode::Performance);
    assert_eq!(loaded.entries(), preset.entries());
}
