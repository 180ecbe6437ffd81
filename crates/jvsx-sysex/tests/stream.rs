//! Stream parsing over recorded `.syx` data.

use jvsx_sysex::{Error, ParameterValue, PresetMode, SysExCodec};
use jvsx_table::builtin;
use std::sync::Arc;

fn codec() -> SysExCodec {
    SysExCodec::new(Arc::new(builtin::jv1080().unwrap()))
}

#[test]
fn test_valid_then_corrupted_message() {
    let codec = codec();
    let valid = codec
        .encode("temp_performance_part_1", "Part level", 100)
        .unwrap();
    let mut corrupted = codec
        .encode("temp_performance_part_1", "Part pan", 64)
        .unwrap();
    let checksum_pos = corrupted.len() - 2;
    corrupted[checksum_pos] = (corrupted[checksum_pos] + 1) & 0x7F;

    let stream = [valid, corrupted].concat();
    let report = codec.parse_stream(&stream);

    assert_eq!(
        report.entries,
        vec![ParameterValue::new("temp_performance_part_1", "Part level", 100)]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);
    assert!(matches!(
        report.skipped[0].error,
        Error::ChecksumMismatch { .. }
    ));
    assert_eq!(report.infer_mode(), PresetMode::Performance);
}

#[test]
fn test_unknown_addresses_and_foreign_messages_are_skipped() {
    let codec = codec();
    let good = codec.encode("temp_patch_common", "Patch level", 90).unwrap();

    // Universal non-realtime identity request
    let identity_request = [0xF0, 0x7E, 0x10, 0x06, 0x01, 0xF7];
    // Well-formed DT1 to an address outside the table
    let unknown = [0xF0, 0x41, 0x10, 0x6A, 0x12, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x01, 0xF7];

    let stream = [&identity_request[..], &good[..], &unknown[..]].concat();
    let report = codec.parse_stream(&stream);

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.skipped.len(), 2);
    assert!(matches!(
        report.skipped[0].error,
        Error::MalformedMessage(_)
    ));
    assert!(matches!(
        report.skipped[1].error,
        Error::UnrecognizedAddress(_)
    ));
}

#[test]
fn test_parse_file() {
    let codec = codec();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.syx");

    let stream = [
        codec.encode("system_common", "Panel mode", 1).unwrap(),
        codec.encode("temp_patch_tone_2", "Cutoff frequency", 80).unwrap(),
        codec.encode("temp_patch_tone_2", "Coarse tune", -24).unwrap(),
    ]
    .concat();
    std::fs::write(&path, &stream).unwrap();

    let report = codec.parse_file(&path).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.entries[2].value, -24);
    assert_eq!(report.infer_mode(), PresetMode::Patch);

    assert!(matches!(
        codec.parse_file(dir.path().join("missing.syx")),
        Err(Error::Io(_))
    ));
}
