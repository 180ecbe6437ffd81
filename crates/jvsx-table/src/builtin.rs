//! Built-in JV-1080 parameter table.
//!
//! Covers the system common block, the temporary performance (common and
//! parts 1-16) and the temporary patch (common and tones 1-4). Each block
//! carries a representative subset of the device's parameter list.

use crate::error::Result;
use crate::{DeviceInfo, ParameterDefinition as P, ParameterGroup, ParameterTable};

pub const SYSTEM_COMMON: &str = "system_common";
pub const TEMP_PERFORMANCE_COMMON: &str = "temp_performance_common";
pub const TEMP_PATCH_COMMON: &str = "temp_patch_common";

/// Name of the temporary performance part group `part` (1-16).
pub fn performance_part_group(part: u8) -> String {
    format!("temp_performance_part_{}", part)
}

/// Name of the temporary patch tone group `tone` (1-4).
pub fn patch_tone_group(tone: u8) -> String {
    format!("temp_patch_tone_{}", tone)
}

/// Build the built-in table.
pub fn jv1080() -> Result<ParameterTable> {
    let mut groups = vec![system_common(), performance_common()];
    groups.extend((1..=16).map(performance_part));
    groups.push(patch_common());
    groups.extend((1..=4).map(patch_tone));
    ParameterTable::new(DeviceInfo::JV1080, groups)
}

fn system_common() -> ParameterGroup {
    ParameterGroup::new(SYSTEM_COMMON, [0x00, 0x00, 0x00])
        .with_description("System Common")
        .parameters([
            P::new("Panel mode", 0x00, 0, 2)
                .with_description("0 = performance, 1 = patch, 2 = GM"),
            P::new("Performance number", 0x01, 0, 127),
            P::new("Patch group type", 0x02, 0, 2),
            P::new("Patch group ID", 0x03, 0, 127),
            P::new("Patch number", 0x04, 0, 254).with_size(2),
            P::new("Master tune", 0x06, 0, 126),
            P::new("Scale tune switch", 0x07, 0, 1),
            P::new("EFX switch", 0x08, 0, 1),
            P::new("Chorus switch", 0x09, 0, 1),
            P::new("Reverb switch", 0x0A, 0, 1),
            P::new("Patch remain", 0x0B, 0, 1),
            P::new("Clock source", 0x0C, 0, 1),
            P::new("Receive program change", 0x14, 0, 1),
            P::new("Receive bank select", 0x15, 0, 1),
            P::new("Receive control change", 0x16, 0, 1),
            P::new("Receive modulation", 0x17, 0, 1),
            P::new("Receive volume", 0x18, 0, 1),
            P::new("Receive hold-1", 0x19, 0, 1),
            P::new("Receive bender", 0x1A, 0, 1),
            P::new("Receive aftertouch", 0x1B, 0, 1),
            P::new("Control channel", 0x1C, 0, 16),
            P::new("Patch receive channel", 0x1D, 0, 15),
        ])
}

fn performance_common() -> ParameterGroup {
    let mut group = ParameterGroup::new(TEMP_PERFORMANCE_COMMON, [0x01, 0x00, 0x00])
        .with_description("Temporary Performance Common");

    for i in 0..12u16 {
        group = group.parameter(
            P::new(format!("Performance name {}", i + 1), i, 32, 127)
                .with_description("ASCII character"),
        );
    }
    group = group.parameter(P::new("EFX:Type", 0x0C, 0, 39));
    for i in 0..12u16 {
        group = group.parameter(P::new(format!("EFX:Parameter {}", i + 1), 0x0D + i, 0, 127));
    }

    group = group.parameters([
        P::new("EFX:Output assign", 0x19, 0, 2),
        P::new("EFX:Mix out send level", 0x1A, 0, 127),
        P::new("EFX:Chorus send level", 0x1B, 0, 127),
        P::new("EFX:Reverb send level", 0x1C, 0, 127),
        P::new("EFX:Control source 1", 0x1D, 0, 17),
        P::new("EFX:Control depth 1", 0x1E, -63, 63).signed(),
        P::new("EFX:Control source 2", 0x1F, 0, 17),
        P::new("EFX:Control depth 2", 0x20, -63, 63).signed(),
        P::new("Chorus level", 0x21, 0, 127),
        P::new("Chorus rate", 0x22, 0, 125),
        P::new("Chorus depth", 0x23, 0, 127),
        P::new("Chorus pre-delay", 0x24, 0, 125),
        P::new("Chorus feedback", 0x25, 0, 127),
        P::new("Chorus output", 0x26, 0, 2),
        P::new("Reverb type", 0x27, 0, 7),
        P::new("Reverb level", 0x28, 0, 127),
        P::new("Reverb time", 0x29, 0, 127),
        P::new("Reverb HF damp", 0x2A, 0, 17),
        P::new("Delay feedback", 0x2B, 0, 127),
        P::new("Performance tempo", 0x2C, 20, 250)
            .with_size(2)
            .with_description("BPM"),
        P::new("Key range switch", 0x2E, 0, 1),
    ]);

    for i in 0..16u16 {
        group = group.parameter(P::new(format!("Voice reserve {}", i + 1), 0x2F + i, 0, 64));
    }
    group
}

fn performance_part(part: u8) -> ParameterGroup {
    ParameterGroup::new(performance_part_group(part), [0x01, 0x00, 0x10 + part - 1])
        .with_description(format!("Temporary Performance Part {}", part))
        .parameters([
            P::new("Receive switch", 0x00, 0, 1),
            P::new("Receive channel", 0x01, 0, 15),
            P::new("Patch number", 0x02, 0, 254).with_size(2),
            P::new("Part level", 0x04, 0, 127),
            P::new("Part pan", 0x05, 0, 127),
            P::new("Part coarse tune", 0x06, -48, 48).signed(),
            P::new("Part fine tune", 0x07, -50, 50).signed(),
            P::new("Output assign", 0x08, 0, 3),
            P::new("Mix/EFX send level", 0x09, 0, 127),
            P::new("Chorus send level", 0x0A, 0, 127),
            P::new("Reverb send level", 0x0B, 0, 127),
            P::new("Receive program change switch", 0x0C, 0, 1),
            P::new("Receive volume switch", 0x0D, 0, 1),
            P::new("Receive hold-1 switch", 0x0E, 0, 1),
            P::new("Internal key range lower", 0x0F, 0, 127),
            P::new("Internal key range upper", 0x10, 0, 127),
            P::new("Octave shift", 0x11, -3, 3).signed(),
            P::new("Local switch", 0x12, 0, 1),
            P::new("Transmit switch", 0x13, 0, 1),
            P::new("Transmit bank select group", 0x14, 0, 6),
        ])
}

fn patch_common() -> ParameterGroup {
    let mut group = ParameterGroup::new(TEMP_PATCH_COMMON, [0x03, 0x00, 0x00])
        .with_description("Temporary Patch Common");

    for i in 0..12u16 {
        group = group.parameter(P::new(format!("Patch name {}", i + 1), i, 32, 127));
    }
    group = group.parameter(P::new("EFX:Type", 0x0C, 0, 39));
    for i in 0..12u16 {
        group = group.parameter(P::new(format!("EFX:Parameter {}", i + 1), 0x0D + i, 0, 127));
    }

    group.parameters([
        P::new("EFX:Output assign", 0x19, 0, 2),
        P::new("Chorus level", 0x1A, 0, 127),
        P::new("Reverb type", 0x1F, 0, 7),
        P::new("Reverb level", 0x20, 0, 127),
        P::new("Patch tempo", 0x25, 20, 250).with_size(2),
        P::new("Patch level", 0x27, 0, 127),
        P::new("Patch pan", 0x28, 0, 127),
        P::new("Analog feel", 0x29, 0, 127),
        P::new("Bend range up", 0x2A, 0, 12),
        P::new("Bend range down", 0x2B, 0, 48),
        P::new("Key assign mode", 0x2C, 0, 1),
        P::new("Solo legato", 0x2D, 0, 1),
        P::new("Portamento switch", 0x2E, 0, 1),
        P::new("Portamento mode", 0x2F, 0, 1),
        P::new("Portamento type", 0x30, 0, 1),
        P::new("Portamento start", 0x31, 0, 1),
        P::new("Portamento time", 0x32, 0, 127),
    ])
}

// Tone blocks are 0x81 bytes long and start every 0x100 addresses, so the
// last few offsets carry into the third address byte.
fn patch_tone(tone: u8) -> ParameterGroup {
    ParameterGroup::new(patch_tone_group(tone), [0x03, 0x00, 0x10 + 2 * (tone - 1)])
        .with_description(format!("Temporary Patch Tone {}", tone))
        .parameters([
            P::new("Tone switch", 0x00, 0, 1),
            P::new("Wave group type", 0x01, 0, 2),
            P::new("Wave group ID", 0x02, 0, 127),
            P::new("Wave number", 0x03, 0, 254).with_size(2),
            P::new("Wave gain", 0x05, 0, 3),
            P::new("FXM switch", 0x06, 0, 1),
            P::new("FXM color", 0x07, 0, 3),
            P::new("FXM depth", 0x08, 0, 15),
            P::new("Tone delay mode", 0x09, 0, 7),
            P::new("Tone delay time", 0x0A, 0, 127),
            P::new("Velocity cross fade", 0x0B, 0, 127),
            P::new("Velocity range lower", 0x0C, 1, 127),
            P::new("Velocity range upper", 0x0D, 1, 127),
            P::new("Keyboard range lower", 0x0E, 0, 127),
            P::new("Keyboard range upper", 0x0F, 0, 127),
            P::new("Coarse tune", 0x38, -48, 48).signed(),
            P::new("Fine tune", 0x39, -50, 50).signed(),
            P::new("Filter type", 0x4A, 0, 4),
            P::new("Cutoff frequency", 0x4B, 0, 127),
            P::new("Cutoff keyfollow", 0x4C, 0, 15),
            P::new("Resonance", 0x4D, 0, 127),
            P::new("Tone level", 0x5C, 0, 127),
            P::new("Tone pan", 0x60, 0, 127),
            P::new("Dry level", 0x7C, 0, 127),
            P::new("Output assign", 0x7D, 0, 3),
            P::new("Mix/EFX send level", 0x7E, 0, 127),
            P::new("Chorus send level", 0x7F, 0, 127),
            P::new("Reverb send level", 0x80, 0, 127),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Address;

    #[test]
    fn test_builtin_table_builds() {
        let table = jv1080().unwrap();
        assert_eq!(table.groups().len(), 1 + 1 + 16 + 1 + 4);
        assert_eq!(table.group_names().next(), Some(SYSTEM_COMMON));
        assert!(table.contains_group("temp_performance_part_16"));
        assert!(table.contains_group("temp_patch_tone_4"));
    }

    #[test]
    fn test_known_parameters() {
        let table = jv1080().unwrap();

        let efx = table.lookup(TEMP_PERFORMANCE_COMMON, "EFX:Type").unwrap();
        assert_eq!(efx.address.bytes(), [0x01, 0x00, 0x00, 0x0C]);
        assert_eq!((efx.definition.min, efx.definition.max), (0, 39));

        let name = table.lookup(TEMP_PERFORMANCE_COMMON, "Performance name 1").unwrap();
        assert_eq!(name.address.bytes(), [0x01, 0x00, 0x00, 0x00]);
        assert_eq!((name.definition.min, name.definition.max), (32, 127));

        let tempo = table.parameter(TEMP_PERFORMANCE_COMMON, "Performance tempo").unwrap();
        assert_eq!((tempo.min, tempo.max, tempo.size), (20, 250, 2));
    }

    #[test]
    fn test_part_and_tone_bases() {
        let table = jv1080().unwrap();

        let level = table.lookup(&performance_part_group(3), "Part level").unwrap();
        assert_eq!(level.address.bytes(), [0x01, 0x00, 0x12, 0x04]);

        let reverb = table.lookup(&patch_tone_group(1), "Reverb send level").unwrap();
        assert_eq!(reverb.address.bytes(), [0x03, 0x00, 0x11, 0x00]);

        let resolved = table
            .resolve_address(Address::new([0x03, 0x00, 0x16, 0x4B]).unwrap())
            .unwrap();
        assert_eq!(resolved.group.name, "temp_patch_tone_4");
        assert_eq!(resolved.definition.name, "Cutoff frequency");
    }
}
