//! SysEx events embedded in Standard MIDI Files.

use crate::codec::SysExCodec;
use crate::error::Result;
use crate::message::SYSEX_START;
use crate::parser::ParseReport;
use midly::{Smf, TrackEventKind};
use std::path::Path;
use tracing::{debug, info};

/// Collect the SysEx bytes of a MIDI file as one stream, ordered by time.
///
/// `F0` events get their status byte restored; `F7` escape events are
/// appended as-is so split messages join back together.
pub fn extract_sysex(data: &[u8]) -> Result<Vec<u8>> {
    let smf = Smf::parse(data)?;

    // (absolute tick, track, bytes)
    let mut events: Vec<(u64, usize, Vec<u8>)> = Vec::new();
    for (track_idx, track) in smf.tracks.iter().enumerate() {
        let mut tick = 0u64;
        for event in track {
            tick += event.delta.as_int() as u64;
            match event.kind {
                TrackEventKind::SysEx(bytes) => {
                    let mut message = Vec::with_capacity(bytes.len() + 1);
                    message.push(SYSEX_START);
                    message.extend_from_slice(bytes);
                    events.push((tick, track_idx, message));
                }
                TrackEventKind::Escape(bytes) => {
                    events.push((tick, track_idx, bytes.to_vec()));
                }
                _ => {}
            }
        }
    }

    events.sort_by_key(|(tick, track, _)| (*tick, *track));
    debug!(
        "Found {} SysEx event(s) in {} track(s)",
        events.len(),
        smf.tracks.len()
    );

    Ok(events.into_iter().flat_map(|(_, _, bytes)| bytes).collect())
}

impl SysExCodec {
    /// Parse the SysEx events of a Standard MIDI File.
    pub fn parse_smf(&self, data: &[u8]) -> Result<ParseReport> {
        let stream = extract_sysex(data)?;
        Ok(self.parse_stream(&stream))
    }

    pub fn parse_smf_file(&self, path: impl AsRef<Path>) -> Result<ParseReport> {
        let path = path.as_ref();
        info!("Parsing MIDI file: {}", path.display());
        let data = std::fs::read(path)?;
        self.parse_smf(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ParameterValue;
    use jvsx_table::builtin;
    use midly::num::{u15, u28, u4, u7};
    use midly::{Format, Header, MidiMessage, Timing, TrackEvent};
    use std::sync::Arc;

    fn write_smf(tracks: Vec<Vec<TrackEvent<'_>>>) -> Vec<u8> {
        let smf = Smf {
            header: Header::new(Format::Parallel, Timing::Metrical(u15::new(480))),
            tracks,
        };
        let mut out = Vec::new();
        smf.write_std(&mut out).unwrap();
        out
    }

    fn end_of_track() -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
        }
    }

    #[test]
    fn test_parse_smf_sysex_events() {
        let codec = SysExCodec::new(Arc::new(builtin::jv1080().unwrap()));
        let efx = codec.encode("temp_performance_common", "EFX:Type", 5).unwrap();
        let mode = codec.encode("system_common", "Panel mode", 0).unwrap();

        // midly stores SysEx payloads without the leading F0
        let track_a = vec![
            TrackEvent {
                delta: u28::new(10),
                kind: TrackEventKind::SysEx(&efx[1..]),
            },
            TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Midi {
                    channel: u4::new(0),
                    message: MidiMessage::NoteOn {
                        key: u7::new(60),
                        vel: u7::new(100),
                    },
                },
            },
            end_of_track(),
        ];
        let track_b = vec![
            TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::SysEx(&mode[1..]),
            },
            end_of_track(),
        ];

        let report = codec.parse_smf(&write_smf(vec![track_a, track_b])).unwrap();
        assert!(report.is_clean());
        assert_eq!(
            report.entries,
            vec![
                ParameterValue::new("system_common", "Panel mode", 0),
                ParameterValue::new("temp_performance_common", "EFX:Type", 5),
            ]
        );
    }

    #[test]
    fn test_parse_smf_rejects_garbage() {
        let codec = SysExCodec::new(Arc::new(builtin::jv1080().unwrap()));
        assert!(matches!(
            codec.parse_smf(b"not a midi file"),
            Err(crate::Error::MidiFileParse(_))
        ));
    }
}
