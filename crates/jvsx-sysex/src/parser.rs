//! Tolerant parsing of recorded SysEx streams.
//!
//! A stream is any byte sequence containing zero or more `F0 .. F7`
//! messages, such as the contents of a `.syx` file. Messages that fail to
//! decode are recorded in the report and parsing carries on with the next.

use crate::codec::SysExCodec;
use crate::error::{Error, Result};
use crate::message::{SYSEX_END, SYSEX_START};
use crate::mode::PresetMode;
use crate::value::ParameterValue;
use std::path::Path;
use tracing::{debug, info, warn};

/// One `F0`-delimited run of bytes found in a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    /// Byte offset of the `F0` in the stream
    pub offset: usize,
    pub bytes: &'a [u8],
    /// Whether the chunk ended with its own `F7`
    pub terminated: bool,
}

/// A chunk that could not be decoded.
#[derive(Debug)]
pub struct SkippedChunk {
    /// Position among the chunks of the stream
    pub index: usize,
    pub offset: usize,
    pub error: Error,
}

/// Outcome of parsing a stream.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub entries: Vec<ParameterValue>,
    pub skipped: Vec<SkippedChunk>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn infer_mode(&self) -> PresetMode {
        PresetMode::infer(self.entries.iter().map(|e| e.group.as_str()))
    }

    /// Entries grouped by their parameter group, in first-seen order.
    pub fn by_group(&self) -> Vec<(&str, Vec<&ParameterValue>)> {
        let mut groups: Vec<(&str, Vec<&ParameterValue>)> = Vec::new();
        for entry in &self.entries {
            match groups.iter_mut().find(|(g, _)| *g == entry.group) {
                Some((_, list)) => list.push(entry),
                None => groups.push((entry.group.as_str(), vec![entry])),
            }
        }
        groups
    }
}

/// Split a stream into `F0`-started chunks.
///
/// Bytes outside messages and an `F7` without a preceding `F0` are
/// ignored. An `F0` arriving before the previous chunk's `F7` closes that
/// chunk unterminated, as does the end of the stream.
pub fn split_messages(raw: &[u8]) -> Vec<RawChunk<'_>> {
    let mut chunks = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &byte) in raw.iter().enumerate() {
        match byte {
            SYSEX_START => {
                if let Some(s) = start {
                    warn!("Malformed SysEx at offset {}: F0 found before F7", s);
                    chunks.push(RawChunk {
                        offset: s,
                        bytes: &raw[s..i],
                        terminated: false,
                    });
                }
                start = Some(i);
            }
            SYSEX_END => match start.take() {
                Some(s) => chunks.push(RawChunk {
                    offset: s,
                    bytes: &raw[s..=i],
                    terminated: true,
                }),
                None => warn!("Malformed SysEx at offset {}: F7 found without F0", i),
            },
            _ => {}
        }
    }

    if let Some(s) = start {
        warn!("Malformed SysEx at offset {}: missing F7 at end of data", s);
        chunks.push(RawChunk {
            offset: s,
            bytes: &raw[s..],
            terminated: false,
        });
    }

    chunks
}

impl SysExCodec {
    /// Decode every message in `raw`, recording failures instead of
    /// stopping at them.
    pub fn parse_stream(&self, raw: &[u8]) -> ParseReport {
        let mut report = ParseReport::default();

        for (index, chunk) in split_messages(raw).into_iter().enumerate() {
            let decoded = if chunk.terminated {
                self.decode_all(chunk.bytes)
            } else {
                Err(Error::malformed("unterminated message"))
            };

            match decoded {
                Ok(values) => report.entries.extend(values),
                Err(error) => {
                    warn!(
                        "Skipping message {} at offset {}: {}",
                        index, chunk.offset, error
                    );
                    report.skipped.push(SkippedChunk {
                        index,
                        offset: chunk.offset,
                        error,
                    });
                }
            }
        }

        debug!(
            "Parsed {} parameter(s), skipped {} message(s)",
            report.entries.len(),
            report.skipped.len()
        );
        report
    }

    /// Parse a `.syx` file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseReport> {
        let path = path.as_ref();
        info!("Parsing SysEx file: {}", path.display());
        let raw = std::fs::read(path)?;
        let report = self.parse_stream(&raw);
        info!(
            "Parsed {} parameter(s) from {}",
            report.entries.len(),
            path.display()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jvsx_table::builtin;
    use std::sync::Arc;

    fn codec() -> SysExCodec {
        SysExCodec::new(Arc::new(builtin::jv1080().unwrap()))
    }

    #[test]
    fn test_split_messages() {
        let raw = [
            0x00, 0xF0, 0x01, 0xF7, 0xF7, 0x42, 0xF0, 0x02, 0xF0, 0x03, 0xF7, 0xF0, 0x04,
        ];
        let chunks = split_messages(&raw);
        assert_eq!(chunks.len(), 4);

        assert_eq!(chunks[0].offset, 1);
        assert_eq!(chunks[0].bytes, &[0xF0, 0x01, 0xF7]);
        assert!(chunks[0].terminated);

        // F0 before F7
        assert_eq!(chunks[1].bytes, &[0xF0, 0x02]);
        assert!(!chunks[1].terminated);

        assert_eq!(chunks[2].bytes, &[0xF0, 0x03, 0xF7]);

        // Missing trailing F7
        assert_eq!(chunks[3].offset, 11);
        assert!(!chunks[3].terminated);
    }

    #[test]
    fn test_parse_stream_skips_bad_messages() {
        let codec = codec();
        let good = codec.encode("temp_performance_common", "EFX:Type", 5).unwrap();
        let mut corrupted = codec.encode("system_common", "Panel mode", 1).unwrap();
        corrupted[9] = 0x02;

        let mut stream = good.clone();
        stream.extend_from_slice(&corrupted);
        stream.extend_from_slice(&good[..6]);

        let report = codec.parse_stream(&stream);
        assert_eq!(
            report.entries,
            vec![ParameterValue::new("temp_performance_common", "EFX:Type", 5)]
        );
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.skipped[0].offset, good.len());
        assert!(matches!(
            report.skipped[0].error,
            Error::ChecksumMismatch { .. }
        ));
        assert!(matches!(
            report.skipped[1].error,
            Error::MalformedMessage(_)
        ));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_parse_stream_empty_and_noise() {
        let report = codec().parse_stream(&[0x00, 0x12, 0xF7, 0x7F]);
        assert!(report.entries.is_empty());
        assert!(report.is_clean());
        assert_eq!(report.infer_mode(), PresetMode::Unknown);
    }

    #[test]
    fn test_report_mode_and_grouping() {
        let codec = codec();
        let mut stream = Vec::new();
        for (group, parameter, value) in [
            ("temp_patch_common", "Patch level", 100),
            ("temp_patch_tone_1", "Cutoff frequency", 64),
            ("temp_patch_common", "Patch pan", 64),
        ] {
            stream.extend(codec.encode(group, parameter, value).unwrap());
        }

        let report = codec.parse_stream(&stream);
        assert_eq!(report.infer_mode(), PresetMode::Patch);

        let groups = report.by_group();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "temp_patch_common");
        assert_eq!(groups[0].1.len(), 2);
    }
}
