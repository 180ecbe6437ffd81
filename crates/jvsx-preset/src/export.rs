//! Presets as Rust source.
//!
//! [`export_rust`] writes a function building the preset with the
//! [`Preset`] builder calls; [`import_rust`] reads that source back.
//! Only the shape produced by the exporter is understood: one
//! `Preset::new(..)` outside comments, followed by a chain of `.with_*(..)`
//! calls with literal arguments.

use crate::error::{Error, Result};
use crate::Preset;
use jvsx_sysex::PresetMode;
use std::fmt::Write;

pub fn export_rust(preset: &Preset) -> String {
    let mut src = String::new();
    let _ = writeln!(src, "//! Preset {:?} ({}).", preset.name, preset.mode);
    if let Some(description) = &preset.description {
        for line in description.lines() {
            let _ = writeln!(src, "//! {}", line);
        }
    }
    src.push('\n');
    src.push_str("use jvsx::preset::{Preset, PresetMode};\n\n");
    src.push_str("pub fn preset() -> Preset {\n");
    let _ = writeln!(
        src,
        "    Preset::new({:?}, PresetMode::{:?})",
        preset.name, preset.mode
    );
    if let Some(description) = &preset.description {
        let _ = writeln!(src, "        .with_description({:?})", description);
    }
    if let Some(author) = &preset.author {
        let _ = writeln!(src, "        .with_author({:?})", author);
    }
    for tag in &preset.tags {
        let _ = writeln!(src, "        .with_tag({:?})", tag);
    }
    for entry in preset.entries() {
        let _ = writeln!(
            src,
            "        .with_parameter({:?}, {:?}, {})",
            entry.group, entry.parameter, entry.value
        );
        if let Some(note) = &entry.description {
            let _ = writeln!(
                src,
                "        .with_note({:?}, {:?}, {:?})",
                entry.group, entry.parameter, note
            );
        }
    }
    src.push_str("}\n");
    src
}

/// Rebuild a preset from source produced by [`export_rust`].
pub fn import_rust(src: &str) -> Result<Preset> {
    let start = find_outside_comments(src, "Preset::new").ok_or_else(|| Error::RustImport {
        position: 0,
        message: "no `Preset::new` call found".to_string(),
    })?;

    let mut cursor = Cursor { src, pos: start };
    cursor.expect("Preset::new")?;
    cursor.expect("(")?;
    let name = cursor.string()?;
    cursor.expect(",")?;
    cursor.expect("PresetMode::")?;
    let mode_pos = cursor.pos;
    let mode: PresetMode = cursor
        .ident()
        .parse()
        .map_err(|message| Error::RustImport {
            position: mode_pos,
            message,
        })?;
    cursor.expect(")")?;

    let mut preset = Preset::new(name, mode);
    while cursor.eat(".") {
        let method_pos = cursor.pos;
        let method = cursor.ident();
        cursor.expect("(")?;
        preset = match method {
            "with_description" => preset.with_description(cursor.string()?),
            "with_author" => preset.with_author(cursor.string()?),
            "with_tag" => preset.with_tag(cursor.string()?),
            "with_parameter" => {
                let group = cursor.string()?;
                cursor.expect(",")?;
                let parameter = cursor.string()?;
                cursor.expect(",")?;
                let value = cursor.integer()?;
                preset.with_parameter(&group, &parameter, value)
            }
            "with_note" => {
                let group = cursor.string()?;
                cursor.expect(",")?;
                let parameter = cursor.string()?;
                cursor.expect(",")?;
                preset.with_note(&group, &parameter, cursor.string()?)
            }
            other => {
                return Err(Error::RustImport {
                    position: method_pos,
                    message: format!("unexpected method `{}`", other),
                })
            }
        };
        cursor.expect(")")?;
    }
    Ok(preset)
}

/// Byte offset of the first `token` on a line that is not a `//` comment.
fn find_outside_comments(src: &str, token: &str) -> Option<usize> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        if !line.trim_start().starts_with("//") {
            if let Some(pos) = line.find(token) {
                return Some(offset + pos);
            }
        }
        offset += line.len();
    }
    None
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::RustImport {
            position: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else {
                break;
            }
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", token)))
        }
    }

    fn ident(&mut self) -> &'a str {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn integer(&mut self) -> Result<i32> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let value = rest[..len]
            .parse()
            .map_err(|_| self.error("expected an integer literal"))?;
        self.pos += len;
        Ok(value)
    }

    /// A string literal as written by `{:?}`.
    fn string(&mut self) -> Result<String> {
        self.expect("\"")?;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => {
                    let escaped = match chars.next() {
                        Some((_, 'n')) => '\n',
                        Some((_, 'r')) => '\r',
                        Some((_, 't')) => '\t',
                        Some((_, '0')) => '\0',
                        Some((_, '\\')) => '\\',
                        Some((_, '"')) => '"',
                        Some((_, '\'')) => '\'',
                        Some((_, 'u')) => {
                            let rest = &self.rest()[i + 2..];
                            let close = rest.find('}').ok_or_else(|| self.error("bad \\u escape"))?;
                            let code = rest
                                .strip_prefix('{')
                                .and_then(|r| u32::from_str_radix(&r[..close - 1], 16).ok())
                                .and_then(char::from_u32)
                                .ok_or_else(|| self.error("bad \\u escape"))?;
                            // Skip the braces and hex digits
                            for _ in 0..=close {
                                chars.next();
                            }
                            code
                        }
                        _ => return Err(self.error("unsupported escape")),
                    };
                    out.push(escaped);
                }
                c => out.push(c),
            }
        }
        Err(self.error("unterminated string literal"))
    }
}
