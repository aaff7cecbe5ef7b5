//! Text encoding used for character mode.
//!
//! Encodings are looked up by their WHATWG label through `encoding_rs`, so
//! `ascii`, `latin1`, `utf-8`, `cp1251`, `koi8-r` and friends all work. Only
//! encodings that can turn a lone printable byte into a character are
//! accepted; that is checked once when the session is configured.

use crate::error::{Result, ViewerError};

/// Byte used to probe an encoding at startup.
const PROBE_BYTE: u8 = b'A';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    inner: &'static encoding_rs::Encoding,
}

impl TextEncoding {
    /// Resolve `label` and make sure it can decode a single byte.
    pub fn for_label(label: &str) -> Result<Self> {
        let inner = lookup(label.trim())
            .ok_or_else(|| ViewerError::UnknownEncoding(label.to_string()))?;
        let encoding = Self { inner };
        match encoding.decode_byte(PROBE_BYTE) {
            Ok(_) => Ok(encoding),
            Err(_) => Err(ViewerError::UnknownEncoding(label.to_string())),
        }
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Decode one byte on its own.
    pub fn decode_byte(&self, byte: u8) -> Result<char> {
        let bytes = [byte];
        let (text, had_errors) = self.inner.decode_without_bom_handling(&bytes);
        let mut chars = text.chars();
        match (had_errors, chars.next(), chars.next()) {
            (false, Some(c), None) => Ok(c),
            _ => Err(ViewerError::Decode {
                byte,
                encoding: self.name(),
            }),
        }
    }
}

/// Find `label` as given, then in the spellings `utf_8`, `koi8_r` or
/// `latin_1` users bring from other tools.
fn lookup(label: &str) -> Option<&'static encoding_rs::Encoding> {
    let dashed = label.replace('_', "-");
    let squashed = label.replace(['_', '-'], "");
    [label, dashed.as_str(), squashed.as_str()]
        .into_iter()
        .find_map(|candidate| encoding_rs::Encoding::for_label(candidate.as_bytes()))
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self {
            inner: encoding_rs::WINDOWS_1252,
        }
    }
}
