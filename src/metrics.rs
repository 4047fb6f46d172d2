//! Live character and byte counters
//!
//! A hex buffer is measured by what it decodes to, interpreted through the
//! encoding on the other side of the conversion.

use std::fmt;

use serde::Serialize;

use crate::unicode::{ByteOrder, Utf16Units};
use crate::{EncodingType, hex};

/// Character and byte totals for one buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Metrics {
    /// Number of characters
    pub chars: usize,
    /// Number of bytes
    pub bytes: usize,
}

impl Metrics {
    /// Raw counts of a text buffer: UTF-8 byte length and code points
    pub fn of_text(text: impl AsRef<[u8]>) -> Self {
        let text = text.as_ref();
        Self {
            chars: code_points(text),
            bytes: text.len(),
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Characters: {} | Bytes: {}", self.chars, self.bytes)
    }
}

/// Count characters and bytes of `text` declared as `declared`
///
/// `peer` is the encoding on the other side of the conversion; it only
/// matters for hex buffers, where it decides how decoded bytes form characters.
pub fn count(text: impl AsRef<[u8]>, declared: EncodingType, peer: EncodingType) -> Metrics {
    let text = text.as_ref();
    if declared != EncodingType::Hex {
        return Metrics::of_text(text);
    }

    let binary = match hex::decode(text) {
        Ok(binary) => binary,
        Err(err) => {
            log::trace!("counting raw hex text: {}", err);
            return Metrics::of_text(text);
        }
    };

    let chars = match peer {
        EncodingType::UTF16LE => Utf16Units::new(&binary, ByteOrder::Little).count(),
        EncodingType::UTF16BE => Utf16Units::new(&binary, ByteOrder::Big).count(),
        EncodingType::UTF8 => std::str::from_utf8(&binary)
            .map(|decoded| decoded.chars().count())
            .unwrap_or(binary.len()),
        _ => binary.len(),
    };

    Metrics {
        chars,
        bytes: binary.len(),
    }
}

// Invalid sequences count like the replacement characters they would render as.
fn code_points(text: &[u8]) -> usize {
    text.utf8_chunks()
        .map(|chunk| chunk.valid().chars().count() + usize::from(!chunk.invalid().is_empty()))
        .sum()
}
