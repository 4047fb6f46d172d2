//! UTF-8, UTF-16 and UTF-32 strategies
//!
//! Decoders substitute per code unit so that a single bad unit never hides
//! the rest of the buffer.

use crate::codec::{Substitution, TextCodec, utf8_text};
use crate::Result;

const HIGH_SURROGATES: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Byte order of fixed-width code units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn read_u16(self, bytes: &[u8]) -> u16 {
        let pair = [bytes[0], bytes[1]];
        match self {
            ByteOrder::Little => u16::from_le_bytes(pair),
            ByteOrder::Big => u16::from_be_bytes(pair),
        }
    }

    fn read_u32(self, bytes: &[u8]) -> u32 {
        let quad = [bytes[0], bytes[1], bytes[2], bytes[3]];
        match self {
            ByteOrder::Little => u32::from_le_bytes(quad),
            ByteOrder::Big => u32::from_be_bytes(quad),
        }
    }

    fn write_u16(self, unit: u16) -> [u8; 2] {
        match self {
            ByteOrder::Little => unit.to_le_bytes(),
            ByteOrder::Big => unit.to_be_bytes(),
        }
    }

    fn write_u32(self, unit: u32) -> [u8; 4] {
        match self {
            ByteOrder::Little => unit.to_le_bytes(),
            ByteOrder::Big => unit.to_be_bytes(),
        }
    }
}

/// One step of the UTF-16 walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Utf16Unit {
    /// A BMP unit or a complete surrogate pair
    Char(char),
    /// Unpaired surrogate; the walk advanced two bytes
    Unpaired { offset: usize },
    /// Odd trailing byte; the walk stops here
    Truncated { offset: usize },
}

/// Surrogate-aware walk over UTF-16 bytes, shared by decoding and counting
pub(crate) struct Utf16Units<'a> {
    bytes: &'a [u8],
    order: ByteOrder,
    offset: usize,
}

impl<'a> Utf16Units<'a> {
    pub(crate) fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self {
            bytes,
            order,
            offset: 0,
        }
    }
}

impl Iterator for Utf16Units<'_> {
    type Item = Utf16Unit;

    fn next(&mut self) -> Option<Utf16Unit> {
        let offset = self.offset;
        let rest = self.bytes.get(offset..).filter(|rest| !rest.is_empty())?;

        if rest.len() < 2 {
            self.offset = self.bytes.len();
            return Some(Utf16Unit::Truncated { offset });
        }

        let unit = self.order.read_u16(rest);
        self.offset += 2;

        if HIGH_SURROGATES.contains(&unit) {
            if rest.len() >= 4 {
                let low = self.order.read_u16(&rest[2..]);
                if LOW_SURROGATES.contains(&low) {
                    let scalar =
                        0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    self.offset += 2;
                    // Always a valid scalar: the range is 0x10000..=0x10FFFF.
                    return Some(
                        char::from_u32(scalar)
                            .map(Utf16Unit::Char)
                            .unwrap_or(Utf16Unit::Unpaired { offset }),
                    );
                }
            }
            return Some(Utf16Unit::Unpaired { offset });
        }

        if LOW_SURROGATES.contains(&unit) {
            return Some(Utf16Unit::Unpaired { offset });
        }

        Some(
            char::from_u32(u32::from(unit))
                .map(Utf16Unit::Char)
                .unwrap_or(Utf16Unit::Unpaired { offset }),
        )
    }
}

/// UTF-8 with per-byte resynchronisation after an invalid sequence
pub(crate) struct Utf8;

impl TextCodec for Utf8 {
    fn decode(&self, bytes: &[u8], policy: Substitution) -> Result<String> {
        let mut output = String::with_capacity(bytes.len());
        let mut position = 0;

        for chunk in bytes.utf8_chunks() {
            output.push_str(chunk.valid());
            position += chunk.valid().len();

            // Every byte of a broken sequence is either its lead or a
            // continuation byte, so stepping one byte at a time yields one
            // substitute per byte.
            for &byte in chunk.invalid() {
                policy.substitute(&mut output, byte, position)?;
                position += 1;
            }
        }

        Ok(output)
    }

    fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        Ok(utf8_text(text)?.as_bytes().to_vec())
    }
}

/// UTF-16 in the given byte order
pub(crate) struct Utf16(pub(crate) ByteOrder);

impl TextCodec for Utf16 {
    fn decode(&self, bytes: &[u8], policy: Substitution) -> Result<String> {
        let mut output = String::with_capacity(bytes.len());

        for unit in Utf16Units::new(bytes, self.0) {
            match unit {
                Utf16Unit::Char(character) => output.push(character),
                Utf16Unit::Unpaired { offset } | Utf16Unit::Truncated { offset } => {
                    policy.substitute(&mut output, bytes[offset], offset)?
                }
            }
        }

        Ok(output)
    }

    fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        let text = utf8_text(text)?;
        let mut output = Vec::with_capacity(text.len() * 2);
        for unit in text.encode_utf16() {
            output.extend_from_slice(&self.0.write_u16(unit));
        }
        Ok(output)
    }
}

/// UTF-32 in the given byte order
pub(crate) struct Utf32(pub(crate) ByteOrder);

impl TextCodec for Utf32 {
    fn decode(&self, bytes: &[u8], policy: Substitution) -> Result<String> {
        let mut output = String::with_capacity(bytes.len());
        let mut units = bytes.chunks_exact(4);

        for (index, unit) in units.by_ref().enumerate() {
            match char::from_u32(self.0.read_u32(unit)) {
                Some(character) => output.push(character),
                None => policy.substitute(&mut output, unit[0], index * 4)?,
            }
        }

        if let Some(&byte) = units.remainder().first() {
            policy.substitute(&mut output, byte, bytes.len() - units.remainder().len())?;
        }

        Ok(output)
    }

    fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        let text = utf8_text(text)?;
        let mut output = Vec::with_capacity(text.len() * 4);
        for character in text.chars() {
            output.extend_from_slice(&self.0.write_u32(u32::from(character)));
        }
        Ok(output)
    }
}
