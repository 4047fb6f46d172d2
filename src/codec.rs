//! Byte buffer ⇄ text strategies, one per textual [`EncodingType`]
//!
//! Every strategy implements [`TextCodec`]. The table in [`codec_for`] is the
//! only place that maps an encoding selector to its implementation.

use crate::legacy::{Legacy, LegacyCharset};
use crate::unicode::{ByteOrder, Utf8, Utf16, Utf32};
use crate::{EncodingType, Error, PLACEHOLDER, Result};

/// What a decoder does with a unit it cannot decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Substitution {
    /// Emit a substitute (placeholder glyph, or `?` for ASCII) and keep going
    #[default]
    Placeholder,
    /// Fail with [`Error::UnmappableSource`] at the first bad unit
    Reject,
}

impl Substitution {
    /// Record an undecodable unit starting at `position`
    pub(crate) fn substitute(
        self,
        output: &mut String,
        byte: u8,
        position: usize,
    ) -> Result<()> {
        self.substitute_with(output, PLACEHOLDER, byte, position)
    }

    pub(crate) fn substitute_with(
        self,
        output: &mut String,
        replacement: char,
        byte: u8,
        position: usize,
    ) -> Result<()> {
        match self {
            Substitution::Placeholder => {
                output.push(replacement);
                Ok(())
            }
            Substitution::Reject => Err(Error::UnmappableSource { byte, position }),
        }
    }
}

/// Conversion capability pair for one text encoding
pub trait TextCodec: Sync {
    /// Interpret `bytes` as text in this encoding
    fn decode(&self, bytes: &[u8], policy: Substitution) -> Result<String>;

    /// Produce the bytes of `text` in this encoding
    ///
    /// `text` is raw editor content and is not assumed to be valid UTF-8.
    fn encode(&self, text: &[u8]) -> Result<Vec<u8>>;
}

/// Strategy for a textual encoding, `None` for [`EncodingType::Hex`]
pub fn codec_for(encoding: EncodingType) -> Option<&'static dyn TextCodec> {
    let codec: &'static dyn TextCodec = match encoding {
        EncodingType::Hex => return None,
        EncodingType::ASCII => &Ascii,
        EncodingType::UTF8 => &Utf8,
        EncodingType::UTF16LE => &Utf16(ByteOrder::Little),
        EncodingType::UTF16BE => &Utf16(ByteOrder::Big),
        EncodingType::UTF32LE => &Utf32(ByteOrder::Little),
        EncodingType::UTF32BE => &Utf32(ByteOrder::Big),
        EncodingType::ISO8859_1 => &Latin1,
        EncodingType::ISO8859_15 => &Legacy(LegacyCharset::Iso8859_15),
        EncodingType::ShiftJIS => &Legacy(LegacyCharset::ShiftJis),
        EncodingType::EUC_JP => &Legacy(LegacyCharset::EucJp),
        EncodingType::KOI8_R => &Legacy(LegacyCharset::Koi8R),
    };
    Some(codec)
}

/// Require `text` to be UTF-8 before re-encoding it
pub(crate) fn utf8_text(text: &[u8]) -> Result<&str> {
    std::str::from_utf8(text).map_err(|e| {
        Error::InvalidInput(format!(
            "invalid UTF-8 sequence at byte {}",
            e.valid_up_to()
        ))
    })
}

/// Printable ASCII; anything outside 32..=126 decodes as `?`
struct Ascii;

impl TextCodec for Ascii {
    fn decode(&self, bytes: &[u8], policy: Substitution) -> Result<String> {
        let mut output = String::with_capacity(bytes.len());
        for (position, &byte) in bytes.iter().enumerate() {
            if (32..=126).contains(&byte) {
                output.push(byte as char);
            } else {
                policy.substitute_with(&mut output, '?', byte, position)?;
            }
        }
        Ok(output)
    }

    fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        Ok(text.to_vec())
    }
}

/// ISO-8859-1: every byte is the code point of the same value
struct Latin1;

impl TextCodec for Latin1 {
    fn decode(&self, bytes: &[u8], _policy: Substitution) -> Result<String> {
        Ok(bytes.iter().map(|&byte| byte as char).collect())
    }

    fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        utf8_text(text)?
            .char_indices()
            .map(|(position, character)| {
                u8::try_from(u32::from(character)).map_err(|_| Error::UnmappableTarget {
                    character,
                    position,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(encoding: EncodingType, bytes: &[u8]) -> String {
        codec_for(encoding)
            .unwrap()
            .decode(bytes, Substitution::Placeholder)
            .unwrap()
    }

    #[test]
    fn test_hex_has_no_text_codec() {
        assert!(codec_for(EncodingType::Hex).is_none());
        for encoding in EncodingType::ALL.into_iter().filter(|e| e.is_textual()) {
            assert!(codec_for(encoding).is_some(), "{} has no codec", encoding);
        }
    }

    #[test]
    fn test_ascii_replaces_non_printable() {
        assert_eq!(decode(EncodingType::ASCII, b"Hi\n\x7F\xC3!"), "Hi???!");
        assert_eq!(decode(EncodingType::ASCII, b" ~"), " ~");
    }

    #[test]
    fn test_ascii_reject_policy() {
        let result = codec_for(EncodingType::ASCII)
            .unwrap()
            .decode(b"ok\x80", Substitution::Reject);
        assert_eq!(
            result,
            Err(Error::UnmappableSource {
                byte: 0x80,
                position: 2
            })
        );
    }

    #[test]
    fn test_ascii_encode_is_verbatim() {
        let codec = codec_for(EncodingType::ASCII).unwrap();
        assert_eq!(codec.encode(b"caf\xC3\xA9\xFF").unwrap(), b"caf\xC3\xA9\xFF");
    }

    #[test]
    fn test_latin1_roundtrip() {
        let codec = codec_for(EncodingType::ISO8859_1).unwrap();
        assert_eq!(decode(EncodingType::ISO8859_1, &[0x63, 0x61, 0x66, 0xE9]), "café");
        assert_eq!(codec.encode("café".as_bytes()).unwrap(), [0x63, 0x61, 0x66, 0xE9]);
    }

    #[test]
    fn test_latin1_rejects_wide_characters() {
        let codec = codec_for(EncodingType::ISO8859_1).unwrap();
        assert_eq!(
            codec.encode("a€".as_bytes()),
            Err(Error::UnmappableTarget {
                character: '€',
                position: 1
            })
        );
        assert!(matches!(
            codec.encode(b"\xFF"),
            Err(Error::InvalidInput(_))
        ));
    }
}
