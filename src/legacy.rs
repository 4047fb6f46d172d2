//! Table-driven legacy charsets backed by `encoding_rs`

use encoding_rs::{DecoderResult, Encoding};

use crate::codec::{Substitution, TextCodec, utf8_text};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LegacyCharset {
    Iso8859_15,
    ShiftJis,
    EucJp,
    Koi8R,
}

impl LegacyCharset {
    fn encoding(self) -> &'static Encoding {
        match self {
            LegacyCharset::Iso8859_15 => encoding_rs::ISO_8859_15,
            LegacyCharset::ShiftJis => encoding_rs::SHIFT_JIS,
            LegacyCharset::EucJp => encoding_rs::EUC_JP,
            LegacyCharset::Koi8R => encoding_rs::KOI8_R,
        }
    }
}

pub(crate) struct Legacy(pub(crate) LegacyCharset);

impl TextCodec for Legacy {
    fn decode(&self, bytes: &[u8], policy: Substitution) -> Result<String> {
        let mut decoder = self.0.encoding().new_decoder_without_bom_handling();
        let mut output = String::with_capacity(
            decoder
                .max_utf8_buffer_length_without_replacement(bytes.len())
                .unwrap_or(bytes.len() * 3),
        );
        let mut consumed = 0;

        loop {
            let (result, read) = decoder.decode_to_string_without_replacement(
                &bytes[consumed..],
                &mut output,
                true,
            );
            consumed += read;

            match result {
                DecoderResult::InputEmpty => return Ok(output),
                DecoderResult::OutputFull => {
                    let remaining = bytes.len() - consumed;
                    output.reserve(
                        decoder
                            .max_utf8_buffer_length_without_replacement(remaining)
                            .unwrap_or(remaining * 3)
                            .max(4),
                    );
                }
                DecoderResult::Malformed(malformed, pending) => {
                    // `consumed` already includes the malformed bytes and any
                    // bytes read past them.
                    let start = consumed
                        .saturating_sub(usize::from(malformed) + usize::from(pending));
                    let byte = bytes.get(start).copied().unwrap_or_default();
                    policy.substitute(&mut output, byte, start)?;
                }
            }
        }
    }

    fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        let text = utf8_text(text)?;
        let encoding = self.0.encoding();
        let (bytes, _, had_errors) = encoding.encode(text);

        if had_errors {
            let mut encoder = encoding.new_encoder();
            let mut scratch = [0u8; 8];
            for (position, character) in text.char_indices() {
                let mut utf8 = [0u8; 4];
                let (result, _, _) = encoder.encode_from_utf8_without_replacement(
                    character.encode_utf8(&mut utf8),
                    &mut scratch,
                    false,
                );
                if let encoding_rs::EncoderResult::Unmappable(_) = result {
                    return Err(Error::UnmappableTarget {
                        character,
                        position,
                    });
                }
            }
            return Err(Error::InvalidInput(format!(
                "text is not representable in {}",
                encoding.name()
            )));
        }

        Ok(bytes.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(charset: LegacyCharset, bytes: &[u8]) -> String {
        Legacy(charset)
            .decode(bytes, Substitution::Placeholder)
            .unwrap()
    }

    #[test]
    fn test_iso_8859_15_euro() {
        assert_eq!(lenient(LegacyCharset::Iso8859_15, &[0xA4]), "€");
        assert_eq!(
            Legacy(LegacyCharset::Iso8859_15).encode("€".as_bytes()).unwrap(),
            [0xA4]
        );
    }

    #[test]
    fn test_shift_jis_roundtrip() {
        // "日本" in Shift_JIS
        let bytes = [0x93, 0xFA, 0x96, 0x7B];
        assert_eq!(lenient(LegacyCharset::ShiftJis, &bytes), "日本");
        assert_eq!(
            Legacy(LegacyCharset::ShiftJis).encode("日本".as_bytes()).unwrap(),
            bytes
        );
    }

    #[test]
    fn test_euc_jp_decode() {
        // "日本" in EUC-JP
        assert_eq!(lenient(LegacyCharset::EucJp, &[0xC6, 0xFC, 0xCB, 0xDC]), "日本");
    }

    #[test]
    fn test_koi8_r_roundtrip() {
        // "Мир" in KOI8-R
        let bytes = [0xED, 0xC9, 0xD2];
        assert_eq!(lenient(LegacyCharset::Koi8R, &bytes), "Мир");
        assert_eq!(
            Legacy(LegacyCharset::Koi8R).encode("Мир".as_bytes()).unwrap(),
            bytes
        );
    }

    #[test]
    fn test_malformed_sequence_becomes_placeholder() {
        // 0xA0 is not a valid Shift_JIS byte
        assert_eq!(lenient(LegacyCharset::ShiftJis, &[0x41, 0xA0, 0x42]), "A⍰B");
        assert!(matches!(
            Legacy(LegacyCharset::ShiftJis).decode(&[0x41, 0xA0], Substitution::Reject),
            Err(Error::UnmappableSource { byte: 0xA0, position: 1 })
        ));
    }

    #[test]
    fn test_unmappable_character_fails() {
        assert_eq!(
            Legacy(LegacyCharset::Koi8R).encode("Мир 日".as_bytes()),
            Err(Error::UnmappableTarget {
                character: '日',
                position: 7
            })
        );
    }
}
