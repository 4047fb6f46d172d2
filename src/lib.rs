//! # Hex2Text - Live Hex and Text Transcoder
//!
//! Converts user-supplied data between hexadecimal dumps and a fixed set of
//! text encodings, always going through a fully materialized byte buffer.
//! Designed to sit behind an editor that re-runs the conversion on every
//! keystroke, so malformed input degrades to a best-effort rendering
//! instead of an error.
//!
//! ## Features
//!
//! - **Hex codec** with whitespace tolerance and partial recovery of malformed dumps
//! - **Text codecs** for ASCII, UTF-8, UTF-16/32 (LE/BE), ISO-8859-1/15, Shift_JIS, EUC-JP and KOI8-R
//! - **Per-unit substitution** of undecodable sequences with a placeholder glyph
//! - **Encoding-aware metrics** that count characters in hex input without transcoding it
//!
//! ## Quick Start
//!
//! ```rust
//! use hex2text::{EncodingType, convert, count};
//!
//! let result = convert("48 65 6C 6C 6F", EncodingType::Hex, EncodingType::UTF8);
//! assert_eq!(result.output, "Hello");
//! assert_eq!(result.length, 5);
//!
//! let metrics = count("41 00", EncodingType::Hex, EncodingType::UTF16LE);
//! assert_eq!(metrics.to_string(), "Characters: 1 | Bytes: 2");
//! ```

#![deny(missing_docs)]

use std::fmt;
use std::str::FromStr;

pub mod codec;
pub mod hex;
mod legacy;
pub mod metrics;
pub mod pipeline;
pub mod prompt;
pub mod session;
pub mod settings;
mod unicode;

pub use codec::{Substitution, TextCodec, codec_for};
pub use metrics::{Metrics, count};
pub use pipeline::{Conversion, ConversionStatus, Transcoder, convert};
pub use session::Session;
pub use settings::{Provider, TranslatorSettings};

/// Glyph emitted in place of an undecodable unit.
///
/// Deliberately not U+FFFD so that it can be told apart from replacement
/// characters already present in the data.
pub const PLACEHOLDER: char = '\u{2370}';

/// Name reported for encoding indices outside the catalogue.
pub const UNKNOWN_ENCODING_NAME: &str = "Unknown";

/// Result type for transcoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a hex dump could not be decoded strictly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexFault {
    /// A character that is neither a hex digit nor whitespace
    InvalidDigit {
        /// The offending character
        character: char,
        /// Byte offset of the character in the raw input
        position: usize,
    },
    /// The cleaned dump has an odd number of digits
    OddDigitCount(usize),
}

/// Errors that can occur during transcoding operations
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Hex input that cannot be decoded strictly
    MalformedHex(HexFault),
    /// Text that is not valid in its declared encoding
    InvalidInput(String),
    /// Byte sequence rejected by a strict decoder
    UnmappableSource {
        /// The first byte of the rejected sequence
        byte: u8,
        /// Position of the byte in input
        position: usize,
    },
    /// Character cannot be encoded in target encoding
    UnmappableTarget {
        /// The unmappable character
        character: char,
        /// Byte position of the character in input
        position: usize,
    },
    /// Encoding label or name outside the catalogue
    UnknownEncoding(String),
    /// Translator settings could not be read or parsed
    Settings(String),
}

impl fmt::Display for HexFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexFault::InvalidDigit {
                character,
                position,
            } => write!(
                f,
                "non-hex character {:?} at position {}",
                character, position
            ),
            HexFault::OddDigitCount(digits) => {
                write!(f, "odd number of hex digits ({})", digits)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedHex(fault) => write!(f, "Malformed hex: {}", fault),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::UnmappableSource { byte, position } => {
                write!(
                    f,
                    "Undecodable source byte 0x{:02X} at position {}",
                    byte, position
                )
            }
            Error::UnmappableTarget {
                character,
                position,
            } => {
                write!(
                    f,
                    "Cannot encode character '{}' at position {}",
                    character, position
                )
            }
            Error::UnknownEncoding(label) => write!(f, "Unknown encoding: {}", label),
            Error::Settings(msg) => write!(f, "Translator settings: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Encodings selectable on either side of a conversion
///
/// The discriminant order is the catalogue index used by front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
pub enum EncodingType {
    /// Whitespace-separated hexadecimal byte dump
    Hex,
    /// Printable 7-bit ASCII
    ASCII,
    /// UTF-8 Unicode encoding (variable length, 1-4 bytes)
    UTF8,
    /// UTF-16 little endian
    UTF16LE,
    /// UTF-16 big endian
    UTF16BE,
    /// UTF-32 little endian
    UTF32LE,
    /// UTF-32 big endian
    UTF32BE,
    /// ISO-8859-1 (Latin-1) - Western European
    ISO8859_1,
    /// ISO-8859-15 (Latin-9) - Western European with Euro
    ISO8859_15,
    /// Shift_JIS (Japanese)
    ShiftJIS,
    /// EUC-JP (Japanese)
    EUC_JP,
    /// KOI8-R (Russian Cyrillic)
    KOI8_R,
}

impl EncodingType {
    /// Every encoding, in catalogue order
    pub const ALL: [EncodingType; 12] = [
        EncodingType::Hex,
        EncodingType::ASCII,
        EncodingType::UTF8,
        EncodingType::UTF16LE,
        EncodingType::UTF16BE,
        EncodingType::UTF32LE,
        EncodingType::UTF32BE,
        EncodingType::ISO8859_1,
        EncodingType::ISO8859_15,
        EncodingType::ShiftJIS,
        EncodingType::EUC_JP,
        EncodingType::KOI8_R,
    ];

    /// Look up an encoding by catalogue index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalogue index of this encoding
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the canonical display name of this encoding
    pub fn name(self) -> &'static str {
        match self {
            EncodingType::Hex => "Hex",
            EncodingType::ASCII => "ASCII",
            EncodingType::UTF8 => "UTF-8",
            EncodingType::UTF16LE => "UTF-16LE",
            EncodingType::UTF16BE => "UTF-16BE",
            EncodingType::UTF32LE => "UTF-32LE",
            EncodingType::UTF32BE => "UTF-32BE",
            EncodingType::ISO8859_1 => "ISO-8859-1",
            EncodingType::ISO8859_15 => "ISO-8859-15",
            EncodingType::ShiftJIS => "Shift-JIS",
            EncodingType::EUC_JP => "EUC-JP",
            EncodingType::KOI8_R => "KOI8-R",
        }
    }

    /// Look up an encoding by its exact canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|encoding| encoding.name() == name)
    }

    /// Whether buffers in this encoding hold text rather than a hex dump
    pub fn is_textual(self) -> bool {
        self != EncodingType::Hex
    }

    /// Check if this encoding uses variable-length character representation
    pub fn is_multibyte(self) -> bool {
        matches!(
            self,
            EncodingType::UTF8
                | EncodingType::UTF16LE
                | EncodingType::UTF16BE
                | EncodingType::ShiftJIS
                | EncodingType::EUC_JP
        )
    }

    /// Fixed code unit width in bytes, if the encoding has one
    pub fn unit_width(self) -> Option<usize> {
        match self {
            EncodingType::Hex | EncodingType::ShiftJIS | EncodingType::EUC_JP => None,
            EncodingType::UTF16LE | EncodingType::UTF16BE => Some(2),
            EncodingType::UTF32LE | EncodingType::UTF32BE => Some(4),
            _ => Some(1),
        }
    }

    /// Get the byte order mark (BOM) for this encoding if it has one
    pub fn bom(self) -> Option<&'static [u8]> {
        match self {
            EncodingType::UTF8 => Some(&[0xEF, 0xBB, 0xBF]),
            EncodingType::UTF16LE => Some(&[0xFF, 0xFE]),
            EncodingType::UTF16BE => Some(&[0xFE, 0xFF]),
            EncodingType::UTF32LE => Some(&[0xFF, 0xFE, 0x00, 0x00]),
            EncodingType::UTF32BE => Some(&[0x00, 0x00, 0xFE, 0xFF]),
            _ => None,
        }
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_uppercase)
            .collect();

        let encoding = match normalized.as_str() {
            "HEX" => EncodingType::Hex,
            "ASCII" | "USASCII" => EncodingType::ASCII,
            "UTF8" => EncodingType::UTF8,
            "UTF16LE" => EncodingType::UTF16LE,
            "UTF16BE" => EncodingType::UTF16BE,
            "UTF32LE" => EncodingType::UTF32LE,
            "UTF32BE" => EncodingType::UTF32BE,
            "ISO88591" | "LATIN1" => EncodingType::ISO8859_1,
            "ISO885915" | "LATIN9" => EncodingType::ISO8859_15,
            "SHIFTJIS" | "SJIS" => EncodingType::ShiftJIS,
            "EUCJP" => EncodingType::EUC_JP,
            "KOI8R" => EncodingType::KOI8_R,
            _ => return Err(Error::UnknownEncoding(s.to_string())),
        };

        Ok(encoding)
    }
}

/// Display name for a catalogue index, `"Unknown"` when out of range.
///
/// Callers forwarding the name elsewhere must treat `"Unknown"` as a
/// validation failure.
pub fn encoding_type_to_name(index: usize) -> &'static str {
    EncodingType::from_index(index)
        .map(EncodingType::name)
        .unwrap_or(UNKNOWN_ENCODING_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_and_names() {
        let names: Vec<_> = EncodingType::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            [
                "Hex",
                "ASCII",
                "UTF-8",
                "UTF-16LE",
                "UTF-16BE",
                "UTF-32LE",
                "UTF-32BE",
                "ISO-8859-1",
                "ISO-8859-15",
                "Shift-JIS",
                "EUC-JP",
                "KOI8-R"
            ]
        );

        for (index, encoding) in EncodingType::ALL.iter().enumerate() {
            assert_eq!(encoding.index(), index);
            assert_eq!(EncodingType::from_index(index), Some(*encoding));
        }
    }

    #[test]
    fn test_out_of_range_index_is_unknown() {
        assert_eq!(encoding_type_to_name(0), "Hex");
        assert_eq!(encoding_type_to_name(11), "KOI8-R");
        assert_eq!(encoding_type_to_name(12), UNKNOWN_ENCODING_NAME);
        assert_eq!(encoding_type_to_name(usize::MAX), "Unknown");
        assert_eq!(EncodingType::from_index(12), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("utf-8".parse::<EncodingType>(), Ok(EncodingType::UTF8));
        assert_eq!("UTF16le".parse::<EncodingType>(), Ok(EncodingType::UTF16LE));
        assert_eq!("latin1".parse::<EncodingType>(), Ok(EncodingType::ISO8859_1));
        assert_eq!("Shift_JIS".parse::<EncodingType>(), Ok(EncodingType::ShiftJIS));
        assert_eq!("koi8-r".parse::<EncodingType>(), Ok(EncodingType::KOI8_R));
        assert_eq!(
            "ebcdic".parse::<EncodingType>(),
            Err(Error::UnknownEncoding("ebcdic".to_string()))
        );
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(EncodingType::from_name("EUC-JP"), Some(EncodingType::EUC_JP));
        assert_eq!(EncodingType::from_name("euc-jp"), None);
        assert_eq!(EncodingType::from_name(UNKNOWN_ENCODING_NAME), None);
    }

    #[test]
    fn test_encoding_properties() {
        assert!(!EncodingType::Hex.is_textual());
        assert!(EncodingType::KOI8_R.is_textual());
        assert!(EncodingType::UTF16BE.is_multibyte());
        assert!(!EncodingType::UTF32LE.is_multibyte());
        assert_eq!(EncodingType::UTF32BE.unit_width(), Some(4));
        assert_eq!(EncodingType::ShiftJIS.unit_width(), None);
        assert_eq!(EncodingType::UTF16LE.bom(), Some([0xFF, 0xFE].as_slice()));
        assert_eq!(EncodingType::ISO8859_15.bom(), None);
    }

    #[test]
    fn test_error_display() {
        let err = Error::MalformedHex(HexFault::InvalidDigit {
            character: 'Z',
            position: 3,
        });
        assert_eq!(err.to_string(), "Malformed hex: non-hex character 'Z' at position 3");

        let err = Error::UnmappableSource {
            byte: 0xC3,
            position: 7,
        };
        assert_eq!(
            err.to_string(),
            "Undecodable source byte 0xC3 at position 7"
        );
    }
}
