//! Hex dump codec
//!
//! Converts between whitespace-tolerant hex dumps and byte buffers, and
//! renders as much of a malformed dump as still looks like hex.

use crate::{Error, HexFault, PLACEHOLDER, Result};

const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Whitespace as understood by C `isspace` in the "C" locale
#[inline]
fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0B
}

/// Value of a single hex digit, `None` for anything else
#[inline]
fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Decode a hex dump into bytes
///
/// Whitespace anywhere in the input is ignored. Fails on the first
/// character that is not a hex digit, or when the remaining digit count is odd.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    let input = input.as_ref();
    let mut digits = Vec::with_capacity(input.len());

    for (position, &byte) in input.iter().enumerate() {
        if is_space(byte) {
            continue;
        }
        let value = nibble(byte).ok_or_else(|| {
            Error::MalformedHex(HexFault::InvalidDigit {
                character: offending_char(input, position),
                position,
            })
        })?;
        digits.push(value);
    }

    if digits.len() % 2 != 0 {
        return Err(Error::MalformedHex(HexFault::OddDigitCount(digits.len())));
    }

    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Encode bytes as `"XX XX ... XX"`: uppercase digits, single spaces, no trailing space
pub fn encode(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 3);

    for (i, &byte) in bytes.iter().enumerate() {
        if i > 0 {
            output.push(' ');
        }
        output.push(UPPER_DIGITS[(byte >> 4) as usize] as char);
        output.push(UPPER_DIGITS[(byte & 0x0F) as usize] as char);
    }

    output
}

/// Best-effort rendering of a dump that [`decode`] rejected
///
/// Walks the raw input two characters at a time, skipping whitespace before
/// each pair. Valid digit pairs are copied through as typed; any other pair
/// becomes two placeholders, and a lone trailing character becomes one.
pub fn recover_partial(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut output = String::with_capacity(input.len() * 2);
    let mut i = 0;

    while i < input.len() {
        while i < input.len() && is_space(input[i]) {
            i += 1;
        }
        if i >= input.len() {
            break;
        }

        if i + 1 >= input.len() {
            output.push(PLACEHOLDER);
            break;
        }

        let (high, low) = (input[i], input[i + 1]);
        if nibble(high).is_some() && nibble(low).is_some() {
            output.push(high as char);
            output.push(low as char);
        } else {
            output.push(PLACEHOLDER);
            output.push(PLACEHOLDER);
        }

        i += 2;
    }

    output
}

// Best guess at the character starting at `position`, for diagnostics only.
fn offending_char(input: &[u8], position: usize) -> char {
    let tail = &input[position..input.len().min(position + 4)];
    match tail.utf8_chunks().next() {
        Some(chunk) if !chunk.valid().is_empty() => {
            chunk.valid().chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
        }
        _ => char::REPLACEMENT_CHARACTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_spaced_dump() {
        assert_eq!(decode("48 65 6C 6C 6F").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_ignores_all_whitespace() {
        assert_eq!(decode("4\t8\n65\r\n6c 6C\x0B6f\x0C").unwrap(), b"Hello");
        assert_eq!(decode("   ").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert_eq!(
            decode("41 4G"),
            Err(Error::MalformedHex(HexFault::InvalidDigit {
                character: 'G',
                position: 4
            }))
        );
        assert_eq!(
            decode("41 é"),
            Err(Error::MalformedHex(HexFault::InvalidDigit {
                character: 'é',
                position: 3
            }))
        );
    }

    #[test]
    fn test_decode_rejects_odd_digit_count() {
        assert_eq!(
            decode("41 4"),
            Err(Error::MalformedHex(HexFault::OddDigitCount(3)))
        );
    }

    #[test]
    fn test_nibble_values() {
        assert_eq!(nibble(b'0'), Some(0));
        assert_eq!(nibble(b'9'), Some(9));
        assert_eq!(nibble(b'a'), Some(10));
        assert_eq!(nibble(b'F'), Some(15));
        for byte in [b'G', b'g', b' ', b'/', b':', b'@', 0x00, 0xFF] {
            assert_eq!(nibble(byte), None, "byte {:#04X}", byte);
        }
    }

    #[test]
    fn test_encode_format() {
        assert_eq!(encode(&[0x00, 0xAB, 0x7f]), "00 AB 7F");
        assert_eq!(encode(&[0xFF]), "FF");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_roundtrip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_recover_single_digit() {
        assert_eq!(recover_partial("4"), "⍰");
    }

    #[test]
    fn test_recover_invalid_pair() {
        assert_eq!(recover_partial("ZZ"), "⍰⍰");
    }

    #[test]
    fn test_recover_keeps_valid_pairs_verbatim() {
        assert_eq!(recover_partial("4a ZZ 6c"), "4a⍰⍰6c");
        assert_eq!(recover_partial("41 42 4"), "4142⍰");
        assert_eq!(recover_partial("  41  "), "41");
    }

    #[test]
    fn test_recover_pairs_across_inner_space() {
        // The pair is taken before any whitespace inside it is skipped.
        assert_eq!(recover_partial("4 1"), "⍰⍰⍰");
    }
}
