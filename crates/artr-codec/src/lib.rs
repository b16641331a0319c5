//! ARTR text transform
//!
//! Pure functions with deterministic outputs. The transform maps the UTF-8
//! bytes of its input onto an eight-symbol alphabet, three bits per symbol.
//!
//! # Layout
//!
//! Input bytes are taken in groups of three (24 bits) and written as eight
//! symbols, most significant bits first. A short trailing group is padded
//! with zero bits and truncated to the symbols that still carry data:
//!
//! ```text
//! bytes   symbols
//!   3   →   8      (24 bits, exact)
//!   2   →   6      (18 bits, 16 used)
//!   1   →   3      ( 9 bits,  8 used)
//! ```
//!
//! Decoding ignores whitespace, so encoded text may be wrapped freely.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;

pub use error::CodecError;

/// Symbol alphabet, indexed by 3-bit value.
pub const ALPHABET: [char; 8] = ['楽', '可', '愛', 'っ', 'た', 'し', 'か', '。'];

/// Bits carried by one symbol.
const SYMBOL_BITS: u32 = 3;

/// Symbols in a full 3-byte group.
const GROUP_SYMBOLS: usize = 8;

/// Encode text into ARTR symbols.
///
/// Never fails: every byte sequence has an encoding.
pub fn encode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut output = String::with_capacity(bytes.len().div_ceil(3) * GROUP_SYMBOLS * 3);

    for chunk in bytes.chunks(3) {
        let mut group = [0u8; 3];
        group[..chunk.len()].copy_from_slice(chunk);
        let bits = u32::from(group[0]) << 16 | u32::from(group[1]) << 8 | u32::from(group[2]);

        for index in 0..symbols_for_bytes(chunk.len()) {
            let shift = 21 - SYMBOL_BITS * index as u32;
            output.push(ALPHABET[((bits >> shift) & 0b111) as usize]);
        }
    }

    output
}

/// Decode ARTR symbols back into text.
///
/// Whitespace anywhere in the input is skipped.
///
/// # Errors
///
/// - [`CodecError::BadCharacter`] for the first symbol outside [`ALPHABET`]
/// - [`CodecError::TooShort`] if the final group is truncated
/// - [`CodecError::Utf8`] if the decoded bytes are not valid UTF-8
pub fn decode(input: &str) -> Result<String, CodecError> {
    let values = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(symbol_value)
        .collect::<Result<Vec<u8>, _>>()?;

    let mut output = Vec::with_capacity(values.len() / GROUP_SYMBOLS * 3 + 2);

    for group in values.chunks(GROUP_SYMBOLS) {
        let byte_count = bytes_for_symbols(group.len()).ok_or(CodecError::TooShort)?;

        let packed = group.iter().fold(0u32, |acc, &value| acc << SYMBOL_BITS | u32::from(value));
        let bits = packed << (SYMBOL_BITS * (GROUP_SYMBOLS - group.len()) as u32);

        output.extend_from_slice(&bits.to_be_bytes()[1..=byte_count]);
    }

    Ok(String::from_utf8(output)?)
}

/// Symbols written for a trailing group of `len` bytes.
fn symbols_for_bytes(len: usize) -> usize {
    match len {
        1 => 3,
        2 => 6,
        _ => GROUP_SYMBOLS,
    }
}

/// Bytes carried by a group of `len` symbols. `None` for truncated groups.
fn bytes_for_symbols(len: usize) -> Option<usize> {
    match len {
        3 => Some(1),
        6 => Some(2),
        GROUP_SYMBOLS => Some(3),
        _ => None,
    }
}

fn symbol_value(symbol: char) -> Result<u8, CodecError> {
    ALPHABET
        .iter()
        .position(|&candidate| candidate == symbol)
        .map(|index| index as u8)
        .ok_or(CodecError::BadCharacter(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reflexive(raw: &str, artr: &str) {
        assert_eq!(encode(raw), artr);
        assert_eq!(decode(artr).unwrap(), raw);
    }

    #[test]
    fn known_vectors() {
        assert_reflexive(
            "ありとろ",
            "。楽。楽楽か楽愛。楽。楽可愛可愛。楽。楽楽かし楽。楽。楽可愛可し",
        );
        assert_reflexive("", "");
        assert_reflexive("A", "愛楽愛");
        assert_reflexive("AA", "愛楽愛た楽た");
        assert_reflexive("AAA", "愛楽愛た楽し楽可");
    }

    #[test]
    fn decode_skips_whitespace() {
        assert_eq!(decode("愛 楽 愛").unwrap(), "A");
        assert_eq!(decode("愛楽\n愛た\t楽た").unwrap(), "AA");
    }

    #[test]
    fn truncated_group_is_too_short() {
        assert!(matches!(decode("。"), Err(CodecError::TooShort)));
        assert!(matches!(decode("愛楽愛た"), Err(CodecError::TooShort)));
        assert!(matches!(decode("愛楽愛た楽し楽"), Err(CodecError::TooShort)));
    }

    #[test]
    fn foreign_symbol_is_reported() {
        assert!(matches!(decode("あ"), Err(CodecError::BadCharacter('あ'))));
        assert!(matches!(decode("愛楽x"), Err(CodecError::BadCharacter('x'))));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        // 0xFF is never valid UTF-8
        assert!(matches!(decode("。。。"), Err(CodecError::Utf8(_))));
    }

    #[test]
    fn error_messages() {
        assert_eq!(CodecError::TooShort.to_string(), "長さが足りません");
        assert_eq!(CodecError::BadCharacter('x').to_string(), "`x` という文字は使えません");
    }
}
