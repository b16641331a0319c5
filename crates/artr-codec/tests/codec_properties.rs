//! Property-based tests for the ARTR codec.
//!
//! 1. **Round-trip**: decode(encode(s)) == s for all strings
//! 2. **Alphabet closure**: encoded text only uses alphabet symbols
//! 3. **Length**: symbol count follows the 3-byte grouping
//! 4. **Whitespace**: decoding ignores interleaved whitespace

use artr_codec::{ALPHABET, decode, encode};
use proptest::prelude::*;

fn expected_symbols(byte_len: usize) -> usize {
    let full = byte_len / 3 * 8;
    match byte_len % 3 {
        1 => full + 3,
        2 => full + 6,
        _ => full,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_round_trip(text in ".*") {
        let encoded = encode(&text);
        prop_assert_eq!(decode(&encoded).unwrap(), text);
    }

    #[test]
    fn prop_output_uses_alphabet(text in ".*") {
        prop_assert!(encode(&text).chars().all(|c| ALPHABET.contains(&c)));
    }

    #[test]
    fn prop_symbol_count(text in ".*") {
        prop_assert_eq!(encode(&text).chars().count(), expected_symbols(text.len()));
    }

    #[test]
    fn prop_whitespace_is_ignored(text in "[a-z]{0,32}", every in 1usize..5) {
        let encoded = encode(&text);
        let spaced: String = encoded
            .chars()
            .enumerate()
            .flat_map(|(i, c)| {
                let gap = if i % every == 0 { Some(' ') } else { None };
                gap.into_iter().chain(std::iter::once(c))
            })
            .collect();

        prop_assert_eq!(decode(&spaced).unwrap(), text);
    }
}
