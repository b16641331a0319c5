//! Codec errors.
//!
//! Messages are user-facing copy and are shown verbatim by the UI.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors from [`crate::decode`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input ended in the middle of a symbol group.
    #[error("長さが足りません")]
    TooShort,

    /// Input contains a character outside the alphabet.
    #[error("`{0}` という文字は使えません")]
    BadCharacter(char),

    /// Decoded bytes are not valid UTF-8.
    #[error("{0}")]
    Utf8(#[from] FromUtf8Error),
}
