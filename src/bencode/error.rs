use thiserror::Error;

/// Reasons a byte buffer is not a well-formed bencode document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("invalid string length")]
    InvalidStringLength,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("dictionary key at offset {0} is not a byte string")]
    NonStringKey(usize),

    #[error("duplicate dictionary key: {0}")]
    DuplicateKey(String),

    #[error("trailing data after value")]
    TrailingData,

    #[error("nesting too deep")]
    NestingTooDeep,
}
