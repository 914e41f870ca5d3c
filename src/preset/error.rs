use thiserror::Error;

/// Errors raised while building a preset catalog, before any file is read.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The input is neither a bare passphrase nor a full announce URL.
    /// Only its length is kept, since it may be a mistyped passphrase.
    #[error(
        "expected a 32-character lowercase hex passphrase or an announce URL, got {len} characters"
    )]
    InvalidAnnounce { len: usize },

    /// The previous-tracker pattern failed to compile.
    #[error("invalid tracker pattern: {0}")]
    Pattern(#[from] regex::Error),
}
