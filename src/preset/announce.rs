use std::fmt;
use std::str::FromStr;

use super::error::PresetError;
use crate::constants::{ANNOUNCE_BASE, ANNOUNCE_SUFFIX, PASSPHRASE_LEN};

/// A validated announce identity on the destination tracker.
///
/// Users may paste either the bare passphrase or the complete announce URL;
/// both normalize to the same value.
///
/// # Examples
///
/// ```
/// use reannounce::preset::Announce;
///
/// let pass = "0123456789abcdef0123456789abcdef";
/// let from_pass = Announce::parse(pass).unwrap();
/// let from_url = Announce::parse(&format!("https://home.opsfet.ch/{pass}/announce")).unwrap();
///
/// assert_eq!(from_pass, from_url);
/// assert_eq!(from_pass.url(), format!("https://home.opsfet.ch/{pass}/announce"));
/// assert!(Announce::parse("hunter2").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Announce {
    passphrase: String,
}

impl Announce {
    /// Validates a passphrase or announce URL. Surrounding whitespace is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::InvalidAnnounce`] if the input matches
    /// neither shape.
    pub fn parse(input: &str) -> Result<Self, PresetError> {
        let trimmed = input.trim();

        let passphrase = if is_passphrase(trimmed) {
            trimmed
        } else {
            trimmed
                .strip_prefix(ANNOUNCE_BASE)
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(|rest| rest.strip_suffix(ANNOUNCE_SUFFIX))
                .filter(|pass| is_passphrase(pass))
                .ok_or(PresetError::InvalidAnnounce {
                    len: trimmed.chars().count(),
                })?
        };

        Ok(Self {
            passphrase: passphrase.to_string(),
        })
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// The canonical announce URL.
    pub fn url(&self) -> String {
        format!("{ANNOUNCE_BASE}/{}{ANNOUNCE_SUFFIX}", self.passphrase)
    }
}

impl FromStr for Announce {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// keeps the passphrase out of logs
impl fmt::Debug for Announce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Announce")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

fn is_passphrase(s: &str) -> bool {
    s.len() == PASSPHRASE_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
