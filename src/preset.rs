//! Ready-made catalogs for moving torrents to a new tracker.
//!
//! [`tracker_migration`] turns one user intent ("point everything at my new
//! announce URL") into the handful of low-level transforms needed to cover
//! every file layout the tool knows about. The catalog is built, and the
//! user's input validated, before any file is opened.
//!
//! | Key path | Layout |
//! |---|---|
//! | `announce` | `.torrent` primary tracker |
//! | `announce-list` | `.torrent` tiers ([BEP-12]) |
//! | `trackers` | qBittorrent `.fastresume` tiers |
//! | `*/trackers` | uTorrent `resume.dat`, one entry per torrent |
//!
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

mod announce;
mod error;

pub use announce::Announce;
pub use error::PresetError;

use regex::bytes::Regex;
use tracing::debug;

use crate::constants::{ANNOUNCE_SUFFIX, PASSPHRASE_LEN, PREVIOUS_TRACKER_HOSTS};
use crate::transform::{Catalog, KeyPath, Operation, Substitution, Transform};

/// Key paths the migration substitution is applied under.
pub fn migration_paths() -> [KeyPath; 4] {
    [
        KeyPath::root().key("announce"),
        KeyPath::root().key("announce-list"),
        KeyPath::root().key("trackers"),
        KeyPath::root().wildcard().key("trackers"),
    ]
}

/// Compiles the pattern matching any announce URL of the previous tracker.
///
/// # Errors
///
/// Returns [`PresetError::Pattern`] if the pattern does not compile.
pub fn previous_tracker_pattern() -> Result<Regex, PresetError> {
    let hosts = PREVIOUS_TRACKER_HOSTS
        .iter()
        .map(|host| regex::escape(host))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = format!(
        "https?://(?:{hosts})(?::[0-9]+)?/[0-9a-f]{{{PASSPHRASE_LEN}}}{}",
        regex::escape(ANNOUNCE_SUFFIX)
    );

    Ok(Regex::new(&pattern)?)
}

/// Builds the catalog rewriting previous-tracker announce URLs to `announce`.
///
/// All transforms share one compiled pattern.
///
/// # Examples
///
/// ```
/// use reannounce::preset::{tracker_migration, Announce};
/// use reannounce::transform::Substitution;
///
/// let announce = Announce::parse("0123456789abcdef0123456789abcdef").unwrap();
/// let catalog = tracker_migration(&announce, Substitution::All).unwrap();
///
/// let old = b"d8:announce65:https://mars.apollo.rip/ffffffffffffffffffffffffffffffff/announcee";
/// let new = catalog.apply_to_buffer(old).unwrap();
/// assert_eq!(
///     new,
///     b"d8:announce64:https://home.opsfet.ch/0123456789abcdef0123456789abcdef/announcee".to_vec()
/// );
/// ```
///
/// # Errors
///
/// Returns [`PresetError::Pattern`] if the previous-tracker pattern does
/// not compile.
pub fn tracker_migration(announce: &Announce, mode: Substitution) -> Result<Catalog, PresetError> {
    let pattern = previous_tracker_pattern()?;
    let url = announce.url();

    let catalog: Catalog = migration_paths()
        .into_iter()
        .map(|path| {
            let operation =
                Operation::substitute_regex(pattern.clone(), url.as_bytes()).with_mode(mode);
            Transform::new(path, operation)
        })
        .collect();

    debug!(transforms = catalog.len(), ?mode, "built tracker migration catalog");
    Ok(catalog)
}
