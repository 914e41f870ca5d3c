//! Tracker constants and tuning parameters.
//!
//! Everything the tracker-migration preset and the file discovery layer
//! hard-code lives here, so a tracker move or a new client layout is a
//! one-line change.

// ============================================================================
// Bencode
// ============================================================================

/// Deepest container nesting the decoder accepts before giving up.
pub const MAX_BENCODE_DEPTH: usize = 64;

// ============================================================================
// Tracker identity
// ============================================================================

/// Number of hexadecimal characters in a tracker passphrase.
pub const PASSPHRASE_LEN: usize = 32;

/// Scheme and host of the announce URL torrents are migrated to.
pub const ANNOUNCE_BASE: &str = "https://home.opsfet.ch";

/// Path segment following the passphrase in an announce URL.
pub const ANNOUNCE_SUFFIX: &str = "/announce";

/// Hostnames the previous tracker announced from over its lifetime.
pub const PREVIOUS_TRACKER_HOSTS: &[&str] = &[
    "apollo.rip",
    "mars.apollo.rip",
    "home.apollo.rip",
    "xanax.rip",
];

// ============================================================================
// Discovery
// ============================================================================

/// Extension of plain metainfo files.
pub const TORRENT_EXTENSION: &str = ".torrent";

/// Extension of qBittorrent resume files.
pub const FASTRESUME_EXTENSION: &str = ".fastresume";

/// File name of uTorrent's aggregate resume file.
pub const RESUME_DAT: &str = "resume.dat";
