//! reannounce - bulk tracker migration for BitTorrent metadata
//!
//! Rewrites the announce URLs stored in `.torrent` files and in client
//! resume files so torrents can move to a new tracker without being
//! re-added or re-checked.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`transform`] - Key paths, mutation operations and ordered catalogs
//! - [`preset`] - The tracker-migration catalog
//! - [`process`] - Per-file read/transform/write state machine
//! - [`discover`] - File enumeration and client state directories
//! - [`constants`] - Tracker URL template, limits and file suffixes

pub mod bencode;
pub mod constants;
pub mod discover;
pub mod preset;
pub mod process;
pub mod transform;

pub use bencode::{decode, encode, BencodeError, Value};
pub use discover::{enumerate, Client, DiscoverError, Walk};
pub use preset::{tracker_migration, Announce, PresetError};
pub use process::{Context, ContextBuilder, FatalError, FileError, Progress, SealError, State, Stats};
pub use transform::{Catalog, KeyPath, Operation, Selector, Substitution, Transform};
