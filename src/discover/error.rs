use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::client::Client;

/// Errors collecting candidate files. Each one concerns a single root or a
/// single client; the rest of the batch is unaffected.
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("cannot walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("unknown client: {0}")]
    UnknownClient(String),

    #[error("cannot determine where {0} keeps its torrents on this system")]
    NoClientPath(Client),

    #[error("{client} state directory {} is not accessible: {source}", .path.display())]
    ClientPathUnreadable {
        client: Client,
        path: PathBuf,
        source: io::Error,
    },
}
