use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use tracing::debug;

use super::error::DiscoverError;
use super::walk::{enumerate, Walk};
use crate::constants::{FASTRESUME_EXTENSION, RESUME_DAT, TORRENT_EXTENSION};

/// A BitTorrent client whose state directory can be located and rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Client {
    QBittorrent,
    Deluge,
    Transmission,
    TransmissionDaemon,
    UTorrent,
}

impl Client {
    pub const ALL: [Client; 5] = [
        Client::QBittorrent,
        Client::Deluge,
        Client::Transmission,
        Client::TransmissionDaemon,
        Client::UTorrent,
    ];

    /// Command-line identifier.
    pub fn name(self) -> &'static str {
        match self {
            Client::QBittorrent => "qbittorrent",
            Client::Deluge => "deluge",
            Client::Transmission => "transmission",
            Client::TransmissionDaemon => "transmission-daemon",
            Client::UTorrent => "utorrent",
        }
    }

    /// File name suffixes worth rewriting inside the state directory.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Client::QBittorrent => &[FASTRESUME_EXTENSION, TORRENT_EXTENSION],
            Client::Deluge | Client::Transmission | Client::TransmissionDaemon => {
                &[TORRENT_EXTENSION]
            }
            Client::UTorrent => &[RESUME_DAT, TORRENT_EXTENSION],
        }
    }

    /// State directory relative to the user's home on this platform.
    pub fn relative_state_dir(self) -> Option<&'static str> {
        match self {
            Client::QBittorrent => per_platform(
                Some(".local/share/qBittorrent/BT_backup"),
                Some("Library/Application Support/qBittorrent/BT_backup"),
                Some("AppData/Local/qBittorrent/BT_backup"),
            ),
            Client::Deluge => per_platform(
                Some(".config/deluge/state"),
                Some(".config/deluge/state"),
                Some("AppData/Roaming/deluge/state"),
            ),
            Client::Transmission => per_platform(
                Some(".config/transmission/torrents"),
                Some("Library/Application Support/Transmission/torrents"),
                Some("AppData/Local/transmission/torrents"),
            ),
            Client::TransmissionDaemon => per_platform(
                Some(".config/transmission-daemon/torrents"),
                Some("Library/Application Support/Transmission/torrents"),
                Some("AppData/Local/transmission-daemon/torrents"),
            ),
            Client::UTorrent => per_platform(
                None,
                Some("Library/Application Support/uTorrent"),
                Some("AppData/Roaming/uTorrent"),
            ),
        }
    }

    /// Resolves and checks the state directory under `home`.
    ///
    /// # Errors
    ///
    /// [`DiscoverError::NoClientPath`] if the client has no known location
    /// on this platform, [`DiscoverError::ClientPathUnreadable`] if the
    /// directory is missing or cannot be listed.
    pub fn state_dir(self, home: &Path) -> Result<PathBuf, DiscoverError> {
        let relative = self
            .relative_state_dir()
            .ok_or(DiscoverError::NoClientPath(self))?;
        let path = home.join(relative);

        fs::read_dir(&path).map_err(|source| DiscoverError::ClientPathUnreadable {
            client: self,
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Lists every rewritable file the client keeps under `home`.
    ///
    /// # Errors
    ///
    /// Any error from [`state_dir`](Self::state_dir) or
    /// [`enumerate`](super::enumerate).
    pub fn files(self, home: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
        let dir = self.state_dir(home)?;
        let walk = Walk::new().recursive(false).extensions(self.extensions().iter().copied());
        let files = enumerate(&dir, &walk)?;
        debug!(client = %self, dir = %dir.display(), files = files.len(), "found client files");
        Ok(files)
    }

    /// Lists every rewritable file the client keeps under the current
    /// user's home directory.
    ///
    /// # Errors
    ///
    /// As [`files`](Self::files); also [`DiscoverError::NoClientPath`] when
    /// no home directory can be determined.
    pub fn locate_files(self) -> Result<Vec<PathBuf>, DiscoverError> {
        let base = BaseDirs::new().ok_or(DiscoverError::NoClientPath(self))?;
        self.files(base.home_dir())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Client {
    type Err = DiscoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Client::ALL
            .into_iter()
            .find(|client| client.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DiscoverError::UnknownClient(s.to_string()))
    }
}

fn per_platform(
    unix: Option<&'static str>,
    macos: Option<&'static str>,
    windows: Option<&'static str>,
) -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        macos
    } else if cfg!(windows) {
        windows
    } else if cfg!(unix) {
        unix
    } else {
        None
    }
}
