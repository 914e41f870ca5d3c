use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::error::DiscoverError;
use crate::constants::TORRENT_EXTENSION;

/// Options for [`enumerate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Descend into subdirectories rather than listing only direct children.
    pub recursive: bool,
    /// File name suffixes to keep, e.g. `.torrent` or `resume.dat`.
    pub extensions: Vec<String>,
}

impl Default for Walk {
    fn default() -> Self {
        Self {
            recursive: true,
            extensions: vec![TORRENT_EXTENSION.to_string()],
        }
    }
}

impl Walk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replaces the suffix list.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    // raw bytes, so names that are not valid UTF-8 still match
    fn matches(&self, name: &OsStr) -> bool {
        let name = name.as_encoded_bytes();
        self.extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_bytes()))
    }
}

/// Lists the candidate files under `root`, sorted by path.
///
/// A `root` that is itself a file is returned as is, whatever its name, so
/// users can point at a single file explicitly. Entries below the root that
/// cannot be read are logged and skipped.
///
/// # Errors
///
/// Returns [`DiscoverError::Unreadable`] if `root` does not exist or cannot
/// be inspected, and [`DiscoverError::Walk`] if the root directory itself
/// cannot be listed.
pub fn enumerate(root: &Path, walk: &Walk) -> Result<Vec<PathBuf>, DiscoverError> {
    let metadata = fs::metadata(root).map_err(|source| DiscoverError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    if metadata.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    if !walk.recursive {
        walker = walker.max_depth(1);
    }

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(DiscoverError::Walk {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_file() && walk.matches(entry.file_name()) {
            found.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), files = found.len(), "enumerated files");
    Ok(found)
}
