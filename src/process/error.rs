use std::collections::TryReserveError;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::context::State;
use crate::bencode::BencodeError;

/// A failure confined to one file of the batch.
///
/// The context records it, counts it and moves on to the next file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot open {} for reading: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed bencode in {}: {source}", .path.display())]
    Bencode { path: PathBuf, source: BencodeError },

    #[error("cannot reopen {} for writing: {source}", .path.display())]
    Reopen { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl FileError {
    /// The file the error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            FileError::Open { path, .. }
            | FileError::Read { path, .. }
            | FileError::Bencode { path, .. }
            | FileError::Reopen { path, .. }
            | FileError::Write { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }

    pub fn is_permission_denied(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::PermissionDenied)
    }

    /// True if the file may have been truncated or partially rewritten.
    pub fn may_have_lost_data(&self) -> bool {
        matches!(self, FileError::Write { .. })
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FileError::Open { source, .. }
            | FileError::Read { source, .. }
            | FileError::Reopen { source, .. }
            | FileError::Write { source, .. } => Some(source.kind()),
            FileError::Bencode { .. } => None,
        }
    }
}

/// A failure that ends the whole context.
///
/// After returning one of these the context is poisoned; the caller should
/// drop it.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("out of memory buffering {} ({len} bytes)", .path.display())]
    OutOfMemory {
        path: PathBuf,
        len: u64,
        source: TryReserveError,
    },

    #[error("context is inconsistent in state {0:?}")]
    InvalidState(State),

    #[error("context was stepped after a fatal error")]
    Poisoned,
}

/// Reasons a [`ContextBuilder`](super::ContextBuilder) refuses to seal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SealError {
    #[error("no transforms to apply")]
    EmptyCatalog,
}

/// Internal split between the two severities while a step runs.
#[derive(Debug)]
pub(super) enum StepError {
    File(FileError),
    Fatal(FatalError),
}

impl From<FileError> for StepError {
    fn from(e: FileError) -> Self {
        StepError::File(e)
    }
}

impl From<FatalError> for StepError {
    fn from(e: FatalError) -> Self {
        StepError::Fatal(e)
    }
}
