use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use super::error::{FatalError, FileError, SealError, StepError};
use crate::transform::{Catalog, Transform};

/// Where a [`Context`] is in its per-file cycle.
///
/// Files go `Advance → Read → Transform → Reopen → Write → Advance`; a
/// single-file error at any point jumps straight back to `Advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Close the current file and open the next one.
    Advance,
    /// Buffer the whole file.
    Read,
    /// Decode, apply the catalog, re-encode.
    Transform,
    /// Truncate the file and open it for writing.
    Reopen,
    /// Write the buffer back and sync it to disk.
    Write,
    /// Every file has been visited.
    Done,
    /// A fatal error occurred; the context must be dropped.
    Failed,
}

/// What a call to [`Context::step`] accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The current file is mid-cycle.
    Pending,
    /// A file just concluded, successfully or with a single-file error.
    FileFinished,
    /// No files remain.
    Done,
}

/// Running totals for a context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Files rewritten successfully.
    pub completed: usize,
    /// Files skipped because of a single-file error.
    pub errored: usize,
}

impl Stats {
    pub fn processed(&self) -> usize {
        self.completed + self.errored
    }
}

/// Collects the file list and catalog for a [`Context`].
///
/// # Examples
///
/// ```
/// use reannounce::process::{ContextBuilder, SealError};
/// use reannounce::transform::{KeyPath, Operation, Transform};
///
/// let err = ContextBuilder::new().file("a.torrent").seal().unwrap_err();
/// assert_eq!(err, SealError::EmptyCatalog);
///
/// let ctx = ContextBuilder::new()
///     .file("a.torrent")
///     .transform(Transform::new(KeyPath::root(), Operation::delete("comment")))
///     .seal()
///     .unwrap();
/// assert_eq!(ctx.files().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ContextBuilder {
    files: Vec<PathBuf>,
    catalog: Catalog,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.catalog.push(transform);
        self
    }

    /// Appends every transform of `catalog`, keeping its order.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog.extend(catalog.iter().cloned());
        self
    }

    /// Freezes the file list and catalog into a runnable context.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::EmptyCatalog`] if no transform was added. An
    /// empty file list is accepted.
    pub fn seal(self) -> Result<Context, SealError> {
        if self.catalog.is_empty() {
            return Err(SealError::EmptyCatalog);
        }

        debug!(
            files = self.files.len(),
            transforms = self.catalog.len(),
            "sealed context"
        );

        Ok(Context {
            files: self.files,
            catalog: self.catalog,
            state: State::Advance,
            cursor: None,
            task: None,
            last_error: None,
            stats: Stats::default(),
        })
    }
}

/// The file currently being worked on. Dropping it closes the handle and
/// frees the buffer.
#[derive(Debug)]
struct FileTask {
    index: usize,
    handle: Option<File>,
    buffer: Vec<u8>,
}

/// Applies a sealed catalog to a sealed file list, one state transition at
/// a time.
///
/// A context never blocks for more than one synchronous I/O call per
/// [`step`](Self::step), so a front end can interleave steps with redraws
/// or cancellation checks. Cancelling is simply dropping the context.
///
/// Files are rewritten in place: the file is truncated before the new
/// contents are written, so a failed write can leave it empty or partial.
/// A file only counts as completed once its contents are synced to disk.
///
/// # Examples
///
/// ```no_run
/// use reannounce::preset::{tracker_migration, Announce};
/// use reannounce::process::{ContextBuilder, Progress};
/// use reannounce::transform::Substitution;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let announce = Announce::parse("0123456789abcdef0123456789abcdef")?;
/// let mut ctx = ContextBuilder::new()
///     .files(["a.torrent", "b.torrent"])
///     .catalog(tracker_migration(&announce, Substitution::All)?)
///     .seal()?;
///
/// while ctx.process_file()? == Progress::FileFinished {
///     if let Some(err) = ctx.last_error() {
///         eprintln!("skipped: {err}");
///     }
/// }
/// println!("{} rewritten, {} skipped", ctx.stats().completed, ctx.stats().errored);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Context {
    files: Vec<PathBuf>,
    catalog: Catalog,
    state: State,
    cursor: Option<usize>,
    task: Option<FileTask>,
    last_error: Option<FileError>,
    stats: Stats,
}

impl Context {
    pub fn state(&self) -> State {
        self.state
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Index of the file being processed, or last processed.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Path of the file being processed, or last processed.
    pub fn current_path(&self) -> Option<&Path> {
        self.cursor
            .and_then(|i| self.files.get(i))
            .map(PathBuf::as_path)
    }

    /// Path of the file the next step will work on, if any.
    pub fn upcoming_path(&self) -> Option<&Path> {
        match self.state {
            State::Advance => self
                .files
                .get(self.cursor.map_or(0, |i| i + 1))
                .map(PathBuf::as_path),
            State::Done | State::Failed => None,
            State::Read | State::Transform | State::Reopen | State::Write => self.current_path(),
        }
    }

    /// The single-file error of the most recently concluded file, if it
    /// failed. Cleared when the next file is opened.
    pub fn last_error(&self) -> Option<&FileError> {
        self.last_error.as_ref()
    }

    /// Performs exactly one state transition.
    ///
    /// Single-file errors are absorbed: they are recorded in
    /// [`last_error`](Self::last_error), counted, and reported as
    /// [`Progress::FileFinished`].
    ///
    /// # Errors
    ///
    /// Returns a [`FatalError`] if the context cannot continue. Every later
    /// call returns [`FatalError::Poisoned`].
    pub fn step(&mut self) -> Result<Progress, FatalError> {
        trace!(state = ?self.state, cursor = ?self.cursor, "step");

        let result = match self.state {
            State::Done => return Ok(Progress::Done),
            State::Failed => return Err(FatalError::Poisoned),
            State::Advance => self.advance(),
            State::Read => self.read(),
            State::Transform => self.transform(),
            State::Reopen => self.reopen(),
            State::Write => self.write(),
        };

        match result {
            Ok(progress) => Ok(progress),
            Err(StepError::File(error)) => Ok(self.fail_file(error)),
            Err(StepError::Fatal(error)) => {
                self.task = None;
                self.state = State::Failed;
                Err(error)
            }
        }
    }

    /// Steps until the current file concludes or the context is done.
    ///
    /// # Errors
    ///
    /// Propagates the first [`FatalError`].
    pub fn process_file(&mut self) -> Result<Progress, FatalError> {
        loop {
            match self.step()? {
                Progress::Pending => {}
                progress => return Ok(progress),
            }
        }
    }

    /// Steps until every file has been visited.
    ///
    /// # Errors
    ///
    /// Propagates the first [`FatalError`].
    pub fn process_all(&mut self) -> Result<Stats, FatalError> {
        while self.process_file()? != Progress::Done {}
        Ok(self.stats)
    }

    fn advance(&mut self) -> Result<Progress, StepError> {
        self.task = None;

        let next = self.cursor.map_or(0, |i| i + 1);
        self.cursor = Some(next);

        let Some(path) = self.files.get(next) else {
            self.state = State::Done;
            info!(
                completed = self.stats.completed,
                errored = self.stats.errored,
                "all files processed"
            );
            return Ok(Progress::Done);
        };

        self.last_error = None;
        debug!(path = %path.display(), index = next, "opening file");

        let handle = File::open(path).map_err(|source| FileError::Open {
            path: path.clone(),
            source,
        })?;

        self.task = Some(FileTask {
            index: next,
            handle: Some(handle),
            buffer: Vec::new(),
        });
        self.state = State::Read;
        Ok(Progress::Pending)
    }

    fn read(&mut self) -> Result<Progress, StepError> {
        let task = self
            .task
            .as_mut()
            .ok_or(FatalError::InvalidState(State::Read))?;
        let path = &self.files[task.index];
        let handle = task
            .handle
            .as_mut()
            .ok_or(FatalError::InvalidState(State::Read))?;

        let read_error = |source| FileError::Read {
            path: path.clone(),
            source,
        };

        let len = handle.metadata().map_err(read_error)?.len();
        task.buffer
            .try_reserve_exact(usize::try_from(len).unwrap_or(usize::MAX))
            .map_err(|source| FatalError::OutOfMemory {
                path: path.clone(),
                len,
                source,
            })?;
        handle.read_to_end(&mut task.buffer).map_err(read_error)?;

        trace!(path = %path.display(), bytes = task.buffer.len(), "read file");
        self.state = State::Transform;
        Ok(Progress::Pending)
    }

    fn transform(&mut self) -> Result<Progress, StepError> {
        let task = self
            .task
            .as_mut()
            .ok_or(FatalError::InvalidState(State::Transform))?;
        let path = &self.files[task.index];

        let encoded = self
            .catalog
            .apply_to_buffer(&task.buffer)
            .map_err(|source| FileError::Bencode {
                path: path.clone(),
                source,
            })?;

        trace!(
            path = %path.display(),
            before = task.buffer.len(),
            after = encoded.len(),
            "transformed file"
        );
        task.buffer = encoded;
        self.state = State::Reopen;
        Ok(Progress::Pending)
    }

    fn reopen(&mut self) -> Result<Progress, StepError> {
        let task = self
            .task
            .as_mut()
            .ok_or(FatalError::InvalidState(State::Reopen))?;
        let path = &self.files[task.index];

        task.handle = None;
        let handle = File::create(path).map_err(|source| FileError::Reopen {
            path: path.clone(),
            source,
        })?;
        task.handle = Some(handle);

        self.state = State::Write;
        Ok(Progress::Pending)
    }

    fn write(&mut self) -> Result<Progress, StepError> {
        let task = self
            .task
            .as_mut()
            .ok_or(FatalError::InvalidState(State::Write))?;
        let path = &self.files[task.index];
        let handle = task
            .handle
            .as_mut()
            .ok_or(FatalError::InvalidState(State::Write))?;

        handle
            .write_all(&task.buffer)
            .and_then(|()| handle.sync_all())
            .map_err(|source| FileError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), bytes = task.buffer.len(), "rewrote file");
        self.task = None;
        self.stats.completed += 1;
        self.state = State::Advance;
        Ok(Progress::FileFinished)
    }

    fn fail_file(&mut self, error: FileError) -> Progress {
        warn!(path = %error.path().display(), %error, "skipping file");
        self.task = None;
        self.stats.errored += 1;
        self.last_error = Some(error);
        self.state = State::Advance;
        Progress::FileFinished
    }
}
