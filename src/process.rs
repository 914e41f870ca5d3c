//! The per-file processing pipeline.
//!
//! A [`ContextBuilder`] gathers file paths and a [`Catalog`](crate::transform::Catalog);
//! [`ContextBuilder::seal`] freezes them into a [`Context`], which walks the
//! files one at a time through the cycle described by [`State`].
//!
//! # Granularity
//!
//! | Call | Runs until |
//! |---|---|
//! | [`Context::step`] | one state transition |
//! | [`Context::process_file`] | the current file concludes |
//! | [`Context::process_all`] | every file has been visited |
//!
//! # Errors
//!
//! Failures come in two severities. A [`FileError`] (missing file,
//! permission denied, malformed bencode, failed write) only skips the file
//! it concerns: it is logged, counted in [`Stats::errored`] and exposed via
//! [`Context::last_error`] until the next file starts. A [`FatalError`]
//! aborts the context at any granularity.

mod context;
mod error;

pub use context::{Context, ContextBuilder, Progress, State, Stats};
pub use error::{FatalError, FileError, SealError};
