//! Collecting the files a run should rewrite.
//!
//! Two sources feed the file list: paths the user names explicitly, expanded
//! by [`enumerate`], and the state directories of installed clients,
//! located by [`Client`]. Failures here are per root or per client and
//! never stop the rest of the collection.

mod client;
mod error;
mod walk;

pub use client::Client;
pub use error::DiscoverError;
pub use walk::{enumerate, Walk};

#[cfg(test)]
mod tests;
