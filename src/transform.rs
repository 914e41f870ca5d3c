//! Declarative edits over bencode documents.
//!
//! A [`Transform`] pairs a [`KeyPath`] with an [`Operation`]. The path is
//! resolved against a document into a frontier of target nodes (see
//! [`resolve`]) and the operation is applied to each of them. A
//! [`Catalog`] runs many transforms in order over one document.
//!
//! Nothing here fails on a document that lacks the targeted structure: an
//! absent key or a node of the wrong type simply drops out of the frontier
//! or turns the operation into a no-op. The only error on this path is a
//! buffer that does not decode at all.
//!
//! # Examples
//!
//! Rewriting every tracker tier of a `.torrent`:
//!
//! ```
//! use reannounce::bencode::{decode, encode};
//! use reannounce::transform::{Catalog, KeyPath, Operation, Transform};
//!
//! let mut catalog = Catalog::new();
//! catalog.push(Transform::new(
//!     KeyPath::root().key("announce-list"),
//!     Operation::substitute("old.example", "new.example"),
//! ));
//!
//! let mut doc = decode(b"d13:announce-listll11:old.exampleel11:old.exampleeee").unwrap();
//! catalog.apply(&mut doc);
//! assert_eq!(
//!     encode(&doc),
//!     b"d13:announce-listll11:new.exampleel11:new.exampleeee".to_vec()
//! );
//! ```

mod catalog;
mod operation;
mod path;

pub use catalog::{Catalog, Transform};
pub use operation::{Operation, Substitution};
pub use path::{resolve, KeyPath, Selector};
