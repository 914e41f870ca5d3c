use std::slice;

use tracing::trace;

use super::operation::Operation;
use super::path::{resolve, KeyPath};
use crate::bencode::{decode, encode, BencodeError, Value};

/// An operation bound to the key path selecting its targets.
#[derive(Debug, Clone)]
pub struct Transform {
    pub path: KeyPath,
    pub operation: Operation,
}

impl Transform {
    pub fn new(path: KeyPath, operation: Operation) -> Self {
        Self { path, operation }
    }

    /// Applies the operation to every node `path` resolves to and returns
    /// how many nodes that was.
    pub fn apply(&self, document: &mut Value) -> usize {
        let targets = resolve(document, &self.path);
        let count = targets.len();
        for target in targets {
            self.operation.apply(target);
        }
        count
    }
}

/// An ordered batch of transforms.
///
/// Transforms run strictly in insertion order against the same document,
/// so each one observes the edits of those before it.
///
/// # Examples
///
/// ```
/// use reannounce::transform::{Catalog, KeyPath, Operation, Transform};
///
/// let catalog: Catalog = [
///     Transform::new(KeyPath::root(), Operation::set_string("announce", "http://a/")),
///     Transform::new(KeyPath::root().key("announce"), Operation::substitute("a", "b")),
/// ]
/// .into_iter()
/// .collect();
///
/// let out = catalog.apply_to_buffer(b"de").unwrap();
/// assert_eq!(out, b"d8:announce9:http://b/e");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    transforms: Vec<Transform>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Transform> {
        self.transforms.iter()
    }

    /// Applies every transform to `document` in order.
    pub fn apply(&self, document: &mut Value) {
        for (i, transform) in self.transforms.iter().enumerate() {
            let targets = transform.apply(document);
            trace!(transform = i, path = %transform.path, targets, "applied transform");
        }
    }

    /// Decodes `data`, applies the catalog and returns the canonical
    /// re-encoding.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error if `data` is not well-formed bencode.
    pub fn apply_to_buffer(&self, data: &[u8]) -> Result<Vec<u8>, BencodeError> {
        let mut document = decode(data)?;
        self.apply(&mut document);
        Ok(encode(&document))
    }
}

impl FromIterator<Transform> for Catalog {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}

impl Extend<Transform> for Catalog {
    fn extend<I: IntoIterator<Item = Transform>>(&mut self, iter: I) {
        self.transforms.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Transform;
    type IntoIter = slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.transforms.iter()
    }
}
