use std::fmt;

use bytes::Bytes;

use crate::bencode::Value;

/// One step of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Descend into the dictionary entry with this exact key.
    Key(Bytes),
    /// Descend into every value of a dictionary or every element of a list.
    Wildcard,
}

impl Selector {
    /// Creates a literal key selector.
    pub fn key(key: impl AsRef<[u8]>) -> Self {
        Selector::Key(Bytes::copy_from_slice(key.as_ref()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Key(key) => write!(f, "{}", String::from_utf8_lossy(key)),
            Selector::Wildcard => f.write_str("*"),
        }
    }
}

/// An ordered list of selectors locating transform targets in a document.
///
/// Each selector consumes exactly one level of nesting. The empty path
/// targets the document root.
///
/// # Examples
///
/// ```
/// use reannounce::transform::KeyPath;
///
/// let tiers = KeyPath::root().key("announce-list").wildcard();
/// assert_eq!(tiers.to_string(), "announce-list/*");
/// assert_eq!(KeyPath::root().to_string(), "<root>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<Selector>);

impl KeyPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Appends a literal key selector.
    pub fn key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.0.push(Selector::key(key));
        self
    }

    /// Appends a wildcard selector.
    pub fn wildcard(mut self) -> Self {
        self.0.push(Selector::Wildcard);
        self
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Selector> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        KeyPath(iter.into_iter().collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

/// Resolves `path` against `root`, returning every node it reaches.
///
/// The frontier starts as `[root]` and each selector maps every node in it
/// to its matching children. Nodes that are the wrong type for a selector,
/// or dictionaries lacking a literal key, are dropped without error. The
/// returned references point at distinct nodes.
///
/// # Examples
///
/// ```
/// use reannounce::bencode::decode;
/// use reannounce::transform::{resolve, KeyPath};
///
/// let mut doc = decode(b"d13:announce-listll1:ael1:b1:ceee").unwrap();
/// let path = KeyPath::root().key("announce-list").wildcard();
/// assert_eq!(resolve(&mut doc, &path).len(), 2);
///
/// let missing = KeyPath::root().key("announce");
/// assert!(resolve(&mut doc, &missing).is_empty());
/// ```
pub fn resolve<'a>(root: &'a mut Value, path: &KeyPath) -> Vec<&'a mut Value> {
    let mut frontier = vec![root];

    for selector in path.selectors() {
        frontier = frontier
            .into_iter()
            .flat_map(|node| select(node, selector))
            .collect();

        if frontier.is_empty() {
            break;
        }
    }

    frontier
}

fn select<'a>(node: &'a mut Value, selector: &Selector) -> Vec<&'a mut Value> {
    match (selector, node) {
        (Selector::Key(key), Value::Dict(dict)) => dict.get_mut(key).into_iter().collect(),
        (Selector::Wildcard, Value::Dict(dict)) => dict.values_mut().collect(),
        (Selector::Wildcard, Value::List(list)) => list.iter_mut().collect(),
        _ => Vec::new(),
    }
}
