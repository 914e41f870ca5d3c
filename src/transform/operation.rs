use std::borrow::Cow;

use bytes::Bytes;
use regex::bytes::{NoExpand, Regex};

use crate::bencode::Value;

/// How many occurrences a substitution rewrites within one byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Substitution {
    /// Every non-overlapping occurrence, scanning left to right.
    #[default]
    All,
    /// Only the leftmost occurrence.
    First,
}

impl Substitution {
    fn limit(self) -> usize {
        match self {
            Substitution::All => 0,
            Substitution::First => 1,
        }
    }
}

/// A mutation applied to each node a transform's key path resolves to.
///
/// Every operation is type-directed: a target of the wrong type is left
/// alone rather than reported, so one catalog can run over `.torrent`
/// files and resume files of several clients alike.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Remove `key` from a dictionary target.
    Delete { key: Bytes },
    /// Insert or overwrite `key` in a dictionary target with a byte string.
    SetString { key: Bytes, value: Bytes },
    /// Replace `find` with `replace` in byte strings, descending through lists.
    Substitute {
        find: Bytes,
        replace: Bytes,
        mode: Substitution,
    },
    /// Replace matches of `pattern` with `replace` (taken literally) in byte
    /// strings, descending through lists.
    SubstituteRegex {
        pattern: Regex,
        replace: Bytes,
        mode: Substitution,
    },
}

impl Operation {
    pub fn delete(key: impl AsRef<[u8]>) -> Self {
        Operation::Delete {
            key: Bytes::copy_from_slice(key.as_ref()),
        }
    }

    pub fn set_string(key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Self {
        Operation::SetString {
            key: Bytes::copy_from_slice(key.as_ref()),
            value: Bytes::copy_from_slice(value.as_ref()),
        }
    }

    /// Literal substitution of every occurrence.
    pub fn substitute(find: impl AsRef<[u8]>, replace: impl AsRef<[u8]>) -> Self {
        Operation::Substitute {
            find: Bytes::copy_from_slice(find.as_ref()),
            replace: Bytes::copy_from_slice(replace.as_ref()),
            mode: Substitution::All,
        }
    }

    /// Regex substitution of every match.
    pub fn substitute_regex(pattern: Regex, replace: impl AsRef<[u8]>) -> Self {
        Operation::SubstituteRegex {
            pattern,
            replace: Bytes::copy_from_slice(replace.as_ref()),
            mode: Substitution::All,
        }
    }

    /// Switches a substitution to the given mode. Other operations are
    /// returned unchanged.
    pub fn with_mode(mut self, new_mode: Substitution) -> Self {
        match &mut self {
            Operation::Substitute { mode, .. } | Operation::SubstituteRegex { mode, .. } => {
                *mode = new_mode;
            }
            Operation::Delete { .. } | Operation::SetString { .. } => {}
        }
        self
    }

    /// Applies the operation to a single target node in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use reannounce::bencode::{decode, encode};
    /// use reannounce::transform::Operation;
    ///
    /// let mut doc = decode(b"de").unwrap();
    /// Operation::set_string("presto", "largo").apply(&mut doc);
    /// assert_eq!(encode(&doc), b"d6:presto5:largoe");
    ///
    /// // dictionary operations leave other types alone
    /// let mut doc = decode(b"6:presto").unwrap();
    /// Operation::delete("presto").apply(&mut doc);
    /// assert_eq!(encode(&doc), b"6:presto");
    /// ```
    pub fn apply(&self, target: &mut Value) {
        match self {
            Operation::Delete { key } => {
                if let Value::Dict(dict) = target {
                    dict.shift_remove(key);
                }
            }
            Operation::SetString { key, value } => {
                if let Value::Dict(dict) = target {
                    dict.insert(key.clone(), Value::Bytes(value.clone()));
                }
            }
            Operation::Substitute {
                find,
                replace,
                mode,
            } => rewrite_strings(target, &|haystack: &[u8]| {
                replace_literal(haystack, find, replace, mode.limit())
            }),
            Operation::SubstituteRegex {
                pattern,
                replace,
                mode,
            } => rewrite_strings(target, &|haystack: &[u8]| {
                match pattern.replacen(haystack, mode.limit(), NoExpand(&replace[..])) {
                    Cow::Owned(rewritten) => Some(rewritten),
                    Cow::Borrowed(_) => None,
                }
            }),
        }
    }
}

/// Runs `rewrite` over the byte strings reachable from `node` through list
/// nesting only. `rewrite` returns `None` when a string is left as is.
fn rewrite_strings<F>(node: &mut Value, rewrite: &F)
where
    F: Fn(&[u8]) -> Option<Vec<u8>>,
{
    match node {
        Value::Bytes(bytes) => {
            if let Some(rewritten) = rewrite(bytes) {
                *bytes = Bytes::from(rewritten);
            }
        }
        Value::List(list) => {
            for item in list {
                rewrite_strings(item, rewrite);
            }
        }
        Value::Integer(_) | Value::Dict(_) => {}
    }
}

/// Replaces up to `limit` occurrences of `find` (0 means all). Returns
/// `None` if nothing matched; an empty `find` never matches.
fn replace_literal(haystack: &[u8], find: &[u8], replace: &[u8], limit: usize) -> Option<Vec<u8>> {
    if find.is_empty() {
        return None;
    }

    let mut out: Option<Vec<u8>> = None;
    let mut rest = haystack;
    let mut replaced = 0;

    while limit == 0 || replaced < limit {
        let Some(at) = rest.windows(find.len()).position(|w| w == find) else {
            break;
        };
        let buf = out.get_or_insert_with(|| Vec::with_capacity(haystack.len()));
        buf.extend_from_slice(&rest[..at]);
        buf.extend_from_slice(replace);
        rest = &rest[at + find.len()..];
        replaced += 1;
    }

    out.map(|mut buf| {
        buf.extend_from_slice(rest);
        buf
    })
}
