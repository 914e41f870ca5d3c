//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format of `.torrent` files and of the
//! resume/state files most BitTorrent clients keep next to them. Every
//! document this crate edits goes through [`decode`], gets mutated as a
//! [`Value`] tree, and is written back with [`encode`].
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Key order
//!
//! The decoder accepts dictionaries whose keys are not sorted (several
//! clients write such files) and remembers the order it saw. The encoder
//! always emits sorted keys, so a non-canonical file comes back canonical
//! after one pass. `decode(encode(v)) == v` holds for every decoded `v`.
//!
//! # Examples
//!
//! ```
//! use reannounce::bencode::{decode, encode, Value};
//!
//! let mut value = decode(b"d8:announce14:http://old/anne").unwrap();
//! if let Some(dict) = value.as_dict_mut() {
//!     dict.insert("comment".into(), Value::string("moved"));
//! }
//! assert_eq!(
//!     encode(&value),
//!     b"d8:announce14:http://old/ann7:comment5:movede".to_vec()
//! );
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::InvalidInteger`] - Malformed integer (e.g., leading zeros)
//! - [`BencodeError::InvalidStringLength`] - Non-numeric byte string length
//! - [`BencodeError::UnexpectedChar`] - Unexpected character in input
//! - [`BencodeError::NonStringKey`] - Dictionary key that is not a byte string
//! - [`BencodeError::DuplicateKey`] - Same key twice in one dictionary
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::BencodeError;
pub use value::{Dict, Value};

#[cfg(test)]
mod tests;
