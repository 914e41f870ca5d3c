use super::error::BencodeError;
use super::value::Value;
use crate::constants::MAX_BENCODE_DEPTH;
use bytes::Bytes;
use indexmap::IndexMap;

/// Decodes a complete bencode document.
///
/// Dictionary keys may appear in any order; the decoded dictionary keeps
/// the order they were read in. A key repeated within one dictionary is
/// rejected with [`BencodeError::DuplicateKey`].
///
/// # Errors
///
/// Returns an error for truncated input, malformed integers or lengths,
/// non-string dictionary keys, duplicate keys, nesting deeper than
/// [`MAX_BENCODE_DEPTH`], and any bytes left over after the top-level value.
///
/// # Examples
///
/// ```
/// use reannounce::bencode::{decode, Value};
///
/// let value = decode(b"d8:announce3:urle").unwrap();
/// assert_eq!(value.get(b"announce").and_then(Value::as_str), Some("url"));
///
/// assert!(decode(b"d1:ai1e1:ai2ee").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;

    if pos != data.len() {
        return Err(BencodeError::TrailingData);
    }

    Ok(value)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    if depth > MAX_BENCODE_DEPTH {
        return Err(BencodeError::NestingTooDeep);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    match data[*pos] {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_bytes(data, pos).map(Value::Bytes),
        c => Err(BencodeError::UnexpectedChar {
            found: c as char,
            offset: *pos,
        }),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    *pos += 1;

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let raw = &data[start..*pos];
    let digits = raw.strip_prefix(b"-").unwrap_or(raw);

    if digits.is_empty() {
        return Err(BencodeError::InvalidInteger("empty".into()));
    }

    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(BencodeError::InvalidInteger(
            String::from_utf8_lossy(raw).into_owned(),
        ));
    }

    if raw.starts_with(b"-0") || (raw.starts_with(b"0") && raw.len() > 1) {
        return Err(BencodeError::InvalidInteger("leading zeros".into()));
    }

    let int_str = std::str::from_utf8(raw)
        .map_err(|_| BencodeError::InvalidInteger("invalid utf8".into()))?;

    let value: i64 = int_str
        .parse()
        .map_err(|_| BencodeError::InvalidInteger(int_str.into()))?;

    *pos += 1;
    Ok(Value::Integer(value))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Bytes, BencodeError> {
    let start = *pos;
    while *pos < data.len() && data[*pos] != b':' {
        if !data[*pos].is_ascii_digit() {
            return Err(BencodeError::InvalidStringLength);
        }
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let len: usize = std::str::from_utf8(&data[start..*pos])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(BencodeError::InvalidStringLength)?;

    *pos += 1;

    let end = pos
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or(BencodeError::UnexpectedEof)?;

    let bytes = Bytes::copy_from_slice(&data[*pos..end]);
    *pos = end;

    Ok(bytes)
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth + 1)?);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut dict = IndexMap::new();

    while *pos < data.len() && data[*pos] != b'e' {
        if !data[*pos].is_ascii_digit() {
            return Err(BencodeError::NonStringKey(*pos));
        }
        let key = decode_bytes(data, pos)?;

        if dict.contains_key(&key) {
            return Err(BencodeError::DuplicateKey(
                String::from_utf8_lossy(&key).into_owned(),
            ));
        }

        let value = decode_value(data, pos, depth + 1)?;
        dict.insert(key, value);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}
