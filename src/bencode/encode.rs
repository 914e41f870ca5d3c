use super::value::Value;

/// Encodes a bencode value to a byte vector.
///
/// The output is canonical regardless of how the value was built or
/// decoded:
/// - Integers: `i<number>e` in minimal decimal form
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` with keys sorted by raw bytes
///
/// # Examples
///
/// ```
/// use reannounce::bencode::{decode, encode, Value};
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// // keys come out sorted even if they were read in another order
/// let value = decode(b"d1:bi2e1:ai1ee").unwrap();
/// assert_eq!(encode(&value), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf);
    buf
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Integer(i) => {
            buf.push(b'i');
            buf.extend_from_slice(i.to_string().as_bytes());
            buf.push(b'e');
        }
        Value::Bytes(b) => encode_bytes(b, buf),
        Value::List(l) => {
            buf.push(b'l');
            for item in l {
                encode_value(item, buf);
            }
            buf.push(b'e');
        }
        Value::Dict(d) => {
            let mut entries: Vec<_> = d.iter().collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

            buf.push(b'd');
            for (key, val) in entries {
                encode_bytes(key, buf);
                encode_value(val, buf);
            }
            buf.push(b'e');
        }
    }
}

fn encode_bytes(bytes: &[u8], buf: &mut Vec<u8>) {
    buf.extend_from_slice(bytes.len().to_string().as_bytes());
    buf.push(b':');
    buf.extend_from_slice(bytes);
}
