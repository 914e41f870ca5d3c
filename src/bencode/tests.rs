use bytes::Bytes;
use proptest::prelude::*;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(decode(b"i-0e").is_err());
    assert!(decode(b"i03e").is_err());
    assert!(decode(b"ie").is_err());
    assert!(decode(b"i-e").is_err());
    assert!(decode(b"i+5e").is_err());
    assert!(decode(b"i99999999999999999999e").is_err());
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(Bytes::from_static(b"")));
}

#[test]
fn test_decode_bytes_not_utf8() {
    let value = decode(b"2:\xff\xfe").unwrap();
    assert_eq!(value.as_bytes().map(|b| b.as_ref()), Some(&b"\xff\xfe"[..]));
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_decode_bytes_invalid_length() {
    assert_eq!(
        decode(b"+4:spam"),
        Err(BencodeError::UnexpectedChar { found: '+', offset: 0 })
    );
    assert_eq!(decode(b"4x:spam"), Err(BencodeError::InvalidStringLength));
    assert_eq!(decode(b"5:spam"), Err(BencodeError::UnexpectedEof));
    assert_eq!(
        decode(b"18446744073709551615:a"),
        Err(BencodeError::UnexpectedEof)
    );
    assert!(decode(b"99999999999999999999999:a").is_err());
}

#[test]
fn test_decode_list() {
    let result = decode(b"l4:spami42ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::Bytes(Bytes::from_static(b"spam")));
            assert_eq!(l[1], Value::Integer(42));
        }
        _ => panic!("expected list"),
    }
}

#[test]
fn test_decode_dict() {
    let result = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    match result {
        Value::Dict(d) => {
            assert_eq!(d.len(), 2);
            assert_eq!(
                d.get(b"cow".as_slice()),
                Some(&Value::Bytes(Bytes::from_static(b"moo")))
            );
        }
        _ => panic!("expected dict"),
    }
}

#[test]
fn test_decode_dict_keeps_input_order() {
    let value = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
    let keys: Vec<&[u8]> = value
        .as_dict()
        .unwrap()
        .keys()
        .map(|k| k.as_ref())
        .collect();
    assert_eq!(keys, vec![b"spam".as_slice(), b"cow".as_slice()]);
}

#[test]
fn test_decode_dict_duplicate_key() {
    assert_eq!(
        decode(b"d3:cowi1e3:cowi2ee"),
        Err(BencodeError::DuplicateKey("cow".into()))
    );
}

#[test]
fn test_decode_dict_non_string_key() {
    assert_eq!(decode(b"di1ei2ee"), Err(BencodeError::NonStringKey(1)));
}

#[test]
fn test_decode_unterminated() {
    assert_eq!(decode(b"l4:spam"), Err(BencodeError::UnexpectedEof));
    assert_eq!(decode(b"d3:cow3:moo"), Err(BencodeError::UnexpectedEof));
    assert_eq!(decode(b"i42"), Err(BencodeError::UnexpectedEof));
    assert_eq!(
        decode(b"d3:cowe"),
        Err(BencodeError::UnexpectedChar { found: 'e', offset: 6 })
    );
    assert_eq!(decode(b""), Err(BencodeError::UnexpectedEof));
}

#[test]
fn test_nesting_too_deep() {
    let mut data = vec![b'l'; 100];
    data.extend(vec![b'e'; 100]);
    assert_eq!(decode(&data), Err(BencodeError::NestingTooDeep));

    let mut data = vec![b'l'; 10];
    data.extend(vec![b'e'; 10]);
    assert!(decode(&data).is_ok());
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
    assert_eq!(encode(&Value::Integer(i64::MIN)), b"i-9223372036854775808e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode(&Value::Bytes(Bytes::from_static(b"spam"))), b"4:spam");
    assert_eq!(encode(&Value::Bytes(Bytes::from_static(b"a:b"))), b"3:a:b");
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![
        Value::Bytes(Bytes::from_static(b"spam")),
        Value::Integer(42),
    ]);
    assert_eq!(encode(&list), b"l4:spami42ee");
}

#[test]
fn test_encode_dict_sorts_keys() {
    let mut dict = Dict::new();
    dict.insert(Bytes::from_static(b"zebra"), Value::Integer(1));
    dict.insert(Bytes::from_static(b"cow"), Value::string("moo"));
    dict.insert(Bytes::from_static(b"aa"), Value::List(vec![]));
    assert_eq!(encode(&Value::Dict(dict)), b"d2:aale3:cow3:moo5:zebrai1ee");
}

#[test]
fn test_roundtrip() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded);
    assert_eq!(encoded, original);
}

#[test]
fn test_roundtrip_unsorted_input() {
    let original = b"d4:infod4:name4:teste8:announce15:http://test.come";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded);
    assert_eq!(
        encoded,
        b"d8:announce15:http://test.com4:infod4:name4:testee".to_vec()
    );
    assert_eq!(decode(&encoded).unwrap(), decoded);
}

#[test]
fn test_trailing_data_error() {
    assert_eq!(decode(b"i42eextra"), Err(BencodeError::TrailingData));
    assert_eq!(decode(b"dei1e"), Err(BencodeError::TrailingData));
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());

    let mut value = Value::dict();
    assert!(value.as_dict_mut().is_some());
    assert_eq!(value.get(b"missing"), None);
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(|b| Value::Bytes(Bytes::from(b))),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec((prop::collection::vec(any::<u8>(), 0..8), inner), 0..6)
                .prop_map(|entries| {
                    Value::Dict(
                        entries
                            .into_iter()
                            .map(|(k, v)| (Bytes::from(k), v))
                            .collect(),
                    )
                }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(value in arb_value()) {
        let encoded = encode(&value);
        let decoded = decode(&encoded).unwrap();
        prop_assert_eq!(&decoded, &value);
        prop_assert_eq!(encode(&decoded), encoded);
    }

    #[test]
    fn prop_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = decode(&data);
    }
}
