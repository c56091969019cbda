//! Integration tests for URL-safe state tokens
//!
//! Round-trip and alphabet properties run under proptest over arbitrary JSON
//! documents; the fixed cases pin tokens to what the JS `lz-string` package
//! produces for the same JSON text.

use emojirain::codec::{compress, decode, decode_value, encode, encode_value, DecodeError, TokenError};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn is_uri_safe(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '$')
}

/// Arbitrary JSON documents. Floats are quarter steps so the decimal text
/// parses back to the identical f64.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1_000_000i32..1_000_000).prop_map(|n| json!(f64::from(n) / 4.0)),
        ".{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map(".{0,12}", inner, 0..8)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_roundtrip(value in json_value()) {
        let token = encode_value(&value).unwrap();
        prop_assert_eq!(decode_value(&token).unwrap(), value);
    }

    #[test]
    fn prop_token_is_uri_safe(value in json_value()) {
        let token = encode_value(&value).unwrap();
        prop_assert!(is_uri_safe(&token), "unsafe token: {}", token);
    }

    #[test]
    fn prop_garbage_never_panics(token in "[A-Za-z0-9+$ -]{0,64}") {
        // Either an error or some value; never a panic
        let _ = decode_value(&token);
    }
}

// ============================================================================
// Fixed examples
// ============================================================================

#[test]
fn test_object_example() {
    let token = encode(&json!({"a": 1, "b": "x"})).unwrap();
    assert_eq!(token, "N4IghiBcCMA0ICMogB4gL5A");
    assert_eq!(decode_value(&token).unwrap(), json!({"a": 1, "b": "x"}));
}

#[test]
fn test_plus_survives_query_string_decoding() {
    let token = encode(&json!({"x": 0})).unwrap();
    assert_eq!(token, "N4IgHiBcAMC+Q");
    assert_eq!(decode_value(&token.replace('+', " ")).unwrap(), json!({"x": 0}));
}

#[test]
fn test_array_example() {
    let token = encode(&json!([1, 2, 3])).unwrap();
    assert_eq!(token, "NoRgNATGDMC6Q");
    assert_eq!(decode::<Vec<i64>>(&token).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_token_usable_in_url_fragment() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Share {
        title: String,
        emoji: Vec<String>,
        confetti: bool,
    }

    let share = Share {
        title: "Party time! 50% off & free ❤️‍🔥".to_string(),
        emoji: vec!["🎉".to_string(), "🥳".to_string()],
        confetti: true,
    };
    let token = encode(&share).unwrap();
    assert!(is_uri_safe(&token));

    let url = format!("https://example.com/#{}", token);
    let fragment = url.split_once('#').map(|(_, f)| f).unwrap();
    assert_eq!(decode::<Share>(fragment).unwrap(), share);
}

#[test]
fn test_large_repetitive_state_compresses() {
    let rows: Vec<Value> = (0..200).map(|i| json!({"id": i, "done": false, "tag": "todo"})).collect();
    let value = Value::Array(rows);
    let json_len = serde_json::to_string(&value).unwrap().len();
    let token = encode_value(&value).unwrap();
    assert!(token.len() < json_len / 2, "token {} vs json {}", token.len(), json_len);
    assert_eq!(decode_value(&token).unwrap(), value);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_decode_empty_fails() {
    assert!(matches!(decode_value(""), Err(DecodeError::Token(TokenError::Empty))));
}

#[test]
fn test_decode_garbage_fails() {
    for garbage in ["garbage", "not-a-token", "zzzz", "AAAA", "%7B%7D", "{}"] {
        assert!(decode_value(garbage).is_err(), "{:?} should not decode", garbage);
    }
}

#[test]
fn test_decode_corrupt_stream_fails() {
    assert!(matches!(decode_value("BYU-"), Err(DecodeError::Token(TokenError::Corrupt))));
    assert!(matches!(decode_value("gAbQ"), Err(DecodeError::Token(TokenError::InvalidUtf16))));
}

#[test]
fn test_decode_truncated_token_fails() {
    let token = encode(&json!({"name": "emoji rain", "count": 112})).unwrap();
    assert!(decode_value(&token[..token.len() / 2]).is_err());
}

#[test]
fn test_decode_non_json_payload_fails() {
    let token = compress("undefined");
    assert!(matches!(decode_value(&token), Err(DecodeError::Json(_))));
}

#[test]
fn test_encode_non_string_keys_fails() {
    let mut map = std::collections::BTreeMap::new();
    map.insert(vec![1u8], "bytes as key");
    let err = encode(&map).unwrap_err();
    assert!(err.to_string().contains("cannot be serialized"));
}

#[test]
fn test_error_messages() {
    let err = decode_value("").unwrap_err();
    assert_eq!(err.to_string(), "invalid token: token is empty");
}
