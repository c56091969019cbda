//! URL-safe state tokens
//!
//! Turns any JSON-serializable value into a compact token that can be placed
//! in a URL fragment or query parameter without percent-encoding, and back.
//! The value is serialized to compact JSON and compressed with `lz-str`'s
//! URI-component variant, so tokens are interchangeable with pages that use
//! `lz-string` + `JSON.stringify` directly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Characters a token can contain.
const TOKEN_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-$";

/// The value cannot be represented as JSON.
#[derive(Debug, Error)]
#[error("value cannot be serialized to JSON: {0}")]
pub struct SerializationError(#[from] serde_json::Error);

/// Why a token could not be decompressed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,
    #[error("invalid character {ch:?} at position {index}")]
    InvalidCharacter { ch: char, index: usize },
    /// The compressed stream is malformed or ends early
    #[error("token is not valid compressed data")]
    Corrupt,
    #[error("decompressed text is not valid UTF-16")]
    InvalidUtf16,
}

/// The token does not hold a value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not valid compressed data
    #[error("invalid token: {0}")]
    Token(#[from] TokenError),
    /// Decompressed fine, but the text is not JSON of the expected shape
    #[error("token does not contain valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compress text into the URI-safe alphabet.
pub fn compress(text: &str) -> String {
    lz_str::compress_to_encoded_uri_component(text)
}

/// Inverse of [`compress`].
///
/// Spaces are read as `+`, since query-string decoding turns `+` into a space.
///
/// # Example
///
/// ```
/// use emojirain::codec::{compress, decompress};
///
/// let token = compress("hello");
/// assert_eq!(token, "BYUwNmD2Q");
/// assert_eq!(decompress(&token).unwrap(), "hello");
/// ```
pub fn decompress(token: &str) -> Result<String, TokenError> {
    if token.is_empty() {
        return Err(TokenError::Empty);
    }
    let token = token.replace(' ', "+");
    let invalid = token.chars().enumerate().find(|(_, ch)| !TOKEN_ALPHABET.contains(*ch));
    if let Some((index, ch)) = invalid {
        return Err(TokenError::InvalidCharacter { ch, index });
    }

    let units =
        lz_str::decompress_from_encoded_uri_component(token.as_str()).ok_or(TokenError::Corrupt)?;
    String::from_utf16(&units).map_err(|_| TokenError::InvalidUtf16)
}

/// Encode a value into a URL-safe token.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let token = emojirain::codec::encode(&json!({"a": 1, "b": "x"})).unwrap();
/// assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-'));
/// ```
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let json = serde_json::to_string(value)?;
    log::debug!("encoding {} bytes of JSON", json.len());
    Ok(compress(&json))
}

/// Decode a token produced by [`encode`] into a value of type `T`.
///
/// # Example
///
/// ```
/// let token = emojirain::codec::encode(&vec![1, 2, 3]).unwrap();
/// let back: Vec<i32> = emojirain::codec::decode(&token).unwrap();
/// assert_eq!(back, vec![1, 2, 3]);
/// ```
pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T, DecodeError> {
    let json = decompress(token)?;
    log::debug!("decoded token of {} chars into {} bytes of JSON", token.len(), json.len());
    Ok(serde_json::from_str(&json)?)
}

/// Encode an untyped JSON value.
pub fn encode_value(value: &Value) -> Result<String, SerializationError> {
    encode(value)
}

/// Decode a token into an untyped JSON value.
pub fn decode_value(token: &str) -> Result<Value, DecodeError> {
    decode(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_object_roundtrip() {
        let value = json!({"a": 1, "b": "x"});
        let token = encode(&value).unwrap();
        assert_eq!(decode_value(&token).unwrap(), value);
    }

    #[test]
    fn test_array_roundtrip() {
        let token = encode(&[1, 2, 3]).unwrap();
        assert_eq!(token, "NoRgNATGDMC6Q");
        assert_eq!(decode::<Vec<u8>>(&token).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_matches_js_tokens() {
        // lzString.compressToEncodedURIComponent(...) in the browser
        assert_eq!(compress("hello"), "BYUwNmD2Q");
        assert_eq!(encode(&json!({"a": 1, "b": "x"})).unwrap(), "N4IghiBcCMA0ICMogB4gL5A");
        assert_eq!(encode(&json!([1, 2, 3])).unwrap(), "NoRgNATGDMC6Q");
        assert_eq!(encode(&json!({"x": 0})).unwrap(), "N4IgHiBcAMC+Q");
    }

    #[test]
    fn test_space_read_as_plus() {
        // `+` arrives as a space after query-string decoding
        assert_eq!(decode_value("N4IgHiBcAMC Q").unwrap(), json!({"x": 0}));
    }

    #[test]
    fn test_typed_roundtrip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct PageState {
            tab: String,
            zoom: f64,
            selected: Vec<u32>,
            filter: Option<String>,
        }

        let state = PageState {
            tab: "🎉 party".to_string(),
            zoom: 1.25,
            selected: vec![3, 1, 4, 1, 5],
            filter: None,
        };
        let token = encode(&state).unwrap();
        assert_eq!(decode::<PageState>(&token).unwrap(), state);
    }

    #[test]
    fn test_scalar_roundtrip() {
        for value in [json!(null), json!(true), json!(0), json!(-12.5), json!(""), json!("🌈")] {
            let token = encode_value(&value).unwrap();
            assert_eq!(decode_value(&token).unwrap(), value);
        }
    }

    #[test]
    fn test_non_string_keys_fail() {
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        assert!(encode(&map).is_err());
    }

    #[test]
    fn test_string_keys_ok() {
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), vec![json!(1), json!("two")]);
        let token = encode(&map).unwrap();
        assert_eq!(decode::<BTreeMap<String, Vec<Value>>>(&token).unwrap(), map);
    }

    #[test]
    fn test_decompress_empty() {
        assert_eq!(decompress(""), Err(TokenError::Empty));
        assert!(matches!(decode_value(""), Err(DecodeError::Token(TokenError::Empty))));
    }

    #[test]
    fn test_decompress_invalid_character() {
        assert_eq!(decompress("abc%"), Err(TokenError::InvalidCharacter { ch: '%', index: 3 }));
        assert_eq!(decompress("N4Ig=="), Err(TokenError::InvalidCharacter { ch: '=', index: 4 }));
    }

    #[test]
    fn test_decompress_unknown_phrase() {
        // Back-reference to dictionary entry 7 while only 6 exist
        assert_eq!(decompress("BYU-"), Err(TokenError::Corrupt));
        assert!(matches!(decode_value("BYU-"), Err(DecodeError::Token(TokenError::Corrupt))));
    }

    #[test]
    fn test_decompress_lone_surrogate() {
        // compressToEncodedURIComponent("\uD800")
        assert_eq!(decompress("gAbQ"), Err(TokenError::InvalidUtf16));
        assert!(matches!(decode_value("gAbQ"), Err(DecodeError::Token(TokenError::InvalidUtf16))));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_value("garbage"), Err(DecodeError::Token(_))));
        assert!(matches!(decode_value("not a token!"), Err(DecodeError::Token(_))));
    }

    #[test]
    fn test_decode_not_json() {
        let token = compress("{not json");
        assert!(matches!(decode_value(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let token = encode(&json!({"a": 1})).unwrap();
        assert!(matches!(decode::<Vec<i32>>(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_empty_stream() {
        // "Q" holds the empty string, which is not a JSON document
        assert!(decode_value("Q").is_err());
    }
}
