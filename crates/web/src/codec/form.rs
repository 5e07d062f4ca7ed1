//! URL-encoded form bodies.

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::codec::{Charset, Codec, EncodeContext};
use crate::error::DecodeError;

/// Codec for `application/x-www-form-urlencoded` bodies.
///
/// Primarily serves the request-decode side, turning a form submission
/// into a flat JSON object of string fields (a repeated key keeps its
/// last value). Not part of the default registry; append it when an
/// endpoint takes form posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormCodec;

impl FormCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for FormCodec {
    fn content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn decode(&self, body: &[u8], charset: Charset) -> Result<Value, DecodeError> {
        let text = charset.decode(body)?;
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(&text).map_err(DecodeError::malformed)?;

        let mut fields = Map::new();
        for (key, value) in pairs {
            fields.insert(key, Value::String(value));
        }
        Ok(Value::Object(fields))
    }

    fn encode(&self, value: &Value, _ctx: &EncodeContext) -> Bytes {
        let Some(fields) = value.as_object() else {
            // not expressible as a form; fall back to the JSON text
            return Bytes::from(value.to_string());
        };

        let pairs: Vec<(&str, String)> =
            fields.iter().map(|(key, field)| (key.as_str(), field_text(field))).collect();
        match serde_urlencoded::to_string(&pairs) {
            Ok(encoded) => Bytes::from(encoded),
            Err(_) => Bytes::from(value.to_string()),
        }
    }
}

fn field_text(field: &Value) -> String {
    match field {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_builds_a_flat_object() {
        let value = FormCodec::new().decode(b"a=1&b=two", Charset::Utf8).unwrap();

        assert_eq!(value, json!({"a": "1", "b": "two"}));
    }

    #[test]
    fn decode_unescapes_percent_encoding() {
        let value = FormCodec::new().decode(b"name=caf%C3%A9&x=a+b", Charset::Utf8).unwrap();

        assert_eq!(value, json!({"name": "café", "x": "a b"}));
    }

    #[test]
    fn encode_round_trips_flat_objects() {
        let codec = FormCodec::new();
        let value = json!({"a": "1", "b": "two words"});

        let encoded = codec.encode(&value, &EncodeContext::new(Charset::Utf8, StatusCode::OK));
        let decoded = codec.decode(&encoded, Charset::Utf8).unwrap();

        assert_eq!(decoded, value);
    }

    #[test]
    fn supports_matches_the_form_content_type() {
        let codec = FormCodec::new();

        assert!(codec.supports("application/x-www-form-urlencoded"));
        assert!(codec.supports("application/x-www-form-urlencoded; charset=utf-8"));
        assert!(!codec.supports("multipart/form-data"));
    }
}
