//! JSON codecs.

use bytes::Bytes;
use serde_json::Value;

use crate::codec::{Charset, Codec, EncodeContext};
use crate::error::DecodeError;

/// Transforms between JSON text and the in-memory body value.
///
/// The request-side predicate also claims structured-syntax suffixes, so
/// `application/vnd.api+json` bodies decode here.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn supports(&self, content_type: &str) -> bool {
        content_type.contains(mime::APPLICATION_JSON.essence_str()) || content_type.contains("+json")
    }

    fn decode(&self, body: &[u8], charset: Charset) -> Result<Value, DecodeError> {
        let text = charset.decode(body)?;
        serde_json::from_str(&text).map_err(DecodeError::malformed)
    }

    fn encode(&self, value: &Value, _ctx: &EncodeContext) -> Bytes {
        Bytes::from(value.to_string())
    }
}

/// [`JsonCodec`] with indented, deterministically ordered output.
///
/// Same content type and request-side matching as the compact codec; only
/// the rendering differs. Used standalone and as the embedded renderer of
/// [`HtmlCodec`](crate::codec::HtmlCodec).
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJsonCodec;

impl PrettyJsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for PrettyJsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn supports(&self, content_type: &str) -> bool {
        JsonCodec.supports(content_type)
    }

    fn decode(&self, body: &[u8], charset: Charset) -> Result<Value, DecodeError> {
        JsonCodec.decode(body, charset)
    }

    fn encode(&self, value: &Value, _ctx: &EncodeContext) -> Bytes {
        Bytes::from(format!("{value:#}"))
    }
}
