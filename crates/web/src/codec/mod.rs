//! Representation codecs.
//!
//! A [`Codec`] converts between wire bytes and the in-memory body value
//! (a [`serde_json::Value`]) for one content type. Codecs are registered
//! in a [`CodecRegistry`](crate::CodecRegistry) and looked up twice per
//! request, with two deliberately different matching strategies:
//!
//! - request side: [`Codec::supports`] is a predicate over the *raw*
//!   `Content-Type` header value, so a codec can claim structured-syntax
//!   suffixes such as `application/vnd.api+json`;
//! - response side: negotiation matches parsed
//!   [`MediaType`](conneg_media::MediaType) values against each codec's
//!   declared [`Codec::content_type`].
//!
//! Codecs are shared by every in-flight request, so implementations must
//! be stateless or internally thread-safe. Any I/O a codec performs is
//! its own synchronous, failable concern inside `decode`/`encode`.

mod form;
mod html;
mod json;

pub use form::FormCodec;
pub use html::HtmlCodec;
pub use json::{JsonCodec, PrettyJsonCodec};

use bytes::Bytes;
use http::StatusCode;
use serde_json::Value;

use crate::error::DecodeError;

/// A charset a request body may be declared in.
///
/// The corpus carries no transcoding library, so the supported set is the
/// pair every HTTP client actually sends: UTF-8 (which also covers
/// US-ASCII) and Latin-1. Anything else fails the decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Latin1,
}

impl Charset {
    /// Resolves a charset label as found in a `Content-Type` parameter.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().trim_matches('"');
        if label.eq_ignore_ascii_case("utf-8")
            || label.eq_ignore_ascii_case("utf8")
            || label.eq_ignore_ascii_case("us-ascii")
            || label.eq_ignore_ascii_case("ascii")
        {
            Some(Self::Utf8)
        } else if label.eq_ignore_ascii_case("iso-8859-1")
            || label.eq_ignore_ascii_case("latin-1")
            || label.eq_ignore_ascii_case("latin1")
        {
            Some(Self::Latin1)
        } else {
            None
        }
    }

    /// The canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "iso-8859-1",
        }
    }

    /// Decodes raw body bytes into text.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::InvalidEncoding`] when the bytes are not
    /// valid in this charset. Latin-1 decoding is total.
    pub fn decode(self, body: &[u8]) -> Result<String, DecodeError> {
        match self {
            Self::Utf8 => match std::str::from_utf8(body) {
                Ok(text) => Ok(text.to_string()),
                Err(cause) => Err(DecodeError::invalid_encoding(self.label(), cause)),
            },
            Self::Latin1 => Ok(body.iter().map(|&byte| char::from(byte)).collect()),
        }
    }
}

/// Request-scoped information handed to [`Codec::encode`].
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext {
    charset: Charset,
    status: StatusCode,
}

impl EncodeContext {
    pub fn new(charset: Charset, status: StatusCode) -> Self {
        Self { charset, status }
    }

    /// The charset the request was decoded with.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// The status the response will carry.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// One representation: a content type plus the two body conversions.
pub trait Codec: Send + Sync {
    /// The content type this codec produces, e.g. `application/json`.
    fn content_type(&self) -> &'static str;

    /// Whether this codec handles a raw `Content-Type` header value.
    ///
    /// This drives request-body type detection and is a plain substring
    /// match by default; codecs may widen it (the JSON codec also claims
    /// `+json` structured-syntax suffixes). Response-side negotiation
    /// never calls this.
    fn supports(&self, content_type: &str) -> bool {
        content_type.contains(self.content_type())
    }

    /// Decodes body bytes into a value.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError`] on malformed input; the pipeline maps
    /// any such failure to a 400 response.
    fn decode(&self, body: &[u8], charset: Charset) -> Result<Value, DecodeError>;

    /// Encodes a value into body bytes.
    ///
    /// Total over the values an endpoint is allowed to return; a value a
    /// codec cannot represent is a programming error, not a recoverable
    /// condition.
    fn encode(&self, value: &Value, ctx: &EncodeContext) -> Bytes;
}
