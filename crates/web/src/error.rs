//! Error types of the dispatch layer.
//!
//! Three families with very different fates:
//!
//! - [`Rejection`]: the fixed taxonomy of per-request failures. Each kind
//!   maps to exactly one status code and response rule; the pipeline
//!   recovers every rejection into a well-formed response.
//! - [`DecodeError`]: what a codec reports for a malformed request body;
//!   the pipeline folds it into a `BadRequest` rejection.
//! - [`PipelineError`]: fatal defects (endpoint bugs, broken codec
//!   registrations, response construction failures). These propagate to
//!   the caller unmodified; masking them as 500 responses would hide
//!   defects from the surrounding operational tooling.

use std::fmt;

use http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use conneg_media::MediaRangeError;

/// The fixed set of per-request failure kinds.
///
/// Every kind maps to exactly one status code; the response body/header
/// rules live in the pipeline's rejection mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    BadRequest,
    WrongArguments,
    ValidationError,
    Unauthorized,
    PermissionDenied,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    UnsupportedMediaType,
    Conflict,
    InternalError,
    Redirect,
    RedirectPermanent,
}

impl RejectionKind {
    /// The status code this kind always maps to.
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest | Self::WrongArguments | Self::ValidationError => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Redirect => StatusCode::FOUND,
            Self::RedirectPermanent => StatusCode::MOVED_PERMANENTLY,
        }
    }

    fn default_detail(self) -> &'static str {
        match self {
            Self::BadRequest => "Unexpected error",
            Self::WrongArguments => "Wrong arguments.",
            Self::ValidationError => "Data validation error",
            Self::Unauthorized => "Unauthorized",
            Self::PermissionDenied => "Permission denied",
            Self::NotFound => "Not found.",
            Self::MethodNotAllowed => "Method not allowed",
            Self::NotAcceptable => "Not acceptable",
            Self::UnsupportedMediaType => "Unsupported Media Type",
            Self::Conflict => "Integrity Error for wrong or invalid arguments",
            Self::InternalError => "Internal server error",
            Self::Redirect | Self::RedirectPermanent => "Redirect required",
        }
    }
}

/// What a rejection carries: a detail message or an opaque body value.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionPayload {
    Detail(String),
    Value(Value),
}

impl fmt::Display for RejectionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detail(detail) => f.write_str(detail),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

/// A typed per-request failure, consumed exactly once to build a response.
///
/// Raised either by the pipeline itself (unsupported request type, decode
/// failure, failed negotiation) or by an endpoint; it travels up one
/// level and the pipeline turns it into the response its kind dictates.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind:?}: {payload}")]
pub struct Rejection {
    kind: RejectionKind,
    payload: RejectionPayload,
}

impl Rejection {
    /// A rejection of the given kind with its default detail message.
    pub fn new(kind: RejectionKind) -> Self {
        Self { kind, payload: RejectionPayload::Detail(kind.default_detail().to_string()) }
    }

    /// A rejection with an explicit detail message.
    pub fn with_detail(kind: RejectionKind, detail: impl Into<String>) -> Self {
        Self { kind, payload: RejectionPayload::Detail(detail.into()) }
    }

    /// A rejection carrying an opaque body value.
    pub fn with_value(kind: RejectionKind, value: Value) -> Self {
        Self { kind, payload: RejectionPayload::Value(value) }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::with_detail(RejectionKind::BadRequest, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::with_detail(RejectionKind::NotFound, detail)
    }

    pub fn unsupported_media_type() -> Self {
        Self::new(RejectionKind::UnsupportedMediaType)
    }

    pub fn not_acceptable() -> Self {
        Self::new(RejectionKind::NotAcceptable)
    }

    /// A 405 carrying the allowed methods, e.g. `"GET, POST"`.
    pub fn method_not_allowed(allow: impl Into<String>) -> Self {
        Self::with_detail(RejectionKind::MethodNotAllowed, allow)
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self::with_detail(RejectionKind::Redirect, location)
    }

    pub fn redirect_permanent(location: impl Into<String>) -> Self {
        Self::with_detail(RejectionKind::RedirectPermanent, location)
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::with_detail(RejectionKind::InternalError, detail)
    }

    pub fn kind(&self) -> RejectionKind {
        self.kind
    }

    pub fn payload(&self) -> &RejectionPayload {
        &self.payload
    }

    /// The response body value for message-bearing kinds.
    ///
    /// A detail message is wrapped as `{"_message": ...}`; an opaque value
    /// passes through unchanged, and so does a `Conflict` detail (its
    /// payload is the body as-is).
    pub(crate) fn into_body_value(self) -> Value {
        match (self.kind, self.payload) {
            (_, RejectionPayload::Value(value)) => value,
            (RejectionKind::Conflict, RejectionPayload::Detail(detail)) => Value::String(detail),
            (_, RejectionPayload::Detail(detail)) => json!({ "_message": detail }),
        }
    }

    /// The payload rendered as header text, for `Location`/`Allow` kinds.
    pub(crate) fn into_header_text(self) -> String {
        match self.payload {
            RejectionPayload::Detail(detail) => detail,
            RejectionPayload::Value(Value::String(text)) => text,
            RejectionPayload::Value(value) => value.to_string(),
        }
    }
}

/// Failure of a codec to decode a request body.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("body is not valid {charset}: {reason}")]
    InvalidEncoding { charset: &'static str, reason: String },

    #[error("malformed body: {reason}")]
    Malformed { reason: String },

    #[error("`{content_type}` request bodies are not decodable")]
    NotDecodable { content_type: &'static str },
}

impl DecodeError {
    pub fn invalid_encoding<S: ToString>(charset: &'static str, reason: S) -> Self {
        Self::InvalidEncoding { charset, reason: reason.to_string() }
    }

    pub fn malformed<S: ToString>(reason: S) -> Self {
        Self::Malformed { reason: reason.to_string() }
    }

    pub fn not_decodable(content_type: &'static str) -> Self {
        Self::NotDecodable { content_type }
    }
}

/// What an endpoint may fail with.
///
/// A [`Rejection`] is negotiable: the pipeline recovers it into a
/// response. Anything else signals a defect outside the dispatch contract
/// and is passed through fatally.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Reject(#[from] Rejection),

    #[error(transparent)]
    Fatal(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    pub fn fatal<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Fatal(error.into())
    }
}

/// Fatal dispatch failures, propagated to the caller unmodified.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("endpoint failed: {source}")]
    Endpoint { source: Box<dyn std::error::Error + Send + Sync> },

    #[error("could not build response: {source}")]
    Response {
        #[from]
        source: http::Error,
    },

    #[error("codec content type `{content_type}` is not a valid media type: {source}")]
    CodecContentType { content_type: String, source: MediaRangeError },

    #[error("no codec registered for negotiated content type `{content_type}`")]
    MissingNegotiatedCodec { content_type: String },
}

impl PipelineError {
    pub fn endpoint<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Endpoint { source: source.into() }
    }

    pub fn codec_content_type<S: ToString>(content_type: S, source: MediaRangeError) -> Self {
        Self::CodecContentType { content_type: content_type.to_string(), source }
    }

    pub fn missing_negotiated_codec<S: ToString>(content_type: S) -> Self {
        Self::MissingNegotiatedCodec { content_type: content_type.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_exactly_one_status() {
        let kinds = [
            (RejectionKind::BadRequest, 400),
            (RejectionKind::WrongArguments, 400),
            (RejectionKind::ValidationError, 400),
            (RejectionKind::Unauthorized, 401),
            (RejectionKind::PermissionDenied, 403),
            (RejectionKind::NotFound, 404),
            (RejectionKind::MethodNotAllowed, 405),
            (RejectionKind::NotAcceptable, 406),
            (RejectionKind::Conflict, 409),
            (RejectionKind::UnsupportedMediaType, 415),
            (RejectionKind::InternalError, 500),
            (RejectionKind::Redirect, 302),
            (RejectionKind::RedirectPermanent, 301),
        ];

        for (kind, status) in kinds {
            assert_eq!(kind.status().as_u16(), status);
        }
    }

    #[test]
    fn default_details_are_attached() {
        let rejection = Rejection::new(RejectionKind::NotFound);

        assert_eq!(rejection.payload(), &RejectionPayload::Detail("Not found.".to_string()));
    }

    #[test]
    fn detail_messages_are_wrapped_for_the_body() {
        let body = Rejection::not_found("page not found").into_body_value();

        assert_eq!(body, json!({"_message": "page not found"}));
    }

    #[test]
    fn opaque_values_pass_through_unwrapped() {
        let payload = json!({"field": ["required"]});
        let body =
            Rejection::with_value(RejectionKind::ValidationError, payload.clone()).into_body_value();

        assert_eq!(body, payload);
    }

    #[test]
    fn conflict_detail_is_the_body_as_is() {
        let body = Rejection::with_detail(RejectionKind::Conflict, "duplicate key").into_body_value();

        assert_eq!(body, Value::String("duplicate key".to_string()));
    }
}
