//! Representation codecs and the negotiated dispatch pipeline
//!
//! This crate turns one incoming request into exactly one outgoing
//! response, agreeing with the client on the representation along the
//! way. It builds on [`conneg_media`] for media-range parsing and
//! negotiation and adds the application-facing pieces:
//!
//! - [`Codec`]: converts between wire bytes and an in-memory value for
//!   one content type
//! - [`CodecRegistry`]: the ordered, immutable set of codecs a service
//!   supports, first one being the default representation
//! - [`Pipeline`]: per-request orchestration: detect the request codec,
//!   decode the body, negotiate the response type, invoke the endpoint,
//!   map typed failures, encode the response
//! - [`Rejection`]: the fixed taxonomy of per-request failures, each kind
//!   statically mapped to one status code and response rule
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use conneg_web::{CodecRegistry, HandlerError, Pipeline, Reply, RequestContext};
//! use http::header;
//! use serde_json::{Value, json};
//!
//! let pipeline = Pipeline::new(CodecRegistry::default());
//!
//! let request = http::Request::builder()
//!     .method(http::Method::POST)
//!     .uri("/items")
//!     .header(header::CONTENT_TYPE, "application/json")
//!     .header(header::ACCEPT, "application/json")
//!     .body(Bytes::from(r#"{"name": "widget"}"#))
//!     .unwrap();
//!
//! let endpoint = |_ctx: &RequestContext<'_>, body: Option<Value>| -> Result<Reply, HandlerError> {
//!     Ok(Reply::ok(json!({ "created": body })))
//! };
//!
//! let response = pipeline.dispatch(&request, &endpoint).unwrap();
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```
//!
//! # Concurrency
//!
//! A dispatch is a synchronous, non-suspending call chain; concurrency
//! exists only across requests. The registry is read-only once built and
//! codecs are shared, so both must be (and are) safe for concurrent
//! reads. Rejections become well-formed responses; anything else (an
//! endpoint defect, a broken codec registration) propagates as
//! [`PipelineError`] instead of masquerading as a 500.

pub mod codec;

mod error;
mod pipeline;
mod registry;
mod reply;
mod request;

pub use codec::{Charset, Codec, EncodeContext, FormCodec, HtmlCodec, JsonCodec, PrettyJsonCodec};
pub use error::{
    DecodeError, HandlerError, PipelineError, Rejection, RejectionKind, RejectionPayload,
};
pub use pipeline::Pipeline;
pub use registry::CodecRegistry;
pub use reply::{Endpoint, Reply};
pub use request::RequestContext;
