//! The per-request dispatch state machine.
//!
//! One call to [`Pipeline::dispatch`] drives a request through a strictly
//! sequential set of steps, with no backtracking:
//!
//! ```text
//! detect request codec → decode body → negotiate response
//!     → invoke endpoint → encode response
//! ```
//!
//! Any step may fail with a [`Rejection`]; the pipeline then skips
//! straight to the rejection mapping and still produces a well-formed
//! response. Per dispatch: exactly one response, the endpoint invoked at
//! most once, the body decoded at most once, and after a rejection the
//! endpoint is never entered.
//!
//! Fatal failures (endpoint defects, broken codec registrations) are
//! *not* mapped; they surface as [`PipelineError`] for the surrounding
//! server to log and convert however it sees fit.

use bytes::Bytes;
use http::{Request, Response, header};
use tracing::debug;

use conneg_media::{MediaRange, MediaType, intersect};

use crate::codec::{Charset, EncodeContext};
use crate::error::{HandlerError, PipelineError, Rejection, RejectionKind};
use crate::registry::CodecRegistry;
use crate::reply::{Endpoint, Reply};
use crate::request::{RequestContext, charset_param, header_str};

/// Drives negotiated dispatch against one codec registry.
///
/// Constructed once at startup and shared across requests; a dispatch is
/// a synchronous, non-suspending call chain with no shared mutable state.
#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: CodecRegistry,
    default_charset: Charset,
}

/// Internal verdict of a failed step: recoverable or fatal.
enum Flow {
    Reject(Rejection),
    Fatal(PipelineError),
}

impl From<Rejection> for Flow {
    fn from(rejection: Rejection) -> Self {
        Self::Reject(rejection)
    }
}

impl From<PipelineError> for Flow {
    fn from(error: PipelineError) -> Self {
        Self::Fatal(error)
    }
}

impl From<http::Error> for Flow {
    fn from(error: http::Error) -> Self {
        Self::Fatal(error.into())
    }
}

impl Pipeline {
    /// A pipeline with the UTF-8 fallback charset.
    pub fn new(registry: CodecRegistry) -> Self {
        Self::with_default_charset(registry, Charset::default())
    }

    /// A pipeline with an explicit fallback charset for requests that do
    /// not declare one.
    pub fn with_default_charset(registry: CodecRegistry, default_charset: Charset) -> Self {
        Self { registry, default_charset }
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Dispatches one request through decode, negotiation, the endpoint
    /// and encode, producing exactly one response.
    ///
    /// # Errors
    ///
    /// Only fatal defects surface here; every [`Rejection`], whether
    /// raised by a pipeline step or returned by the endpoint, has already
    /// been mapped into a well-formed error response.
    pub fn dispatch<E>(
        &self,
        request: &Request<Bytes>,
        endpoint: &E,
    ) -> Result<Response<Bytes>, PipelineError>
    where
        E: Endpoint + ?Sized,
    {
        match self.run(request, endpoint) {
            Ok(response) => Ok(response),
            Err(Flow::Reject(rejection)) => self.respond_rejection(rejection),
            Err(Flow::Fatal(error)) => Err(error),
        }
    }

    fn run<E>(&self, request: &Request<Bytes>, endpoint: &E) -> Result<Response<Bytes>, Flow>
    where
        E: Endpoint + ?Sized,
    {
        let raw_content_type = header_str(request, &header::CONTENT_TYPE);

        // the context charset is best-effort; the decode step re-resolves
        // it strictly when there is a body to decode
        let charset = raw_content_type
            .and_then(charset_param)
            .and_then(Charset::from_label)
            .unwrap_or(self.default_charset);
        let body = self.decode_body(request, raw_content_type)?;
        let negotiated = self.negotiate(request)?;

        let ctx = RequestContext::new(request, negotiated, charset);
        let reply = match endpoint.call(&ctx, body) {
            Ok(reply) => reply,
            Err(HandlerError::Reject(rejection)) => return Err(Flow::Reject(rejection)),
            Err(HandlerError::Fatal(source)) => {
                return Err(Flow::Fatal(PipelineError::endpoint(source)));
            }
        };

        self.encode_reply(&ctx, reply)
    }

    fn decode_body(
        &self,
        request: &Request<Bytes>,
        raw_content_type: Option<&str>,
    ) -> Result<Option<serde_json::Value>, Flow> {
        let body = request.body();
        if body.is_empty() {
            return Ok(None);
        }

        let content_type = raw_content_type.unwrap_or_else(|| self.registry.default_content_type());
        let Some(codec) = self.registry.by_content_type(content_type) else {
            debug!(content_type, "no codec accepts the request body");
            return Err(Rejection::unsupported_media_type().into());
        };

        let charset = match raw_content_type.and_then(charset_param) {
            None => self.default_charset,
            Some(label) => Charset::from_label(label).ok_or_else(|| {
                Rejection::bad_request(format!("unsupported charset `{}`", label.trim()))
            })?,
        };

        debug!(content_type, codec = codec.content_type(), "decoding request body");
        match codec.decode(body, charset) {
            Ok(value) => Ok(Some(value)),
            Err(cause) => Err(Rejection::bad_request(cause.to_string()).into()),
        }
    }

    fn negotiate(&self, request: &Request<Bytes>) -> Result<MediaType, Flow> {
        let accept = header_str(request, &header::ACCEPT).unwrap_or("*/*");
        let requested = match accept.parse::<MediaRange>() {
            Ok(range) => range.sort_preferred(),
            Err(cause) => {
                return Err(Rejection::bad_request(format!("malformed Accept header: {cause}")).into());
            }
        };

        let supported = self.supported_media_types()?;
        match intersect(requested.as_slice(), &supported) {
            Some(agreed) => {
                debug!(content_type = %agreed, "negotiated response representation");
                Ok(agreed.clone())
            }
            None => {
                debug!(accept, "no agreeable response representation");
                Err(Rejection::not_acceptable().into())
            }
        }
    }

    /// One media type per registered codec, in registration order.
    fn supported_media_types(&self) -> Result<Vec<MediaType>, Flow> {
        self.registry
            .iter()
            .map(|codec| {
                codec.content_type().parse::<MediaType>().map_err(|cause| {
                    Flow::Fatal(PipelineError::codec_content_type(codec.content_type(), cause))
                })
            })
            .collect()
    }

    fn encode_reply(
        &self,
        ctx: &RequestContext<'_>,
        reply: Reply,
    ) -> Result<Response<Bytes>, Flow> {
        let content_type = ctx.negotiated().to_string();
        let Some(codec) = self.registry.by_content_type(&content_type) else {
            return Err(Flow::Fatal(PipelineError::missing_negotiated_codec(&content_type)));
        };

        let (status, value) = reply.into_parts();
        let body = codec.encode(&value, &EncodeContext::new(ctx.charset(), status));
        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, content_type)
            .body(body)
            .map_err(Flow::from)
    }

    /// Turns a rejection into the response its kind dictates.
    ///
    /// Redirect kinds set `Location` and skip encoding, and
    /// method-not-allowed sets `Allow`. Everything else encodes its body
    /// value with the default codec: error bodies are simple structured
    /// messages, so they always use the default representation.
    fn respond_rejection(&self, rejection: Rejection) -> Result<Response<Bytes>, PipelineError> {
        let kind = rejection.kind();
        let status = kind.status();
        debug!(kind = ?kind, status = status.as_u16(), "mapping rejection to response");

        let response = match kind {
            RejectionKind::Redirect | RejectionKind::RedirectPermanent => Response::builder()
                .status(status)
                .header(header::LOCATION, rejection.into_header_text())
                .body(Bytes::new())?,
            RejectionKind::MethodNotAllowed => Response::builder()
                .status(status)
                .header(header::ALLOW, rejection.into_header_text())
                .body(Bytes::new())?,
            _ => {
                let codec = self.registry.default_codec();
                let body =
                    codec.encode(&rejection.into_body_value(), &EncodeContext::new(self.default_charset, status));
                Response::builder()
                    .status(status)
                    .header(header::CONTENT_TYPE, codec.content_type())
                    .body(body)?
            }
        };
        Ok(response)
    }
}
