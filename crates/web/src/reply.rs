//! Endpoint trait and its return value.

use http::StatusCode;
use serde_json::Value;

use crate::error::HandlerError;
use crate::request::RequestContext;

/// What a successful endpoint returns: a status and a body value.
///
/// The body value is representation-agnostic; the pipeline encodes it
/// with whichever codec negotiation picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: StatusCode,
    value: Value,
}

impl Reply {
    /// A `200 OK` reply.
    pub fn ok(value: Value) -> Self {
        Self { status: StatusCode::OK, value }
    }

    /// A reply with an explicit status.
    pub fn with_status(status: StatusCode, value: Value) -> Self {
        Self { status, value }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn into_parts(self) -> (StatusCode, Value) {
        (self.status, self.value)
    }
}

/// A request handler driven by the dispatch pipeline.
///
/// Invoked at most once per request, after body decode and response
/// negotiation, with the decoded body value (`None` for bodyless
/// requests). Failing with a [`Rejection`](crate::Rejection) produces the
/// mapped error response; any other failure aborts the dispatch fatally.
pub trait Endpoint: Send + Sync {
    fn call(&self, ctx: &RequestContext<'_>, body: Option<Value>) -> Result<Reply, HandlerError>;
}

impl<F> Endpoint for F
where
    F: Fn(&RequestContext<'_>, Option<Value>) -> Result<Reply, HandlerError> + Send + Sync,
{
    fn call(&self, ctx: &RequestContext<'_>, body: Option<Value>) -> Result<Reply, HandlerError> {
        self(ctx, body)
    }
}
