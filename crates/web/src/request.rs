//! Request-side view handed to endpoints.

use bytes::Bytes;
use http::{HeaderMap, Method, Request, Uri, Version, header};

use conneg_media::MediaType;

use crate::codec::Charset;

/// What an endpoint sees of the request being dispatched.
///
/// Wraps the underlying [`http::Request`] and adds the two things the
/// pipeline has already worked out: the negotiated response media type
/// and the charset the body was decoded with.
#[derive(Debug)]
pub struct RequestContext<'req> {
    request: &'req Request<Bytes>,
    negotiated: MediaType,
    charset: Charset,
}

impl<'req> RequestContext<'req> {
    pub(crate) fn new(
        request: &'req Request<Bytes>,
        negotiated: MediaType,
        charset: Charset,
    ) -> Self {
        Self { request, negotiated, charset }
    }

    /// The underlying request.
    pub fn request(&self) -> &Request<Bytes> {
        self.request
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn version(&self) -> Version {
        self.request.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// A single header value, when present and valid UTF-8.
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        header_str(self.request, &name)
    }

    /// The media type negotiated for the response.
    pub fn negotiated(&self) -> &MediaType {
        &self.negotiated
    }

    /// The charset the request body was decoded with.
    pub fn charset(&self) -> Charset {
        self.charset
    }
}

pub(crate) fn header_str<'r>(
    request: &'r Request<Bytes>,
    name: &header::HeaderName,
) -> Option<&'r str> {
    request.headers().get(name).and_then(|value| value.to_str().ok())
}

/// Extracts the `charset` parameter from a raw `Content-Type` value.
pub(crate) fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|token| {
        let (key, value) = token.split_once('=')?;
        key.trim().eq_ignore_ascii_case("charset").then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_param_is_found_case_insensitively() {
        assert_eq!(charset_param("application/json; charset=utf-8"), Some("utf-8"));
        assert_eq!(charset_param("text/html;CHARSET=ISO-8859-1"), Some("ISO-8859-1"));
        assert_eq!(charset_param("application/json; version=2; charset=utf-8"), Some("utf-8"));
        assert_eq!(charset_param("application/json"), None);
        assert_eq!(charset_param("application/json; boundary=x"), None);
    }
}
