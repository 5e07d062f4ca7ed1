//! Browser-facing HTML rendering of API responses.

use bytes::Bytes;
use serde_json::Value;

use crate::codec::{Charset, Codec, EncodeContext, PrettyJsonCodec};
use crate::error::DecodeError;

const PAGE_SHELL: (&str, &str) = (
    "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>API response</title></head>\n<body>\n<pre>",
    "</pre>\n</body>\n</html>\n",
);

/// Encode-only codec that wraps pretty-printed JSON in a fixed HTML page.
///
/// Lets a browser hitting an API endpoint read the payload. The page
/// shell is an embedded constant; wiring a template engine in is a job
/// for the surrounding application, not this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCodec {
    json: PrettyJsonCodec,
}

impl HtmlCodec {
    pub fn new() -> Self {
        Self { json: PrettyJsonCodec::new() }
    }
}

impl Codec for HtmlCodec {
    fn content_type(&self) -> &'static str {
        "text/html"
    }

    fn decode(&self, _body: &[u8], _charset: Charset) -> Result<Value, DecodeError> {
        Err(DecodeError::not_decodable(self.content_type()))
    }

    fn encode(&self, value: &Value, ctx: &EncodeContext) -> Bytes {
        let rendered = self.json.encode(value, ctx);
        let data = escape(String::from_utf8_lossy(&rendered).as_ref());

        let (head, tail) = PAGE_SHELL;
        let mut page = String::with_capacity(head.len() + data.len() + tail.len());
        page.push_str(head);
        page.push_str(&data);
        page.push_str(tail);
        Bytes::from(page)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;

    use super::*;

    fn ctx() -> EncodeContext {
        EncodeContext::new(Charset::Utf8, StatusCode::OK)
    }

    #[test]
    fn supports_html_content_types() {
        let codec = HtmlCodec::new();

        assert!(codec.supports("text/html"));
        assert!(codec.supports("text/html; charset=utf-8"));
        assert!(!codec.supports("application/json"));
    }

    #[test]
    fn encode_embeds_pretty_json_in_the_page() {
        let encoded = HtmlCodec::new().encode(&json!({"a": 1}), &ctx());
        let page = std::str::from_utf8(&encoded).unwrap();

        let expected = indoc::indoc! {r#"
            <!DOCTYPE html>
            <html>
            <head><meta charset="utf-8"><title>API response</title></head>
            <body>
            <pre>{
              "a": 1
            }</pre>
            </body>
            </html>
        "#};
        assert_eq!(page, expected);
    }

    #[test]
    fn encode_escapes_markup_in_values() {
        let encoded = HtmlCodec::new().encode(&json!({"tag": "<script>"}), &ctx());
        let page = std::str::from_utf8(&encoded).unwrap();

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn decode_is_refused() {
        let result = HtmlCodec::new().decode(b"<html></html>", Charset::Utf8);

        assert!(result.is_err());
    }
}
