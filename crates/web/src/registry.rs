//! The ordered, immutable collection of registered codecs.

use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, HtmlCodec, JsonCodec};

/// Registered codecs, first one is the default representation.
///
/// The registry is built once at startup and only read afterwards, so it
/// is freely shared across concurrent requests. [`append`](Self::append)
/// never mutates: it returns a new registry with one more codec while the
/// original keeps its length, default and lookup behavior. Lookup is
/// first-match in registration order; registration order *is* the
/// tie-break policy, both here and in response negotiation.
#[derive(Clone)]
pub struct CodecRegistry {
    codecs: Vec<Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// A registry with a single codec, the default representation.
    pub fn new(default: impl Codec + 'static) -> Self {
        Self { codecs: vec![Arc::new(default)] }
    }

    /// Returns a new registry with `codec` appended.
    ///
    /// The original registry is unaffected and the default stays the
    /// first-registered codec.
    #[must_use]
    pub fn append(&self, codec: impl Codec + 'static) -> Self {
        let mut codecs = self.codecs.clone();
        codecs.push(Arc::new(codec));
        Self { codecs }
    }

    /// The default codec: the first one registered.
    pub fn default_codec(&self) -> &dyn Codec {
        self.codecs[0].as_ref()
    }

    /// The default codec's content type.
    pub fn default_content_type(&self) -> &'static str {
        self.default_codec().content_type()
    }

    /// The first codec whose [`Codec::supports`] accepts the raw header.
    pub fn by_content_type(&self, content_type: &str) -> Option<&dyn Codec> {
        self.codecs.iter().find(|codec| codec.supports(content_type)).map(Arc::as_ref)
    }

    /// Whether any registered codec handles the raw header value.
    pub fn accepts_content_type(&self, content_type: &str) -> bool {
        self.by_content_type(content_type).is_some()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Iterates the codecs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Codec> {
        self.codecs.iter().map(Arc::as_ref)
    }
}

/// JSON first (the default representation) plus the HTML page rendering.
impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new(JsonCodec::new()).append(HtmlCodec::new())
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(Codec::content_type)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FormCodec;

    #[test]
    fn default_is_the_first_registered() {
        let registry = CodecRegistry::default();

        assert_eq!(registry.default_content_type(), "application/json");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_is_first_match_in_registration_order() {
        let registry = CodecRegistry::default();

        let codec = registry.by_content_type("application/json").unwrap();
        assert_eq!(codec.content_type(), "application/json");

        let codec = registry.by_content_type("text/html; charset=utf-8").unwrap();
        assert_eq!(codec.content_type(), "text/html");

        assert!(registry.by_content_type("application/xml").is_none());
        assert!(!registry.accepts_content_type("application/xml"));
    }

    #[test]
    fn append_leaves_the_original_untouched() {
        let original = CodecRegistry::default();
        let extended = original.append(FormCodec::new());

        assert_eq!(original.len(), 2);
        assert_eq!(extended.len(), 3);
        assert!(extended.accepts_content_type("application/x-www-form-urlencoded"));
        assert!(!original.accepts_content_type("application/x-www-form-urlencoded"));

        // the default is preserved on both sides
        assert_eq!(original.default_content_type(), "application/json");
        assert_eq!(extended.default_content_type(), "application/json");
    }
}
