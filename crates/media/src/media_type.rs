//! Media type values and their preference ordering.
//!
//! A [`MediaType`] is one entry of a media range as defined for the
//! `Accept` header in RFC 2616 section 14: a type/subtype pair (either
//! side may be the wildcard `*`), optional parameters, and a relative
//! quality factor `q` in `[0, 1]`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::MediaRangeError;

/// The wildcard token usable as type or subtype.
pub(crate) const WILDCARD: &str = "*";

/// One media type of a media range.
///
/// Values are immutable once constructed; the builder-style
/// [`with_quality`](Self::with_quality) and [`with_param`](Self::with_param)
/// consume and return the value. Equality is structural: type, subtype,
/// quality and parameters must all match.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    main_type: String,
    subtype: String,
    params: BTreeMap<String, String>,
    q: f32,
}

impl MediaType {
    /// Creates a media type with quality `1.0` and no parameters.
    ///
    /// Surrounding whitespace of both tokens is trimmed.
    pub fn new(main_type: &str, subtype: &str) -> Self {
        Self {
            main_type: main_type.trim().to_string(),
            subtype: subtype.trim().to_string(),
            params: BTreeMap::new(),
            q: 1.0,
        }
    }

    /// Returns the same media type with the given quality factor.
    ///
    /// # Errors
    ///
    /// Fails with [`MediaRangeError::InvalidQuality`] if `q` is outside
    /// `[0, 1]`.
    pub fn with_quality(mut self, q: f32) -> Result<Self, MediaRangeError> {
        if !(0.0..=1.0).contains(&q) {
            return Err(MediaRangeError::invalid_quality(q));
        }
        self.q = q;
        Ok(self)
    }

    /// Returns the same media type with one more parameter.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub(crate) fn from_parts(
        main_type: &str,
        subtype: &str,
        params: BTreeMap<String, String>,
        q: f32,
    ) -> Self {
        Self { main_type: main_type.trim().to_string(), subtype: subtype.trim().to_string(), params, q }
    }

    /// The type token, possibly `*`.
    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    /// The subtype token, possibly `*`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// The quality factor, in `[0, 1]`.
    pub fn quality(&self) -> f32 {
        self.q
    }

    /// The parameters, without `q`.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Looks up a single parameter value.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Whether this *supported* media type satisfies a *requested* one.
    ///
    /// The match is asymmetric: only the requested side's wildcards count.
    ///
    /// - a requested `*` type matches everything;
    /// - otherwise the types must be equal and the subtypes equal, unless
    ///   the requested subtype is `*`.
    ///
    /// A wildcard on the supported side is never consulted, so a supported
    /// `text/*` does **not** accept a requested `text/html`. Quality and
    /// parameters play no role in matching.
    pub fn accepts(&self, requested: &MediaType) -> bool {
        if requested.main_type == WILDCARD {
            return true;
        }
        if self.main_type == requested.main_type {
            return self.subtype == requested.subtype || requested.subtype == WILDCARD;
        }
        false
    }

    /// Compares two entries by client preference.
    ///
    /// Higher quality wins; at equal quality a concrete type beats a
    /// wildcard type, a concrete subtype beats a wildcard subtype, and
    /// between equally specific entries the one with more parameters wins.
    ///
    /// This is a strict weak order, not a total order: two distinct
    /// entries of the same quality, specificity class and parameter count
    /// compare as `Equal`, and their relative placement after a stable
    /// sort is whatever order they arrived in.
    pub fn cmp_preference(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }

        // quality factors are validated into [0, 1], never NaN
        match self.q.total_cmp(&other.q) {
            Ordering::Equal => {}
            ordering => return ordering,
        }

        match (self.main_type == WILDCARD, other.main_type == WILDCARD) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match (self.subtype == WILDCARD, other.subtype == WILDCARD) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        self.params.len().cmp(&other.params.len())
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.subtype)?;
        for (key, value) in &self.params {
            write!(f, ";{key}={value}")?;
        }
        Ok(())
    }
}
