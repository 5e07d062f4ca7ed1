//! Parsing of media-range header values.
//!
//! A media range is a comma-separated list of media-type entries, each
//! optionally carrying `;key=value` parameters. The quality parameter `q`
//! is extracted into [`MediaType::quality`] and removed from the
//! parameter map; it defaults to `1.0`.
//!
//! Parsing keeps the original header order. Negotiation wants client
//! preference order instead, which [`MediaRange::sort_preferred`]
//! produces with a stable descending sort.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::MediaRangeError;
use crate::media_type::MediaType;

/// An ordered sequence of [`MediaType`] parsed from one header value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaRange {
    entries: Vec<MediaType>,
}

impl MediaRange {
    /// Reorders the entries most-preferred-first.
    ///
    /// The sort is stable: entries with equal preference (see
    /// [`MediaType::cmp_preference`]) keep their header order.
    #[must_use]
    pub fn sort_preferred(mut self) -> Self {
        self.entries.sort_by(|a, b| b.cmp_preference(a));
        self
    }

    pub fn as_slice(&self) -> &[MediaType] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for MediaRange {
    type Err = MediaRangeError;

    fn from_str(header: &str) -> Result<Self, Self::Err> {
        let entries = header.split(',').map(parse_entry).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }
}

impl FromStr for MediaType {
    type Err = MediaRangeError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        parse_entry(entry)
    }
}

impl IntoIterator for MediaRange {
    type Item = MediaType;
    type IntoIter = std::vec::IntoIter<MediaType>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a MediaRange {
    type Item = &'a MediaType;
    type IntoIter = std::slice::Iter<'a, MediaType>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parses one `type/subtype;key=value;...` entry.
///
/// Whitespace is trimmed around the type and subtype tokens only;
/// parameter tokens are taken verbatim.
fn parse_entry(entry: &str) -> Result<MediaType, MediaRangeError> {
    let mut tokens = entry.split(';');
    let type_token = tokens.next().unwrap_or_default();
    let Some((main_type, subtype)) = type_token.split_once('/') else {
        return Err(MediaRangeError::missing_slash(type_token.trim()));
    };

    let mut params = BTreeMap::new();
    for token in tokens {
        let Some((key, value)) = token.split_once('=') else {
            return Err(MediaRangeError::bare_parameter(token));
        };
        params.insert(key.to_string(), value.to_string());
    }

    let q = match params.remove("q") {
        None => 1.0,
        Some(raw) => raw
            .parse::<f32>()
            .ok()
            .filter(|q| (0.0..=1.0).contains(q))
            .ok_or_else(|| MediaRangeError::invalid_quality(&raw))?,
    };

    Ok(MediaType::from_parts(main_type, subtype, params, q))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_header_order() {
        let range: MediaRange = "text/html;q=0.5, application/json, */*;q=0.1".parse().unwrap();

        assert_eq!(range.len(), 3);
        assert_eq!(range.as_slice()[0].to_string(), "text/html");
        assert_eq!(range.as_slice()[1].to_string(), "application/json");
        assert_eq!(range.as_slice()[2].to_string(), "*/*");
    }

    #[test]
    fn quality_defaults_to_one() {
        let media_type: MediaType = "application/json".parse().unwrap();

        assert_eq!(media_type.quality(), 1.0);
    }

    #[test]
    fn quality_is_extracted_from_params() {
        let media_type: MediaType = "text/html;q=0.5;level=1".parse().unwrap();

        assert_eq!(media_type.quality(), 0.5);
        assert_eq!(media_type.param("level"), Some("1"));
        assert_eq!(media_type.param("q"), None);
    }

    #[test]
    fn type_and_subtype_survive_a_round_trip() {
        for header in ["application/json", "text/*", "*/*", "application/vnd.api+json"] {
            let media_type: MediaType = header.parse().unwrap();
            assert_eq!(media_type.to_string(), header);
        }
    }

    #[test]
    fn entry_whitespace_is_trimmed() {
        let range: MediaRange = " text/html , application/json".parse().unwrap();

        assert_eq!(range.as_slice()[0].to_string(), "text/html");
        assert_eq!(range.as_slice()[1].to_string(), "application/json");
    }

    #[test]
    fn parameter_tokens_keep_their_whitespace() {
        // only type and subtype are trimmed, so `; q=0.5` carries a
        // parameter named ` q` and the quality stays at the default
        let media_type: MediaType = "text/html; q=0.5".parse().unwrap();

        assert_eq!(media_type.quality(), 1.0);
        assert_eq!(media_type.param(" q"), Some("0.5"));
    }

    #[test]
    fn missing_slash_is_an_error() {
        let result = "json".parse::<MediaType>();

        assert_eq!(result, Err(MediaRangeError::missing_slash("json")));
    }

    #[test]
    fn bare_parameter_is_an_error() {
        let result = "text/html;broken".parse::<MediaType>();

        assert_eq!(result, Err(MediaRangeError::bare_parameter("broken")));
    }

    #[test]
    fn out_of_range_quality_is_an_error() {
        assert!("text/html;q=2".parse::<MediaType>().is_err());
        assert!("text/html;q=-1".parse::<MediaType>().is_err());
        assert!("text/html;q=abc".parse::<MediaType>().is_err());
    }

    #[test]
    fn sort_preferred_orders_by_quality_and_specificity() {
        let sorted = "*/*;q=0.1, text/html;q=0.5, application/json, text/*;q=0.5"
            .parse::<MediaRange>()
            .unwrap()
            .sort_preferred();

        let rendered: Vec<String> = sorted.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["application/json", "text/html", "text/*", "*/*"]);
    }

    #[test]
    fn sort_preferred_is_stable() {
        // already in descending preference order; equally preferred
        // entries (same quality, same parameter count) keep header order
        let header = "application/json, text/html, image/png;q=0.5";
        let sorted = header.parse::<MediaRange>().unwrap().sort_preferred();

        let rendered: Vec<String> = sorted.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["application/json", "text/html", "image/png"]);
    }
}
