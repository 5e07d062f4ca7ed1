//! Agreement between requested and supported media types.

use crate::media_type::MediaType;

/// Picks the media type both sides agree on, or `None`.
///
/// `requested` must already be sorted most-preferred-first (see
/// [`crate::MediaRange::sort_preferred`]); `supported` is scanned in
/// registration order. The first supported entry accepting the most
/// preferred requested entry wins, so client preference dominates and
/// registration order breaks ties between equally preferred entries.
pub fn intersect<'s>(requested: &[MediaType], supported: &'s [MediaType]) -> Option<&'s MediaType> {
    for requested_media_type in requested {
        for media_type in supported {
            if media_type.accepts(requested_media_type) {
                return Some(media_type);
            }
        }
    }
    None
}
