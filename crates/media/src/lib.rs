//! Media-range parsing and server-driven content negotiation
//!
//! In HTTP, content negotiation is the mechanism used, when several
//! representations of a resource are available for one URI, to serve the
//! best suited one to the client. This crate implements the server-driven
//! flavor: the client states its preferences through the `Accept` header
//! and the server picks one of the representations it supports.
//!
//! # Components
//!
//! - [`MediaType`]: one entry of a media range, with wildcard matching and
//!   a preference ordering over quality factor and specificity
//! - [`MediaRange`]: an ordered list of media types parsed from a header
//!   value such as `text/html, application/json;q=0.9, */*;q=0.1`
//! - [`intersect`]: picks the first supported media type acceptable to the
//!   client, or reports that no agreement exists
//!
//! # Example
//!
//! ```
//! use conneg_media::{intersect, MediaRange, MediaType};
//!
//! let requested: MediaRange = "text/html;q=0.8, application/json".parse().unwrap();
//! let supported = [MediaType::new("application", "json"), MediaType::new("text", "html")];
//!
//! let agreed = intersect(requested.sort_preferred().as_slice(), &supported);
//! assert_eq!(agreed, Some(&supported[0]));
//! ```
//!
//! # Matching caveat
//!
//! Matching is asymmetric: wildcards are only honored on the *requested*
//! side. See [`MediaType::accepts`] for the exact rules before registering
//! a wildcard as a supported type.

mod error;
mod media_type;
mod negotiate;
mod range;

pub use error::MediaRangeError;
pub use media_type::MediaType;
pub use negotiate::intersect;
pub use range::MediaRange;
