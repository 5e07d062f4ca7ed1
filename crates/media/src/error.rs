use thiserror::Error;

/// Errors raised while parsing a media-range header value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaRangeError {
    #[error("media type `{entry}` has no `/` separator")]
    MissingSlash { entry: String },

    #[error("parameter `{token}` is not a key=value pair")]
    BareParameter { token: String },

    #[error("quality factor `{value}` is not a float in [0, 1]")]
    InvalidQuality { value: String },
}

impl MediaRangeError {
    pub fn missing_slash<S: ToString>(entry: S) -> Self {
        Self::MissingSlash { entry: entry.to_string() }
    }

    pub fn bare_parameter<S: ToString>(token: S) -> Self {
        Self::BareParameter { token: token.to_string() }
    }

    pub fn invalid_quality<S: ToString>(value: S) -> Self {
        Self::InvalidQuality { value: value.to_string() }
    }
}
