//! Client error type.

use thiserror::Error;

/// Errors that can occur when calling the order/product service.
///
/// Every failed call surfaces as one of these; the original cause is kept so
/// callers can log or display it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status of an `Api` error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the service reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 404,
            message: "no such product".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - no such product");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_status_only_for_api_errors() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ApiError::from(parse);
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("Parse error:"));
    }
}
