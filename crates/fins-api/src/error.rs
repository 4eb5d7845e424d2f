//! Error types for FINS API client

use std::fmt;

/// Errors that can occur when interacting with the FINS API
#[derive(Debug)]
pub enum FinsError {
    /// HTTP request failed before a response arrived
    Http(reqwest::Error),
    /// Upstream answered with a non-success status
    Status { status: u16, url: String },
    /// Failed to parse JSON response
    Json(serde_json::Error),
}

impl FinsError {
    /// True when the upstream explicitly reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

impl fmt::Display for FinsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "FINS HTTP error: {}", e),
            Self::Status { status, url } => {
                write!(f, "FINS returned status {} for {}", status, url)
            }
            Self::Json(e) => write!(f, "FINS JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for FinsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Status { .. } => None,
            Self::Json(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for FinsError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for FinsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for FINS API operations
pub type Result<T> = std::result::Result<T, FinsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FinsError::Status {
            status: 500,
            url: "https://example.org/species/77".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "FINS returned status 500 for https://example.org/species/77"
        );
    }

    #[test]
    fn test_is_not_found() {
        let missing = FinsError::Status {
            status: 404,
            url: String::new(),
        };
        let broken = FinsError::Status {
            status: 502,
            url: String::new(),
        };
        assert!(missing.is_not_found());
        assert!(!broken.is_not_found());
    }

    #[test]
    fn test_json_error_has_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FinsError::from(parse_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(format!("{}", err).starts_with("FINS JSON parse error"));
    }
}
