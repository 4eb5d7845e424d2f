//! Error types for the FINS catalog

use std::fmt;

#[derive(Debug)]
pub enum CatalogError {
    /// Upstream request failed or returned a non-success status
    Transport(fins_api::FinsError),
    /// Every fallback step came up empty, or the species does not exist
    NotFound(String),
    /// The query cannot be executed as given
    InvalidQuery(String),
    /// Configuration error
    Config(String),
}

impl CatalogError {
    /// Classify an upstream failure of a mandatory lookup
    pub(crate) fn from_lookup(err: fins_api::FinsError, what: impl Into<String>) -> Self {
        if err.is_not_found() {
            Self::NotFound(what.into())
        } else {
            Self::Transport(err)
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Upstream error: {}", e),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidQuery(msg) => write!(f, "Invalid query: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<fins_api::FinsError> for CatalogError {
    fn from(e: fins_api::FinsError) -> Self {
        Self::Transport(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for CatalogError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CatalogError::NotFound("no species matches \"nemo\"".to_string());
        assert_eq!(format!("{}", err), "Not found: no species matches \"nemo\"");
    }

    #[test]
    fn test_invalid_query_display() {
        let err = CatalogError::InvalidQuery("select at least one filter".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid query: select at least one filter"
        );
    }

    #[test]
    fn test_lookup_404_is_not_found() {
        let err = CatalogError::from_lookup(
            fins_api::FinsError::Status {
                status: 404,
                url: "https://example.org/species/9".to_string(),
            },
            "species 9",
        );
        assert!(matches!(err, CatalogError::NotFound(ref what) if what == "species 9"));
    }

    #[test]
    fn test_lookup_500_is_transport() {
        let err = CatalogError::from_lookup(
            fins_api::FinsError::Status {
                status: 500,
                url: "https://example.org/species/9".to_string(),
            },
            "species 9",
        );
        assert!(matches!(err, CatalogError::Transport(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_is_debug() {
        let err = CatalogError::Config("bad PORT".to_string());
        assert!(format!("{:?}", err).contains("Config"));
    }
}
