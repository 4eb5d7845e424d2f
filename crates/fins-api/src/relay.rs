//! Forwarding relay in front of the FINS API
//!
//! Browsers cannot reach the API directly because of cross-origin
//! restrictions, so requests go through a passthrough that forwards the GET
//! and returns the origin's body unchanged.

/// How a target URL is turned into the URL actually requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relay {
    /// Request the target URL as-is
    Direct,
    /// Append the URL-encoded target to a relay prefix
    Prefix(String),
}

impl Relay {
    /// Public CORS passthrough used by the web front-end
    pub const CORS_PROXY_PREFIX: &'static str = "https://corsproxy.io/?";

    pub fn cors_proxy() -> Self {
        Self::Prefix(Self::CORS_PROXY_PREFIX.to_string())
    }

    /// Parse a relay setting: `direct` (or empty) means no relay, anything
    /// else is used as a prefix.
    pub fn from_setting(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("direct") {
            Self::Direct
        } else {
            Self::Prefix(value.to_string())
        }
    }

    /// Build the URL to request for `target_url`
    pub fn relay(&self, target_url: &str) -> String {
        match self {
            Self::Direct => target_url.to_string(),
            Self::Prefix(prefix) => format!("{}{}", prefix, urlencoding::encode(target_url)),
        }
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::cors_proxy()
    }
}
