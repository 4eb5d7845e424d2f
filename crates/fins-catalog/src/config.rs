use crate::constants::DEFAULT_FEATURED;
use crate::error::{CatalogError, Result};
use crate::featured::FeaturedEntry;
use fins_api::{FinsClient, Relay};
use std::env;
use std::time::Duration;

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub relay: Relay,
    pub http_timeout: Option<Duration>,
    pub featured: Vec<FeaturedEntry>,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(3005);

        let api_base_url =
            var("FINS_API_BASE_URL").unwrap_or_else(|| FinsClient::DEFAULT_BASE_URL.to_string());

        let relay = var("FINS_RELAY")
            .map(|s| Relay::from_setting(&s))
            .unwrap_or_default();

        let http_timeout = match var("FINS_HTTP_TIMEOUT_SECS") {
            Some(s) => {
                let secs: u64 = s.trim().parse().map_err(|_| {
                    CatalogError::Config(format!("FINS_HTTP_TIMEOUT_SECS is not a number: {}", s))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let featured = match var("FINS_FEATURED_IDS") {
            Some(s) => parse_featured(&s)?,
            None => FeaturedEntry::defaults(),
        };

        Ok(Self {
            port,
            api_base_url,
            relay,
            http_timeout,
            featured,
        })
    }

    pub fn client(&self) -> Result<FinsClient> {
        match self.http_timeout {
            Some(timeout) => {
                FinsClient::with_timeout(self.api_base_url.clone(), self.relay.clone(), timeout)
                    .map_err(|e| CatalogError::Config(format!("HTTP client: {}", e)))
            }
            None => Ok(FinsClient::with_endpoint(
                self.api_base_url.clone(),
                self.relay.clone(),
            )),
        }
    }
}

/// Comma-separated species ids. Ids from the built-in showcase keep their
/// display name; others get a generic one.
fn parse_featured(list: &str) -> Result<Vec<FeaturedEntry>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let id: u64 = s
                .parse()
                .map_err(|_| CatalogError::Config(format!("invalid featured species id: {}", s)))?;
            let placeholder = DEFAULT_FEATURED
                .iter()
                .find(|(known, _)| *known == id)
                .map(|(_, name)| name.to_string())
                .unwrap_or_else(|| format!("Species {}", id));
            Ok(FeaturedEntry::new(id, placeholder))
        })
        .collect()
}
