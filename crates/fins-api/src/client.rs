//! FINS API HTTP client

use crate::error::{FinsError, Result};
use crate::relay::Relay;
use crate::types::*;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client for the FINS marine species API
///
/// Every request goes through the configured [`Relay`]. Non-success statuses
/// are reported as [`FinsError::Status`] so callers can decide whether a
/// failed lookup is fatal or just "no match".
#[derive(Clone)]
pub struct FinsClient {
    http: reqwest::Client,
    base_url: String,
    relay: Relay,
}

impl FinsClient {
    /// Public FINS deployment
    pub const DEFAULT_BASE_URL: &'static str =
        "https://demos.isl.ics.forth.gr/semantyfish-api/resources";

    /// Create a client for the public deployment behind the CORS relay.
    /// No request timeout is applied.
    pub fn new() -> Self {
        Self::with_endpoint(Self::DEFAULT_BASE_URL, Relay::default())
    }

    /// Create a client for a custom base URL and relay, without timeout
    pub fn with_endpoint(base_url: impl Into<String>, relay: Relay) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: trim_base(base_url.into()),
            relay,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        relay: Relay,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: trim_base(base_url.into()),
            relay,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the primary species record
    pub async fn get_species(&self, id: u64) -> Result<SpeciesPayload> {
        self.get_json(&format!("/species/{}", id)).await
    }

    /// Get genus details by genus code
    pub async fn get_genus(&self, code: u64) -> Result<GenusPayload> {
        self.get_json(&format!("/genus/{}", code)).await
    }

    /// Get family details by family code
    pub async fn get_family(&self, code: u64) -> Result<FamilyPayload> {
        self.get_json(&format!("/family/{}", code)).await
    }

    /// Get order details by order code
    pub async fn get_order(&self, code: u64) -> Result<OrderPayload> {
        self.get_json(&format!("/order/{}", code)).await
    }

    /// Get class details by class code
    pub async fn get_class(&self, code: u64) -> Result<ClassPayload> {
        self.get_json(&format!("/class/{}", code)).await
    }

    /// Get every recorded common name of a species
    ///
    /// # Arguments
    /// * `species_code` - The species code taken from the species record
    pub async fn get_common_names(&self, species_code: u64) -> Result<Vec<CommonNameEntry>> {
        let data: CommonNamesResponse = self
            .get_json(&format!(
                "/get_common_names_for?species_code={}",
                species_code
            ))
            .await?;
        Ok(data.common_names.unwrap_or_default())
    }

    /// Find species ids carrying a given common name (exact match upstream)
    pub async fn search_common_names(&self, common_name: &str) -> Result<Vec<u64>> {
        let data: IdListResponse = self
            .get_json(&format!(
                "/search_common_names?common_name={}",
                urlencoding::encode(common_name)
            ))
            .await?;
        Ok(data.ids)
    }

    /// Find species ids matching every given `(attribute, value)` filter
    ///
    /// Pairs are sent in the given order.
    pub async fn search_species(&self, filters: &[(&str, &str)]) -> Result<Vec<u64>> {
        let query = filters
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let data: SearchResponse = self
            .get_json(&format!("/search_species?{}", query))
            .await?;
        Ok(data.results)
    }

    /// Find species ids by scientific name
    pub async fn search_by_scientific_name(&self, name: &str) -> Result<Vec<u64>> {
        self.search_species(&[("scientific_name", name)]).await
    }

    /// Find species ids belonging to a genus
    pub async fn search_by_genus(&self, genus: &str) -> Result<Vec<u64>> {
        self.search_species(&[("genus", genus)]).await
    }

    /// List the allowed values of a species attribute
    pub async fn terminology_for_species(&self, attribute: &str) -> Result<Vec<String>> {
        let data: TerminologyResponse = self
            .get_json(&format!(
                "/terminology_for_species?attribute={}",
                urlencoding::encode(attribute)
            ))
            .await?;
        Ok(data.results.unwrap_or_default())
    }

    /// List the allowed values of a common-name attribute (e.g. `language`)
    pub async fn terminology_for_common_names(&self, attribute: &str) -> Result<Vec<String>> {
        let data: TerminologyResponse = self
            .get_json(&format!(
                "/terminology_for_common_names?attribute={}",
                urlencoding::encode(attribute)
            ))
            .await?;
        Ok(data.results.unwrap_or_default())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let target = format!("{}{}", self.base_url, endpoint);
        let url = self.relay.relay(&target);
        debug!(url = %url, "FINS request");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FinsError::Status {
                status: response.status().as_u16(),
                url: target,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for FinsClient {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_base(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
