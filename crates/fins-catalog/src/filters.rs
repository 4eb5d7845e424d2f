//! Option lists for the advanced search form

use fins_api::FinsClient;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Species attributes that can be filtered on; their values come from
/// `/terminology_for_species`.
pub const SPECIES_FILTER_ATTRIBUTES: &[&str] = &[
    "body_shape",
    "catching_method",
    "electrogenic",
    "dangerous_species_indicator",
    "used_as_bait",
    "used_for_aquaculture",
    "migration_type",
    "air_breathing_status",
    "importance",
    "vulnerability_fishing",
];

/// Boolean habitat toggles; `"true"` filters, `"false"` or empty is ignored.
pub const ENVIRONMENT_FLAGS: &[&str] = &[
    "salt_water_environment",
    "freshwater_environment",
    "brackish_water_environment",
];

/// Common-name attribute listing the available languages
pub const LANGUAGE_ATTRIBUTE: &str = "language";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeOptions {
    pub attribute: String,
    pub label: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagOption {
    pub attribute: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub attributes: Vec<AttributeOptions>,
    pub environment_flags: Vec<FlagOption>,
    pub languages: Vec<String>,
}

/// Human-readable label for a filter key
pub fn label(attribute: &str) -> String {
    let known = match attribute {
        "body_shape" => "Body Shape",
        "catching_method" => "Catching Method",
        "electrogenic" => "Electrogenic",
        "dangerous_species_indicator" => "Dangerous",
        "used_as_bait" => "Used as Bait",
        "used_for_aquaculture" => "Aquaculture",
        "migration_type" => "Migration",
        "air_breathing_status" => "Air Breathing",
        "importance" => "Importance",
        "vulnerability_fishing" => "Vulnerability",
        "salt_water_environment" => "Saltwater",
        "freshwater_environment" => "Freshwater",
        "brackish_water_environment" => "Brackish Water",
        other => return other.replace('_', " "),
    };
    known.to_string()
}

/// Fetch every option list concurrently; a failed list comes back empty
pub async fn load_filter_options(api: &FinsClient) -> FilterOptions {
    let attribute_loads = SPECIES_FILTER_ATTRIBUTES.iter().map(|attribute| async move {
        let options = match api.terminology_for_species(attribute).await {
            Ok(options) => options,
            Err(e) => {
                warn!(attribute, error = %e, "Failed to load filter options");
                Vec::new()
            }
        };
        AttributeOptions {
            attribute: attribute.to_string(),
            label: label(attribute),
            options,
        }
    });

    let (attributes, languages) = tokio::join!(
        futures::future::join_all(attribute_loads),
        api.terminology_for_common_names(LANGUAGE_ATTRIBUTE),
    );

    let languages = languages.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load common-name languages");
        Vec::new()
    });

    FilterOptions {
        attributes,
        environment_flags: ENVIRONMENT_FLAGS
            .iter()
            .map(|flag| FlagOption {
                attribute: flag.to_string(),
                label: label(flag),
            })
            .collect(),
        languages,
    }
}
