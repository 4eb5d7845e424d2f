//! Landing-page showcase of featured species

use crate::aggregator::optional_lookup;
use crate::constants::{photo_url, DEFAULT_FEATURED};
use crate::record::{dimension, dimension_value, first_text, text_or_na};
use fins_api::{ClassPayload, FamilyPayload, FinsClient, OrderPayload, SpeciesPayload};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A species to showcase, with the name to show if the record has none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedEntry {
    pub id: u64,
    pub placeholder: String,
}

impl FeaturedEntry {
    pub fn new(id: u64, placeholder: impl Into<String>) -> Self {
        Self {
            id,
            placeholder: placeholder.into(),
        }
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_FEATURED
            .iter()
            .map(|(id, name)| Self::new(*id, *name))
            .collect()
    }
}

/// Card-sized summary of one species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesSummary {
    pub id: u64,
    pub scientific_name: String,
    pub common_name: String,
    pub photo_url: String,
    pub class: String,
    pub order: String,
    pub family: String,
    pub max_depth: String,
    pub environment: String,
    pub description: String,
}

impl SpeciesSummary {
    fn assemble(
        entry: &FeaturedEntry,
        data: &SpeciesPayload,
        order: Option<&OrderPayload>,
        class: Option<&ClassPayload>,
    ) -> Self {
        let common_name = first_text(&[data.common_name.as_deref(), data.vernacular_name.as_deref()])
            .unwrap_or(entry.placeholder.as_str())
            .to_string();
        let description = first_text(&[data.comments.as_deref(), data.description.as_deref()])
            .map(str::to_string)
            .unwrap_or_else(|| format!("No detailed description available for {}.", common_name));
        let dims = data.dimensions.as_deref().unwrap_or(&[]);

        Self {
            id: entry.id,
            scientific_name: text_or_na(&[data.scientific_name.as_deref()]),
            photo_url: photo_url(data.species_code.unwrap_or(entry.id)),
            class: text_or_na(&[class.and_then(|c| c.name.as_deref())]),
            order: text_or_na(&[order.and_then(|o| o.name.as_deref())]),
            family: text_or_na(&[data.family.as_ref().and_then(|f| f.family_name.as_deref())]),
            max_depth: dimension_value(dims, dimension::MOST_DEEP),
            environment: text_or_na(&[data.preferred_environment.as_deref()]),
            description,
            common_name,
        }
    }
}

/// Load summaries for every entry concurrently. Entries whose species record
/// cannot be fetched are left out; order and class are best-effort.
pub async fn load_featured(api: &FinsClient, entries: &[FeaturedEntry]) -> Vec<SpeciesSummary> {
    let loads = entries.iter().map(|entry| load_one(api, entry));
    futures::future::join_all(loads)
        .await
        .into_iter()
        .flatten()
        .collect()
}

async fn load_one(api: &FinsClient, entry: &FeaturedEntry) -> Option<SpeciesSummary> {
    let data = match api.get_species(entry.id).await {
        Ok(d) => d,
        Err(e) => {
            warn!(id = entry.id, error = %e, "Failed to fetch featured species");
            return None;
        }
    };

    let family: Option<FamilyPayload> =
        optional_lookup("family", data.family_code(), |code| api.get_family(code)).await;
    let order_code = family.as_ref().and_then(|f| f.order_code());
    let class_code = family.as_ref().and_then(|f| f.class_code());

    let (order, class) = tokio::join!(
        optional_lookup("order", order_code, |code| api.get_order(code)),
        optional_lookup("class", class_code, |code| api.get_class(code)),
    );

    Some(SpeciesSummary::assemble(
        entry,
        &data,
        order.as_ref(),
        class.as_ref(),
    ))
}
