//! Species record aggregation
//!
//! A full record needs the species itself, its genus, family, order and
//! class, and its common names. Order and class codes only appear inside the
//! family payload, so the fetches run in two concurrent waves:
//!
//! 1. genus, family, common names
//! 2. order, class
//!
//! Only the species fetch is mandatory. Every other lookup degrades to a
//! defaulted sub-record when its code is missing or the request fails.

use crate::error::{CatalogError, Result};
use crate::record::{RecordParts, SpeciesRecord};
use fins_api::FinsClient;
use std::future::Future;
use tracing::{debug, warn};

/// Hydrates species ids into display-ready records
#[derive(Clone)]
pub struct Aggregator {
    api: FinsClient,
}

impl Aggregator {
    pub fn new(api: FinsClient) -> Self {
        Self { api }
    }

    /// Build the full record for one species
    ///
    /// # Arguments
    /// * `id` - Species id to fetch
    /// * `common_name_hint` - Display name used when the record has none
    pub async fn hydrate(&self, id: u64, common_name_hint: Option<&str>) -> Result<SpeciesRecord> {
        let species = self
            .api
            .get_species(id)
            .await
            .map_err(|e| CatalogError::from_lookup(e, format!("species {}", id)))?;

        let species_code = species.species_code.unwrap_or(id);

        let (genus, family, common_names) = tokio::join!(
            optional_lookup("genus", species.genus_code(), |code| self.api.get_genus(code)),
            optional_lookup("family", species.family_code(), |code| self.api.get_family(code)),
            optional_lookup("common names", Some(species_code), |code| {
                self.api.get_common_names(code)
            }),
        );

        let order_code = family.as_ref().and_then(|f| f.order_code());
        let class_code = family.as_ref().and_then(|f| f.class_code());

        let (order, class) = tokio::join!(
            optional_lookup("order", order_code, |code| self.api.get_order(code)),
            optional_lookup("class", class_code, |code| self.api.get_class(code)),
        );

        debug!(
            id,
            genus = genus.is_some(),
            family = family.is_some(),
            order = order.is_some(),
            class = class.is_some(),
            "Species record assembled"
        );

        Ok(SpeciesRecord::assemble(RecordParts {
            requested_id: id,
            common_name_hint: common_name_hint.map(str::to_string),
            species,
            genus,
            family,
            order,
            class,
            common_names: common_names.unwrap_or_default(),
        }))
    }
}

/// Run a best-effort lookup: no code means no request, a failed request is
/// logged and treated as absent.
pub(crate) async fn optional_lookup<T, F, Fut>(what: &str, code: Option<u64>, fetch: F) -> Option<T>
where
    F: FnOnce(u64) -> Fut,
    Fut: Future<Output = fins_api::Result<T>>,
{
    let code = code?;
    match fetch(code).await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(lookup = what, code, error = %e, "Optional lookup failed");
            None
        }
    }
}
