//! Query resolution: turn free text or attribute filters into species ids

use crate::constants::MAX_FILTER_RESULTS;
use crate::error::{CatalogError, Result};
use crate::query::{parse_species_id, title_case, FilterSet, Query};
use crate::record::Candidate;
use fins_api::FinsClient;
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, info, warn};

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one species matched
    Single {
        id: u64,
        /// The user's text when it matched as a common name; used as the
        /// display name if the species record carries none
        common_name_hint: Option<String>,
    },
    /// Several species matched; the user has to pick one
    Candidates(Vec<Candidate>),
}

/// Resolves user queries against the FINS search endpoints
#[derive(Clone)]
pub struct Resolver {
    api: FinsClient,
}

impl Resolver {
    pub fn new(api: FinsClient) -> Self {
        Self { api }
    }

    pub async fn resolve(&self, query: &Query) -> Result<Resolution> {
        match query {
            Query::Text(text) => self.resolve_text(text).await,
            Query::Filters(filters) => self.resolve_filters(filters).await,
        }
    }

    /// Resolve free text, trying in order: common name as typed, common name
    /// title-cased, numeric species id, scientific name, genus.
    pub async fn resolve_text(&self, text: &str) -> Result<Resolution> {
        let query = text.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidQuery(
                "enter a species id or name".to_string(),
            ));
        }
        let titled = title_case(query);
        // A number typed by the user is not a display name
        let hint = parse_species_id(query).is_none().then_some(query);

        let ids = self
            .try_step("common name", query, self.api.search_common_names(query))
            .await;
        if !ids.is_empty() {
            return self.settle_ids(ids, hint).await;
        }

        if titled != query {
            let ids = self
                .try_step("common name", &titled, self.api.search_common_names(&titled))
                .await;
            if !ids.is_empty() {
                return self.settle_ids(ids, hint).await;
            }
        }

        // Numbers are only ids once no common name claimed them
        if let Some(id) = parse_species_id(query) {
            debug!(id, "Query resolved as species id");
            return Ok(Resolution::Single {
                id,
                common_name_hint: None,
            });
        }

        let ids = self
            .try_step(
                "scientific name",
                &titled,
                self.api.search_by_scientific_name(&titled),
            )
            .await;
        if !ids.is_empty() {
            return self.settle_ids(ids, None).await;
        }

        // Last step: a failure here is the caller's error
        let ids = self.api.search_by_genus(&titled).await?;
        if ids.is_empty() {
            return Err(CatalogError::NotFound(format!(
                "no species with id, name or genus \"{}\"",
                query
            )));
        }
        self.settle_ids(ids, None).await
    }

    /// Resolve an advanced-search filter set with a single search call
    pub async fn resolve_filters(&self, filters: &FilterSet) -> Result<Resolution> {
        let active = filters.active();
        if active.is_empty() {
            return Err(CatalogError::InvalidQuery(
                "select at least one filter criterion".to_string(),
            ));
        }

        let mut ids = unique_ids(self.api.search_species(&active).await?);
        if ids.len() > MAX_FILTER_RESULTS {
            info!(
                total = ids.len(),
                kept = MAX_FILTER_RESULTS,
                "Truncating filter search results"
            );
            ids.truncate(MAX_FILTER_RESULTS);
        }

        if ids.is_empty() {
            return Err(CatalogError::NotFound(
                "no species match the selected criteria".to_string(),
            ));
        }
        self.settle_ids(ids, None).await
    }

    /// Fetch display names for several ids in parallel. Ids whose record
    /// cannot be loaded are left out.
    pub async fn hydrate_candidates(&self, ids: &[u64]) -> Vec<Candidate> {
        let lookups = ids.iter().map(|&id| async move {
            match self.api.get_species(id).await {
                Ok(data) => Some(Candidate::from_payload(id, &data)),
                Err(e) => {
                    warn!(id, error = %e, "Dropping candidate whose record failed to load");
                    None
                }
            }
        });

        futures::future::join_all(lookups)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn settle_ids(&self, ids: Vec<u64>, hint: Option<&str>) -> Result<Resolution> {
        let ids = unique_ids(ids);
        match ids.as_slice() {
            [] => Err(CatalogError::NotFound("no matching species".to_string())),
            [id] => Ok(Resolution::Single {
                id: *id,
                common_name_hint: hint.map(str::to_string),
            }),
            _ => {
                let candidates = self.hydrate_candidates(&ids).await;
                if candidates.is_empty() {
                    return Err(CatalogError::NotFound(
                        "matching species could not be loaded, try a more specific search"
                            .to_string(),
                    ));
                }
                Ok(Resolution::Candidates(candidates))
            }
        }
    }

    /// Run one intermediate fallback step; any failure counts as "no match"
    async fn try_step<F>(&self, step: &str, term: &str, search: F) -> Vec<u64>
    where
        F: Future<Output = fins_api::Result<Vec<u64>>>,
    {
        match search.await {
            Ok(ids) => {
                debug!(step, term, matches = ids.len(), "Search step finished");
                ids
            }
            Err(e) => {
                warn!(step, term, error = %e, "Search step failed, trying next");
                Vec::new()
            }
        }
    }
}

/// Drop repeated ids, keeping the first occurrence
fn unique_ids(ids: Vec<u64>) -> Vec<u64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeFins;
    use serde_json::json;

    #[tokio::test]
    async fn test_common_name_wins_over_numeric_id() {
        let fake = FakeFins::start().await;
        fake.respond("/search_common_names?common_name=1051", json!({ "ids": [143] }));
        let resolver = Resolver::new(fake.client());

        let resolution = resolver.resolve(&Query::text("1051")).await.unwrap();

        assert_eq!(
            resolution,
            Resolution::Single {
                id: 143,
                common_name_hint: None,
            }
        );
        assert_eq!(fake.hits_with_prefix("/search_species"), 0);
    }

    #[tokio::test]
    async fn test_numeric_query_falls_back_to_id() {
        let fake = FakeFins::start().await;
        let resolver = Resolver::new(fake.client());

        let resolution = resolver.resolve(&Query::text(" 4082 ")).await.unwrap();

        assert_eq!(
            resolution,
            Resolution::Single {
                id: 4082,
                common_name_hint: None,
            }
        );
        // Title-casing a number changes nothing, so only one lookup happens
        assert_eq!(fake.hits(), vec!["/search_common_names?common_name=4082"]);
    }

    #[tokio::test]
    async fn test_title_cased_common_name_retry() {
        let fake = FakeFins::start().await;
        fake.respond(
            "/search_common_names?common_name=Yellowfin tuna",
            json!({ "ids": [143] }),
        );
        let resolver = Resolver::new(fake.client());

        let resolution = resolver
            .resolve(&Query::text("YELLOWFIN TUNA"))
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Single {
                id: 143,
                common_name_hint: Some("YELLOWFIN TUNA".to_string()),
            }
        );
        assert_eq!(fake.hit_count(), 2);
    }

    #[tokio::test]
    async fn test_scientific_name_after_failed_common_name_steps() {
        let fake = FakeFins::start().await;
        fake.fail("/search_common_names?common_name=thunnus albacares", 500);
        fake.respond(
            "/search_species?scientific_name=Thunnus albacares",
            json!({ "results": [143] }),
        );
        let resolver = Resolver::new(fake.client());

        let resolution = resolver
            .resolve(&Query::text("thunnus albacares"))
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Single {
                id: 143,
                common_name_hint: None,
            }
        );
        assert_eq!(fake.hits_with_prefix("/search_species?genus"), 0);
    }

    #[tokio::test]
    async fn test_genus_matches_become_candidates_without_failed_ids() {
        let fake = FakeFins::start().await;
        fake.respond("/search_species?genus=Thunnus", json!({ "results": [77, 78] }));
        fake.fail("/species/77", 500);
        fake.species(78, "Thunnus obesus", "Bigeye tuna");
        let resolver = Resolver::new(fake.client());

        let resolution = resolver.resolve(&Query::text("thunnus")).await.unwrap();

        assert_eq!(
            resolution,
            Resolution::Candidates(vec![Candidate {
                id: 78,
                scientific_name: "Thunnus obesus".to_string(),
                common_name: "Bigeye tuna".to_string(),
            }])
        );
    }

    #[tokio::test]
    async fn test_nothing_found() {
        let fake = FakeFins::start().await;
        fake.respond("/search_species?genus=Nemo", json!({ "results": [] }));
        let resolver = Resolver::new(fake.client());

        let err = resolver.resolve(&Query::text("nemo")).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(ref msg) if msg.contains("nemo")));
        assert_eq!(fake.hit_count(), 4);
    }

    #[tokio::test]
    async fn test_final_step_failure_is_transport_error() {
        let fake = FakeFins::start().await;
        fake.fail("/search_species?genus=Nemo", 503);
        let resolver = Resolver::new(fake.client());

        let err = resolver.resolve(&Query::text("Nemo")).await.unwrap_err();

        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    async fn test_blank_text_is_invalid() {
        let fake = FakeFins::start().await;
        let resolver = Resolver::new(fake.client());

        let err = resolver.resolve(&Query::text("   ")).await.unwrap_err();

        assert!(matches!(err, CatalogError::InvalidQuery(_)));
        assert_eq!(fake.hit_count(), 0);
    }

    #[tokio::test]
    async fn test_inactive_filters_rejected_without_request() {
        let fake = FakeFins::start().await;
        let resolver = Resolver::new(fake.client());
        let filters = FilterSet::new()
            .with("body_shape", "")
            .with("salt_water_environment", "false")
            .with("freshwater_environment", "false");

        let err = resolver
            .resolve(&Query::Filters(filters))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::InvalidQuery(_)));
        assert_eq!(fake.hit_count(), 0);
    }

    #[tokio::test]
    async fn test_filter_results_truncated_to_ten() {
        let fake = FakeFins::start().await;
        let ids: Vec<u64> = (1..=15).collect();
        fake.respond("/search_species?body_shape=elongated", json!({ "results": ids }));
        for id in 1..=15 {
            fake.species(id, &format!("Species {}", id), "N/A");
        }
        let resolver = Resolver::new(fake.client());
        let filters = FilterSet::new()
            .with("body_shape", "elongated")
            .with("electrogenic", "");

        let resolution = resolver.resolve(&Query::Filters(filters)).await.unwrap();

        let Resolution::Candidates(candidates) = resolution else {
            panic!("expected candidates");
        };
        assert_eq!(candidates.len(), MAX_FILTER_RESULTS);
        assert_eq!(
            candidates.iter().map(|c| c.id).collect::<Vec<_>>(),
            (1..=10).collect::<Vec<_>>()
        );
        assert_eq!(fake.hits_with_prefix("/species/"), MAX_FILTER_RESULTS);
    }

    #[tokio::test]
    async fn test_filter_single_and_empty_results() {
        let fake = FakeFins::start().await;
        fake.respond(
            "/search_species?importance=commercial&salt_water_environment=true",
            json!({ "results": [143] }),
        );
        fake.respond("/search_species?importance=of no interest", json!({ "results": [] }));
        let resolver = Resolver::new(fake.client());

        let single = resolver
            .resolve_filters(
                &FilterSet::new()
                    .with("importance", "commercial")
                    .with("salt_water_environment", "true"),
            )
            .await
            .unwrap();
        assert_eq!(
            single,
            Resolution::Single {
                id: 143,
                common_name_hint: None,
            }
        );

        let err = resolver
            .resolve_filters(&FilterSet::new().with("importance", "of no interest"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_all_candidates_failing_is_not_found() {
        let fake = FakeFins::start().await;
        fake.respond("/search_species?genus=Thunnus", json!({ "results": [77, 79] }));
        let resolver = Resolver::new(fake.client());

        let err = resolver.resolve(&Query::text("Thunnus")).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_repeated_ids_settle_as_single() {
        let fake = FakeFins::start().await;
        fake.respond(
            "/search_common_names?common_name=Yellowfin tuna",
            json!({ "ids": [143, 143] }),
        );
        let resolver = Resolver::new(fake.client());

        let resolution = resolver
            .resolve(&Query::text("Yellowfin tuna"))
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Single {
                id: 143,
                common_name_hint: Some("Yellowfin tuna".to_string()),
            }
        );
        assert_eq!(fake.hits_with_prefix("/species/"), 0);
    }

    #[tokio::test]
    async fn test_repeated_filter_ids_keep_first_occurrence() {
        let fake = FakeFins::start().await;
        fake.respond(
            "/search_species?migration_type=oceanodromous",
            json!({ "results": [78, 143, 78] }),
        );
        fake.species(78, "Thunnus obesus", "Bigeye tuna");
        fake.species(143, "Thunnus albacares", "Yellowfin tuna");
        let resolver = Resolver::new(fake.client());

        let resolution = resolver
            .resolve_filters(&FilterSet::new().with("migration_type", "oceanodromous"))
            .await
            .unwrap();

        let Resolution::Candidates(candidates) = resolution else {
            panic!("expected candidates");
        };
        assert_eq!(
            candidates.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![78, 143]
        );
    }

    #[tokio::test]
    async fn test_mistyped_candidate_fields_keep_candidate() {
        let fake = FakeFins::start().await;
        fake.respond("/search_species?genus=Thunnus", json!({ "results": [77, 78] }));
        fake.respond(
            "/species/77",
            json!({
                "scientific_name": "Thunnus thynnus",
                "catching_method": { "other_methods": ["x", null] }
            }),
        );
        fake.species(78, "Thunnus obesus", "Bigeye tuna");
        let resolver = Resolver::new(fake.client());

        let resolution = resolver.resolve(&Query::text("thunnus")).await.unwrap();

        let Resolution::Candidates(candidates) = resolution else {
            panic!("expected candidates");
        };
        assert_eq!(
            candidates.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![77, 78]
        );
    }
}
