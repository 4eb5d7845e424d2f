//! Catalog facade tying resolution, hydration and the landing-page loaders
//! together over one shared FINS client

use crate::aggregator::Aggregator;
use crate::error::Result;
use crate::featured::{load_featured, FeaturedEntry, SpeciesSummary};
use crate::filters::{load_filter_options, FilterOptions};
use crate::query::Query;
use crate::record::{Candidate, SpeciesRecord};
use crate::resolver::{Resolution, Resolver};
use crate::session::{SearchTicket, Settled};
use fins_api::FinsClient;
use serde::Serialize;
use tracing::info;

/// Result of a search: one full record, or candidates to choose from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Lookup {
    Record { record: Box<SpeciesRecord> },
    Candidates { candidates: Vec<Candidate> },
}

#[derive(Clone)]
pub struct Catalog {
    api: FinsClient,
    resolver: Resolver,
    aggregator: Aggregator,
    featured: Vec<FeaturedEntry>,
}

impl Catalog {
    pub fn new(api: FinsClient) -> Self {
        Self::with_featured(api, FeaturedEntry::defaults())
    }

    pub fn with_featured(api: FinsClient, featured: Vec<FeaturedEntry>) -> Self {
        Self {
            resolver: Resolver::new(api.clone()),
            aggregator: Aggregator::new(api.clone()),
            api,
            featured,
        }
    }

    /// Resolve a query and, when it names one species, hydrate it
    pub async fn search(&self, query: &Query) -> Result<Lookup> {
        match self.resolver.resolve(query).await? {
            Resolution::Single {
                id,
                common_name_hint,
            } => {
                let record = self
                    .aggregator
                    .hydrate(id, common_name_hint.as_deref())
                    .await?;
                Ok(Lookup::Record {
                    record: Box::new(record),
                })
            }
            Resolution::Candidates(candidates) => {
                info!(count = candidates.len(), "Search returned several candidates");
                Ok(Lookup::Candidates { candidates })
            }
        }
    }

    /// Run [`Catalog::search`] for a ticket; the outcome is discarded if a
    /// newer search began in the meantime.
    pub async fn lookup(&self, ticket: &SearchTicket, query: &Query) -> Settled<Result<Lookup>> {
        let outcome = self.search(query).await;
        let settled = ticket.settle(outcome);
        if matches!(settled, Settled::Superseded) {
            info!(generation = ticket.generation(), "Discarding superseded search");
        }
        settled
    }

    /// Full record for a species picked from a candidate list
    pub async fn hydrate(&self, id: u64) -> Result<SpeciesRecord> {
        self.aggregator.hydrate(id, None).await
    }

    pub async fn featured(&self) -> Vec<SpeciesSummary> {
        load_featured(&self.api, &self.featured).await
    }

    pub async fn filter_options(&self) -> FilterOptions {
        load_filter_options(&self.api).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SearchSession;
    use crate::test_support::FakeFins;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_hydrates_single_match() {
        let fake = FakeFins::start().await;
        fake.respond(
            "/search_common_names?common_name=clownfish",
            json!({ "ids": [1051] }),
        );
        fake.respond("/species/1051", json!({ "scientific_name": "Amphiprion percula" }));
        let catalog = Catalog::new(fake.client());

        let lookup = catalog.search(&Query::text("clownfish")).await.unwrap();

        let Lookup::Record { record } = lookup else {
            panic!("expected a record");
        };
        assert_eq!(record.id, 1051);
        assert_eq!(record.common_name, "clownfish");
        assert_eq!(record.scientific_name, "Amphiprion percula");
    }

    #[tokio::test]
    async fn test_search_returns_candidates() {
        let fake = FakeFins::start().await;
        fake.respond("/search_common_names?common_name=tuna", json!({ "ids": [143, 147] }));
        fake.species(143, "Thunnus albacares", "Yellowfin tuna");
        fake.species(147, "Thunnus thynnus", "Atlantic bluefin tuna");
        let catalog = Catalog::new(fake.client());

        let lookup = catalog.search(&Query::text("tuna")).await.unwrap();

        let value = serde_json::to_value(&lookup).unwrap();
        assert_eq!(value["kind"], "candidates");
        assert_eq!(value["candidates"][1]["scientificName"], "Thunnus thynnus");
        // Candidates are never hydrated into full records
        assert_eq!(fake.hits_with_prefix("/genus/"), 0);
    }

    #[tokio::test]
    async fn test_lookup_discards_superseded_result() {
        let fake = FakeFins::start().await;
        fake.species(143, "Thunnus albacares", "Yellowfin tuna");
        let catalog = Catalog::new(fake.client());
        let session = SearchSession::new();

        let stale = session.begin();
        let fresh = session.begin();

        let settled = catalog.lookup(&stale, &Query::text("143")).await;
        assert!(matches!(settled, Settled::Superseded));

        let settled = catalog.lookup(&fresh, &Query::text("143")).await;
        assert!(matches!(settled, Settled::Current(Ok(Lookup::Record { .. }))));
    }
}
