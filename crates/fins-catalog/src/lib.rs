//! FINS catalog: species resolution and record aggregation
//!
//! A query is either free text or a set of attribute filters. The
//! [`Resolver`] turns it into species ids, walking a fallback chain for free
//! text, and the [`Aggregator`] hydrates a single id into a [`SpeciesRecord`]
//! by fetching the species and its taxonomic parents concurrently.
//!
//! [`Catalog`] ties both together and also serves the landing-page data:
//! featured species and advanced-search option lists.

pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod featured;
pub mod filters;
pub mod query;
pub mod record;
pub mod resolver;
pub mod server;
pub mod session;

#[cfg(test)]
mod test_support;

pub use aggregator::Aggregator;
pub use catalog::{Catalog, Lookup};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use featured::{FeaturedEntry, SpeciesSummary};
pub use filters::FilterOptions;
pub use query::{FilterSet, Query};
pub use record::{Candidate, SpeciesRecord};
pub use resolver::{Resolution, Resolver};
pub use session::{SearchSession, SearchTicket, Settled};
