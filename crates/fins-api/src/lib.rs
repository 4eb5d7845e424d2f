//! Rust client for the FINS marine species reference API
//!
//! The API is read-only JSON over HTTP. Browsers reach it through a CORS
//! passthrough, which this client models as a [`Relay`].
//!
//! # Example
//!
//! ```no_run
//! use fins_api::FinsClient;
//!
//! # async fn example() -> Result<(), fins_api::FinsError> {
//! let client = FinsClient::new();
//!
//! // Find species by common name
//! let ids = client.search_common_names("Yellowfin tuna").await?;
//!
//! // Fetch the primary record
//! if let Some(id) = ids.first() {
//!     let species = client.get_species(*id).await?;
//!     println!("{:?}", species.scientific_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /species/{id}` - Primary species record
//! - `GET /genus/{code}`, `/family/{code}`, `/order/{code}`, `/class/{code}` - Taxon details
//! - `GET /get_common_names_for?species_code=` - Common names of a species
//! - `GET /search_common_names?common_name=` - Species ids by common name
//! - `GET /search_species?...` - Species ids by scientific name, genus or attribute filters
//! - `GET /terminology_for_species?attribute=` - Allowed values of a species attribute
//! - `GET /terminology_for_common_names?attribute=` - Allowed values of a common-name attribute

mod client;
mod error;
mod relay;
mod types;

pub use client::FinsClient;
pub use error::{FinsError, Result};
pub use relay::Relay;
pub use types::{
    AquariumDemand, CatchingMethod, ClassPayload, ClassRef, CommonNameEntry, Dimension,
    FamilyPayload, FamilyRef, GenusPayload, GenusRef, Importance, Landings, NameAssignment,
    OrderPayload, OrderRef, PriceCategory, SpeciesPayload, TaxonomicIssue, VulnerabilityScore,
};
