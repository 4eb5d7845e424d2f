//! Search queries: free text or attribute filters

use crate::constants::FALSE_SENTINEL;
use serde::{Deserialize, Serialize};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Common name, species id, scientific name or genus
    Text(String),
    /// Multi-criteria search over species attributes
    Filters(FilterSet),
}

impl Query {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Ordered attribute filters, as submitted by the advanced search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(Vec<(String, String)>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter; later values for the same key are sent as well
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Filters that actually constrain the search: non-empty and not the
    /// boolean-false sentinel of the environment toggles.
    pub fn active(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .filter(|(_, value)| {
                let value = value.trim();
                !value.is_empty() && value != FALSE_SENTINEL
            })
            .map(|(key, value)| (key.as_str(), value.trim()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Upper-case the first character and lower-case the rest.
///
/// Upstream names are stored as "Atlantic bluefin tuna" / "Thunnus albacares",
/// so this recovers a match when the user typed a different case.
pub fn title_case(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A query that is nothing but a positive integer names a species id directly
pub fn parse_species_id(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("atlantic BLUEFIN tuna"), "Atlantic bluefin tuna");
        assert_eq!(title_case("  thunnus  "), "Thunnus");
        assert_eq!(title_case("ÉCHARPE"), "Écharpe");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_parse_species_id() {
        assert_eq!(parse_species_id(" 143 "), Some(143));
        assert_eq!(parse_species_id("0"), None);
        assert_eq!(parse_species_id("-5"), None);
        assert_eq!(parse_species_id("12abc"), None);
        assert_eq!(parse_species_id("tuna"), None);
    }

    #[test]
    fn test_active_filters_drop_empty_and_false() {
        let filters = FilterSet::new()
            .with("body_shape", "fusiform / normal")
            .with("salt_water_environment", "false")
            .with("electrogenic", "")
            .with("freshwater_environment", "true");

        assert_eq!(
            filters.active(),
            vec![
                ("body_shape", "fusiform / normal"),
                ("freshwater_environment", "true"),
            ]
        );
    }

    #[test]
    fn test_filter_set_from_json_pairs() {
        let filters: FilterSet =
            serde_json::from_str(r#"[["importance", "commercial"], ["used_as_bait", ""]]"#)
                .unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters.active(), vec![("importance", "commercial")]);
    }
}
