//! Display-ready species records
//!
//! Upstream payloads are partial; everything here is fully populated. Every
//! text field falls back to `"N/A"` (or a more specific placeholder),
//! booleans to `false`, numbers to `0` and lists to empty.

use crate::constants::{
    photo_url, NOT_AVAILABLE, NO_DESCRIPTION, NO_TAXONOMIC_ISSUE, UNKNOWN_LANGUAGE,
};
use fins_api::{
    ClassPayload, CommonNameEntry, Dimension, FamilyPayload, GenusPayload, OrderPayload,
    SpeciesPayload,
};
use serde::{Deserialize, Serialize};

/// Measurement tags used by the FINS `dimensions` list
pub mod dimension {
    pub const MAX_LENGTH: &str = "max length";
    pub const MOST_SHALLOW: &str = "most shallow waters";
    pub const MOST_DEEP: &str = "most deep waters";
    pub const COMMON_SHALLOW: &str = "common shallow waters";
    pub const COMMON_DEEP: &str = "common deep waters";
    pub const MAX_WEIGHT: &str = "max weight";
    pub const LONGEVITY_WILD: &str = "longevity wild";
}

/// One entry of a multi-match result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u64,
    pub scientific_name: String,
    pub common_name: String,
}

impl Candidate {
    pub fn from_payload(id: u64, data: &SpeciesPayload) -> Self {
        Self {
            id,
            scientific_name: text_or_na(&[data.scientific_name.as_deref()]),
            common_name: text_or_na(&[data.common_name.as_deref(), data.vernacular_name.as_deref()]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonName {
    pub name: String,
    pub language: String,
}

impl CommonName {
    /// Entries without a name carry nothing to display and are dropped
    pub fn from_entry(entry: &CommonNameEntry) -> Option<Self> {
        let name = first_text(&[entry.common_name.as_deref()])?;
        Some(Self {
            name: name.to_string(),
            language: first_text(&[entry.language.as_deref()])
                .unwrap_or(UNKNOWN_LANGUAGE)
                .to_string(),
        })
    }
}

/// All common names of one language, joined for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageGroup {
    pub language: String,
    pub names: String,
}

/// Group names by language. Languages keep the order of their first
/// appearance and names keep their order within a language.
pub fn group_common_names(names: &[CommonName]) -> Vec<LanguageGroup> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for entry in names {
        let language = entry.language.as_str();
        match groups.iter_mut().find(|group| group.0 == language) {
            Some(group) => group.1.push(entry.name.as_str()),
            None => groups.push((language, vec![entry.name.as_str()])),
        }
    }

    groups
        .into_iter()
        .map(|(language, members)| LanguageGroup {
            language: language.to_string(),
            names: members.join("; "),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenusInfo {
    pub name: String,
    pub etymology: String,
    pub diagnosis: String,
}

impl GenusInfo {
    pub fn from_payload(details: Option<&GenusPayload>, fallback_name: Option<&str>) -> Self {
        let d = details.cloned().unwrap_or_default();
        Self {
            name: text_or_na(&[d.name.as_deref(), d.genus_name.as_deref(), fallback_name]),
            etymology: text_or_na(&[d.etymology.as_deref()]),
            diagnosis: text_or_na(&[d.diagnosis.as_deref()]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInfo {
    pub name: String,
    pub etymology: String,
    pub number_of_valid_species: u64,
    pub order_code: u64,
    pub class_code: u64,
}

impl FamilyInfo {
    pub fn from_payload(details: Option<&FamilyPayload>, fallback_name: Option<&str>) -> Self {
        let d = details.cloned().unwrap_or_default();
        Self {
            name: text_or_na(&[d.name.as_deref(), d.family_name.as_deref(), fallback_name]),
            etymology: text_or_na(&[d.etymology.as_deref()]),
            number_of_valid_species: d.number_of_valid_species.unwrap_or(0),
            order_code: d.order_code().unwrap_or(0),
            class_code: d.class_code().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    pub name: String,
    pub etymology: String,
}

impl OrderInfo {
    pub fn from_payload(details: Option<&OrderPayload>, fallback_name: Option<&str>) -> Self {
        let d = details.cloned().unwrap_or_default();
        Self {
            name: text_or_na(&[d.name.as_deref(), d.order_name.as_deref(), fallback_name]),
            etymology: text_or_na(&[d.etymology.as_deref()]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,
}

impl ClassInfo {
    pub fn from_payload(details: Option<&ClassPayload>, fallback_name: Option<&str>) -> Self {
        let d = details.cloned().unwrap_or_default();
        Self {
            name: text_or_na(&[d.name.as_deref(), d.class_name.as_deref(), fallback_name]),
        }
    }
}

/// The hydrated aggregate shown on the species detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    pub id: u64,
    pub species_code: u64,
    pub scientific_name: String,
    pub common_name: String,
    pub vernacular_name: String,
    pub scientific_author: String,
    pub genus: String,
    pub genus_code: u64,
    pub family: String,
    pub family_code: u64,
    pub subfamily: String,
    pub taxonomic_issue: String,
    pub taxonomic_remarks: String,
    pub source: String,

    // Environment
    pub saltwater: bool,
    pub freshwater: bool,
    pub brackish: bool,
    pub preferred_environment: String,
    pub body_shape: String,
    pub dangerous_species: String,
    pub electrogenic: String,
    pub air_breathing: String,
    pub migration_type: String,

    // Dimensions
    pub size_of_fish: String,
    pub min_depth: String,
    pub max_depth: String,
    pub common_shallow: String,
    pub common_deep: String,
    pub max_weight: String,
    pub max_age: String,

    // Vulnerability
    pub fishing_vulnerability: String,
    pub fishing_vulnerability_value: f64,
    pub vulnerability_climate_index: String,
    pub vulnerability_climate_value: f64,
    pub phylogenetic_diversity: f64,
    pub emblematic_species: bool,

    // Commercial use
    pub fisheries_importance: String,
    pub importance_remarks: String,
    pub used_as_bait: String,
    pub aquaculture_status: String,
    pub game_fish: bool,
    pub catching_methods: String,
    pub other_catching_methods: Vec<String>,
    pub landings_statistics: String,
    pub landings_areas: String,
    pub price_category: String,
    pub price_reliability: String,
    pub aquarium_demand: String,
    pub aquarium_details: String,

    pub description: String,
    pub comments: String,

    pub genus_details: GenusInfo,
    pub family_details: FamilyInfo,
    pub order_details: OrderInfo,
    pub class_details: ClassInfo,
    pub common_names: Vec<CommonName>,
    pub common_names_by_language: Vec<LanguageGroup>,
    pub photo_url: String,
}

/// Everything fetched for one species, before fallbacks are applied
#[derive(Debug, Default)]
pub struct RecordParts {
    pub requested_id: u64,
    pub common_name_hint: Option<String>,
    pub species: SpeciesPayload,
    pub genus: Option<GenusPayload>,
    pub family: Option<FamilyPayload>,
    pub order: Option<OrderPayload>,
    pub class: Option<ClassPayload>,
    pub common_names: Vec<CommonNameEntry>,
}

impl SpeciesRecord {
    pub fn assemble(parts: RecordParts) -> Self {
        let RecordParts {
            requested_id,
            common_name_hint,
            species: data,
            genus,
            family,
            order,
            class,
            common_names,
        } = parts;

        let species_code = data.species_code.unwrap_or(requested_id);
        let dims = data.dimensions.as_deref().unwrap_or(&[]);
        let genus_ref = data.genus.clone().unwrap_or_default();
        let family_ref = data.family.clone().unwrap_or_default();
        let issue = data.taxonomic_issue.clone().unwrap_or_default();
        let fishing = data.vulnerability_fishing.clone().unwrap_or_default();
        let climate = data.vulnerability_climate.clone().unwrap_or_default();
        let importance = data.importance.clone().unwrap_or_default();
        let catching = data.catching_method.clone().unwrap_or_default();
        let landings = data.landings.clone().unwrap_or_default();
        let price = data.price_category.clone().unwrap_or_default();
        let aquarium = data.aquarium_demand.clone().unwrap_or_default();

        let display_name = text_or_na(&[
            data.vernacular_name.as_deref(),
            data.common_name.as_deref(),
            common_name_hint.as_deref(),
        ]);

        let scientific_author = match &data.scientific_name_assignment {
            Some(a) => format!(
                "{} ({})",
                a.assigned_by.as_deref().unwrap_or(NOT_AVAILABLE),
                a.at_year.as_deref().unwrap_or(NOT_AVAILABLE)
            ),
            None => NOT_AVAILABLE.to_string(),
        };

        let description = first_text(&[data.comments.as_deref()])
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        let names: Vec<CommonName> = common_names.iter().filter_map(CommonName::from_entry).collect();
        let family_details = family.as_ref();

        Self {
            id: data.id.unwrap_or(requested_id),
            species_code,
            scientific_name: text_or_na(&[data.scientific_name.as_deref()]),
            common_name: display_name.clone(),
            vernacular_name: display_name,
            scientific_author,
            genus: text_or_na(&[genus_ref.genus_name.as_deref()]),
            genus_code: genus_ref.genus_code.unwrap_or(0),
            family: text_or_na(&[family_ref.family_name.as_deref()]),
            family_code: family_ref.family_code.unwrap_or(0),
            subfamily: text_or_na(&[data.subfamily.as_deref()]),
            taxonomic_issue: first_text(&[issue.issue.as_deref()])
                .unwrap_or(NO_TAXONOMIC_ISSUE)
                .to_string(),
            taxonomic_remarks: text_or_na(&[issue.remarks.as_deref()]),
            source: text_or_na(&[data.source.as_deref()]),

            saltwater: data.salt_water_environment.unwrap_or(false),
            freshwater: data.freshwater_environment.unwrap_or(false),
            brackish: data.brackish_water_environment.unwrap_or(false),
            preferred_environment: text_or_na(&[data.preferred_environment.as_deref()]),
            body_shape: text_or_na(&[data.body_shape.as_deref()]),
            dangerous_species: text_or_na(&[data.dangerous_species_indicator.as_deref()]),
            electrogenic: text_or_na(&[data.electrogenic.as_deref()]),
            air_breathing: text_or_na(&[data.air_breathing_status.as_deref()]),
            migration_type: text_or_na(&[data.migration_type.as_deref()]),

            size_of_fish: dimension_value(dims, dimension::MAX_LENGTH),
            min_depth: dimension_value(dims, dimension::MOST_SHALLOW),
            max_depth: dimension_value(dims, dimension::MOST_DEEP),
            common_shallow: dimension_value(dims, dimension::COMMON_SHALLOW),
            common_deep: dimension_value(dims, dimension::COMMON_DEEP),
            max_weight: dimension_value(dims, dimension::MAX_WEIGHT),
            max_age: dimension_value(dims, dimension::LONGEVITY_WILD),

            fishing_vulnerability: text_or_na(&[fishing.index.as_deref()]),
            fishing_vulnerability_value: fishing.value.unwrap_or(0.0),
            vulnerability_climate_index: text_or_na(&[climate.index.as_deref()]),
            vulnerability_climate_value: climate.value.unwrap_or(0.0),
            phylogenetic_diversity: data.phylogenetic_diversity_index.unwrap_or(0.0),
            emblematic_species: data.emblematic_species.unwrap_or(false),

            fisheries_importance: text_or_na(&[importance.importance.as_deref()]),
            importance_remarks: text_or_na(&[importance.remarks.as_deref()]),
            used_as_bait: text_or_na(&[data.used_as_bait.as_deref()]),
            aquaculture_status: text_or_na(&[data.used_for_aquaculture.as_deref()]),
            game_fish: data.world_record_game_fishes.unwrap_or(false),
            catching_methods: text_or_na(&[catching.main_method_using_fao_name.as_deref()]),
            other_catching_methods: catching.other_methods.unwrap_or_default(),
            landings_statistics: text_or_na(&[landings.statistics.as_deref()]),
            landings_areas: text_or_na(&[landings.areas.as_deref()]),
            price_category: text_or_na(&[price.value.as_deref()]),
            price_reliability: text_or_na(&[price.price_reliability.as_deref()]),
            aquarium_demand: text_or_na(&[aquarium.value.as_deref()]),
            aquarium_details: text_or_na(&[aquarium.details.as_deref()]),

            description: description.clone(),
            comments: description,

            genus_details: GenusInfo::from_payload(genus.as_ref(), genus_ref.genus_name.as_deref()),
            family_details: FamilyInfo::from_payload(
                family_details,
                family_ref.family_name.as_deref(),
            ),
            order_details: OrderInfo::from_payload(
                order.as_ref(),
                family_details
                    .and_then(|f| f.order.as_ref())
                    .and_then(|o| o.order_name.as_deref()),
            ),
            class_details: ClassInfo::from_payload(
                class.as_ref(),
                family_details
                    .and_then(|f| f.class.as_ref())
                    .and_then(|c| c.class_name.as_deref()),
            ),
            common_names_by_language: group_common_names(&names),
            common_names: names,
            photo_url: photo_url(species_code),
        }
    }
}

/// Look up a tagged measurement and render it as `"{value} {unit}"`.
///
/// Only the first entry with a matching tag is considered; a missing or zero
/// value yields `"N/A"`. Weights in kilograms get thousands grouping.
pub fn dimension_value(dimensions: &[Dimension], kind: &str) -> String {
    let Some(dim) = dimensions.iter().find(|d| d.r#type.as_deref() == Some(kind)) else {
        return NOT_AVAILABLE.to_string();
    };
    let value = match dim.value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };
    let unit = dim.unit.as_deref().unwrap_or("").trim();

    if kind == dimension::MAX_WEIGHT && unit == "kilograms" {
        return format!("{} kg", format_grouped(value));
    }
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, unit)
    }
}

/// `1234.567` -> `"1,234.6"`: comma thousands separators, at most one
/// fraction digit, trailing `.0` dropped.
pub fn format_grouped(value: f64) -> String {
    let rounded = format!("{:.1}", value.abs());
    let (int_part, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "0"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded != "0.0" { "-" } else { "" };
    if frac == "0" {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// First candidate that is present and not blank
pub(crate) fn first_text<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.trim().is_empty())
}

pub(crate) fn text_or_na(candidates: &[Option<&str>]) -> String {
    first_text(candidates).unwrap_or(NOT_AVAILABLE).to_string()
}
