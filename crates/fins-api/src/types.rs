//! Data types for FINS API responses
//!
//! These structs mirror the FINS API payloads. Upstream completeness varies a
//! lot between species, so every field is optional and unknown fields are
//! ignored. Field types are not reliable either: codes arrive as numbers on
//! most endpoints and as numeric strings on a few, flags sometimes as
//! `"true"`. Every field goes through a lenient deserializer, and a value of
//! the wrong shape becomes `None` instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Species record from `/species/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpeciesPayload {
    #[serde(deserialize_with = "deserialize_code")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "deserialize_code")]
    pub species_code: Option<u64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub scientific_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub common_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub vernacular_name: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub scientific_name_assignment: Option<NameAssignment>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub genus: Option<GenusRef>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub family: Option<FamilyRef>,
    #[serde(deserialize_with = "deserialize_text")]
    pub subfamily: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub taxonomic_issue: Option<TaxonomicIssue>,
    #[serde(deserialize_with = "deserialize_text")]
    pub source: Option<String>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub salt_water_environment: Option<bool>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub freshwater_environment: Option<bool>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub brackish_water_environment: Option<bool>,
    #[serde(deserialize_with = "deserialize_text")]
    pub preferred_environment: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub body_shape: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub dangerous_species_indicator: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub electrogenic: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub air_breathing_status: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub migration_type: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_list")]
    pub dimensions: Option<Vec<Dimension>>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub vulnerability_fishing: Option<VulnerabilityScore>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub vulnerability_climate: Option<VulnerabilityScore>,
    #[serde(deserialize_with = "deserialize_number")]
    pub phylogenetic_diversity_index: Option<f64>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub emblematic_species: Option<bool>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub importance: Option<Importance>,
    #[serde(deserialize_with = "deserialize_text")]
    pub used_as_bait: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub used_for_aquaculture: Option<String>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub world_record_game_fishes: Option<bool>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub catching_method: Option<CatchingMethod>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub landings: Option<Landings>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub price_category: Option<PriceCategory>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub aquarium_demand: Option<AquariumDemand>,
    #[serde(deserialize_with = "deserialize_text")]
    pub comments: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub description: Option<String>,
}

impl SpeciesPayload {
    pub fn genus_code(&self) -> Option<u64> {
        self.genus.as_ref().and_then(|g| g.genus_code)
    }

    pub fn family_code(&self) -> Option<u64> {
        self.family.as_ref().and_then(|f| f.family_code)
    }
}

/// Who described the species and when
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameAssignment {
    #[serde(deserialize_with = "deserialize_text")]
    pub assigned_by: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub at_year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenusRef {
    #[serde(deserialize_with = "deserialize_code")]
    pub genus_code: Option<u64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub genus_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FamilyRef {
    #[serde(deserialize_with = "deserialize_code")]
    pub family_code: Option<u64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaxonomicIssue {
    #[serde(deserialize_with = "deserialize_text")]
    pub issue: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub remarks: Option<String>,
}

/// A tagged measurement such as `max length` or `most deep waters`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Dimension {
    #[serde(deserialize_with = "deserialize_text")]
    pub r#type: Option<String>,
    #[serde(deserialize_with = "deserialize_number")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VulnerabilityScore {
    #[serde(deserialize_with = "deserialize_text")]
    pub index: Option<String>,
    #[serde(deserialize_with = "deserialize_number")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Importance {
    #[serde(deserialize_with = "deserialize_text")]
    pub importance: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatchingMethod {
    #[serde(deserialize_with = "deserialize_text")]
    pub main_method_using_fao_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub other_methods: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Landings {
    #[serde(deserialize_with = "deserialize_text")]
    pub statistics: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub areas: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriceCategory {
    #[serde(deserialize_with = "deserialize_text")]
    pub value: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub price_reliability: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AquariumDemand {
    #[serde(deserialize_with = "deserialize_text")]
    pub value: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub details: Option<String>,
}

/// Genus detail from `/genus/{code}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenusPayload {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub genus_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub etymology: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub diagnosis: Option<String>,
}

/// Family detail from `/family/{code}`; embeds the order and class codes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FamilyPayload {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub family_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub etymology: Option<String>,
    #[serde(deserialize_with = "deserialize_code")]
    pub number_of_valid_species: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub order: Option<OrderRef>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub class: Option<ClassRef>,
}

impl FamilyPayload {
    pub fn order_code(&self) -> Option<u64> {
        self.order.as_ref().and_then(|o| o.order_code)
    }

    pub fn class_code(&self) -> Option<u64> {
        self.class.as_ref().and_then(|c| c.class_code)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderRef {
    #[serde(deserialize_with = "deserialize_code")]
    pub order_code: Option<u64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub order_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassRef {
    #[serde(deserialize_with = "deserialize_code")]
    pub class_code: Option<u64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub class_name: Option<String>,
}

/// Order detail from `/order/{code}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderPayload {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub order_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub etymology: Option<String>,
}

/// Class detail from `/class/{code}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassPayload {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub class_name: Option<String>,
}

/// One vernacular name and the language it belongs to
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommonNameEntry {
    #[serde(deserialize_with = "deserialize_text")]
    pub common_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub language: Option<String>,
}

/// Response of `/get_common_names_for`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommonNamesResponse {
    #[serde(deserialize_with = "deserialize_lenient_list")]
    pub common_names: Option<Vec<CommonNameEntry>>,
}

/// Response of `/search_common_names`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdListResponse {
    #[serde(deserialize_with = "deserialize_code_list")]
    pub ids: Vec<u64>,
}

/// Response of `/search_species`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "deserialize_code_list")]
    pub results: Vec<u64>,
}

/// Response of the terminology endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TerminologyResponse {
    #[serde(deserialize_with = "deserialize_text_list")]
    pub results: Option<Vec<String>>,
}

/// Helper to deserialize a code that can be either string or number.
/// Anything unparseable becomes `None` instead of failing the whole payload.
fn deserialize_code<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(code_from_value))
}

fn deserialize_code_list<'de, D>(deserializer: D) -> std::result::Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(code_from_value).collect(),
        _ => Vec::new(),
    })
}

fn deserialize_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(text_from_value))
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    })
}

fn deserialize_text_list<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(text_from_value).collect()),
        _ => None,
    })
}

/// Nested object: anything that does not decode as `T` is dropped
fn deserialize_lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// List of nested objects: unusable items are skipped
fn deserialize_lenient_list<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn code_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
