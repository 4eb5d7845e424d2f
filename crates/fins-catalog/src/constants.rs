// --- Field fallbacks ---

/// Placeholder for any text attribute the upstream record does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a species without a taxonomic issue.
pub const NO_TAXONOMIC_ISSUE: &str = "None";

/// Placeholder description for species without comments.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Group label for common names that carry no language.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

// --- Resolution limits ---

/// Maximum number of filter-search hits hydrated into candidates.
pub const MAX_FILTER_RESULTS: usize = 10;

/// Filter value meaning "unset" for boolean environment flags.
pub const FALSE_SENTINEL: &str = "false";

// --- External resources ---

/// Species photo location; `{}` is replaced by the species code.
pub const PHOTO_URL_TEMPLATE: &str = "https://www.fishbase.de/images/species/{}.gif";

pub fn photo_url(species_code: u64) -> String {
    PHOTO_URL_TEMPLATE.replace("{}", &species_code.to_string())
}

/// Landing-page showcase: species id and the name shown when the record has none.
pub const DEFAULT_FEATURED: &[(u64, &str)] = &[
    (1051, "Clown Anemonefish"),
    (143, "Yellowfin Tuna"),
    (4082, "Oceanic Whitetip Shark"),
    (137, "Reef Fish"),
    (5849, "Grouper"),
    (137, "Mackerel"),
    (1051, "Angelfish"),
    (143, "Tiger Shark"),
];
