use serde_json::Value;
use tracing::debug;

use spe_record::{first_number, first_string, nested_record, string_field, string_list_field};
use spe_taxonomy::Stop;

use crate::catalog::fallback_catalog;
use crate::types::{CandidateSignals, NormalizedCandidate};

/// Metadata keys recognized as raw candidate arrays, checked in order.
pub const CANDIDATE_METADATA_KEYS: &[&str] = &[
    "seedCandidates",
    "candidatePool",
    "rawSearchResults",
    "searchResults",
];

const ENERGY_KEYS: &[&str] = &["energy", "energyLevel", "vibeEnergy"];
const TRAVEL_KEYS: &[&str] = &[
    "travelMinutes",
    "travelTime",
    "distanceMeters",
    "distance",
    "gapMinutes",
];
const COST_KEYS: &[&str] = &["cost", "price", "priceLevel", "costEstimate"];
const NOVELTY_KEYS: &[&str] = &["novelty", "noveltyScore", "discoveryScore", "uniqueness"];
const SEASONAL_KEYS: &[&str] = &["seasonalScore", "seasonal", "timeRelevance", "timeOfDayFit"];
const VISUAL_KEYS: &[&str] = &["visualScore", "visual", "photoScore"];

/// Where a run's candidate pool may come from. Sources are tried in this
/// order and the first one that yields any candidate wins for the whole run;
/// pools are never merged across sources.
pub enum CandidateSource<'a> {
    /// Raw arrays under recognized keys of the plan's metadata namespace.
    MetadataArrays(&'a Value),
    /// The plan's own stops, converted through the same normalization.
    DerivedFromStops(&'a [Stop]),
    /// Built-in generic filler places; always non-empty.
    StaticCatalog,
}

/// Which source produced the pool; recorded in the audit notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolProvenance {
    Metadata,
    StopsAndCatalog,
}

/// Normalize one raw candidate record. Records without a resolvable name are
/// dropped (`None`).
pub fn normalize_raw_candidate(record: &Value) -> Option<NormalizedCandidate> {
    let place_id = resolve_place_id(record);
    let name = first_string(record, &["name", "title", "label"])
        .or_else(|| nested_record(record, "placeLite").and_then(|lite| string_field(lite, "name")))
        .or_else(|| place_id.clone());
    let Some(name) = name else {
        debug!(record = %record, "candidate dropped: no resolvable name");
        return None;
    };

    // Fallback pool for type/category when the explicit fields are absent.
    let mut pool = string_list_field(record, "types");
    for token in string_list_field(record, "categories") {
        if !pool.contains(&token) {
            pool.push(token);
        }
    }

    let place_type = string_field(record, "type").or_else(|| pool.first().cloned());
    let category = string_field(record, "category").or_else(|| pool.first().cloned());

    Some(NormalizedCandidate {
        types: merged_types(record, place_type.as_deref(), category.as_deref()),
        tags: string_list_field(record, "tags"),
        signals: extract_signals(record),
        name,
        place_id,
        category,
        place_type,
    })
}

fn resolve_place_id(record: &Value) -> Option<String> {
    if let Some(id) = string_field(record, "placeId") {
        return Some(id);
    }
    for key in ["placeRef", "placeLite"] {
        if let Some(nested) = nested_record(record, key) {
            if let Some(id) = first_string(nested, &["placeId", "id"]) {
                return Some(id);
            }
        }
    }
    string_field(record, "id")
}

/// Union of every types-like list on the record, with the explicit type and
/// category tokens prepended when not already present.
fn merged_types(record: &Value, place_type: Option<&str>, category: Option<&str>) -> Vec<String> {
    let mut types = Vec::new();
    let mut push = |raw: &str| {
        let token = raw.trim().to_lowercase();
        if !token.is_empty() && !types.iter().any(|seen: &String| seen == &token) {
            types.push(token);
        }
    };
    if let Some(token) = place_type {
        push(token);
    }
    if let Some(token) = category {
        push(token);
    }
    for key in ["types", "categories", "includedTypes"] {
        for token in string_list_field(record, key) {
            push(&token);
        }
    }
    if let Some(lite) = nested_record(record, "placeLite") {
        for token in string_list_field(lite, "types") {
            push(&token);
        }
    }
    types
}

fn extract_signals(record: &Value) -> CandidateSignals {
    CandidateSignals {
        energy: first_number(record, ENERGY_KEYS),
        travel: first_number(record, TRAVEL_KEYS),
        cost: first_number(record, COST_KEYS),
        novelty: first_number(record, NOVELTY_KEYS),
        seasonal: first_number(record, SEASONAL_KEYS),
        visual: first_number(record, VISUAL_KEYS),
    }
}

/// Convert an existing stop into candidate shape. Stops without a name or
/// place id cannot be keyed and are skipped.
pub fn candidate_from_stop(stop: &Stop) -> Option<NormalizedCandidate> {
    let name = stop.name.clone().or_else(|| stop.place_id.clone())?;
    let mut types = Vec::new();
    let mut push = |raw: &str| {
        let token = raw.trim().to_lowercase();
        if !token.is_empty() && !types.iter().any(|seen: &String| seen == &token) {
            types.push(token);
        }
    };
    if let Some(token) = stop.place_type.as_deref() {
        push(token);
    }
    if let Some(token) = stop.category.as_deref() {
        push(token);
    }
    for token in &stop.types {
        push(token);
    }

    Some(NormalizedCandidate {
        name,
        place_id: stop.place_id.clone(),
        category: stop.category.clone(),
        place_type: stop.place_type.clone(),
        tags: stop.tags.clone(),
        types,
        signals: CandidateSignals {
            energy: stop.energy,
            travel: stop.travel,
            ..CandidateSignals::default()
        },
    })
}

/// Collect candidates from one source, unnormalized duplicates included.
fn collect(source: &CandidateSource<'_>) -> Vec<NormalizedCandidate> {
    match source {
        CandidateSource::MetadataArrays(namespace) => {
            let mut out = Vec::new();
            for key in CANDIDATE_METADATA_KEYS {
                if let Some(Value::Array(items)) = namespace.get(*key) {
                    out.extend(items.iter().filter_map(normalize_raw_candidate));
                }
            }
            out
        }
        CandidateSource::DerivedFromStops(stops) => {
            stops.iter().filter_map(candidate_from_stop).collect()
        }
        CandidateSource::StaticCatalog => fallback_catalog(),
    }
}

fn dedup(candidates: Vec<NormalizedCandidate>) -> Vec<NormalizedCandidate> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for candidate in candidates {
        let key = candidate.identity_key();
        if seen.contains(&key) {
            debug!(key = %key, name = %candidate.name, "duplicate candidate dropped");
            continue;
        }
        seen.push(key);
        out.push(candidate);
    }
    out
}

/// Build the run's deduplicated candidate pool.
///
/// Metadata arrays win when they normalize to anything at all; otherwise the
/// pool is synthesized from the plan's stops followed by the static catalog,
/// which guarantees at least one candidate is always available.
pub fn normalized_pool(
    namespace: Option<&Value>,
    stops: &[Stop],
) -> (Vec<NormalizedCandidate>, PoolProvenance) {
    if let Some(namespace) = namespace {
        let from_metadata = collect(&CandidateSource::MetadataArrays(namespace));
        if !from_metadata.is_empty() {
            return (dedup(from_metadata), PoolProvenance::Metadata);
        }
    }

    let mut synthesized = collect(&CandidateSource::DerivedFromStops(stops));
    synthesized.extend(collect(&CandidateSource::StaticCatalog));
    (dedup(synthesized), PoolProvenance::StopsAndCatalog)
}
