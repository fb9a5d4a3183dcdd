use serde::Serialize;
use serde_json::Value;

use spe_record::{first_number, first_string, nested_record, number_field, string_field, string_list_field};

use crate::category::Category;
use crate::classify::{is_discovery_signal, is_mainstream_like, is_mainstream_token};
use crate::energy::infer_energy;
use crate::DISCOVERY_TAG;

/// Travel/gap fields recognized on a stop. Only their presence matters: the
/// engine does not check route feasibility, it just records whether the
/// dead-air audit had any data to look at.
const TRAVEL_KEYS: &[&str] = &[
    "travelMinutes",
    "travelTime",
    "distanceMeters",
    "distance",
    "gapMinutes",
];

/// A place within a plan, parsed defensively from its raw record.
///
/// Every field is optional; `place_id` is resolved from the flat `placeId`
/// field or the nested `placeRef`/`placeLite` sub-records at parse time so the
/// rest of the engine never touches raw JSON again.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optionality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Presence of travel/distance/gap data; input to the dead-air audit only.
    #[serde(skip)]
    pub travel: Option<f64>,
}

impl Stop {
    /// Parse a stop from its raw record. Never fails: unusable fields come
    /// back absent.
    pub fn from_value(record: &Value) -> Stop {
        Stop {
            id: string_field(record, "id"),
            name: string_field(record, "name"),
            role: string_field(record, "role"),
            optionality: string_field(record, "optionality"),
            category: string_field(record, "category"),
            place_type: string_field(record, "type"),
            types: string_list_field(record, "types"),
            tags: string_list_field(record, "tags"),
            energy: number_field(record, "energy"),
            place_id: resolve_place_id(record),
            travel: first_number(record, TRAVEL_KEYS),
        }
    }

    /// Lowercased category/type/types tokens, deduplicated in order.
    pub fn signal_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut push = |raw: &str| {
            let token = raw.trim().to_lowercase();
            if !token.is_empty() && !tokens.iter().any(|seen: &String| seen == &token) {
                tokens.push(token);
            }
        };
        if let Some(category) = &self.category {
            push(category);
        }
        if let Some(place_type) = &self.place_type {
            push(place_type);
        }
        for entry in &self.types {
            push(entry);
        }
        tokens
    }

    pub fn has_discovery_tag(&self) -> bool {
        self.tags.iter().any(|tag| tag == DISCOVERY_TAG)
    }
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
    None
}

/// True when any of the stop's category/type/types tokens is mainstream.
pub fn is_mainstream_like_stop(stop: &Stop) -> bool {
    is_mainstream_like(&stop.signal_tokens())
}

/// True when the stop is explicitly tagged discovery, or carries at least one
/// non-mainstream classification token.
pub fn is_discovery_like_stop(stop: &Stop) -> bool {
    is_discovery_signal(&stop.tags, &stop.signal_tokens())
}

/// Produce an enriched copy of the stop for contract evaluation.
///
/// Backfills `type` from derived types, `category` via inference, and
/// `energy` via the energy buckets, then appends the `"discovery"` tag when
/// the stop exhibits a non-mainstream token. Fields the caller already set
/// are never removed or overwritten.
pub fn enrich_for_evaluation(stop: &Stop) -> Stop {
    let mut enriched = stop.clone();

    if enriched.place_type.is_none() {
        enriched.place_type = enriched
            .types
            .first()
            .cloned()
            .or_else(|| enriched.category.as_ref().map(|c| c.trim().to_lowercase()));
    }

    if enriched.category.is_none() {
        if let Some(token) = enriched.place_type.as_deref() {
            let inferred = Category::from_type_token(token);
            if !inferred.label().is_empty() {
                enriched.category = Some(inferred.label().to_string());
            }
        }
    }

    if enriched.energy.is_none() {
        enriched.energy = infer_energy(enriched.signal_tokens().iter().map(String::as_str));
    }

    if !enriched.has_discovery_tag() {
        let tokens = enriched.signal_tokens();
        let non_mainstream = tokens.iter().any(|token| !is_mainstream_token(token));
        if !tokens.is_empty() && non_mainstream {
            enriched.tags.push(DISCOVERY_TAG.to_string());
        }
    }

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_flat_and_nested_place_ids() {
        let flat = Stop::from_value(&json!({ "name": "A", "placeId": "p-flat" }));
        assert_eq!(flat.place_id.as_deref(), Some("p-flat"));

        let via_ref = Stop::from_value(&json!({
            "name": "B",
            "placeRef": { "placeId": "p-ref" },
            "placeLite": { "id": "p-lite" },
        }));
        assert_eq!(via_ref.place_id.as_deref(), Some("p-ref"));

        let via_lite = Stop::from_value(&json!({ "name": "C", "placeLite": { "id": "p-lite" } }));
        assert_eq!(via_lite.place_id.as_deref(), Some("p-lite"));
    }

    #[test]
    fn parse_is_defensive_about_field_types() {
        let stop = Stop::from_value(&json!({
            "name": 42,
            "types": ["Museum", null, "museum"],
            "tags": "discovery",
            "energy": "not-a-number",
            "travelMinutes": "15",
        }));
        assert_eq!(stop.name, None);
        assert_eq!(stop.types, vec!["museum"]);
        assert_eq!(stop.tags, vec!["discovery"]);
        assert_eq!(stop.energy, None);
        assert_eq!(stop.travel, Some(15.0));
    }

    #[test]
    fn signal_tokens_merge_category_type_and_types() {
        let stop = Stop::from_value(&json!({
            "category": "Culture",
            "type": "museum",
            "types": ["museum", "gallery"],
        }));
        assert_eq!(stop.signal_tokens(), vec!["culture", "museum", "gallery"]);
    }

    #[test]
    fn classification_matches_contract() {
        let bistro = Stop::from_value(&json!({ "name": "Oak Row Bistro", "category": "food" }));
        assert!(is_mainstream_like_stop(&bistro));
        assert!(!is_discovery_like_stop(&bistro));

        let gallery = Stop::from_value(&json!({ "name": "Foundry Gallery Hall", "category": "culture" }));
        assert!(is_discovery_like_stop(&gallery));

        let untyped = Stop::from_value(&json!({ "name": "Mystery" }));
        assert!(!is_discovery_like_stop(&untyped));
        let tagged = Stop::from_value(&json!({ "name": "Mystery", "tags": ["discovery"] }));
        assert!(is_discovery_like_stop(&tagged));
    }

    #[test]
    fn enrichment_backfills_without_overwriting() {
        let stop = Stop::from_value(&json!({ "name": "Hall", "types": ["gallery"] }));
        let enriched = enrich_for_evaluation(&stop);
        assert_eq!(enriched.place_type.as_deref(), Some("gallery"));
        assert_eq!(enriched.category.as_deref(), Some("culture"));
        assert_eq!(enriched.energy, Some(0.5));
        assert!(enriched.has_discovery_tag());

        let preset = Stop {
            name: Some("Set".into()),
            category: Some("games".into()),
            place_type: Some("arcade".into()),
            energy: Some(0.2),
            ..Stop::default()
        };
        let enriched = enrich_for_evaluation(&preset);
        assert_eq!(enriched.category.as_deref(), Some("games"));
        assert_eq!(enriched.place_type.as_deref(), Some("arcade"));
        assert_eq!(enriched.energy, Some(0.2));
    }

    #[test]
    fn enrichment_never_tags_mainstream_or_untyped_stops() {
        let bistro = Stop::from_value(&json!({ "name": "Bistro", "category": "food" }));
        assert!(!enrich_for_evaluation(&bistro).has_discovery_tag());

        let untyped = Stop::from_value(&json!({ "name": "Blank" }));
        assert!(!enrich_for_evaluation(&untyped).has_discovery_tag());
    }

    #[test]
    fn enrichment_is_idempotent_on_its_own_output() {
        let stop = Stop::from_value(&json!({ "name": "Hall", "types": ["gallery"] }));
        let once = enrich_for_evaluation(&stop);
        let twice = enrich_for_evaluation(&once);
        assert_eq!(once, twice);
    }
}
