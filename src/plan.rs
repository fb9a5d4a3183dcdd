//! Adapter between the persisted plan shape and the typed engine core.
//!
//! Persisted plans keep their stop list either at the root or nested one
//! level under a `plan` field, and their metadata bag mirrors the same split.
//! This module resolves both ambiguities once per run, remembers where things
//! were found, and writes results back to the same place with all sibling
//! keys preserved. The engine core never sees raw JSON beyond this file and
//! the defensive readers.

use serde_json::{Map, Value};

use spe_record::{number_field, string_field, string_list_field};
use spe_select::RefinementDirective;
use spe_taxonomy::Stop;

use crate::error::ContractError;

/// Where within the persisted record a section was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlanSection {
    Root,
    Nested,
}

/// Find the stop list at `stops` or `plan.stops`.
pub(crate) fn locate_stops(plan: &Value) -> Option<(PlanSection, Vec<Value>)> {
    if let Some(Value::Array(stops)) = plan.get("stops") {
        return Some((PlanSection::Root, stops.clone()));
    }
    if let Some(Value::Array(stops)) = plan.get("plan").and_then(|nested| nested.get("stops")) {
        return Some((PlanSection::Nested, stops.clone()));
    }
    None
}

/// Write the stop list back to the section it was read from.
pub(crate) fn write_stops(plan: &mut Value, section: PlanSection, stops: Vec<Value>) {
    let root = ensure_object(plan);
    let holder = match section {
        PlanSection::Root => root,
        PlanSection::Nested => {
            ensure_object(root.entry("plan").or_insert_with(|| Value::Object(Map::new())))
        }
    };
    holder.insert("stops".to_string(), Value::Array(stops));
}

/// Locate the metadata namespace object. The namespace follows wherever a
/// `meta` object already lives; absent any, it is colocated with the stop
/// list on write-back.
pub(crate) fn locate_namespace(
    plan: &Value,
    namespace: &str,
    colocate_with: PlanSection,
) -> (PlanSection, Option<Value>) {
    if let Some(meta) = plan.get("meta").filter(|m| m.is_object()) {
        return (PlanSection::Root, meta.get(namespace).cloned());
    }
    if let Some(meta) = plan
        .get("plan")
        .and_then(|nested| nested.get("meta"))
        .filter(|m| m.is_object())
    {
        return (PlanSection::Nested, meta.get(namespace).cloned());
    }
    (colocate_with, None)
}

/// Write the normalized candidates and report into the metadata namespace,
/// creating intermediate objects as needed and preserving every sibling key.
pub(crate) fn write_namespace(
    plan: &mut Value,
    section: PlanSection,
    namespace: &str,
    seed_candidates: Value,
    report: Value,
) {
    let root = ensure_object(plan);
    let holder = match section {
        PlanSection::Root => root,
        PlanSection::Nested => {
            ensure_object(root.entry("plan").or_insert_with(|| Value::Object(Map::new())))
        }
    };
    let meta = ensure_object(holder.entry("meta").or_insert_with(|| Value::Object(Map::new())));
    let bag = ensure_object(
        meta.entry(namespace)
            .or_insert_with(|| Value::Object(Map::new())),
    );
    bag.insert("seedCandidates".to_string(), seed_candidates);
    bag.insert("surpriseReport".to_string(), report);
}

/// Parse the refinement directive out of the namespace object.
///
/// Absent, null, and blank values mean "no directive". Anything else must be
/// a member of the closed directive set; unrecognized values are rejected
/// here at the boundary instead of being silently dropped inside the engine.
pub(crate) fn read_refinement(
    namespace: Option<&Value>,
) -> Result<Option<RefinementDirective>, ContractError> {
    let Some(bag) = namespace else {
        return Ok(None);
    };
    match bag.get("magicRefinement") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(Value::String(raw)) => RefinementDirective::parse(raw)
            .map(Some)
            .ok_or_else(|| ContractError::UnknownRefinement(raw.trim().to_string())),
        Some(other) => Err(ContractError::UnknownRefinement(other.to_string())),
    }
}

/// Merge enrichment results back into the stop's original record: backfilled
/// fields are inserted only where the caller's record had no usable value,
/// and a gained `"discovery"` tag is appended to the existing tag array.
pub(crate) fn merge_enrichment(raw: &Value, enriched: &Stop) -> Value {
    let Value::Object(map) = raw else {
        // Degenerate non-object stop entries are replaced by the typed view.
        return serde_json::to_value(enriched).unwrap_or_else(|_| raw.clone());
    };
    let mut map = map.clone();

    if string_field(raw, "type").is_none() {
        if let Some(place_type) = &enriched.place_type {
            map.insert("type".to_string(), Value::String(place_type.clone()));
        }
    }
    if string_field(raw, "category").is_none() {
        if let Some(category) = &enriched.category {
            map.insert("category".to_string(), Value::String(category.clone()));
        }
    }
    if number_field(raw, "energy").is_none() {
        if let Some(energy) = enriched.energy {
            if let Some(number) = serde_json::Number::from_f64(energy) {
                map.insert("energy".to_string(), Value::Number(number));
            }
        }
    }

    let raw_has_discovery = string_list_field(raw, "tags")
        .iter()
        .any(|tag| tag == spe_taxonomy::DISCOVERY_TAG);
    if enriched.has_discovery_tag() && !raw_has_discovery {
        match map.get_mut("tags") {
            Some(Value::Array(tags)) => {
                tags.push(Value::String(spe_taxonomy::DISCOVERY_TAG.to_string()));
            }
            _ => {
                // Non-array shapes (bare string singleton included) are
                // replaced by the enriched vector, which keeps their parse.
                let tags = enriched.tags.iter().cloned().map(Value::String).collect();
                map.insert("tags".to_string(), Value::Array(tags));
            }
        }
    }

    Value::Object(map)
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}
