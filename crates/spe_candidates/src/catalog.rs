use once_cell::sync::Lazy;

use spe_taxonomy::infer_energy;

use crate::types::{CandidateSignals, NormalizedCandidate};

/// Generic filler places used when neither plan metadata nor the plan's own
/// stops yield a single candidate. Order is part of the contract: the first
/// non-mainstream entry is what a default run will inject.
static CATALOG: Lazy<Vec<NormalizedCandidate>> = Lazy::new(|| {
    vec![
        entry("The Daydream Counter", "cafe", &["cafe"]),
        entry("Little Atlas Museum", "museum", &["museum", "culture"]),
        entry("Harbor & Vine", "restaurant", &["restaurant"]),
        entry("The Brass Owl", "bar", &["bar", "music_venue"]),
        entry("Gloaming Hour Garden", "garden", &["garden", "outdoors"]),
    ]
});

fn entry(name: &str, place_type: &str, types: &[&str]) -> NormalizedCandidate {
    let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    NormalizedCandidate {
        name: name.to_string(),
        place_id: None,
        category: None,
        place_type: Some(place_type.to_string()),
        tags: Vec::new(),
        signals: CandidateSignals {
            energy: infer_energy(types.iter().map(String::as_str)),
            ..CandidateSignals::default()
        },
        types,
    }
}

/// The built-in fallback catalog, cloned per run so callers may extend it.
pub fn fallback_catalog() -> Vec<NormalizedCandidate> {
    CATALOG.clone()
}
