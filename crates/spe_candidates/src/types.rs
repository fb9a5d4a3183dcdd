use serde::{Deserialize, Serialize};

use spe_taxonomy::is_discovery_signal;

/// Optional numeric signals a candidate may expose, extracted once at
/// normalization time. Selection never probes raw records again; a signal the
/// source did not carry stays `None` and the selector degrades accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSignals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Travel or distance estimate; lower is better under `closer_together`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel: Option<f64>,
    /// Cost or price level; lower is better under `more_affordable`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub novelty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual: Option<f64>,
}

impl CandidateSignals {
    pub fn is_empty(&self) -> bool {
        self.energy.is_none()
            && self.travel.is_none()
            && self.cost.is_none()
            && self.novelty.is_none()
            && self.seasonal.is_none()
            && self.visual.is_none()
    }

    /// Secondary additive score used only to break ties: seasonal/time
    /// relevance plus visual interest.
    pub fn soft_boost(&self) -> f64 {
        self.seasonal.unwrap_or(0.0) + self.visual.unwrap_or(0.0)
    }

    pub fn has_soft_boost(&self) -> bool {
        self.seasonal.is_some() || self.visual.is_some()
    }
}

/// Canonical candidate shape shared by every source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCandidate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "CandidateSignals::is_empty")]
    pub signals: CandidateSignals,
}

impl NormalizedCandidate {
    /// Deduplication key: place id when present, lowercase name otherwise.
    pub fn identity_key(&self) -> String {
        identity_key_for(self.place_id.as_deref(), Some(&self.name))
            .unwrap_or_else(|| format!("name:{}", self.name.to_lowercase()))
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

    pub fn is_discovery_like(&self) -> bool {
        is_discovery_signal(&self.tags, &self.signal_tokens())
    }
}

/// Identity key shared by candidates and existing stops so the orchestrator
/// can exclude places the plan already visits.
pub fn identity_key_for(place_id: Option<&str>, name: Option<&str>) -> Option<String> {
    if let Some(id) = place_id {
        let id = id.trim();
        if !id.is_empty() {
            return Some(format!("pid:{}", id.to_lowercase()));
        }
    }
    let name = name?.trim();
    if name.is_empty() {
        None
    } else {
        Some(format!("name:{}", name.to_lowercase()))
    }
}

/// Lowercase a name into a stable id fragment: alphanumerics kept, everything
/// else collapsed to single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
