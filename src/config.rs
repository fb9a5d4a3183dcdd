//! Engine configuration.
//!
//! The engine has few genuine knobs; they exist so the surrounding
//! application can rename its metadata namespace or id scheme without forking
//! the engine. Defaults reproduce the persisted plan format as-is.

use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// Runtime configuration for a contract-enforcement run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Metadata namespace the refinement directive is read from and the
    /// normalized candidates and report are written back to.
    #[serde(default = "EngineConfig::default_refinement_namespace")]
    pub refinement_namespace: String,
    /// Prefix for the synthetic id of an injected wildcard stop.
    #[serde(default = "EngineConfig::default_wildcard_id_prefix")]
    pub wildcard_id_prefix: String,
    /// Stop-list position a wildcard is spliced into when the plan already
    /// has at least two stops; shorter plans get the wildcard appended.
    #[serde(default = "EngineConfig::default_splice_index")]
    pub splice_index: usize,
    /// Crew safety floors at or above this threshold get an advisory note.
    #[serde(default = "EngineConfig::default_safety_note_floor")]
    pub safety_note_floor: f64,
}

impl EngineConfig {
    pub(crate) fn default_refinement_namespace() -> String {
        "surprise".to_string()
    }

    pub(crate) fn default_wildcard_id_prefix() -> String {
        "idea-date-wildcard-".to_string()
    }

    pub(crate) fn default_splice_index() -> usize {
        1
    }

    pub(crate) fn default_safety_note_floor() -> f64 {
        0.9
    }

    /// Validate the configuration before a run.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.refinement_namespace.trim().is_empty() {
            return Err(ContractError::InvalidConfig(
                "refinement_namespace must not be empty".into(),
            ));
        }
        if self.wildcard_id_prefix.trim().is_empty() {
            return Err(ContractError::InvalidConfig(
                "wildcard_id_prefix must not be empty".into(),
            ));
        }
        if self.splice_index == 0 {
            return Err(ContractError::InvalidConfig(
                "splice_index 0 would displace the anchor stop".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.safety_note_floor) {
            return Err(ContractError::InvalidConfig(
                "safety_note_floor must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refinement_namespace: Self::default_refinement_namespace(),
            wildcard_id_prefix: Self::default_wildcard_id_prefix(),
            splice_index: Self::default_splice_index(),
            safety_note_floor: Self::default_safety_note_floor(),
        }
    }
}
