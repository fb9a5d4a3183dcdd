use serde::{Deserialize, Serialize};

/// Group-safety policy supplied by the caller.
///
/// The floor is currently advisory: it is never used to filter or reject
/// candidates, only to emit an informational note when it is strict enough
/// to matter. Enforcement is deliberately left out until product intent is
/// settled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrewPolicy {
    pub safety_floor: f64,
}

impl Default for CrewPolicy {
    fn default() -> Self {
        Self { safety_floor: 0.0 }
    }
}

/// Anchor policy, accepted for interface symmetry with sibling enforcement
/// functions. Not consulted in this version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPolicy {
    #[serde(default)]
    pub lock_anchor: bool,
}
