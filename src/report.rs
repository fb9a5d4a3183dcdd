use serde::{Deserialize, Serialize};

/// Which high-level guarantees were evaluated during the run.
///
/// All three are true by construction: they record that each check ran, not
/// that it forced a change. Callers wanting to know whether anything was
/// altered should look at `wildcard_injected` and the notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedChecks {
    pub non_predictable: bool,
    pub cohesive_arc: bool,
    pub crew_guardrails: bool,
}

/// Structured audit trail for one contract-enforcement run.
///
/// The notes explain every branch taken or skipped in order; they are meant
/// for debugging and audit, never for control flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurpriseReport {
    pub applied: AppliedChecks,
    /// 1 when a wildcard stop was actually inserted, 0 otherwise.
    pub wildcard_injected: u8,
    pub notes: Vec<String>,
}

impl SurpriseReport {
    pub(crate) fn new() -> Self {
        Self {
            applied: AppliedChecks {
                non_predictable: true,
                cohesive_arc: true,
                crew_guardrails: true,
            },
            wildcard_injected: 0,
            notes: Vec::new(),
        }
    }
}
