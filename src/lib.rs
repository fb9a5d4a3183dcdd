//! Surprise Plan Engine (SPE).
//!
//! Guarantees structural diversity for a generated multi-stop plan: every run
//! enriches the plan's stops, checks that at least one "discovery"-style stop
//! exists, and injects exactly one wildcard stop chosen deterministically
//! from a normalized candidate pool when it does not. The caller's plan is
//! never mutated; the engine returns a deep copy plus a structured report
//! explaining every decision taken or skipped.
//!
//! The engine performs no I/O and holds no state across calls: byte-identical
//! input and policy always produce byte-identical output. Repeating a run on
//! its own output is not a guaranteed no-op (the injected wildcard becomes an
//! existing stop next time); determinism, not idempotence, is the contract.

mod config;
mod error;
mod plan;
mod policy;
mod report;

pub use config::EngineConfig;
pub use error::ContractError;
pub use policy::{AnchorPolicy, CrewPolicy};
pub use report::{AppliedChecks, SurpriseReport};

pub use spe_candidates::{
    candidate_from_stop, fallback_catalog, identity_key_for, normalize_raw_candidate,
    CandidateSignals, NormalizedCandidate, PoolProvenance, CANDIDATE_METADATA_KEYS,
};
pub use spe_select::{pick_candidate, RefinementDirective};
pub use spe_taxonomy::{
    enrich_for_evaluation, infer_energy, is_discovery_like_stop, is_mainstream_like_stop,
    Category, Stop, DISCOVERY_TAG,
};

use std::collections::HashSet;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, Level};

use plan::{
    locate_namespace, locate_stops, merge_enrichment, read_refinement, write_namespace,
    write_stops, PlanSection,
};
use spe_candidates::{normalized_pool, slugify};

/// Result of one contract-enforcement run: the modified deep copy of the plan
/// and the audit report (also embedded in the plan's metadata).
#[derive(Debug, Clone, PartialEq)]
pub struct ContractOutcome {
    pub plan: Value,
    pub report: SurpriseReport,
}

/// Enforce the surprise contract with default anchor policy and engine
/// configuration.
pub fn enforce_surprise_contract(
    plan: &Value,
    crew: &CrewPolicy,
) -> Result<ContractOutcome, ContractError> {
    enforce_surprise_contract_with_config(
        plan,
        crew,
        &AnchorPolicy::default(),
        &EngineConfig::default(),
    )
}

/// Enforce the surprise contract over one plan.
///
/// Single pass, no retries: clone the plan, enrich its stops, decide whether
/// a wildcard is required under the active refinement policy, normalize the
/// candidate pool exactly once, inject at most one stop, and write the pool
/// and report back into the plan's metadata namespace.
///
/// Degraded branches (missing stop list, empty pool after exclusion,
/// unavailable metric) become report notes, never errors; the only `Err`
/// cases are an invalid configuration or an unrecognized refinement
/// directive, both rejected before the run touches anything.
pub fn enforce_surprise_contract_with_config(
    plan: &Value,
    crew: &CrewPolicy,
    _anchor: &AnchorPolicy,
    cfg: &EngineConfig,
) -> Result<ContractOutcome, ContractError> {
    cfg.validate()?;
    let start = Instant::now();

    // Explicit deep copy; the caller's record is read-only from here on.
    let mut working = plan.clone();
    let mut report = SurpriseReport::new();

    let span = tracing::span!(Level::INFO, "spe.enforce_contract");
    let _guard = span.enter();

    let (stop_section, raw_stops) = match locate_stops(&working) {
        Some(found) => found,
        None => {
            report
                .notes
                .push("plan carries no stop list; treating it as empty".to_string());
            (PlanSection::Root, Vec::new())
        }
    };

    let enriched: Vec<Stop> = raw_stops
        .iter()
        .map(|raw| enrich_for_evaluation(&Stop::from_value(raw)))
        .collect();
    let discovery_count = enriched.iter().filter(|s| is_discovery_like_stop(s)).count();
    let mainstream_count = enriched.iter().filter(|s| is_mainstream_like_stop(s)).count();
    debug!(
        stops = enriched.len(),
        discovery = discovery_count,
        mainstream = mainstream_count,
        "stops enriched and classified"
    );

    let (meta_section, namespace) =
        locate_namespace(&working, &cfg.refinement_namespace, stop_section);
    let refinement = read_refinement(namespace.as_ref())?;

    let needs_wildcard = decide_injection(
        discovery_count,
        mainstream_count,
        refinement,
        &mut report.notes,
    );

    // Normalized exactly once so metadata always carries a fresh canonical
    // pool, even when no injection happens.
    let (pool, provenance) = normalized_pool(namespace.as_ref(), &enriched);
    report.notes.push(match provenance {
        PoolProvenance::Metadata => format!(
            "candidate pool normalized from metadata arrays ({} candidates)",
            pool.len()
        ),
        PoolProvenance::StopsAndCatalog => format!(
            "no metadata candidates; pool synthesized from {} stop(s) plus the static catalog ({} candidates)",
            enriched.len(),
            pool.len()
        ),
    });

    let mut final_stops: Vec<Value> = raw_stops
        .iter()
        .zip(enriched.iter())
        .map(|(raw, stop)| merge_enrichment(raw, stop))
        .collect();

    if needs_wildcard {
        let existing: HashSet<String> = enriched
            .iter()
            .filter_map(|stop| identity_key_for(stop.place_id.as_deref(), stop.name.as_deref()))
            .collect();
        let remaining: Vec<NormalizedCandidate> = pool
            .iter()
            .filter(|candidate| !existing.contains(&candidate.identity_key()))
            .cloned()
            .collect();

        if remaining.is_empty() {
            report.notes.push(
                "candidate pool empty after excluding existing stops; skipping wildcard injection"
                    .to_string(),
            );
        } else if let Some(candidate) = pick_candidate(&remaining, refinement, &mut report.notes) {
            let wildcard = build_wildcard_stop(candidate, &cfg.wildcard_id_prefix);
            let position = splice_wildcard(&mut final_stops, &wildcard, cfg.splice_index);
            report.notes.push(format!(
                "injected wildcard stop '{}' at position {position}",
                candidate.name
            ));
            report.wildcard_injected = 1;
        }
    }

    append_audit_notes(&enriched, crew, cfg, &mut report.notes);

    write_stops(&mut working, stop_section, final_stops);
    let seed_candidates = serde_json::to_value(&pool).unwrap_or_else(|_| Value::Array(Vec::new()));
    let report_value = serde_json::to_value(&report).unwrap_or(Value::Null);
    write_namespace(
        &mut working,
        meta_section,
        &cfg.refinement_namespace,
        seed_candidates,
        report_value,
    );

    info!(
        wildcard_injected = report.wildcard_injected,
        notes = report.notes.len(),
        elapsed_micros = start.elapsed().as_micros() as u64,
        "surprise contract enforced"
    );

    Ok(ContractOutcome {
        plan: working,
        report,
    })
}

/// Decide whether a wildcard must be injected. Default policy requires one
/// whenever the plan has zero discovery-like stops; refinement directives
/// override in a fixed order.
fn decide_injection(
    discovery_count: usize,
    mainstream_count: usize,
    refinement: Option<RefinementDirective>,
    notes: &mut Vec<String>,
) -> bool {
    let mut needs = discovery_count == 0;
    if needs {
        notes.push("no discovery-like stops in the plan; wildcard injection required".to_string());
    } else {
        notes.push(format!(
            "plan already has {discovery_count} discovery-like stop(s)"
        ));
    }

    match refinement {
        Some(RefinementDirective::MoreUnique) => {
            if mainstream_count > discovery_count.max(1) {
                needs = true;
                notes.push(format!(
                    "refinement more_unique raised the bar: {mainstream_count} mainstream vs \
                     {discovery_count} discovery stop(s); forcing wildcard injection"
                ));
            } else {
                notes.push(
                    "refinement more_unique satisfied: discovery coverage already sufficient"
                        .to_string(),
                );
            }
        }
        Some(RefinementDirective::MoreCurated) => {
            if discovery_count >= 1 {
                needs = false;
                notes.push(
                    "refinement more_curated keeps the existing discovery stop(s); \
                     skipping wildcard injection"
                        .to_string(),
                );
            }
        }
        _ => {}
    }
    needs
}

/// Build the stop record for a selected wildcard candidate. The synthetic id
/// derives from the place id or a slug of the name, so the same candidate
/// always produces the same stop.
fn build_wildcard_stop(candidate: &NormalizedCandidate, id_prefix: &str) -> Stop {
    let fragment = candidate
        .place_id
        .clone()
        .unwrap_or_else(|| slugify(&candidate.name));
    let mut tags = candidate.tags.clone();
    if candidate.is_discovery_like() && !tags.iter().any(|tag| tag == DISCOVERY_TAG) {
        tags.push(DISCOVERY_TAG.to_string());
    }
    let energy = candidate
        .signals
        .energy
        .or_else(|| infer_energy(candidate.signal_tokens().iter().map(String::as_str)));

    Stop {
        id: Some(format!("{id_prefix}{fragment}")),
        name: Some(candidate.name.clone()),
        role: Some("support".to_string()),
        optionality: Some("flexible".to_string()),
        category: candidate.category.clone(),
        place_type: candidate.place_type.clone(),
        types: candidate.types.clone(),
        tags,
        energy,
        place_id: candidate.place_id.clone(),
        travel: None,
    }
}

/// Splice the wildcard into the stop list: fixed index when the plan already
/// has at least two stops, appended otherwise. Returns the position used.
fn splice_wildcard(stops: &mut Vec<Value>, wildcard: &Stop, splice_index: usize) -> usize {
    let value = serde_json::to_value(wildcard).unwrap_or(Value::Null);
    if stops.len() >= 2 {
        let position = splice_index.min(stops.len());
        stops.insert(position, value);
        position
    } else {
        stops.push(value);
        stops.len() - 1
    }
}

/// Fixed informational notes appended regardless of outcome.
fn append_audit_notes(
    stops: &[Stop],
    crew: &CrewPolicy,
    cfg: &EngineConfig,
    notes: &mut Vec<String>,
) {
    if stops.iter().any(|stop| stop.energy.is_some()) {
        notes.push("cohesive-arc check ran: at least one stop carries an energy level".to_string());
    } else {
        notes.push("cohesive-arc check skipped: no stop carries an energy level".to_string());
    }

    if stops.iter().any(|stop| stop.travel.is_some()) {
        notes.push("dead-air check ran: travel gap data present on stops".to_string());
    } else {
        notes.push("dead-air check skipped: no travel or distance data on stops".to_string());
    }

    if crew.safety_floor >= cfg.safety_note_floor {
        notes.push(format!(
            "crew safety floor {:.2} noted; guardrail is validation-only in this version",
            crew.safety_floor
        ));
    }
}
