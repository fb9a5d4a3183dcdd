use tracing::debug;

use spe_candidates::NormalizedCandidate;

use crate::types::{RefinementDirective, RefinementMetric};

/// Pick one candidate from the pool, or `None` when the pool is empty.
///
/// Selection order:
/// 1. Restrict to discovery-like candidates; when none exist fall back to the
///    whole pool so an all-mainstream pool still produces a pick.
/// 2. When the refinement maps to a metric, rank candidates exposing that
///    signal by the metric's objective, breaking exact ties by the soft-boost
///    sum. A pool with no exposure at all gets a note and falls through.
/// 3. Otherwise pick the highest soft-boost among candidates exposing one,
///    else note the absence and take the first candidate in pool order.
///
/// Every skipped branch appends a human-readable note; the function itself
/// never fails on a non-empty pool.
pub fn pick_candidate<'a>(
    pool: &'a [NormalizedCandidate],
    refinement: Option<RefinementDirective>,
    notes: &mut Vec<String>,
) -> Option<&'a NormalizedCandidate> {
    if pool.is_empty() {
        return None;
    }

    let mut ordered: Vec<&NormalizedCandidate> =
        pool.iter().filter(|c| c.is_discovery_like()).collect();
    if ordered.is_empty() {
        notes.push("every candidate looks mainstream; considering the full pool".to_string());
        ordered = pool.iter().collect();
    }

    if let Some(directive) = refinement {
        match directive.metric() {
            Some(metric) => {
                if let Some(winner) = pick_by_metric(&ordered, metric) {
                    notes.push(format!(
                        "refinement {} picked '{}' on the {} signal",
                        directive.as_str(),
                        winner.name,
                        metric.signal.label(),
                    ));
                    return Some(winner);
                }
                notes.push(format!(
                    "refinement {} requested but no candidate exposes a {} signal; \
                     falling back to soft-boost ordering",
                    directive.as_str(),
                    metric.signal.label(),
                ));
            }
            None => {
                notes.push(format!(
                    "refinement {} does not bias candidate choice",
                    directive.as_str(),
                ));
            }
        }
    }

    if let Some(winner) = pick_by_soft_boost(&ordered) {
        notes.push(format!(
            "picked '{}' by soft-boost score {:.2}",
            winner.name,
            winner.signals.soft_boost(),
        ));
        return Some(winner);
    }

    notes.push(
        "no scoring signals available; picking the first candidate in pool order".to_string(),
    );
    let first = ordered[0];
    debug!(name = %first.name, "selection fell through to pool order");
    Some(first)
}

/// Best candidate by the metric's objective among those exposing its signal.
/// Exact metric ties go to the higher soft-boost; remaining ties keep the
/// earlier candidate (stable scan).
fn pick_by_metric<'a>(
    ordered: &[&'a NormalizedCandidate],
    metric: RefinementMetric,
) -> Option<&'a NormalizedCandidate> {
    let mut best: Option<(&NormalizedCandidate, f64)> = None;
    for candidate in ordered.iter().copied() {
        let Some(value) = metric.signal.read(candidate) else {
            continue;
        };
        match best {
            None => best = Some((candidate, value)),
            Some((incumbent, incumbent_value)) => {
                let replaces = metric.objective.better(value, incumbent_value)
                    || (value == incumbent_value
                        && candidate.signals.soft_boost() > incumbent.signals.soft_boost());
                if replaces {
                    best = Some((candidate, value));
                }
            }
        }
    }
    best.map(|(candidate, _)| candidate)
}

fn pick_by_soft_boost<'a>(ordered: &[&'a NormalizedCandidate]) -> Option<&'a NormalizedCandidate> {
    let mut best: Option<&NormalizedCandidate> = None;
    for candidate in ordered.iter().copied() {
        if !candidate.signals.has_soft_boost() {
            continue;
        }
        let replaces = match best {
            None => true,
            Some(incumbent) => candidate.signals.soft_boost() > incumbent.signals.soft_boost(),
        };
        if replaces {
            best = Some(candidate);
        }
    }
    best
}
