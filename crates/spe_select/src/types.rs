use serde::{Deserialize, Serialize};

use spe_candidates::NormalizedCandidate;

/// Optional named objective that biases wildcard selection.
///
/// This is a closed set; anything else is rejected where the directive string
/// enters the engine rather than silently treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementDirective {
    MoreUnique,
    MoreEnergy,
    CloserTogether,
    MoreCurated,
    MoreAffordable,
}

impl RefinementDirective {
    /// Parse the persisted directive token. Returns `None` for anything
    /// outside the closed set; callers decide whether that is an error.
    pub fn parse(raw: &str) -> Option<RefinementDirective> {
        match raw.trim() {
            "more_unique" => Some(RefinementDirective::MoreUnique),
            "more_energy" => Some(RefinementDirective::MoreEnergy),
            "closer_together" => Some(RefinementDirective::CloserTogether),
            "more_curated" => Some(RefinementDirective::MoreCurated),
            "more_affordable" => Some(RefinementDirective::MoreAffordable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RefinementDirective::MoreUnique => "more_unique",
            RefinementDirective::MoreEnergy => "more_energy",
            RefinementDirective::CloserTogether => "closer_together",
            RefinementDirective::MoreCurated => "more_curated",
            RefinementDirective::MoreAffordable => "more_affordable",
        }
    }

    /// The scoring metric this directive maps to, if any. `more_curated`
    /// only affects the injection decision upstream, never candidate choice.
    pub fn metric(&self) -> Option<RefinementMetric> {
        match self {
            RefinementDirective::MoreEnergy => Some(RefinementMetric {
                signal: SignalKind::Energy,
                objective: Objective::Maximize,
            }),
            RefinementDirective::CloserTogether => Some(RefinementMetric {
                signal: SignalKind::Travel,
                objective: Objective::Minimize,
            }),
            RefinementDirective::MoreAffordable => Some(RefinementMetric {
                signal: SignalKind::Cost,
                objective: Objective::Minimize,
            }),
            RefinementDirective::MoreUnique => Some(RefinementMetric {
                signal: SignalKind::Novelty,
                objective: Objective::Maximize,
            }),
            RefinementDirective::MoreCurated => None,
        }
    }
}

/// Primary scoring signal a refinement metric reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Energy,
    Travel,
    Cost,
    Novelty,
}

impl SignalKind {
    pub fn read(&self, candidate: &NormalizedCandidate) -> Option<f64> {
        match self {
            SignalKind::Energy => candidate.signals.energy,
            SignalKind::Travel => candidate.signals.travel,
            SignalKind::Cost => candidate.signals.cost,
            SignalKind::Novelty => candidate.signals.novelty,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Energy => "energy",
            SignalKind::Travel => "travel",
            SignalKind::Cost => "cost",
            SignalKind::Novelty => "novelty",
        }
    }
}

/// Direction the metric optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    pub fn better(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }
}

/// A directive's primary metric: which signal to read and how to rank it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefinementMetric {
    pub signal: SignalKind,
    pub objective: Objective,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_the_closed_set() {
        assert_eq!(
            RefinementDirective::parse(" more_energy "),
            Some(RefinementDirective::MoreEnergy)
        );
        assert_eq!(RefinementDirective::parse("MORE_ENERGY"), None);
        assert_eq!(RefinementDirective::parse("cheaper"), None);
        assert_eq!(RefinementDirective::parse(""), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for directive in [
            RefinementDirective::MoreUnique,
            RefinementDirective::MoreEnergy,
            RefinementDirective::CloserTogether,
            RefinementDirective::MoreCurated,
            RefinementDirective::MoreAffordable,
        ] {
            assert_eq!(RefinementDirective::parse(directive.as_str()), Some(directive));
        }
    }

    #[test]
    fn metrics_map_per_directive() {
        let energy = RefinementDirective::MoreEnergy.metric().unwrap();
        assert_eq!(energy.signal, SignalKind::Energy);
        assert_eq!(energy.objective, Objective::Maximize);

        let travel = RefinementDirective::CloserTogether.metric().unwrap();
        assert_eq!(travel.objective, Objective::Minimize);

        assert!(RefinementDirective::MoreCurated.metric().is_none());
    }

    #[test]
    fn objectives_compare_strictly() {
        assert!(Objective::Maximize.better(0.8, 0.3));
        assert!(!Objective::Maximize.better(0.3, 0.3));
        assert!(Objective::Minimize.better(2.0, 5.0));
        assert!(!Objective::Minimize.better(5.0, 5.0));
    }
}
