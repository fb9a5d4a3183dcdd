//! Wildcard selection for the surprise engine.
//!
//! Given a normalized candidate pool and an optional refinement directive,
//! pick exactly one candidate with fully deterministic tie-breaking: a
//! refinement metric when one applies and is exposed, the seasonal+visual
//! soft-boost sum for ties and fallbacks, and finally plain pool order.

mod engine;
mod types;

pub use engine::pick_candidate;
pub use types::{Objective, RefinementDirective, RefinementMetric, SignalKind};
