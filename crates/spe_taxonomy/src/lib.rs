//! Place taxonomy for the surprise engine.
//!
//! Maps free-text place type tokens onto a small closed set of semantic
//! categories, estimates an energy level when one is missing, and classifies
//! stops as mainstream (food/drink-centric) or discovery-like. All inference
//! is substring containment against fixed vocabularies in a fixed priority
//! order, so identical inputs always classify identically.

mod category;
mod classify;
mod energy;
mod stop;

pub use category::Category;
pub use classify::{is_discovery_signal, is_mainstream_like, is_mainstream_token};
pub use energy::infer_energy;
pub use stop::{enrich_for_evaluation, is_discovery_like_stop, is_mainstream_like_stop, Stop};

/// Tag that marks a stop as an intentional non-mainstream pick.
pub const DISCOVERY_TAG: &str = "discovery";
