//! Candidate normalization for the surprise engine.
//!
//! Raw place candidates arrive from several heterogeneous sources: arrays
//! embedded in plan metadata, the plan's own stops, or a built-in catalog of
//! generic filler places. This crate converts every source into one canonical
//! [`NormalizedCandidate`] shape, extracts the optional numeric scoring
//! signals once up front, and deduplicates by identity key so no two pool
//! entries refer to the same place.

mod catalog;
mod normalize;
mod types;

pub use catalog::fallback_catalog;
pub use normalize::{
    candidate_from_stop, normalize_raw_candidate, normalized_pool, CandidateSource,
    PoolProvenance, CANDIDATE_METADATA_KEYS,
};
pub use types::{identity_key_for, slugify, CandidateSignals, NormalizedCandidate};
