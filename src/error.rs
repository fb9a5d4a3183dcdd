use thiserror::Error;

/// Boundary errors for a contract-enforcement run.
///
/// The engine itself degrades with report notes instead of failing; the only
/// surfaced errors are malformed caller input that must be rejected before
/// the run starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Invalid engine configuration.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
    /// The plan metadata carries a refinement directive outside the closed
    /// set. Rejected at the boundary rather than silently ignored.
    #[error("unrecognized refinement directive: {0}")]
    UnknownRefinement(String),
}
