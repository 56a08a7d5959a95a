use thiserror::Error;

/// Failure reported by one of the provider control planes.
///
/// Transient provider failures are surfaced to the caller for the platform's
/// own retry policy, never swallowed here.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("provider call failed: {0}")]
    Provider(String),

    #[error("no such instance: {0}")]
    NoSuchInstance(String),

    #[error("parameter not found: {0}")]
    MissingParameter(String),
}
