/// Errors surfaced by the viewer core.
///
/// Numeric degeneracies in input (NaN deltas, zero-length pinches) are not
/// errors: they are discarded at the input boundary.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("render surface is not attached")]
    SurfaceMissing,
    #[error("viewer is already running")]
    AlreadyRunning,
    #[error("viewer has been stopped")]
    Stopped,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
