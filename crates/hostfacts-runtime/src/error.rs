use thiserror::Error;

/// Errors raised while assembling the host adapters.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
