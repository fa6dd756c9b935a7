use thiserror::Error;

// ---------------------------------------------------------------------------
// EmitterError
// ---------------------------------------------------------------------------

/// Errors raised while building an emitter.
///
/// Registry operations themselves (`on`, `once`, `off`, `emit`, ...) never
/// fail. Only configuration can be rejected.
#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("Invalid emitter config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience alias; the default error type is `EmitterError`.
pub type Result<T, E = EmitterError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
