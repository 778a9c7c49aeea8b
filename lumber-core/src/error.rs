use thiserror::Error;

/// Unified error type for lumber.
///
/// Only construction-time operations (config loading, sink setup) return
/// errors. Emit calls are fire-and-forget by contract and have no error
/// path back to the caller.
#[derive(Error, Debug)]
pub enum LumberError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
