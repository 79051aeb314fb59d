use std::path::PathBuf;

use thiserror::Error;

/// Error type for Studio lookup, configuration, and version reporting.
#[derive(Debug, Error)]
pub enum PsdkError {
    /// Underlying IO error (stdout writes, stdin reads).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration record could not be written back to disk.
    #[error("Failed to write configuration at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration record could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] serde_yaml::Error),

    /// The path does not contain any known psdk-binaries subpath.
    #[error("Path does not contain psdk-binaries: {0}")]
    InvalidStudioPath(PathBuf),

    /// Standard input reached end-of-file while a Studio path was requested.
    #[error("Input closed before a valid Pokémon Studio path was provided")]
    InputClosed,

    /// A configured retry cap was reached.
    #[error("Gave up after {attempts} attempt(s): {what}")]
    RetriesExhausted { what: &'static str, attempts: usize },
}

/// Convenience result type for core operations.
pub type PsdkResult<T> = Result<T, PsdkError>;
