use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors raised while building a resolver. Queries never produce errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("mapping source failed: {0}")]
    Source(String),

    #[error("failed to read mapping snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("class table is not bijective: {name} maps to both {first} and {second}")]
    NonBijectiveClassTable {
        name: String,
        first: String,
        second: String,
    },

    #[error("obfuscated resolver requires a mapping snapshot")]
    MissingMappings,
}
