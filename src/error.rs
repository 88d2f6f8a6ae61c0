//! Error types for loading and querying game data.

use std::path::PathBuf;

use crate::data::ResourceType;

/// Errors surfaced while loading catalogs, selecting from them, or
/// restoring saved records.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// Random selection found no candidates.
    #[error("no resources available for filter {filter:?}")]
    EmptyPool { filter: Option<ResourceType> },

    #[error("recipe '{recipe}' requires unknown resource '{resource}'")]
    UnknownIngredient { recipe: String, resource: String },

    #[error("recipe '{recipe}' needs a positive count of '{resource}'")]
    InvalidIngredientCount { recipe: String, resource: String },

    #[error("malformed record: {0}")]
    Record(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type DataResult<T> = Result<T, DataError>;
