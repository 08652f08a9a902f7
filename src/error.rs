use std::path::PathBuf;

use thiserror::Error;

/// Problems with the shape or content of a skills dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Malformed skills data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid skills data structure: missing skillCategories")]
    MissingCategories,
    #[error("Invalid skills data structure: no skill categories with skills")]
    NoCategories,
    #[error("Duplicate skill category id \"{0}\"")]
    DuplicateCategory(String),
    #[error("Skill category \"{category}\" has an invalid color \"{color}\"")]
    InvalidColor { category: String, color: String },
}

/// Failures while fetching a skills dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to load skills data from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Everything that can put a radar component into its error state.
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("Container element with ID \"{0}\" not found")]
    ContainerMissing(String),
    #[error(transparent)]
    InvalidData(#[from] DataError),
    #[error(transparent)]
    Load(SourceError),
    #[error("Unknown skill category \"{0}\"")]
    UnknownCategory(String),
}

impl From<SourceError> for RadarError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Data(data) => RadarError::InvalidData(data),
            other => RadarError::Load(other),
        }
    }
}
