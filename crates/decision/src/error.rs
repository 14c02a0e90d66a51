use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecisionError>;

#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("Invalid model metadata: {0}")]
    InvalidMetadata(String),

    #[error("Duplicate feature '{0}' in model metadata")]
    DuplicateFeature(String),

    #[error("Expected a vector of {expected} values, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
