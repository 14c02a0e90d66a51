use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Feature name '{0}' does not contain a tier name")]
    MalformedFeatureName(String),

    #[error("Feature name '{name}' refers to unknown tier '{tier}' (available tiers: {available:?})")]
    UnknownTier {
        name: String,
        tier: String,
        available: Vec<String>,
    },

    #[error("Given feature tiers are {given:?}, but this model needs {expected:?}")]
    TierMismatch {
        given: Vec<String>,
        expected: Vec<String>,
    },

    #[error("These features are known and unknown at the same time: {0:?}")]
    InconsistentFunction(Vec<String>),

    #[error("Decision function reported an unknown feature that was not given: '{0}'")]
    ForeignUnknown(String),
}
