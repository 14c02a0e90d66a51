use thiserror::Error;

use crate::value::{FeatureValue, ValueKind};

pub type Result<T> = std::result::Result<T, FeatureError>;

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Feature '{name}' is declared as {declared:?} but was given {given}")]
    KindMismatch {
        name: String,
        declared: ValueKind,
        given: FeatureValue,
    },
}
