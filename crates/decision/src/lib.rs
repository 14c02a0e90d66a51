//! # TierML Decision
//!
//! The contract a trained scoring function exposes to the rest of the
//! workspace, plus a linear implementation loadable from metadata files.
//!
//! A [`DecisionFunction`] owns everything the training pipeline fixed:
//! the order of the input vector, how each slot is derived from a raw
//! feature value (its [`FeatureMapper`]), which features must be present,
//! and the arithmetic that turns the vector into a score. Callers never
//! encode values themselves; they hand mappers the raw values, or `None`
//! for a feature they could not compute, and the mapper picks the number
//! the function was trained with.
//!
//! ## Features
//!
//! - **Mappers**: float, binary, and categorical encodings with
//!   per-feature defaults for absent values
//! - **Linear functions**: dot-product scoring over an ordered vector,
//!   with weights and intercept
//! - **Metadata**: JSON or TOML model descriptions validated at load
//!   time

mod error;
mod function;
mod linear;
mod mapper;
mod metadata;

pub use error::{DecisionError, Result};
pub use function::DecisionFunction;
pub use linear::LinearFunction;
pub use mapper::{BinaryMapper, CategoryMapper, FeatureMapper, FloatMapper};
pub use metadata::{FeatureKind, FeatureSpec, ModelMetadata, SCHEMA_VERSION};
