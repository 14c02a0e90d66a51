//! # TierML Features
//!
//! Shared vocabulary for tiered ML features: tiers, declarations, and
//! observed values.
//!
//! A *tier* names a category of entity that features describe ("file",
//! "project", ...). A [`FeatureDeclaration`] is a named, typed feature
//! scoped to a tier; a [`Feature`] binds a declaration to the value
//! observed for one tier instance at prediction time. Everything here is
//! immutable plain data consumed by the decision and model crates.

mod error;
mod feature;
mod tier;
mod value;

pub use error::{FeatureError, Result};
pub use feature::{Feature, FeatureDeclaration};
pub use tier::{flatten_levels, LevelTiers, PerTier, Tier};
pub use value::{FeatureValue, ValueKind};
