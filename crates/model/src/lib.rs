//! # TierML Model
//!
//! Adapts flat, legacy scoring functions to tier-structured feature
//! sessions.
//!
//! ## Features
//!
//! - **Name bridging** between tiered sessions and flat functions,
//!   with a pluggable [`FeatureNaming`] scheme
//! - **Per-tier selection**: which features a model consumes, and
//!   which it cannot run without
//! - **Vector assembly** in the function's trained order, with absent
//!   features encoded by their own mappers
//!
//! ## Architecture
//!
//! ```text
//! PerTier<Vec<Feature>>
//!     │
//!     ├──> tier set check (keys must equal the model's tiers)
//!     │
//!     ├──> flat names (FeatureNaming::serialize)
//!     │
//!     └──> ordered vector (one slot per mapper, absent -> default)
//!            └─> DecisionFunction::predict -> f64
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::collections::HashSet;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use tierml_decision::LinearFunction;
//! use tierml_features::{LevelTiers, PerTier, Tier};
//! use tierml_model::{DecisionModel, RankingModel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let function = LinearFunction::from_file(Path::new("ranker.json"))?;
//!     let levels = vec![LevelTiers::new(
//!         [Tier::new("file"), Tier::new("usage")].into_iter().collect(),
//!         HashSet::new(),
//!     )];
//!     let model = DecisionModel::with_default_naming(Arc::new(function), &levels)?;
//!
//!     let mut features = PerTier::new();
//!     for tier in model.feature_tiers() {
//!         features.insert(tier.clone(), Vec::new());
//!     }
//!     let score = model.predict(&features)?;
//!     println!("score = {score}");
//!     Ok(())
//! }
//! ```

mod error;
mod model;
mod naming;
mod selector;

pub use error::{ModelError, Result};
pub use model::{DecisionModel, RankingModel};
pub use naming::{FeatureNaming, TierPrefixNaming};
pub use selector::{FeatureSelector, Selection};

// Re-export the shared vocabulary for convenience
pub use tierml_decision::DecisionFunction;
pub use tierml_features::{Feature, FeatureDeclaration, FeatureValue, LevelTiers, PerTier, Tier};
