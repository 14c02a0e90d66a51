use std::collections::HashSet;

use crate::mapper::FeatureMapper;

/// A trained scoring function over a flat, ordered feature vector.
///
/// This is the contract training pipelines export against. The function
/// names its features in flat form, tier prefix and all, and fixes their
/// order once; callers assemble the input vector in exactly that order
/// and delegate every encoding decision to the per-slot mappers.
///
/// Implementations must be cheap to share: `predict` takes `&self` and
/// is called concurrently.
pub trait DecisionFunction: Send + Sync {
    /// Mappers for every input slot, in vector order. Mapper names are
    /// flat feature names.
    fn features_order(&self) -> &[Box<dyn FeatureMapper>];

    /// Flat names of features the function cannot run without.
    fn required_features(&self) -> &[String];

    /// The subset of `candidates` this function does not recognize.
    ///
    /// The default treats exactly the names in [`features_order`] as
    /// recognized. Functions trained with aliases or optional inputs
    /// can override this.
    ///
    /// [`features_order`]: DecisionFunction::features_order
    fn unknown_features(&self, candidates: &HashSet<String>) -> Vec<String> {
        let known: HashSet<&str> = self
            .features_order()
            .iter()
            .map(|mapper| mapper.feature_name())
            .collect();
        let mut unknown: Vec<String> = candidates
            .iter()
            .filter(|name| !known.contains(name.as_str()))
            .cloned()
            .collect();
        unknown.sort();
        unknown
    }

    /// Identifier of the trained artifact, if the export recorded one.
    fn version(&self) -> Option<&str> {
        None
    }

    /// Scores a vector assembled in [`features_order`] order.
    ///
    /// [`features_order`]: DecisionFunction::features_order
    fn predict(&self, features: &[f64]) -> f64;
}
