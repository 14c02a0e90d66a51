use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tierml_decision::DecisionFunction;
use tierml_features::{flatten_levels, Feature, FeatureValue, LevelTiers, PerTier, Tier};

use crate::error::{ModelError, Result};
use crate::naming::{FeatureNaming, TierPrefixNaming};
use crate::selector::FeatureSelector;

/// A model a tiered scoring session can drive.
///
/// `known_features` tells the session, per tier, what the model can
/// consume and what it insists on; `predict` scores one candidate from
/// the features the session computed. Both are pure and safe to call
/// concurrently on a shared instance.
pub trait RankingModel: Send + Sync {
    type Score;

    fn known_features(&self) -> &PerTier<FeatureSelector>;

    fn predict(&self, features: &PerTier<Vec<Feature>>) -> Result<Self::Score>;
}

/// Adapts a flat [`DecisionFunction`] to a tiered session.
///
/// Construction resolves every flat name the function declares against
/// the session's tiers and freezes the result: the set of tiers the
/// model draws from, and one [`FeatureSelector`] per tier. Nothing is
/// recomputed afterwards, so a model behaves identically for its whole
/// lifetime and can be shared across threads behind an `Arc`.
pub struct DecisionModel {
    function: Arc<dyn DecisionFunction>,
    naming: Arc<dyn FeatureNaming>,
    feature_tiers: HashSet<Tier>,
    selectors: PerTier<FeatureSelector>,
}

impl DecisionModel {
    /// Wraps `function` for a session described by `session_levels`.
    ///
    /// Fails when any declared or required flat name does not resolve
    /// over the session's tiers, or when the function contradicts
    /// itself by reporting one of its own declared names as unknown.
    pub fn new(
        function: Arc<dyn DecisionFunction>,
        naming: Arc<dyn FeatureNaming>,
        session_levels: &[LevelTiers],
    ) -> Result<Self> {
        let tiers_by_name: HashMap<String, Tier> = flatten_levels(session_levels)
            .into_iter()
            .map(|tier| (tier.name().to_owned(), tier))
            .collect();

        let mut known_per_tier: PerTier<HashSet<String>> = HashMap::new();
        for mapper in function.features_order() {
            let (tier, name) = naming.deserialize(mapper.feature_name(), &tiers_by_name)?;
            known_per_tier.entry(tier).or_default().insert(name);
        }

        let mut required_per_tier: PerTier<HashSet<String>> = HashMap::new();
        for flat in function.required_features() {
            let (tier, name) = naming.deserialize(flat, &tiers_by_name)?;
            required_per_tier.entry(tier).or_default().insert(name);
        }

        let feature_tiers: HashSet<Tier> = known_per_tier.keys().cloned().collect();
        log::debug!(
            "Wrapping a scoring function over {} tiers ({} features, version {:?})",
            feature_tiers.len(),
            function.features_order().len(),
            function.version()
        );

        let mut selectors: PerTier<FeatureSelector> =
            HashMap::with_capacity(known_per_tier.len());
        for (tier, known) in &known_per_tier {
            let required = required_per_tier.remove(tier).unwrap_or_default();
            let selector = FeatureSelector::new(
                tier.clone(),
                required,
                Arc::clone(&function),
                Arc::clone(&naming),
            );
            let inconsistent = selector.unknown_within_tier(known)?;
            if !inconsistent.is_empty() {
                let mut names: Vec<String> = inconsistent.into_iter().collect();
                names.sort();
                return Err(ModelError::InconsistentFunction(names));
            }
            selectors.insert(tier.clone(), selector);
        }

        if !required_per_tier.is_empty() {
            let mut stray: Vec<&str> =
                required_per_tier.keys().map(Tier::name).collect();
            stray.sort_unstable();
            log::warn!("Required features name tiers outside the declared order: {stray:?}");
        }

        Ok(Self {
            function,
            naming,
            feature_tiers,
            selectors,
        })
    }

    /// [`Self::new`] with the stock `/`-separated naming scheme.
    pub fn with_default_naming(
        function: Arc<dyn DecisionFunction>,
        session_levels: &[LevelTiers],
    ) -> Result<Self> {
        Self::new(
            function,
            Arc::new(TierPrefixNaming::default()),
            session_levels,
        )
    }

    /// The tiers this model draws features from. `predict` expects
    /// exactly these as its keys.
    #[must_use]
    pub const fn feature_tiers(&self) -> &HashSet<Tier> {
        &self.feature_tiers
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.function.version()
    }
}

impl RankingModel for DecisionModel {
    type Score = f64;

    fn known_features(&self) -> &PerTier<FeatureSelector> {
        &self.selectors
    }

    /// Assembles the function's input vector and delegates.
    ///
    /// Every tier of the model must be present as a key, even with an
    /// empty feature list. Features the function never declared are
    /// ignored; declared features that were not computed are encoded by
    /// their mapper's absent value.
    fn predict(&self, features: &PerTier<Vec<Feature>>) -> Result<f64> {
        let given: HashSet<&Tier> = features.keys().collect();
        let expected: HashSet<&Tier> = self.feature_tiers.iter().collect();
        if given != expected {
            return Err(ModelError::TierMismatch {
                given: sorted_names(features.keys()),
                expected: sorted_names(self.feature_tiers.iter()),
            });
        }

        let mut by_flat: HashMap<String, &FeatureValue> = HashMap::new();
        for (tier, tier_features) in features {
            for feature in tier_features {
                by_flat.insert(self.naming.serialize(tier, feature.name()), feature.value());
            }
        }

        let order = self.function.features_order();
        let mut vector = Vec::with_capacity(order.len());
        for mapper in order {
            let value = by_flat.get(mapper.feature_name()).copied();
            vector.push(mapper.as_array_value(value));
        }
        Ok(self.function.predict(&vector))
    }
}

impl fmt::Debug for DecisionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionModel")
            .field("feature_tiers", &self.feature_tiers)
            .field("version", &self.function.version())
            .finish_non_exhaustive()
    }
}

fn sorted_names<'a>(tiers: impl Iterator<Item = &'a Tier>) -> Vec<String> {
    let mut names: Vec<String> = tiers.map(|tier| tier.name().to_owned()).collect();
    names.sort();
    names
}
