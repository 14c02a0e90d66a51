use std::collections::HashMap;

use tierml_features::Tier;

use crate::error::{ModelError, Result};

/// How a tier and a tier-local feature name become one flat name.
///
/// Scoring functions only ever see flat names; the session side only
/// ever sees tiers and local names. A naming scheme bridges the two and
/// must be involutive: deserializing a name the scheme produced yields
/// the original parts, and re-serializing those parts reproduces the
/// name exactly.
pub trait FeatureNaming: Send + Sync {
    fn serialize(&self, tier: &Tier, feature_name: &str) -> String;

    /// Splits a flat name back into its tier and local name.
    ///
    /// `tiers_by_name` holds every tier the session supplies, keyed by
    /// tier name.
    fn deserialize(
        &self,
        flat_name: &str,
        tiers_by_name: &HashMap<String, Tier>,
    ) -> Result<(Tier, String)>;
}

/// The stock scheme: `<tier><separator><feature>`, split on the *last*
/// separator.
///
/// Splitting on the last occurrence lets tier names themselves contain
/// the separator, as long as the whole prefix names a supplied tier.
/// Feature names must not contain it.
#[derive(Debug, Clone, Copy)]
pub struct TierPrefixNaming {
    separator: char,
}

impl TierPrefixNaming {
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }
}

impl Default for TierPrefixNaming {
    fn default() -> Self {
        Self::new('/')
    }
}

impl FeatureNaming for TierPrefixNaming {
    fn serialize(&self, tier: &Tier, feature_name: &str) -> String {
        format!("{}{}{}", tier.name(), self.separator, feature_name)
    }

    fn deserialize(
        &self,
        flat_name: &str,
        tiers_by_name: &HashMap<String, Tier>,
    ) -> Result<(Tier, String)> {
        let split = flat_name
            .rfind(self.separator)
            .ok_or_else(|| ModelError::MalformedFeatureName(flat_name.to_owned()))?;
        let tier_name = &flat_name[..split];
        let feature_name = &flat_name[split + self.separator.len_utf8()..];
        let tier = tiers_by_name
            .get(tier_name)
            .ok_or_else(|| ModelError::UnknownTier {
                name: flat_name.to_owned(),
                tier: tier_name.to_owned(),
                available: sorted_tier_names(tiers_by_name),
            })?;
        Ok((tier.clone(), feature_name.to_owned()))
    }
}

fn sorted_tier_names(tiers_by_name: &HashMap<String, Tier>) -> Vec<String> {
    let mut names: Vec<String> = tiers_by_name.keys().cloned().collect();
    names.sort();
    names
}
