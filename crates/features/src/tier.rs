use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named group of features that are computed together.
///
/// Tiers partition the feature space of a scoring session: every feature
/// belongs to exactly one tier, and models declare up front which tiers
/// they draw from. Tier identity is the name alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tier {
    name: String,
}

impl Tier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Values keyed by tier. Most per-model state is shaped this way.
pub type PerTier<T> = HashMap<Tier, T>;

/// Tiers available at one level of a scoring session.
///
/// A session is described by a stack of levels. Each level distinguishes
/// the tiers it scores over (`main`) from tiers that are merely visible
/// to it (`additional`); a model consuming the session treats both the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTiers {
    pub main: HashSet<Tier>,
    pub additional: HashSet<Tier>,
}

impl LevelTiers {
    pub fn new(main: HashSet<Tier>, additional: HashSet<Tier>) -> Self {
        Self { main, additional }
    }

    /// All tiers of this level, main and additional alike.
    pub fn tiers(&self) -> impl Iterator<Item = &Tier> {
        self.main.iter().chain(self.additional.iter())
    }
}

/// Collects every tier mentioned anywhere in a session's level stack.
#[must_use]
pub fn flatten_levels(levels: &[LevelTiers]) -> HashSet<Tier> {
    levels
        .iter()
        .flat_map(LevelTiers::tiers)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tiers(names: &[&str]) -> HashSet<Tier> {
        names.iter().map(|name| Tier::new(*name)).collect()
    }

    #[test]
    fn tier_identity_is_the_name() {
        assert_eq!(Tier::new("file"), Tier::new("file"));
        assert_ne!(Tier::new("file"), Tier::new("session"));
    }

    #[test]
    fn display_is_the_bare_name() {
        assert_eq!(Tier::new("lookup").to_string(), "lookup");
    }

    #[test]
    fn flatten_merges_main_and_additional_across_levels() {
        let levels = vec![
            LevelTiers::new(tiers(&["session"]), tiers(&["environment"])),
            LevelTiers::new(tiers(&["file"]), HashSet::new()),
        ];

        let mut flat: Vec<String> = flatten_levels(&levels)
            .into_iter()
            .map(|t| t.name().to_owned())
            .collect();
        flat.sort();
        assert_eq!(flat, vec!["environment", "file", "session"]);
    }

    #[test]
    fn flatten_deduplicates_shared_tiers() {
        let levels = vec![
            LevelTiers::new(tiers(&["file"]), tiers(&["session"])),
            LevelTiers::new(tiers(&["session"]), tiers(&["file"])),
        ];

        assert_eq!(flatten_levels(&levels).len(), 2);
    }

    #[test]
    fn serde_round_trip() {
        let tier = Tier::new("file");
        let json = serde_json::to_string(&tier).unwrap();
        let back: Tier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tier);
    }
}
