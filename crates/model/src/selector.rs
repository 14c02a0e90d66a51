use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tierml_decision::DecisionFunction;
use tierml_features::{FeatureDeclaration, Tier};

use crate::error::{ModelError, Result};
use crate::naming::FeatureNaming;

/// The outcome of offering a tier's available features to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Everything the function insists on is available. `selected` is
    /// the subset of the offered declarations the function recognizes.
    Complete {
        selected: HashSet<FeatureDeclaration>,
    },
    /// Some required features are absent. The selection is still
    /// usable; scoring with it substitutes each absent feature's
    /// trained encoding.
    Incomplete {
        selected: HashSet<FeatureDeclaration>,
        missing: BTreeSet<String>,
    },
}

impl Selection {
    #[must_use]
    pub const fn selected(&self) -> &HashSet<FeatureDeclaration> {
        match self {
            Self::Complete { selected } | Self::Incomplete { selected, .. } => selected,
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// A human-readable account of what is missing, for logs and
    /// diagnostics. `None` when the selection is complete.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Complete { .. } => None,
            Self::Incomplete { selected, missing } => {
                let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
                let mut has: Vec<&str> =
                    selected.iter().map(FeatureDeclaration::name).collect();
                has.sort_unstable();
                Some(format!(
                    "Scoring function requires more features to run. \
                     Missing: {missing:?}, Has: {has:?}"
                ))
            }
        }
    }
}

/// Per-tier feature policy of one model.
///
/// A selector answers, for its tier only, which of the features a
/// session can compute the wrapped function actually consumes, and
/// whether the function's requirements for that tier are met. All
/// names on this interface are tier-local; flattening happens inside.
pub struct FeatureSelector {
    tier: Tier,
    required: HashSet<String>,
    function: Arc<dyn DecisionFunction>,
    naming: Arc<dyn FeatureNaming>,
}

impl FeatureSelector {
    pub(crate) fn new(
        tier: Tier,
        required: HashSet<String>,
        function: Arc<dyn DecisionFunction>,
        naming: Arc<dyn FeatureNaming>,
    ) -> Self {
        Self {
            tier,
            required,
            function,
            naming,
        }
    }

    #[must_use]
    pub const fn tier(&self) -> &Tier {
        &self.tier
    }

    /// Tier-local names the function cannot run without.
    #[must_use]
    pub const fn required_features(&self) -> &HashSet<String> {
        &self.required
    }

    /// Partitions `available` into consumed and ignored, and checks the
    /// tier's requirements.
    pub fn select(&self, available: &HashSet<FeatureDeclaration>) -> Result<Selection> {
        let names: HashSet<String> = available
            .iter()
            .map(|declaration| declaration.name().to_owned())
            .collect();
        let unknown = self.unknown_within_tier(&names)?;
        let selected: HashSet<FeatureDeclaration> = available
            .iter()
            .filter(|declaration| !unknown.contains(declaration.name()))
            .cloned()
            .collect();
        let missing: BTreeSet<String> = self
            .required
            .iter()
            .filter(|name| !names.contains(*name))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(Selection::Complete { selected })
        } else {
            Ok(Selection::Incomplete { selected, missing })
        }
    }

    /// Whether the function consumes this single declaration.
    pub fn selects(&self, declaration: &FeatureDeclaration) -> Result<bool> {
        let mut names = HashSet::with_capacity(1);
        names.insert(declaration.name().to_owned());
        Ok(self.unknown_within_tier(&names)?.is_empty())
    }

    /// Asks the wrapped function which of the given tier-local names it
    /// does not recognize.
    ///
    /// The function answers in flat names; anything it reports that was
    /// not among the candidates is a contract violation.
    pub(crate) fn unknown_within_tier(
        &self,
        names: &HashSet<String>,
    ) -> Result<HashSet<String>> {
        let mut flat_to_local: HashMap<String, &str> = HashMap::with_capacity(names.len());
        for name in names {
            flat_to_local.insert(self.naming.serialize(&self.tier, name), name);
        }
        let candidates: HashSet<String> = flat_to_local.keys().cloned().collect();

        let mut unknown = HashSet::new();
        for flat in self.function.unknown_features(&candidates) {
            let Some(local) = flat_to_local.get(flat.as_str()) else {
                return Err(ModelError::ForeignUnknown(flat));
            };
            unknown.insert((*local).to_owned());
        }
        Ok(unknown)
    }
}

impl fmt::Debug for FeatureSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSelector")
            .field("tier", &self.tier)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::TierPrefixNaming;
    use pretty_assertions::assert_eq;
    use tierml_decision::{FeatureMapper, FloatMapper};

    struct FileRanker {
        order: Vec<Box<dyn FeatureMapper>>,
        required: Vec<String>,
    }

    impl FileRanker {
        fn new() -> Self {
            Self {
                order: vec![
                    Box::new(FloatMapper::new("file/len", 0.0)),
                    Box::new(FloatMapper::new("file/depth", 0.0)),
                    Box::new(FloatMapper::new("usage/is_local", 0.0)),
                ],
                required: vec!["file/len".to_owned()],
            }
        }
    }

    impl DecisionFunction for FileRanker {
        fn features_order(&self) -> &[Box<dyn FeatureMapper>] {
            &self.order
        }

        fn required_features(&self) -> &[String] {
            &self.required
        }

        fn predict(&self, features: &[f64]) -> f64 {
            features.iter().sum()
        }
    }

    /// Violates the contract by reporting a name it was never offered.
    struct LyingRanker(FileRanker);

    impl DecisionFunction for LyingRanker {
        fn features_order(&self) -> &[Box<dyn FeatureMapper>] {
            self.0.features_order()
        }

        fn required_features(&self) -> &[String] {
            self.0.required_features()
        }

        fn unknown_features(&self, _candidates: &HashSet<String>) -> Vec<String> {
            vec!["file/made_up".to_owned()]
        }

        fn predict(&self, features: &[f64]) -> f64 {
            self.0.predict(features)
        }
    }

    fn file_selector(function: Arc<dyn DecisionFunction>) -> FeatureSelector {
        let mut required = HashSet::new();
        required.insert("len".to_owned());
        FeatureSelector::new(
            Tier::new("file"),
            required,
            function,
            Arc::new(TierPrefixNaming::default()),
        )
    }

    fn declarations(names: &[&str]) -> HashSet<FeatureDeclaration> {
        names.iter().map(|name| FeatureDeclaration::float(*name)).collect()
    }

    #[test]
    fn select_is_complete_when_required_features_are_offered() {
        let selector = file_selector(Arc::new(FileRanker::new()));
        let selection = selector.select(&declarations(&["len", "depth"])).unwrap();

        assert!(selection.is_complete());
        assert_eq!(selection.selected(), &declarations(&["len", "depth"]));
        assert_eq!(selection.details(), None);
    }

    #[test]
    fn select_drops_declarations_the_function_ignores() {
        let selector = file_selector(Arc::new(FileRanker::new()));
        let selection = selector
            .select(&declarations(&["len", "mtime"]))
            .unwrap();

        assert!(selection.is_complete());
        assert_eq!(selection.selected(), &declarations(&["len"]));
    }

    #[test]
    fn select_reports_missing_required_features() {
        let selector = file_selector(Arc::new(FileRanker::new()));
        let selection = selector.select(&declarations(&["depth"])).unwrap();

        let Selection::Incomplete { selected, missing } = &selection else {
            panic!("expected an incomplete selection");
        };
        assert_eq!(selected, &declarations(&["depth"]));
        assert_eq!(missing.iter().collect::<Vec<_>>(), vec!["len"]);
        assert_eq!(
            selection.details().unwrap(),
            "Scoring function requires more features to run. \
             Missing: [\"len\"], Has: [\"depth\"]"
        );
    }

    #[test]
    fn selects_answers_for_a_single_declaration() {
        let selector = file_selector(Arc::new(FileRanker::new()));
        assert!(selector.selects(&FeatureDeclaration::float("len")).unwrap());
        assert!(!selector.selects(&FeatureDeclaration::float("mtime")).unwrap());
    }

    #[test]
    fn a_foreign_unknown_name_is_a_contract_violation() {
        let selector = file_selector(Arc::new(LyingRanker(FileRanker::new())));
        let err = selector.select(&declarations(&["len"])).unwrap_err();
        assert!(matches!(err, ModelError::ForeignUnknown(name) if name == "file/made_up"));
    }
}
