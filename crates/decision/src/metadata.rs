use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::error::{DecisionError, Result};
use crate::mapper::{BinaryMapper, CategoryMapper, FeatureMapper, FloatMapper};

/// Metadata schema this build understands.
pub const SCHEMA_VERSION: u32 = 1;

/// How a metadata feature is encoded into its vector slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Float,
    Binary,
    Category,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMetadata {
    #[serde(default)]
    schema_version: Option<u32>,
    version: Option<String>,
    #[serde(default)]
    features: Vec<RawFeature>,
    weights: Option<Vec<f64>>,
    #[serde(default)]
    intercept: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFeature {
    name: String,
    kind: FeatureKind,
    #[serde(default)]
    default: f64,
    #[serde(default)]
    required: bool,
    categories: Option<Vec<String>>,
}

/// One validated feature entry of a model description.
#[derive(Clone, Debug)]
pub struct FeatureSpec {
    name: String,
    kind: FeatureKind,
    default: f64,
    required: bool,
    categories: Vec<String>,
}

impl FeatureSpec {
    fn from_raw(raw: RawFeature) -> Result<Self> {
        if raw.name.trim().is_empty() {
            return Err(DecisionError::InvalidMetadata(
                "feature name must not be empty".to_string(),
            ));
        }
        let categories = match (raw.kind, raw.categories) {
            (FeatureKind::Category, Some(categories)) if !categories.is_empty() => categories,
            (FeatureKind::Category, _) => {
                return Err(DecisionError::InvalidMetadata(format!(
                    "category feature '{}' must list its categories",
                    raw.name
                )));
            }
            (_, Some(_)) => {
                return Err(DecisionError::InvalidMetadata(format!(
                    "feature '{}' is not a category but lists categories",
                    raw.name
                )));
            }
            (_, None) => Vec::new(),
        };
        Ok(Self {
            name: raw.name,
            kind: raw.kind,
            default: raw.default,
            required: raw.required,
            categories,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> FeatureKind {
        self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Builds the mapper this entry describes.
    #[must_use]
    pub fn mapper(&self) -> Box<dyn FeatureMapper> {
        match self.kind {
            FeatureKind::Float => Box::new(FloatMapper::new(self.name.clone(), self.default)),
            FeatureKind::Binary => Box::new(BinaryMapper::new(self.name.clone(), self.default)),
            FeatureKind::Category => Box::new(CategoryMapper::new(
                self.name.clone(),
                self.categories.clone(),
                self.default,
            )),
        }
    }
}

/// A validated model description loaded from a JSON or TOML file.
///
/// Feature order in the file is the input vector order. `weights` is
/// optional here so the same format can describe functions whose
/// arithmetic lives elsewhere; building a [`LinearFunction`] from
/// metadata without weights fails.
///
/// [`LinearFunction`]: crate::LinearFunction
#[derive(Clone, Debug)]
pub struct ModelMetadata {
    version: Option<String>,
    features: Vec<FeatureSpec>,
    weights: Option<Vec<f64>>,
    intercept: f64,
}

impl ModelMetadata {
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read model metadata {}", path.display()))?;
        let metadata = Self::from_bytes(&bytes)?;
        log::info!(
            "Loaded model metadata from {} ({} features, version {:?})",
            path.display(),
            metadata.features.len(),
            metadata.version
        );
        Ok(metadata)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawMetadata) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != SCHEMA_VERSION {
                return Err(DecisionError::InvalidMetadata(format!(
                    "schema_version {schema_version} is not supported (expected {SCHEMA_VERSION})"
                )));
            }
        }
        if raw.features.is_empty() {
            return Err(DecisionError::InvalidMetadata(
                "feature list must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut features = Vec::with_capacity(raw.features.len());
        for raw_feature in raw.features {
            if !seen.insert(raw_feature.name.clone()) {
                return Err(DecisionError::DuplicateFeature(raw_feature.name));
            }
            features.push(FeatureSpec::from_raw(raw_feature)?);
        }

        if let Some(weights) = &raw.weights {
            if weights.len() != features.len() {
                return Err(DecisionError::InvalidDimension {
                    expected: features.len(),
                    actual: weights.len(),
                });
            }
        }

        Ok(Self {
            version: raw.version,
            features,
            weights: raw.weights,
            intercept: raw.intercept,
        })
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    #[must_use]
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }
}

fn parse_raw(bytes: &[u8]) -> anyhow::Result<RawMetadata> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!(
                    "Metadata is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                )
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML metadata to JSON: {err}"))?
        }
    };
    serde_json::from_value(value).map_err(|err| anyhow!("Metadata parse error: {err}"))
}
