use std::path::Path;

use ndarray::{Array1, ArrayView1};

use crate::error::{DecisionError, Result};
use crate::function::DecisionFunction;
use crate::mapper::FeatureMapper;
use crate::metadata::{FeatureSpec, ModelMetadata};

/// A linear scoring function: `dot(weights, vector) + intercept`.
///
/// The slot order is fixed at construction and never changes, so one
/// instance can be shared across threads freely.
#[derive(Debug)]
pub struct LinearFunction {
    mappers: Vec<Box<dyn FeatureMapper>>,
    required: Vec<String>,
    weights: Array1<f64>,
    intercept: f64,
    version: Option<String>,
}

impl LinearFunction {
    pub fn new(
        mappers: Vec<Box<dyn FeatureMapper>>,
        required: Vec<String>,
        weights: Vec<f64>,
        intercept: f64,
        version: Option<String>,
    ) -> Result<Self> {
        if weights.len() != mappers.len() {
            return Err(DecisionError::InvalidDimension {
                expected: mappers.len(),
                actual: weights.len(),
            });
        }
        Ok(Self {
            mappers,
            required,
            weights: Array1::from(weights),
            intercept,
            version,
        })
    }

    /// Builds the function a metadata file describes.
    ///
    /// Fails when the metadata carries no `weights`.
    pub fn from_metadata(metadata: &ModelMetadata) -> Result<Self> {
        let weights = metadata.weights().ok_or_else(|| {
            DecisionError::InvalidMetadata(
                "a linear function needs weights in its metadata".to_string(),
            )
        })?;
        let mappers = metadata.features().iter().map(FeatureSpec::mapper).collect();
        let required = metadata
            .features()
            .iter()
            .filter(|feature| feature.is_required())
            .map(|feature| feature.name().to_owned())
            .collect();
        Self::new(
            mappers,
            required,
            weights.to_vec(),
            metadata.intercept(),
            metadata.version().map(str::to_owned),
        )
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_metadata(&ModelMetadata::from_bytes(bytes)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_metadata(&ModelMetadata::from_file(path)?)
    }
}

impl DecisionFunction for LinearFunction {
    fn features_order(&self) -> &[Box<dyn FeatureMapper>] {
        &self.mappers
    }

    fn required_features(&self) -> &[String] {
        &self.required
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn predict(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.weights.len());
        ArrayView1::from(features).dot(&self.weights) + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::FloatMapper;
    use pretty_assertions::assert_eq;

    fn float_mappers(names: &[&str]) -> Vec<Box<dyn FeatureMapper>> {
        names
            .iter()
            .map(|name| Box::new(FloatMapper::new(*name, 0.0)) as Box<dyn FeatureMapper>)
            .collect()
    }

    #[test]
    fn predict_is_a_dot_product_plus_intercept() {
        let function = LinearFunction::new(
            float_mappers(&["a", "b"]),
            Vec::new(),
            vec![2.0, -1.0],
            0.5,
            None,
        )
        .unwrap();
        assert_eq!(function.predict(&[3.0, 4.0]), 2.0 * 3.0 - 4.0 + 0.5);
    }

    #[test]
    fn rejects_weights_of_the_wrong_length() {
        let err =
            LinearFunction::new(float_mappers(&["a", "b"]), Vec::new(), vec![1.0], 0.0, None)
                .unwrap_err();
        assert!(
            matches!(err, DecisionError::InvalidDimension { expected: 2, actual: 1 }),
            "{err}"
        );
    }

    #[test]
    fn from_metadata_wires_mappers_required_and_version() {
        let metadata = ModelMetadata::from_bytes(
            br#"{
                "version": "v7",
                "features": [
                    { "name": "file/len", "kind": "float", "required": true },
                    { "name": "file/depth", "kind": "float" }
                ],
                "weights": [1.0, 10.0],
                "intercept": 2.0
            }"#,
        )
        .unwrap();
        let function = LinearFunction::from_metadata(&metadata).unwrap();

        assert_eq!(function.version(), Some("v7"));
        assert_eq!(function.required_features(), &["file/len".to_owned()]);
        assert_eq!(function.features_order().len(), 2);
        assert_eq!(function.predict(&[3.0, 0.5]), 3.0 + 5.0 + 2.0);
    }

    #[test]
    fn from_metadata_requires_weights() {
        let metadata = ModelMetadata::from_bytes(
            br#"{ "features": [{ "name": "file/len", "kind": "float" }] }"#,
        )
        .unwrap();
        let err = LinearFunction::from_metadata(&metadata).unwrap_err();
        assert!(err.to_string().contains("needs weights"));
    }
}
