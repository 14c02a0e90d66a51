use std::fmt;

use tierml_features::FeatureValue;

/// Turns one observed feature value into one slot of the input vector.
///
/// A mapper belongs to the scoring function it was trained with: it
/// knows the feature's name, the numeric encoding of each admissible
/// value, and the number to emit when the feature was not computed at
/// all. Absence is an input like any other, so callers pass `None`
/// rather than inventing a placeholder value themselves.
pub trait FeatureMapper: fmt::Debug + Send + Sync {
    /// The feature's name as the scoring function knows it, without any
    /// tier prefix.
    fn feature_name(&self) -> &str;

    /// Encodes a value, or the absence of one, as the slot's number.
    fn as_array_value(&self, value: Option<&FeatureValue>) -> f64;
}

/// Passes numeric values through, substituting a default otherwise.
#[derive(Debug, Clone)]
pub struct FloatMapper {
    name: String,
    default: f64,
}

impl FloatMapper {
    pub fn new(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

impl FeatureMapper for FloatMapper {
    fn feature_name(&self) -> &str {
        &self.name
    }

    fn as_array_value(&self, value: Option<&FeatureValue>) -> f64 {
        match value {
            Some(FeatureValue::Float(v)) => *v,
            Some(FeatureValue::Int(v)) => *v as f64,
            _ => self.default,
        }
    }
}

/// Encodes booleans as 0.0 or 1.0, substituting a default otherwise.
///
/// Integer 0 and 1 are accepted as spellings of the two booleans, since
/// training exports commonly store flags that way.
#[derive(Debug, Clone)]
pub struct BinaryMapper {
    name: String,
    default: f64,
}

impl BinaryMapper {
    pub fn new(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

impl FeatureMapper for BinaryMapper {
    fn feature_name(&self) -> &str {
        &self.name
    }

    fn as_array_value(&self, value: Option<&FeatureValue>) -> f64 {
        match value {
            Some(FeatureValue::Bool(true)) | Some(FeatureValue::Int(1)) => 1.0,
            Some(FeatureValue::Bool(false)) | Some(FeatureValue::Int(0)) => 0.0,
            _ => self.default,
        }
    }
}

/// Encodes a category as its index in the trained vocabulary.
///
/// Categories outside the vocabulary, values of the wrong kind, and
/// absent values all map to the default.
#[derive(Debug, Clone)]
pub struct CategoryMapper {
    name: String,
    categories: Vec<String>,
    default: f64,
}

impl CategoryMapper {
    pub fn new(name: impl Into<String>, categories: Vec<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            categories,
            default,
        }
    }
}

impl FeatureMapper for CategoryMapper {
    fn feature_name(&self) -> &str {
        &self.name
    }

    fn as_array_value(&self, value: Option<&FeatureValue>) -> f64 {
        match value {
            Some(FeatureValue::Category(v)) => self
                .categories
                .iter()
                .position(|c| c == v)
                .map_or(self.default, |i| i as f64),
            _ => self.default,
        }
    }
}
