use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::value::{FeatureValue, ValueKind};

/// A feature's name and the kind of value it carries.
///
/// Declarations are what selectors and scoring functions talk about;
/// identity is the name plus the kind, never a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureDeclaration {
    name: String,
    kind: ValueKind,
}

impl FeatureDeclaration {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Int)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Bool)
    }

    pub fn category(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Category)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Binds a computed value to this declaration.
    ///
    /// The value must match the declared kind, except that an `Int`
    /// value satisfies a `Float` declaration.
    pub fn with(&self, value: impl Into<FeatureValue>) -> Result<Feature> {
        let value = value.into();
        let compatible = match (self.kind, value.kind()) {
            (declared, given) if declared == given => true,
            (ValueKind::Float, ValueKind::Int) => true,
            _ => false,
        };
        if !compatible {
            return Err(FeatureError::KindMismatch {
                name: self.name.clone(),
                declared: self.kind,
                given: value,
            });
        }
        Ok(Feature {
            declaration: self.clone(),
            value,
        })
    }
}

/// A declaration together with a value computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    declaration: FeatureDeclaration,
    value: FeatureValue,
}

impl Feature {
    #[must_use]
    pub const fn declaration(&self) -> &FeatureDeclaration {
        &self.declaration
    }

    #[must_use]
    pub const fn value(&self) -> &FeatureValue {
        &self.value
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.declaration.name()
    }
}
