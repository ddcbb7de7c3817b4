//! Raw constraining facets
//!
//! A facet as it appears in a restriction: the facet element's local name
//! (e.g. `maxLength`), its `value` attribute and its `fixed` flag. Turning
//! the shape into a typed facet kind happens during resolution.

use super::Annotation;

/// Facet as declared inside an xs:restriction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    /// Local name of the facet element (`enumeration`, `minLength`, ...)
    pub name: String,
    /// Value of the `value` attribute
    pub value: String,
    /// Whether derived types may not change this facet
    pub fixed: bool,
    /// Annotation
    pub annotation: Option<Annotation>,
}

impl Facet {
    /// Create a non-fixed facet
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            fixed: false,
            annotation: None,
        }
    }

    /// Create a fixed facet
    pub fn fixed(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            fixed: true,
            ..Self::new(name, value)
        }
    }

    /// `xs:enumeration`
    pub fn enumeration(value: impl Into<String>) -> Self {
        Self::new("enumeration", value)
    }

    /// `xs:pattern`
    pub fn pattern(value: impl Into<String>) -> Self {
        Self::new("pattern", value)
    }

    /// `xs:whiteSpace`
    pub fn white_space(value: impl Into<String>) -> Self {
        Self::new("whiteSpace", value)
    }

    /// `xs:minLength`
    pub fn min_length(value: u64) -> Self {
        Self::new("minLength", value.to_string())
    }

    /// `xs:maxLength`
    pub fn max_length(value: u64) -> Self {
        Self::new("maxLength", value.to_string())
    }

    /// `xs:length`
    pub fn length(value: u64) -> Self {
        Self::new("length", value.to_string())
    }

    /// `xs:minInclusive`
    pub fn min_inclusive(value: impl Into<String>) -> Self {
        Self::new("minInclusive", value)
    }

    /// `xs:maxInclusive`
    pub fn max_inclusive(value: impl Into<String>) -> Self {
        Self::new("maxInclusive", value)
    }
}
