//! Resolved attribute descriptor

use std::sync::Arc;

use crate::components::{Attribute, AttributeUse};
use crate::namespaces::QName;

use super::type_info::TypeInfo;

/// An attribute in scope of a resolved type
///
/// The declaration may be a synthesized copy merging a local reference
/// with its global declaration, so `top_level` is tracked separately: it
/// reflects the global declaration, not the copy.
#[derive(Debug, Clone)]
pub struct AttributeInfo {
    attribute: Arc<Attribute>,
    type_info: Option<Arc<TypeInfo>>,
    top_level: bool,
    // Whether the originating declaration had a `use` attribute; the copy's
    // own `use_mode` is always normalized.
    explicit_use: bool,
}

impl AttributeInfo {
    /// Describe a declaration whose type is not resolved yet
    pub fn new(attribute: Arc<Attribute>, top_level: bool, explicit_use: bool) -> Self {
        Self {
            attribute,
            type_info: None,
            top_level,
            explicit_use,
        }
    }

    /// Same descriptor with its type resolved
    pub fn with_type(&self, type_info: Arc<TypeInfo>) -> Self {
        Self {
            type_info: Some(type_info),
            ..self.clone()
        }
    }

    /// The (possibly synthesized) declaration
    pub fn attribute(&self) -> &Arc<Attribute> {
        &self.attribute
    }

    /// The attribute's name
    pub fn qname(&self) -> Option<&QName> {
        self.attribute.qname()
    }

    /// Resolved type, once known
    pub fn type_info(&self) -> Option<&Arc<TypeInfo>> {
        self.type_info.as_ref()
    }

    /// Whether the underlying global declaration is top-level
    pub fn is_top_level(&self) -> bool {
        self.top_level
    }

    /// Normalized use
    pub fn use_mode(&self) -> AttributeUse {
        self.attribute.use_mode.unwrap_or_default()
    }

    /// Whether the originating declaration stated its `use`
    pub fn has_explicit_use(&self) -> bool {
        self.explicit_use
    }

    /// Check if the attribute is required
    pub fn is_required(&self) -> bool {
        self.use_mode() == AttributeUse::Required
    }

    /// Default value
    pub fn default_value(&self) -> Option<&str> {
        self.attribute.default.as_deref()
    }

    /// Fixed value
    pub fn fixed_value(&self) -> Option<&str> {
        self.attribute.fixed.as_deref()
    }
}
