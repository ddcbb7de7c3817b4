//! XSD element declarations
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Element_Declarations

use std::sync::Arc;

use crate::namespaces::QName;

use super::particles::Occurs;
use super::types::{ComplexType, SimpleType, TypeDef};
use super::{Annotation, Position};

/// XSD element declaration or element reference
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Element name (absent on references)
    pub name: Option<QName>,
    /// Referenced global element (`ref="..."`)
    pub ref_name: Option<QName>,
    /// Type given by name (`type="..."`)
    pub type_name: Option<QName>,
    /// Inline anonymous type
    pub inline_type: Option<TypeDef>,
    /// Occurrence bounds
    pub occurs: Occurs,
    /// Whether the element is abstract
    pub is_abstract: bool,
    /// Whether the element is nillable
    pub nillable: bool,
    /// Default value
    pub default: Option<String>,
    /// Fixed value
    pub fixed: Option<String>,
    /// `id` attribute
    pub id: Option<String>,
    /// Head of the substitution group this element belongs to
    pub substitution_group: Option<QName>,
    /// Source position
    pub position: Option<Position>,
    /// Annotation
    pub annotation: Option<Annotation>,
    /// Whether this is a top-level (schema child) declaration
    pub top_level: bool,
}

impl Element {
    /// Create an element declaration
    pub fn new(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Create a reference to a global element
    pub fn reference(ref_name: QName) -> Self {
        Self {
            ref_name: Some(ref_name),
            ..Default::default()
        }
    }

    /// Set the type by name
    pub fn with_type_name(mut self, type_name: QName) -> Self {
        self.type_name = Some(type_name);
        self
    }

    /// Set an inline complex type
    pub fn with_complex_type(mut self, complex_type: ComplexType) -> Self {
        self.inline_type = Some(TypeDef::Complex(Arc::new(complex_type)));
        self
    }

    /// Set an inline simple type
    pub fn with_simple_type(mut self, simple_type: SimpleType) -> Self {
        self.inline_type = Some(TypeDef::Simple(Arc::new(simple_type)));
        self
    }

    /// Set the occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Mark the element abstract
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Join the substitution group headed by `head`
    pub fn with_substitution_group(mut self, head: QName) -> Self {
        self.substitution_group = Some(head);
        self
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Name this declaration is known by: its own, or the referenced one
    pub fn qname(&self) -> Option<&QName> {
        self.name.as_ref().or(self.ref_name.as_ref())
    }

    /// Check if this is a `ref` to a global declaration
    pub fn is_reference(&self) -> bool {
        self.ref_name.is_some()
    }
}
