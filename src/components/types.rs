//! XSD simple and complex type definitions
//!
//! Raw type definitions as produced by a schema parser. Base, item and
//! member types may be given inline or by name; names are resolved
//! through the [`crate::index::NamespaceIndex`] during scope resolution.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Complex_Type_Definitions

use std::sync::Arc;

use crate::namespaces::QName;

use super::attributes::AttributeItem;
use super::facets::Facet;
use super::particles::Particle;
use super::wildcards::AnyAttribute;
use super::Annotation;

/// A type definition - either simple or complex
#[derive(Debug, Clone)]
pub enum TypeDef {
    /// Simple type
    Simple(Arc<SimpleType>),
    /// Complex type
    Complex(Arc<ComplexType>),
}

impl TypeDef {
    /// Get the type name (None for anonymous types)
    pub fn name(&self) -> Option<&QName> {
        match self {
            TypeDef::Simple(t) => t.name.as_ref(),
            TypeDef::Complex(t) => t.name.as_ref(),
        }
    }

    /// Check if this is a simple type
    pub fn is_simple(&self) -> bool {
        matches!(self, TypeDef::Simple(_))
    }

    /// Get as simple type
    pub fn as_simple(&self) -> Option<&Arc<SimpleType>> {
        match self {
            TypeDef::Simple(t) => Some(t),
            TypeDef::Complex(_) => None,
        }
    }

    /// Get as complex type
    pub fn as_complex(&self) -> Option<&Arc<ComplexType>> {
        match self {
            TypeDef::Simple(_) => None,
            TypeDef::Complex(t) => Some(t),
        }
    }
}

impl From<SimpleType> for TypeDef {
    fn from(t: SimpleType) -> Self {
        TypeDef::Simple(Arc::new(t))
    }
}

impl From<ComplexType> for TypeDef {
    fn from(t: ComplexType) -> Self {
        TypeDef::Complex(Arc::new(t))
    }
}

// =============================================================================
// Simple types
// =============================================================================

/// XSD simple type definition
#[derive(Debug, Clone, Default)]
pub struct SimpleType {
    /// Type name (None for anonymous types)
    pub name: Option<QName>,
    /// Content; only the root `anyType` has none
    pub content: Option<SimpleTypeContent>,
    /// Annotation
    pub annotation: Option<Annotation>,
}

/// Content of a simple type
#[derive(Debug, Clone)]
pub enum SimpleTypeContent {
    /// xs:list
    List(ListContent),
    /// xs:union
    Union(UnionContent),
    /// xs:restriction
    Restriction(SimpleRestriction),
}

/// xs:list content
#[derive(Debug, Clone, Default)]
pub struct ListContent {
    /// Item type by name (`itemType="..."`)
    pub item_type_name: Option<QName>,
    /// Inline item type
    pub item_type: Option<Arc<SimpleType>>,
}

/// xs:union content
#[derive(Debug, Clone, Default)]
pub struct UnionContent {
    /// Member types by name (`memberTypes="..."`)
    pub member_type_names: Vec<QName>,
    /// Inline member types
    pub member_types: Vec<Arc<SimpleType>>,
}

/// xs:restriction content of a simple type
#[derive(Debug, Clone, Default)]
pub struct SimpleRestriction {
    /// Base type by name (`base="..."`)
    pub base_type_name: Option<QName>,
    /// Inline base type
    pub base_type: Option<Arc<SimpleType>>,
    /// Declared facets, in document order
    pub facets: Vec<Facet>,
}

impl SimpleType {
    /// Anonymous restriction of a named base type
    pub fn restriction(base_type_name: QName, facets: Vec<Facet>) -> Self {
        Self {
            name: None,
            content: Some(SimpleTypeContent::Restriction(SimpleRestriction {
                base_type_name: Some(base_type_name),
                base_type: None,
                facets,
            })),
            annotation: None,
        }
    }

    /// Anonymous restriction of an inline base type
    pub fn restriction_of(base_type: SimpleType, facets: Vec<Facet>) -> Self {
        Self {
            name: None,
            content: Some(SimpleTypeContent::Restriction(SimpleRestriction {
                base_type_name: None,
                base_type: Some(Arc::new(base_type)),
                facets,
            })),
            annotation: None,
        }
    }

    /// Anonymous list of a named item type
    pub fn list(item_type_name: QName) -> Self {
        Self {
            name: None,
            content: Some(SimpleTypeContent::List(ListContent {
                item_type_name: Some(item_type_name),
                item_type: None,
            })),
            annotation: None,
        }
    }

    /// Anonymous list of an inline item type
    pub fn list_of(item_type: SimpleType) -> Self {
        Self {
            name: None,
            content: Some(SimpleTypeContent::List(ListContent {
                item_type_name: None,
                item_type: Some(Arc::new(item_type)),
            })),
            annotation: None,
        }
    }

    /// Anonymous union of named and inline member types
    pub fn union(member_type_names: Vec<QName>, member_types: Vec<SimpleType>) -> Self {
        Self {
            name: None,
            content: Some(SimpleTypeContent::Union(UnionContent {
                member_type_names,
                member_types: member_types.into_iter().map(Arc::new).collect(),
            })),
            annotation: None,
        }
    }

    /// Give the type a name
    pub fn named(mut self, name: QName) -> Self {
        self.name = Some(name);
        self
    }
}

// =============================================================================
// Complex types
// =============================================================================

/// XSD complex type definition
#[derive(Debug, Clone, Default)]
pub struct ComplexType {
    /// Type name (None for anonymous types)
    pub name: Option<QName>,
    /// Declared `mixed` flag; None when absent
    pub mixed: Option<bool>,
    /// Whether the type is abstract
    pub is_abstract: bool,
    /// xs:simpleContent / xs:complexContent, if any
    pub content: Option<ContentModel>,
    /// Particle of a type without a content model
    pub particle: Option<Particle>,
    /// Attributes of a type without a content model
    pub attributes: Vec<AttributeItem>,
    /// Attribute wildcard of a type without a content model
    pub any_attribute: Option<Arc<AnyAttribute>>,
    /// Annotation
    pub annotation: Option<Annotation>,
}

/// Content model of a complex type
#[derive(Debug, Clone)]
pub enum ContentModel {
    /// xs:simpleContent
    Simple(ContentDerivation),
    /// xs:complexContent
    Complex(ComplexContent),
}

/// xs:complexContent
#[derive(Debug, Clone)]
pub struct ComplexContent {
    /// Declared `mixed` flag; None when absent
    pub mixed: Option<bool>,
    /// Extension or restriction
    pub derivation: ContentDerivation,
}

/// Derivation step of a content model
#[derive(Debug, Clone)]
pub enum ContentDerivation {
    /// xs:extension
    Extension(ContentExtension),
    /// xs:restriction
    Restriction(ContentRestriction),
}

/// xs:extension inside simple or complex content
#[derive(Debug, Clone)]
pub struct ContentExtension {
    /// Base type name
    pub base_type_name: QName,
    /// Added particle (complex content only)
    pub particle: Option<Particle>,
    /// Added attributes
    pub attributes: Vec<AttributeItem>,
    /// Attribute wildcard
    pub any_attribute: Option<Arc<AnyAttribute>>,
}

/// xs:restriction inside simple or complex content
#[derive(Debug, Clone, Default)]
pub struct ContentRestriction {
    /// Base type name
    pub base_type_name: Option<QName>,
    /// Inline base type (simple content only)
    pub base_type: Option<Arc<SimpleType>>,
    /// Facets (simple content only)
    pub facets: Vec<Facet>,
    /// Replacement particle (complex content only)
    pub particle: Option<Particle>,
    /// Restricted attributes
    pub attributes: Vec<AttributeItem>,
    /// Attribute wildcard
    pub any_attribute: Option<Arc<AnyAttribute>>,
}

impl ContentExtension {
    /// Extend a named base type
    pub fn new(base_type_name: QName) -> Self {
        Self {
            base_type_name,
            particle: None,
            attributes: Vec::new(),
            any_attribute: None,
        }
    }

    /// Set the added particle
    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.particle = Some(particle);
        self
    }

    /// Add an attribute or attribute group reference
    pub fn with_attribute(mut self, item: impl Into<AttributeItem>) -> Self {
        self.attributes.push(item.into());
        self
    }

    /// Set the attribute wildcard
    pub fn with_any_attribute(mut self, any: AnyAttribute) -> Self {
        self.any_attribute = Some(Arc::new(any));
        self
    }
}

impl ContentRestriction {
    /// Restrict a named base type
    pub fn new(base_type_name: QName) -> Self {
        Self {
            base_type_name: Some(base_type_name),
            ..Default::default()
        }
    }

    /// Set the replacement particle
    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.particle = Some(particle);
        self
    }

    /// Add a facet
    pub fn with_facet(mut self, facet: Facet) -> Self {
        self.facets.push(facet);
        self
    }

    /// Add an attribute or attribute group reference
    pub fn with_attribute(mut self, item: impl Into<AttributeItem>) -> Self {
        self.attributes.push(item.into());
        self
    }

    /// Set the attribute wildcard
    pub fn with_any_attribute(mut self, any: AnyAttribute) -> Self {
        self.any_attribute = Some(Arc::new(any));
        self
    }
}

impl ComplexType {
    /// Create an anonymous complex type
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the type a name
    pub fn named(mut self, name: QName) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the `mixed` flag
    pub fn with_mixed(mut self, mixed: bool) -> Self {
        self.mixed = Some(mixed);
        self
    }

    /// Set the particle
    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.particle = Some(particle);
        self
    }

    /// Add an attribute or attribute group reference
    pub fn with_attribute(mut self, item: impl Into<AttributeItem>) -> Self {
        self.attributes.push(item.into());
        self
    }

    /// Set the attribute wildcard
    pub fn with_any_attribute(mut self, any: AnyAttribute) -> Self {
        self.any_attribute = Some(Arc::new(any));
        self
    }

    /// Derive by complex-content extension
    pub fn extending(mut self, extension: ContentExtension) -> Self {
        self.content = Some(ContentModel::Complex(ComplexContent {
            mixed: None,
            derivation: ContentDerivation::Extension(extension),
        }));
        self
    }

    /// Derive by complex-content restriction
    pub fn restricting(mut self, restriction: ContentRestriction) -> Self {
        self.content = Some(ContentModel::Complex(ComplexContent {
            mixed: None,
            derivation: ContentDerivation::Restriction(restriction),
        }));
        self
    }

    /// Derive by simple-content extension
    pub fn extending_simple(mut self, extension: ContentExtension) -> Self {
        self.content = Some(ContentModel::Simple(ContentDerivation::Extension(extension)));
        self
    }

    /// Derive by simple-content restriction
    pub fn restricting_simple(mut self, restriction: ContentRestriction) -> Self {
        self.content = Some(ContentModel::Simple(ContentDerivation::Restriction(
            restriction,
        )));
        self
    }
}
