//! Resolved type information
//!
//! The effective classification of a type after all restriction,
//! extension, list and union steps are folded in. Type infos are
//! immutable and shared through `Arc`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::namespaces::QName;

use super::primitives::Primitive;
use super::restriction::FacetMap;

/// Discriminant of a [`TypeInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Whitespace-separated list of items
    List,
    /// Value of one of several member types
    Union,
    /// Single value of a primitive
    Atomic,
    /// Element content
    Complex,
}

/// Resolved type information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeInfo {
    /// Single value of a primitive type
    Atomic {
        /// Primitive base
        primitive: Primitive,
        /// Merged facets
        facets: Option<FacetMap>,
        /// Nearest recognized ancestor type
        recognized_type: Option<QName>,
    },
    /// List of items; the item type is never itself a list
    List {
        /// Item type (atomic or union)
        item_type: Arc<TypeInfo>,
        /// Merged facets
        facets: Option<FacetMap>,
        /// Nearest recognized ancestor type
        recognized_type: Option<QName>,
    },
    /// Union of member types; members are never unions
    Union {
        /// Flattened member types
        member_types: Vec<Arc<TypeInfo>>,
        /// Merged facets
        facets: Option<FacetMap>,
        /// Nearest recognized ancestor type
        recognized_type: Option<QName>,
    },
    /// Complex type
    Complex {
        /// Whether character data may appear between child elements
        mixed: bool,
        /// Nearest recognized ancestor type
        recognized_type: Option<QName>,
    },
}

impl TypeInfo {
    /// Atomic type info without facets
    pub fn atomic(primitive: Primitive) -> Self {
        TypeInfo::Atomic {
            primitive,
            facets: None,
            recognized_type: None,
        }
    }

    /// Complex type info
    pub fn complex(mixed: bool) -> Self {
        TypeInfo::Complex {
            mixed,
            recognized_type: None,
        }
    }

    /// The variant of this type info
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeInfo::Atomic { .. } => TypeKind::Atomic,
            TypeInfo::List { .. } => TypeKind::List,
            TypeInfo::Union { .. } => TypeKind::Union,
            TypeInfo::Complex { .. } => TypeKind::Complex,
        }
    }

    /// Facets, for simple kinds
    pub fn facets(&self) -> Option<&FacetMap> {
        match self {
            TypeInfo::Atomic { facets, .. }
            | TypeInfo::List { facets, .. }
            | TypeInfo::Union { facets, .. } => facets.as_ref(),
            TypeInfo::Complex { .. } => None,
        }
    }

    /// Nearest ancestor type the caller declared as recognized
    pub fn recognized_type(&self) -> Option<&QName> {
        match self {
            TypeInfo::Atomic { recognized_type, .. }
            | TypeInfo::List { recognized_type, .. }
            | TypeInfo::Union { recognized_type, .. }
            | TypeInfo::Complex { recognized_type, .. } => recognized_type.as_ref(),
        }
    }

    /// Primitive base of an atomic type
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            TypeInfo::Atomic { primitive, .. } => Some(*primitive),
            _ => None,
        }
    }

    /// Item type of a list
    pub fn item_type(&self) -> Option<&Arc<TypeInfo>> {
        match self {
            TypeInfo::List { item_type, .. } => Some(item_type),
            _ => None,
        }
    }

    /// Member types of a union; empty for other kinds
    pub fn member_types(&self) -> &[Arc<TypeInfo>] {
        match self {
            TypeInfo::Union { member_types, .. } => member_types,
            _ => &[],
        }
    }

    /// Mixed flag of a complex type
    pub fn is_mixed(&self) -> bool {
        matches!(self, TypeInfo::Complex { mixed: true, .. })
    }

    /// Check if this is the unconstrained `anyType` case
    pub fn is_any_type(&self) -> bool {
        matches!(
            self,
            TypeInfo::Atomic {
                primitive: Primitive::AnyType,
                ..
            }
        )
    }

    /// Same type info under a different facet map. Complex infos carry no
    /// facets and are returned unchanged.
    pub fn with_facets(&self, facets: Option<FacetMap>) -> Self {
        let mut info = self.clone();
        match &mut info {
            TypeInfo::Atomic { facets: f, .. }
            | TypeInfo::List { facets: f, .. }
            | TypeInfo::Union { facets: f, .. } => *f = facets,
            TypeInfo::Complex { .. } => {}
        }
        info
    }

    /// Same type info tagged with a recognized ancestor
    pub fn with_recognized_type(&self, recognized: Option<QName>) -> Self {
        let mut info = self.clone();
        match &mut info {
            TypeInfo::Atomic { recognized_type, .. }
            | TypeInfo::List { recognized_type, .. }
            | TypeInfo::Union { recognized_type, .. }
            | TypeInfo::Complex { recognized_type, .. } => *recognized_type = recognized,
        }
        info
    }

    /// Short human-readable summary, e.g. `list<atomic(xs:int)>`
    pub fn summary(&self) -> String {
        match self {
            TypeInfo::Atomic { primitive, .. } => format!("atomic({})", primitive),
            TypeInfo::List { item_type, .. } => format!("list<{}>", item_type.summary()),
            TypeInfo::Union { member_types, .. } => {
                let members: Vec<String> = member_types.iter().map(|m| m.summary()).collect();
                format!("union[{}]", members.join(", "))
            }
            TypeInfo::Complex { mixed: true, .. } => "complex(mixed)".to_string(),
            TypeInfo::Complex { mixed: false, .. } => "complex".to_string(),
        }
    }
}
