//! Type and attribute resolution
//!
//! Turns raw, reference-laden schema components into merged descriptions:
//! the effective [`TypeInfo`] of a type, the attributes in its scope, its
//! effective child particle and attribute wildcard.

pub mod attribute_info;
pub mod attributes;
pub mod primitives;
pub mod restriction;
pub mod scope;
pub mod type_info;

pub use attribute_info::AttributeInfo;
pub use attributes::{attribute_map, flatten_attributes, merge_restricted, resolve_attribute, AttributeMap};
pub use primitives::Primitive;
pub use restriction::{FacetKind, FacetMap, Restriction};
pub use scope::{ResolvedScope, ScopeCache, ScopeResolver};
pub use type_info::{TypeInfo, TypeKind};
