//! # xmlschema-walker
//!
//! Scope resolution and content-model traversal for XML Schema (XSD)
//! component graphs.
//!
//! Given an already-parsed schema graph, this library computes the
//! fully merged description of a type (its effective simple-type
//! classification, facets, attributes in scope, child particle and
//! attribute wildcard) and walks an element's content model depth-first,
//! reporting each element, attribute, group and wildcard to visitors.
//!
//! ## Features
//!
//! - Simple types: list, union (flattened) and facet restriction chains
//! - Complex types: extension and restriction of simple and complex content
//! - Attribute references, attribute groups and restriction overrides
//! - Substitution groups and recursive schemas
//! - Built-in XSD types
//! - JSON dumps of a walk
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::{cell::RefCell, rc::Rc};
//! use xmlschema_walker::{dump::DumpBuilder, NamespaceIndex, QName, Walker};
//!
//! let mut index = NamespaceIndex::with_builtins();
//! index.register(schema);
//!
//! let dump = Rc::new(RefCell::new(DumpBuilder::new()));
//! let mut walker = Walker::new(&index)?;
//! walker.add_visitor(dump.clone());
//! walker.walk(index.element_by_name(&QName::local("book")).unwrap())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Names
pub mod namespaces;
pub mod names;

// Raw schema graph
pub mod components;
pub mod index;

// Resolution and traversal
pub mod resolve;
pub mod walker;

// Serializable walk dumps
pub mod dump;

// Re-exports for convenience
pub use components::{Element, Schema, TypeDef};
pub use error::{Error, Result, SchemaError};
pub use index::NamespaceIndex;
pub use limits::Limits;
pub use namespaces::QName;
pub use resolve::{AttributeInfo, Primitive, ResolvedScope, ScopeCache, ScopeResolver, TypeInfo};
pub use walker::{SchemaVisitor, Walker};

/// Version of the xmlschema-walker library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
