//! Raw XML Schema components
//!
//! The unresolved schema object graph as a parser hands it over. All
//! cross-references by name (`ref`, `type`, `base`, `itemType`,
//! `memberTypes`, `substitutionGroup`) stay names; they are looked up
//! through the namespace index, so cyclic schemas never form ownership
//! cycles.

pub mod attributes;
pub mod builtins;
pub mod elements;
pub mod facets;
pub mod particles;
pub mod schema;
pub mod types;
pub mod wildcards;

use serde::{Deserialize, Serialize};

pub use attributes::{Attribute, AttributeForm, AttributeGroup, AttributeGroupRef, AttributeItem, AttributeUse};
pub use elements::Element;
pub use facets::Facet;
pub use particles::{Compositor, GroupDef, GroupRef, ModelGroup, Occurs, Particle};
pub use schema::Schema;
pub use types::{
    ComplexContent, ComplexType, ContentDerivation, ContentExtension, ContentModel,
    ContentRestriction, ListContent, SimpleRestriction, SimpleType, SimpleTypeContent,
    TypeDef, UnionContent,
};
pub use wildcards::{AnyAttribute, AnyElement, ProcessContents};

/// Line/column of a component in its schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl Position {
    /// Create a position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// xs:annotation content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// xs:documentation texts
    pub documentation: Vec<String>,
    /// xs:appinfo texts
    pub appinfo: Vec<String>,
}

impl Annotation {
    /// Annotation with a single documentation entry
    pub fn documentation(text: impl Into<String>) -> Self {
        Self {
            documentation: vec![text.into()],
            appinfo: Vec::new(),
        }
    }
}
