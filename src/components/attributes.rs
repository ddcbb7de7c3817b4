//! XSD attribute declarations and attribute groups
//!
//! Declarations here are raw: a local `ref` is not followed and a type
//! given by name is not looked up. See [`crate::resolve::attributes`] for
//! the merged view.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::namespaces::QName;

use super::types::SimpleType;
use super::wildcards::AnyAttribute;
use super::{Annotation, Position};

/// Attribute use mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeUse {
    /// Attribute is optional (default)
    #[default]
    Optional,
    /// Attribute is required
    Required,
    /// Attribute is prohibited
    Prohibited,
}

impl AttributeUse {
    /// Parse from string value
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "optional" => Ok(AttributeUse::Optional),
            "required" => Ok(AttributeUse::Required),
            "prohibited" => Ok(AttributeUse::Prohibited),
            _ => Err(Error::schema(format!(
                "Invalid attribute use value: '{}'. Must be 'optional', 'required', or 'prohibited'",
                s
            ))),
        }
    }

    /// Get the use as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeUse::Optional => "optional",
            AttributeUse::Required => "required",
            AttributeUse::Prohibited => "prohibited",
        }
    }
}

impl std::fmt::Display for AttributeUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Form for attribute declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeForm {
    /// Attribute name is not qualified with namespace
    #[default]
    Unqualified,
    /// Attribute name is qualified with namespace
    Qualified,
}

impl AttributeForm {
    /// Parse from string value
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "unqualified" => Ok(AttributeForm::Unqualified),
            "qualified" => Ok(AttributeForm::Qualified),
            _ => Err(Error::schema(format!(
                "Invalid attribute form value: '{}'. Must be 'unqualified' or 'qualified'",
                s
            ))),
        }
    }
}

/// XSD attribute declaration
///
/// Represents an XSD attribute declaration which can appear as:
/// - A global declaration at schema level
/// - A local declaration inside a complex type or attribute group
/// - A reference to a global declaration
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    /// Attribute name (absent on references)
    pub name: Option<QName>,
    /// Referenced global attribute (`ref="..."`)
    pub ref_name: Option<QName>,
    /// Type given by name (`type="..."`)
    pub type_name: Option<QName>,
    /// Inline anonymous simple type
    pub simple_type: Option<Arc<SimpleType>>,
    /// Declared use; `None` when the `use` attribute is absent
    pub use_mode: Option<AttributeUse>,
    /// Default value
    pub default: Option<String>,
    /// Fixed value
    pub fixed: Option<String>,
    /// Form (qualified/unqualified)
    pub form: Option<AttributeForm>,
    /// `id` attribute
    pub id: Option<String>,
    /// Source position
    pub position: Option<Position>,
    /// Annotation
    pub annotation: Option<Annotation>,
    /// Attributes from foreign namespaces on the declaration
    pub unhandled_attributes: IndexMap<QName, String>,
    /// Free-form metadata attached by the parser
    pub metadata: IndexMap<String, String>,
    /// Whether this is a top-level (schema child) declaration
    pub top_level: bool,
}

impl Attribute {
    /// Create a local attribute declaration
    pub fn new(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Create a reference to a global attribute
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

    /// Set an inline simple type
    pub fn with_simple_type(mut self, simple_type: SimpleType) -> Self {
        self.simple_type = Some(Arc::new(simple_type));
        self
    }

    /// Set the use mode
    pub fn with_use(mut self, use_mode: AttributeUse) -> Self {
        self.use_mode = Some(use_mode);
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the fixed value
    pub fn with_fixed(mut self, value: impl Into<String>) -> Self {
        self.fixed = Some(value.into());
        self
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the source position
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some(Position::new(line, column));
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

    /// Check if the type is declared, inline or by name
    pub fn has_type(&self) -> bool {
        self.type_name.is_some() || self.simple_type.is_some()
    }
}

/// Reference to a named attribute group
#[derive(Debug, Clone)]
pub struct AttributeGroupRef {
    /// Name of the referenced attribute group
    pub ref_name: QName,
    /// Already-resolved group, when the parser attached one
    pub group: Option<Arc<AttributeGroup>>,
}

/// A member of an attribute list
#[derive(Debug, Clone)]
pub enum AttributeItem {
    /// Attribute declaration or reference
    Attribute(Arc<Attribute>),
    /// Nested attribute group
    Group(Arc<AttributeGroup>),
    /// Attribute group reference
    GroupRef(AttributeGroupRef),
}

impl AttributeItem {
    /// Wrap an attribute declaration
    pub fn attribute(attribute: Attribute) -> Self {
        Self::Attribute(Arc::new(attribute))
    }

    /// Reference an attribute group by name
    pub fn group_ref(ref_name: QName) -> Self {
        Self::GroupRef(AttributeGroupRef {
            ref_name,
            group: None,
        })
    }
}

impl From<Attribute> for AttributeItem {
    fn from(attribute: Attribute) -> Self {
        Self::attribute(attribute)
    }
}

/// XSD attribute group definition
#[derive(Debug, Clone, Default)]
pub struct AttributeGroup {
    /// Group name (None for nested anonymous groups)
    pub name: Option<QName>,
    /// Member attributes and group references, in declaration order
    pub items: Vec<AttributeItem>,
    /// Attribute wildcard
    pub any_attribute: Option<Arc<AnyAttribute>>,
    /// Annotation
    pub annotation: Option<Annotation>,
}

impl AttributeGroup {
    /// Create a named attribute group
    pub fn new(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Create an anonymous attribute group
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a member
    pub fn with_item(mut self, item: impl Into<AttributeItem>) -> Self {
        self.items.push(item.into());
        self
    }
}
