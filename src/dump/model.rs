//! Serializable walk dump
//!
//! A tree mirror of the walk event stream. Qualified names are rendered in
//! the `{namespace}localName` format.

use serde::{Deserialize, Serialize};

use crate::components::{AnyAttribute, AnyElement, Compositor, Element, Occurs};
use crate::resolve::{AttributeInfo, FacetMap, TypeInfo};

/// Complete dump of one or more walks
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDump {
    /// Top-level nodes, one per walked root (or substitution group)
    pub roots: Vec<ContentNode>,
}

impl SchemaDump {
    /// Create a new empty schema dump
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level element nodes, looking through substitution groups
    pub fn root_elements(&self) -> Vec<&ElementNode> {
        let mut elements = Vec::new();
        for node in &self.roots {
            match node {
                ContentNode::Element(element) => elements.push(element),
                ContentNode::SubstitutionGroup(group) => {
                    elements.extend(group.members.iter().filter_map(ContentNode::as_element))
                }
                _ => {}
            }
        }
        elements
    }
}

/// A node in element content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ContentNode {
    /// Element
    Element(ElementNode),
    /// Model group
    Group(GroupNode),
    /// Element wildcard
    Any(WildcardNode),
    /// Substitution-group head followed by its substitutes
    SubstitutionGroup(SubstitutionGroupNode),
}

impl ContentNode {
    /// The element, if this is an element node
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            ContentNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The group, if this is a group node
    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            ContentNode::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// Element information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Element name (qualified format: {namespace}localName)
    pub name: String,

    /// Declared type name, absent for inline types
    pub type_name: Option<String>,

    /// Resolved type summary, e.g. `atomic(xs:string)`
    #[serde(rename = "type")]
    pub type_summary: String,

    /// Nearest recognized ancestor type
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recognized_type: Option<String>,

    /// Minimum occurrences
    pub min_occurs: u32,

    /// Maximum occurrences (None means unbounded)
    pub max_occurs: Option<u32>,

    /// Whether the element is abstract
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_abstract: bool,

    /// Whether the element is nillable
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub nillable: bool,

    /// Set when the element was already expanded earlier in the walk
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub previously_visited: bool,

    /// Facets of a simple element type
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub restrictions: Vec<RestrictionNode>,

    /// Attributes in scope
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attributes: Vec<AttributeNode>,

    /// Attribute wildcard
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub any_attribute: Option<WildcardNode>,

    /// Child content
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub content: Vec<ContentNode>,
}

impl ElementNode {
    pub(crate) fn new(element: &Element, type_info: &TypeInfo, previously_visited: bool) -> Self {
        Self {
            name: element.qname().map(|n| n.to_string()).unwrap_or_default(),
            type_name: element.type_name.as_ref().map(|n| n.to_string()),
            type_summary: type_info.summary(),
            recognized_type: type_info.recognized_type().map(|n| n.to_string()),
            min_occurs: element.occurs.min,
            max_occurs: element.occurs.max,
            is_abstract: element.is_abstract,
            nillable: element.nillable,
            previously_visited,
            restrictions: RestrictionNode::from_facets(type_info.facets()),
            attributes: Vec::new(),
            any_attribute: None,
            content: Vec::new(),
        }
    }

    /// Child element nodes, looking through groups
    pub fn descendant_elements(&self) -> Vec<&ElementNode> {
        fn collect<'n>(nodes: &'n [ContentNode], out: &mut Vec<&'n ElementNode>) {
            for node in nodes {
                match node {
                    ContentNode::Element(element) => out.push(element),
                    ContentNode::Group(group) => collect(&group.content, out),
                    ContentNode::SubstitutionGroup(group) => collect(&group.members, out),
                    ContentNode::Any(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.content, &mut out);
        out
    }
}

/// Attribute information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeNode {
    /// Attribute name (qualified format)
    pub name: String,

    /// Declared type name, absent for inline types
    pub type_name: Option<String>,

    /// Resolved type summary
    #[serde(rename = "type")]
    pub type_summary: String,

    /// Use mode: optional, required, prohibited
    #[serde(rename = "use")]
    pub use_mode: String,

    /// Default value
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<String>,

    /// Fixed value
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fixed: Option<String>,

    /// Facets of the attribute type
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub restrictions: Vec<RestrictionNode>,
}

impl From<&AttributeInfo> for AttributeNode {
    fn from(info: &AttributeInfo) -> Self {
        let type_info = info.type_info();
        Self {
            name: info.qname().map(|n| n.to_string()).unwrap_or_default(),
            type_name: info.attribute().type_name.as_ref().map(|n| n.to_string()),
            type_summary: type_info.map(|t| t.summary()).unwrap_or_default(),
            use_mode: info.use_mode().to_string(),
            default: info.default_value().map(str::to_string),
            fixed: info.fixed_value().map(str::to_string),
            restrictions: RestrictionNode::from_facets(type_info.and_then(|t| t.facets())),
        }
    }
}

/// Facet information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestrictionNode {
    /// Facet name (e.g. maxLength, enumeration)
    pub kind: String,

    /// Values; several only for enumeration and pattern
    pub values: Vec<String>,
}

impl RestrictionNode {
    fn from_facets(facets: Option<&FacetMap>) -> Vec<Self> {
        facets
            .map(|facets| {
                facets
                    .iter()
                    .map(|(kind, restrictions)| RestrictionNode {
                        kind: kind.as_str().to_string(),
                        values: restrictions.iter().map(|r| r.value.clone()).collect(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Model group information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupNode {
    /// sequence, choice or all
    pub compositor: Compositor,

    /// Minimum occurrences
    pub min_occurs: u32,

    /// Maximum occurrences (None means unbounded)
    pub max_occurs: Option<u32>,

    /// Group members
    #[serde(default)]
    pub content: Vec<ContentNode>,
}

impl GroupNode {
    pub(crate) fn new(compositor: Compositor, occurs: Occurs) -> Self {
        Self {
            compositor,
            min_occurs: occurs.min,
            max_occurs: occurs.max,
            content: Vec::new(),
        }
    }
}

/// Element or attribute wildcard information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WildcardNode {
    /// Namespace constraint, space separated
    pub namespace: String,

    /// strict, lax or skip
    pub process_contents: String,

    /// Occurrence bounds (element wildcards only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub occurs: Option<Occurs>,
}

impl From<&AnyElement> for WildcardNode {
    fn from(any: &AnyElement) -> Self {
        Self {
            namespace: any.namespace.clone(),
            process_contents: any.process_contents.to_string(),
            occurs: Some(any.occurs),
        }
    }
}

impl From<&AnyAttribute> for WildcardNode {
    fn from(any: &AnyAttribute) -> Self {
        Self {
            namespace: any.namespace.clone(),
            process_contents: any.process_contents.to_string(),
            occurs: None,
        }
    }
}

/// Substitution group information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionGroupNode {
    /// Head element name (qualified format)
    pub head: String,

    /// The head (unless abstract and untyped) followed by its substitutes
    #[serde(default)]
    pub members: Vec<ContentNode>,
}
