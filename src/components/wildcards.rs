//! XSD wildcards
//!
//! - xs:any - allows any element from specified namespaces
//! - xs:anyAttribute - allows any attribute from specified namespaces
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Wildcards

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::particles::Occurs;
use super::{Annotation, Position};

/// Process contents mode for wildcards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessContents {
    /// Validate strictly - element/attribute must be declared
    #[default]
    Strict,
    /// Validate if declaration found, otherwise accept
    Lax,
    /// Skip validation entirely
    Skip,
}

impl std::fmt::Display for ProcessContents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lax => write!(f, "lax"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Split a wildcard `namespace` attribute into its tokens
pub fn namespace_tokens(namespace: &str) -> impl Iterator<Item = &str> {
    namespace.split_whitespace()
}

/// Union of two space-separated namespace lists, deduplicated, in
/// first-seen order
pub fn union_namespaces(first: &str, second: &str) -> String {
    let tokens: IndexSet<&str> = namespace_tokens(first)
        .chain(namespace_tokens(second))
        .collect();
    tokens.into_iter().collect::<Vec<_>>().join(" ")
}

/// Element wildcard (xs:any)
#[derive(Debug, Clone, PartialEq)]
pub struct AnyElement {
    /// Raw `namespace` attribute (space-separated tokens, e.g. `##other`)
    pub namespace: String,
    /// Process contents mode
    pub process_contents: ProcessContents,
    /// Occurrence constraints
    pub occurs: Occurs,
    /// Annotation
    pub annotation: Option<Annotation>,
}

impl AnyElement {
    /// Create an element wildcard
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            process_contents: ProcessContents::Strict,
            occurs: Occurs::once(),
            annotation: None,
        }
    }

    /// Set the process contents mode
    pub fn with_process_contents(mut self, process_contents: ProcessContents) -> Self {
        self.process_contents = process_contents;
        self
    }

    /// Set the occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }
}

/// Attribute wildcard (xs:anyAttribute)
#[derive(Debug, Clone, PartialEq)]
pub struct AnyAttribute {
    /// Raw `namespace` attribute (space-separated tokens)
    pub namespace: String,
    /// Process contents mode
    pub process_contents: ProcessContents,
    /// Optional `id`
    pub id: Option<String>,
    /// Source position
    pub position: Option<Position>,
    /// Annotation
    pub annotation: Option<Annotation>,
}

impl AnyAttribute {
    /// Create an attribute wildcard
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            process_contents: ProcessContents::Strict,
            id: None,
            position: None,
            annotation: None,
        }
    }

    /// Set the process contents mode
    pub fn with_process_contents(mut self, process_contents: ProcessContents) -> Self {
        self.process_contents = process_contents;
        self
    }

    /// Merge for complex-content extension: the extension's process
    /// contents and the union of both namespace lists
    pub fn merge_extension(base: &AnyAttribute, extension: &AnyAttribute) -> AnyAttribute {
        AnyAttribute {
            namespace: union_namespaces(&base.namespace, &extension.namespace),
            process_contents: extension.process_contents,
            id: extension.id.clone(),
            position: extension.position,
            annotation: extension.annotation.clone(),
        }
    }
}
