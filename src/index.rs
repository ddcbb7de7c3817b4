//! Namespace index
//!
//! Maps a target namespace to the ordered list of schema documents that
//! declare it, and resolves component names across all of them. Lookups
//! scan the schemas of the name's namespace in registration order and
//! return the first match.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::components::builtins::xsd_schema;
use crate::components::{Attribute, AttributeGroup, Element, GroupDef, Schema, TypeDef};
use crate::namespaces::QName;

/// Substitution group map - maps head element QNames to substitute elements
pub type SubstitutionGroupMap = IndexMap<QName, Vec<Arc<Element>>>;

/// Index of schemas by target namespace
#[derive(Debug, Clone, Default)]
pub struct NamespaceIndex {
    schemas: IndexMap<String, Vec<Arc<Schema>>>,
    substitution_groups: SubstitutionGroupMap,
}

impl NamespaceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index with the XML Schema built-in types registered
    pub fn with_builtins() -> Self {
        let mut index = Self::new();
        let xsd = xsd_schema();
        let namespace = xsd.target_namespace.clone();
        index.add_schema(Some(&namespace), xsd);
        index
    }

    /// Register a schema under `namespace`; an absent namespace is
    /// normalized to "".
    ///
    /// `namespace` must equal the schema's target namespace: scopes are
    /// cached under each component's own qualified name. Prefer
    /// [`NamespaceIndex::register`], which reads it from the schema.
    pub fn add_schema(&mut self, namespace: Option<&str>, schema: Arc<Schema>) {
        debug_assert_eq!(
            namespace.unwrap_or_default(),
            schema.target_namespace,
            "schema filed under a namespace other than its target namespace"
        );
        for element in schema.elements() {
            if let Some(head) = &element.substitution_group {
                self.substitution_groups
                    .entry(head.clone())
                    .or_default()
                    .push(Arc::clone(element));
            }
        }
        self.schemas
            .entry(namespace.unwrap_or_default().to_string())
            .or_default()
            .push(schema);
    }

    /// Register a schema under its own target namespace
    pub fn register(&mut self, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);
        let namespace = schema.target_namespace.clone();
        self.add_schema(Some(&namespace), Arc::clone(&schema));
        schema
    }

    /// All schemas registered for a namespace, in registration order
    pub fn schemas_for(&self, namespace: &str) -> &[Arc<Schema>] {
        self.schemas
            .get(namespace)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// The first schema registered for a namespace
    pub fn first_schema(&self, namespace: &str) -> Option<&Arc<Schema>> {
        self.schemas_for(namespace).first()
    }

    /// Iterate over registered namespaces
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Total number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.values().map(Vec::len).sum()
    }

    /// Check if no schema is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find<'a, T>(
        &'a self,
        name: &QName,
        lookup: impl Fn(&'a Schema, &str) -> Option<T>,
    ) -> Option<T> {
        self.schemas_for(&name.namespace)
            .iter()
            .find_map(|schema| lookup(&**schema, &name.local_name))
    }

    // ========== Typed lookups ==========

    /// Look up a type definition by name
    pub fn type_by_name(&self, name: &QName) -> Option<&TypeDef> {
        self.find(name, Schema::type_def)
    }

    /// Look up a model group definition by name
    pub fn group_by_name(&self, name: &QName) -> Option<&Arc<GroupDef>> {
        self.find(name, Schema::group)
    }

    /// Look up a top-level attribute by name
    pub fn attribute_by_name(&self, name: &QName) -> Option<&Arc<Attribute>> {
        self.find(name, Schema::attribute)
    }

    /// Look up an attribute group by name
    pub fn attribute_group_by_name(&self, name: &QName) -> Option<&Arc<AttributeGroup>> {
        self.find(name, Schema::attribute_group)
    }

    /// Look up a top-level element by name
    pub fn element_by_name(&self, name: &QName) -> Option<&Arc<Element>> {
        self.find(name, Schema::element)
    }

    /// The schema declaring a top-level element
    pub fn element_schema(&self, name: &QName) -> Option<&Arc<Schema>> {
        self.schemas_for(&name.namespace)
            .iter()
            .find(|schema| schema.element(&name.local_name).is_some())
    }

    /// The schema declaring a top-level attribute
    pub fn attribute_schema(&self, name: &QName) -> Option<&Arc<Schema>> {
        self.schemas_for(&name.namespace)
            .iter()
            .find(|schema| schema.attribute(&name.local_name).is_some())
    }

    // ========== Substitution Groups ==========

    /// Elements declaring `head` as their substitution group head, in
    /// registration order
    pub fn substitutes_of(&self, head: &QName) -> &[Arc<Element>] {
        self.substitution_groups
            .get(head)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Check if an element heads a non-empty substitution group
    pub fn is_substitution_head(&self, name: &QName) -> bool {
        !self.substitutes_of(name).is_empty()
    }
}
