//! A single schema unit
//!
//! One parsed schema document: a target namespace plus its named
//! top-level components. Several schemas may share a target namespace.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::namespaces::QName;

use super::attributes::{Attribute, AttributeGroup};
use super::elements::Element;
use super::particles::GroupDef;
use super::types::{ComplexType, SimpleType, TypeDef};

/// A schema document's top-level declarations
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Target namespace ("" for no namespace)
    pub target_namespace: String,
    /// Where the schema was loaded from, if known
    pub location: Option<String>,
    types: IndexMap<String, TypeDef>,
    elements: IndexMap<String, Arc<Element>>,
    attributes: IndexMap<String, Arc<Attribute>>,
    attribute_groups: IndexMap<String, Arc<AttributeGroup>>,
    groups: IndexMap<String, Arc<GroupDef>>,
}

impl Schema {
    /// Create an empty schema; an absent namespace is normalized to ""
    pub fn new(target_namespace: Option<impl Into<String>>) -> Self {
        Self {
            target_namespace: target_namespace.map(|s| s.into()).unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Set the schema location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Build a name in this schema's target namespace
    pub fn qname(&self, local_name: &str) -> QName {
        QName::namespaced(self.target_namespace.clone(), local_name)
    }

    fn check_name(&self, name: Option<&QName>, kind: &str) -> Result<String> {
        let name = name.ok_or_else(|| {
            Error::schema(format!("top-level {} declaration has no name", kind))
        })?;
        validate_ncname(&name.local_name)?;
        if name.namespace != self.target_namespace {
            return Err(Error::schema(format!(
                "{} '{}' is not in target namespace '{}'",
                kind, name, self.target_namespace
            )));
        }
        Ok(name.local_name.clone())
    }

    // ========== Registration ==========

    /// Register a top-level element
    pub fn add_element(&mut self, mut element: Element) -> Result<Arc<Element>> {
        let key = self.check_name(element.name.as_ref(), "element")?;
        element.top_level = true;
        let element = Arc::new(element);
        self.elements.insert(key, Arc::clone(&element));
        Ok(element)
    }

    /// Register a named simple type
    pub fn add_simple_type(&mut self, simple_type: SimpleType) -> Result<TypeDef> {
        let key = self.check_name(simple_type.name.as_ref(), "simpleType")?;
        let def = TypeDef::from(simple_type);
        self.types.insert(key, def.clone());
        Ok(def)
    }

    /// Register a named complex type
    pub fn add_complex_type(&mut self, complex_type: ComplexType) -> Result<TypeDef> {
        let key = self.check_name(complex_type.name.as_ref(), "complexType")?;
        let def = TypeDef::from(complex_type);
        self.types.insert(key, def.clone());
        Ok(def)
    }

    /// Register a top-level attribute
    pub fn add_attribute(&mut self, mut attribute: Attribute) -> Result<Arc<Attribute>> {
        let key = self.check_name(attribute.name.as_ref(), "attribute")?;
        attribute.top_level = true;
        let attribute = Arc::new(attribute);
        self.attributes.insert(key, Arc::clone(&attribute));
        Ok(attribute)
    }

    /// Register a named attribute group
    pub fn add_attribute_group(&mut self, group: AttributeGroup) -> Result<Arc<AttributeGroup>> {
        let key = self.check_name(group.name.as_ref(), "attributeGroup")?;
        let group = Arc::new(group);
        self.attribute_groups.insert(key, Arc::clone(&group));
        Ok(group)
    }

    /// Register a named model group
    pub fn add_group(&mut self, group: GroupDef) -> Result<Arc<GroupDef>> {
        let key = self.check_name(Some(&group.name), "group")?;
        let group = Arc::new(group);
        self.groups.insert(key, Arc::clone(&group));
        Ok(group)
    }

    // ========== Lookups by local name ==========

    /// Look up a type definition
    pub fn type_def(&self, local_name: &str) -> Option<&TypeDef> {
        self.types.get(local_name)
    }

    /// Look up a top-level element
    pub fn element(&self, local_name: &str) -> Option<&Arc<Element>> {
        self.elements.get(local_name)
    }

    /// Look up a top-level attribute
    pub fn attribute(&self, local_name: &str) -> Option<&Arc<Attribute>> {
        self.attributes.get(local_name)
    }

    /// Look up an attribute group
    pub fn attribute_group(&self, local_name: &str) -> Option<&Arc<AttributeGroup>> {
        self.attribute_groups.get(local_name)
    }

    /// Look up a model group definition
    pub fn group(&self, local_name: &str) -> Option<&Arc<GroupDef>> {
        self.groups.get(local_name)
    }

    /// Iterate over top-level elements in registration order
    pub fn elements(&self) -> impl Iterator<Item = &Arc<Element>> {
        self.elements.values()
    }

    /// Iterate over named types in registration order
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Check if the schema declares nothing
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.elements.is_empty()
            && self.attributes.is_empty()
            && self.attribute_groups.is_empty()
            && self.groups.is_empty()
    }
}
