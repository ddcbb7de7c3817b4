//! Dump-building visitor

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use crate::components::{AnyAttribute, AnyElement, Element, ModelGroup};
use crate::error::{Result, SchemaError};
use crate::index::NamespaceIndex;
use crate::namespaces::QName;
use crate::resolve::{AttributeInfo, TypeInfo};
use crate::walker::{SchemaVisitor, Walker};

use super::model::{
    AttributeNode, ContentNode, ElementNode, GroupNode, SchemaDump, SubstitutionGroupNode,
    WildcardNode,
};

enum Frame {
    Element(ElementNode),
    Group(GroupNode),
    Substitution(SubstitutionGroupNode),
}

/// Visitor assembling a [`SchemaDump`] from walk events
#[derive(Default)]
pub struct DumpBuilder {
    stack: Vec<Frame>,
    roots: Vec<ContentNode>,
}

impl DumpBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the dump built so far, leaving the builder empty
    pub fn finish(&mut self) -> SchemaDump {
        self.stack.clear();
        SchemaDump {
            roots: std::mem::take(&mut self.roots),
        }
    }

    fn attach(&mut self, node: ContentNode) {
        match self.stack.last_mut() {
            Some(Frame::Element(element)) => element.content.push(node),
            Some(Frame::Group(group)) => group.content.push(node),
            Some(Frame::Substitution(group)) => group.members.push(node),
            None => self.roots.push(node),
        }
    }

    fn current_element(&mut self) -> Option<&mut ElementNode> {
        match self.stack.last_mut() {
            Some(Frame::Element(element)) => Some(element),
            _ => None,
        }
    }

    fn enter_group(&mut self, group: &ModelGroup) {
        self.stack
            .push(Frame::Group(GroupNode::new(group.compositor, group.occurs)));
    }

    fn exit_group(&mut self) {
        if let Some(Frame::Group(group)) = self.stack.pop() {
            self.attach(ContentNode::Group(group));
        }
    }
}

impl SchemaVisitor for DumpBuilder {
    fn on_enter_element(
        &mut self,
        element: &Element,
        type_info: &Arc<TypeInfo>,
        previously_visited: bool,
    ) {
        self.stack.push(Frame::Element(ElementNode::new(
            element,
            type_info,
            previously_visited,
        )));
    }

    fn on_exit_element(&mut self, _element: &Element, _type_info: &Arc<TypeInfo>, _: bool) {
        if let Some(Frame::Element(node)) = self.stack.pop() {
            self.attach(ContentNode::Element(node));
        }
    }

    fn on_visit_attribute(&mut self, _element: &Element, attribute: &AttributeInfo) {
        if let Some(node) = self.current_element() {
            node.attributes.push(AttributeNode::from(attribute));
        }
    }

    fn on_visit_any_attribute(&mut self, _element: &Element, any_attribute: &AnyAttribute) {
        if let Some(node) = self.current_element() {
            node.any_attribute = Some(WildcardNode::from(any_attribute));
        }
    }

    fn on_enter_substitution_group(&mut self, head: &Element) {
        self.stack.push(Frame::Substitution(SubstitutionGroupNode {
            head: head.qname().map(|n| n.to_string()).unwrap_or_default(),
            members: Vec::new(),
        }));
    }

    fn on_exit_substitution_group(&mut self, _head: &Element) {
        if let Some(Frame::Substitution(group)) = self.stack.pop() {
            self.attach(ContentNode::SubstitutionGroup(group));
        }
    }

    fn on_enter_all_group(&mut self, group: &ModelGroup) {
        self.enter_group(group);
    }

    fn on_exit_all_group(&mut self, _group: &ModelGroup) {
        self.exit_group();
    }

    fn on_enter_choice_group(&mut self, group: &ModelGroup) {
        self.enter_group(group);
    }

    fn on_exit_choice_group(&mut self, _group: &ModelGroup) {
        self.exit_group();
    }

    fn on_enter_sequence_group(&mut self, group: &ModelGroup) {
        self.enter_group(group);
    }

    fn on_exit_sequence_group(&mut self, _group: &ModelGroup) {
        self.exit_group();
    }

    fn on_visit_any(&mut self, any: &AnyElement) {
        self.attach(ContentNode::Any(WildcardNode::from(any)));
    }
}

/// Walk each global element named in `roots` and dump the result.
///
/// All roots share one walking session, so an element expanded under an
/// earlier root shows up as previously visited under a later one.
pub fn dump_elements(
    index: &NamespaceIndex,
    roots: &[QName],
    recognized: Option<HashSet<QName>>,
) -> Result<SchemaDump> {
    let builder = Rc::new(RefCell::new(DumpBuilder::new()));
    let mut walker = Walker::new(index)?;
    if let Some(recognized) = recognized {
        walker = walker.with_recognized_types(recognized);
    }
    walker.add_visitor(builder.clone());

    for name in roots {
        let element = index.element_by_name(name).ok_or_else(|| {
            SchemaError::new("element cannot be resolved")
                .with_component(name.to_string())
        })?;
        walker.walk(element)?;
    }

    let dump = builder.borrow_mut().finish();
    Ok(dump)
}
