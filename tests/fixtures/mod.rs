//! Shared schema fixtures for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use xmlschema_walker::components::{
    AnyAttribute, AnyElement, Attribute, AttributeGroup, AttributeItem, AttributeUse, ComplexType,
    ContentRestriction, Element, Facet, GroupDef, GroupRef, ModelGroup, Occurs, Particle,
    ProcessContents, Schema, SimpleType,
};
use xmlschema_walker::resolve::{AttributeInfo, TypeInfo};
use xmlschema_walker::{NamespaceIndex, QName, SchemaVisitor, Walker};

pub const BOOK_NS: &str = "http://example.com/book";

/// Qualified name in the book namespace
pub fn q(local: &str) -> QName {
    QName::namespaced(BOOK_NS, local)
}

fn element(local: &str, type_name: QName) -> Element {
    Element::new(q(local)).with_type_name(type_name)
}

fn book_schema() -> Schema {
    let mut schema = Schema::new(Some(BOOK_NS)).with_location("file:///book.xsd");

    // Simple types
    schema
        .add_simple_type(
            SimpleType::restriction(QName::xsd("string"), vec![Facet::pattern("[0-9]{13}")])
                .named(q("isbnType")),
        )
        .unwrap();
    schema
        .add_simple_type(
            SimpleType::restriction(QName::xsd("string"), vec![Facet::max_length(50)])
                .named(q("shortString")),
        )
        .unwrap();
    schema
        .add_simple_type(
            SimpleType::restriction(q("shortString"), vec![Facet::max_length(10)])
                .named(q("tinyString")),
        )
        .unwrap();
    schema
        .add_simple_type(SimpleType::list(QName::xsd("int")).named(q("sizeList")))
        .unwrap();
    schema
        .add_simple_type(
            SimpleType::union(vec![QName::xsd("int"), QName::xsd("boolean")], vec![])
                .named(q("numberOrFlag")),
        )
        .unwrap();
    schema
        .add_simple_type(
            SimpleType::union(vec![q("numberOrFlag"), QName::xsd("date")], vec![])
                .named(q("flexValue")),
        )
        .unwrap();
    schema
        .add_simple_type(SimpleType::list(q("sizeList")).named(q("listOfLists")))
        .unwrap();

    // Attributes
    schema
        .add_attribute(
            Attribute::new(q("lang"))
                .with_type_name(QName::xsd("language"))
                .with_default("en"),
        )
        .unwrap();
    schema
        .add_attribute_group(
            AttributeGroup::new(q("common"))
                .with_item(Attribute::new(QName::local("id")).with_type_name(QName::xsd("ID")))
                .with_item(Attribute::reference(q("lang"))),
        )
        .unwrap();

    // Attribute restriction pair
    schema
        .add_complex_type(
            ComplexType::new()
                .named(q("baseEntry"))
                .with_particle(Particle::element(element("label", QName::xsd("string"))))
                .with_attribute(
                    Attribute::new(QName::local("x"))
                        .with_type_name(QName::xsd("string"))
                        .with_use(AttributeUse::Optional)
                        .with_default("a"),
                )
                .with_attribute(Attribute::new(QName::local("y")).with_type_name(QName::xsd("int"))),
        )
        .unwrap();
    schema
        .add_complex_type(
            ComplexType::new().named(q("restrictedEntry")).restricting(
                ContentRestriction::new(q("baseEntry"))
                    .with_attribute(Attribute::new(QName::local("x")).with_type_name(QName::xsd("token"))),
            ),
        )
        .unwrap();

    // Recursive sections
    schema
        .add_complex_type(
            ComplexType::new()
                .named(q("sectionType"))
                .with_particle(Particle::group(ModelGroup::sequence(vec![
                    Particle::element(element("heading", QName::xsd("string"))),
                    Particle::element(Element::reference(q("section")).with_occurs(Occurs::zero_or_more())),
                ])))
                .with_attribute(AttributeItem::group_ref(q("common"))),
        )
        .unwrap();
    schema
        .add_element(element("section", q("sectionType")))
        .unwrap();

    // Book
    schema
        .add_group(GroupDef::new(
            q("extras"),
            ModelGroup::sequence(vec![Particle::any(
                AnyElement::new("##other").with_process_contents(ProcessContents::Lax),
            )]),
        ))
        .unwrap();
    schema
        .add_complex_type(
            ComplexType::new()
                .named(q("bookType"))
                .with_particle(Particle::group(ModelGroup::sequence(vec![
                    Particle::element(element("title", q("shortString"))),
                    Particle::element(
                        element("author", QName::xsd("string")).with_occurs(Occurs::one_or_more()),
                    ),
                    Particle::element(Element::reference(q("section")).with_occurs(Occurs::zero_or_more())),
                    Particle::group_ref(GroupRef::new(q("extras")).with_occurs(Occurs::zero_or_more())),
                ])))
                .with_attribute(
                    Attribute::new(QName::local("isbn"))
                        .with_type_name(q("isbnType"))
                        .with_use(AttributeUse::Required),
                )
                .with_attribute(AttributeItem::group_ref(q("common")))
                .with_any_attribute(AnyAttribute::new("##other")),
        )
        .unwrap();
    schema.add_element(element("book", q("bookType"))).unwrap();
    schema.add_element(element("entry", q("restrictedEntry"))).unwrap();

    // Substitution groups
    schema
        .add_element(element("publication", QName::xsd("string")))
        .unwrap();
    schema
        .add_element(element("journal", QName::xsd("string")).with_substitution_group(q("publication")))
        .unwrap();
    schema
        .add_element(element("magazine", QName::xsd("string")).with_substitution_group(q("publication")))
        .unwrap();
    schema
        .add_element(Element::new(q("media")).with_abstract(true))
        .unwrap();
    schema
        .add_element(element("ebook", q("bookType")).with_substitution_group(q("media")))
        .unwrap();
    schema
        .add_element(element("audiobook", QName::xsd("string")).with_substitution_group(q("media")))
        .unwrap();

    // References to a substitution head and to a recursive element
    schema
        .add_element(Element::new(q("shelf")).with_complex_type(
            ComplexType::new().with_particle(Particle::group(ModelGroup::sequence(vec![
                Particle::element(Element::reference(q("publication")).with_occurs(Occurs::zero_or_more())),
                Particle::element(
                    Element::reference(q("section"))
                        .with_id("s1")
                        .with_occurs(Occurs::optional()),
                ),
            ]))),
        ))
        .unwrap();

    schema
}

/// Index holding the built-in types and the book schema
pub fn book_index() -> NamespaceIndex {
    let mut index = NamespaceIndex::with_builtins();
    index.register(book_schema());
    index
}

/// Global element of the book schema
pub fn global_element<'a>(index: &'a NamespaceIndex, local: &str) -> &'a Arc<Element> {
    index
        .element_by_name(&q(local))
        .unwrap_or_else(|| panic!("no global element '{}'", local))
}

/// Visitor recording every event as a short line
#[derive(Default)]
pub struct EventLog {
    pub events: Vec<String>,
}

fn local(element: &Element) -> String {
    element
        .qname()
        .map(|n| n.local_name.clone())
        .unwrap_or_default()
}

impl SchemaVisitor for EventLog {
    fn on_enter_element(&mut self, element: &Element, _: &Arc<TypeInfo>, previously_visited: bool) {
        let mark = if previously_visited { "*" } else { "" };
        self.events.push(format!("enter {}{}", local(element), mark));
    }

    fn on_exit_element(&mut self, element: &Element, _: &Arc<TypeInfo>, _: bool) {
        self.events.push(format!("exit {}", local(element)));
    }

    fn on_visit_attribute(&mut self, _: &Element, attribute: &AttributeInfo) {
        let name = attribute.qname().map(|n| n.local_name.clone()).unwrap_or_default();
        let summary = attribute.type_info().map(|t| t.summary()).unwrap_or_default();
        self.events.push(format!("@{}:{}", name, summary));
    }

    fn on_visit_any_attribute(&mut self, _: &Element, any: &AnyAttribute) {
        self.events.push(format!("any-attribute {}", any.namespace));
    }

    fn on_end_attributes(&mut self, _: &Element) {
        self.events.push("end-attributes".to_string());
    }

    fn on_enter_substitution_group(&mut self, head: &Element) {
        self.events.push(format!("enter-subst {}", local(head)));
    }

    fn on_exit_substitution_group(&mut self, head: &Element) {
        self.events.push(format!("exit-subst {}", local(head)));
    }

    fn on_enter_all_group(&mut self, group: &ModelGroup) {
        self.events.push(format!("all {}", group.occurs));
    }

    fn on_exit_all_group(&mut self, _: &ModelGroup) {
        self.events.push("end-all".to_string());
    }

    fn on_enter_choice_group(&mut self, group: &ModelGroup) {
        self.events.push(format!("choice {}", group.occurs));
    }

    fn on_exit_choice_group(&mut self, _: &ModelGroup) {
        self.events.push("end-choice".to_string());
    }

    fn on_enter_sequence_group(&mut self, group: &ModelGroup) {
        self.events.push(format!("sequence {}", group.occurs));
    }

    fn on_exit_sequence_group(&mut self, _: &ModelGroup) {
        self.events.push("end-sequence".to_string());
    }

    fn on_visit_any(&mut self, any: &AnyElement) {
        self.events.push(format!("any {}", any.namespace));
    }
}

/// Visitor keeping a copy of every entered element
#[derive(Default)]
pub struct ElementLog {
    pub entered: Vec<Element>,
}

impl ElementLog {
    /// Entered elements with the given local name
    pub fn named(&self, local: &str) -> Vec<&Element> {
        self.entered
            .iter()
            .filter(|e| e.qname() == Some(&q(local)))
            .collect()
    }
}

impl SchemaVisitor for ElementLog {
    fn on_enter_element(&mut self, element: &Element, _: &Arc<TypeInfo>, _: bool) {
        self.entered.push(element.clone());
    }
}

/// Walk a global element with a fresh walker and return the event log
pub fn walk_events(index: &NamespaceIndex, root: &str) -> Vec<String> {
    let log = Rc::new(RefCell::new(EventLog::default()));
    let mut walker = Walker::new(index).unwrap();
    walker.add_visitor(log.clone());
    walker.walk(global_element(index, root)).unwrap();
    let events = log.borrow().events.clone();
    events
}
