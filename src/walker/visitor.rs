//! Walk callbacks

use std::sync::Arc;

use crate::components::{AnyAttribute, AnyElement, Element, ModelGroup};
use crate::resolve::{AttributeInfo, TypeInfo};

/// Observer of a schema walk
///
/// Every method has a no-op default, so implementors only override the
/// events they care about. Events arrive depth-first and balanced: each
/// enter is matched by an exit.
pub trait SchemaVisitor {
    /// An element is entered. When `previously_visited` is set, no
    /// attribute or child events follow before the matching exit.
    fn on_enter_element(
        &mut self,
        _element: &Element,
        _type_info: &Arc<TypeInfo>,
        _previously_visited: bool,
    ) {
    }

    /// An element is left
    fn on_exit_element(
        &mut self,
        _element: &Element,
        _type_info: &Arc<TypeInfo>,
        _previously_visited: bool,
    ) {
    }

    /// An attribute in scope of the current element, its type resolved
    fn on_visit_attribute(&mut self, _element: &Element, _attribute: &AttributeInfo) {}

    /// The current element's attribute wildcard
    fn on_visit_any_attribute(&mut self, _element: &Element, _any_attribute: &AnyAttribute) {}

    /// All attributes of the current element have been reported
    fn on_end_attributes(&mut self, _element: &Element) {}

    /// A substitution-group head is entered; its substitutes follow the
    /// head's own element events
    fn on_enter_substitution_group(&mut self, _head: &Element) {}

    /// A substitution group is left
    fn on_exit_substitution_group(&mut self, _head: &Element) {}

    /// An `all` group is entered
    fn on_enter_all_group(&mut self, _group: &ModelGroup) {}

    /// An `all` group is left
    fn on_exit_all_group(&mut self, _group: &ModelGroup) {}

    /// A `choice` group is entered
    fn on_enter_choice_group(&mut self, _group: &ModelGroup) {}

    /// A `choice` group is left
    fn on_exit_choice_group(&mut self, _group: &ModelGroup) {}

    /// A `sequence` group is entered, with its effective occurrence bounds
    fn on_enter_sequence_group(&mut self, _group: &ModelGroup) {}

    /// A `sequence` group is left
    fn on_exit_sequence_group(&mut self, _group: &ModelGroup) {}

    /// An element wildcard; its content is not expanded
    fn on_visit_any(&mut self, _any: &AnyElement) {}
}
