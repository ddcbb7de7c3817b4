//! Depth-first schema walker
//!
//! Walks an element's content model and reports every element,
//! attribute, model group and wildcard to the registered visitors.
//!
//! Recursive schemas terminate through the visited-element set: the first
//! occurrence of an element name is expanded, every later occurrence is
//! reported with `previously_visited` set and nothing beneath it.
//! Substitution-group heads are followed by all of their substitutes.

pub mod visitor;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::components::{Compositor, Element, GroupRef, ModelGroup, Occurs, Particle, TypeDef};
use crate::error::{Error, Result, SchemaError};
use crate::index::NamespaceIndex;
use crate::limits::Limits;
use crate::namespaces::QName;
use crate::resolve::{ResolvedScope, ScopeCache, ScopeResolver};

pub use visitor::SchemaVisitor;

/// Shared handle to a registered visitor
pub type VisitorRef = Rc<RefCell<dyn SchemaVisitor>>;

/// Schema walker
///
/// Owns the scope cache and the visited-element set of one walking
/// session. Call [`Walker::clear`] between independent walks.
pub struct Walker<'a> {
    index: &'a NamespaceIndex,
    cache: ScopeCache,
    visited: HashSet<QName>,
    visitors: Vec<VisitorRef>,
    recognized: Option<HashSet<QName>>,
    limits: Limits,
    depth: usize,
}

impl<'a> Walker<'a> {
    /// Create a walker over a namespace index
    pub fn new(index: &'a NamespaceIndex) -> Result<Self> {
        if index.is_empty() {
            return Err(Error::Usage(
                "walker requires at least one registered schema".to_string(),
            ));
        }
        Ok(Self {
            index,
            cache: ScopeCache::new(),
            visited: HashSet::new(),
            visitors: Vec::new(),
            recognized: None,
            limits: Limits::default(),
            depth: 0,
        })
    }

    /// Tag resolved type infos with their nearest recognized ancestor
    pub fn with_recognized_types(mut self, recognized: HashSet<QName>) -> Self {
        self.recognized = Some(recognized);
        self
    }

    /// Set recursion limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Register a visitor; visitors are notified in registration order
    pub fn add_visitor(&mut self, visitor: VisitorRef) {
        self.visitors.push(visitor);
    }

    /// Unregister a visitor. Returns whether it was registered.
    pub fn remove_visitor<V: SchemaVisitor + ?Sized + 'static>(
        &mut self,
        visitor: &Rc<RefCell<V>>,
    ) -> bool {
        let target = Rc::as_ptr(visitor) as *const ();
        let before = self.visitors.len();
        self.visitors
            .retain(|registered| Rc::as_ptr(registered) as *const () != target);
        self.visitors.len() != before
    }

    /// Number of registered visitors
    pub fn visitor_count(&self) -> usize {
        self.visitors.len()
    }

    /// Reset the scope cache and the visited-element set
    pub fn clear(&mut self) {
        debug!(
            cached_scopes = self.cache.len(),
            visited = self.visited.len(),
            "clearing walker state"
        );
        self.cache.clear();
        self.visited.clear();
    }

    /// Scope cache of this session
    pub fn cache(&self) -> &ScopeCache {
        &self.cache
    }

    /// Check if an element name has been expanded in this session
    pub fn is_visited(&self, name: &QName) -> bool {
        self.visited.contains(name)
    }

    /// Resolve a type through this session's scope cache
    pub fn resolve(&mut self, type_def: &TypeDef) -> Result<Arc<ResolvedScope>> {
        self.resolver().resolve(type_def)
    }

    /// Walk an element declaration or reference
    pub fn walk(&mut self, element: &Arc<Element>) -> Result<()> {
        debug!(
            element = %element.qname().map(|n| n.to_string()).unwrap_or_default(),
            visitors = self.visitors.len(),
            "walk started"
        );
        self.walk_element(element)
    }

    fn resolver(&mut self) -> ScopeResolver<'_> {
        let resolver = ScopeResolver::new(self.index, &mut self.cache).with_limits(self.limits);
        match &self.recognized {
            Some(recognized) => resolver.with_recognized_types(recognized),
            None => resolver,
        }
    }

    fn notify(&self, mut event: impl FnMut(&mut dyn SchemaVisitor)) {
        for visitor in &self.visitors {
            event(&mut *visitor.borrow_mut());
        }
    }

    fn walk_element(&mut self, declaration: &Arc<Element>) -> Result<()> {
        self.depth += 1;
        let result = self
            .limits
            .check_walk_depth(self.depth)
            .and_then(|()| self.expand_element(declaration));
        self.depth -= 1;
        result
    }

    fn expand_element(&mut self, declaration: &Arc<Element>) -> Result<()> {
        let mut element = self.concrete_element(declaration)?;

        let index = self.index;
        let head = element
            .qname()
            .filter(|name| index.is_substitution_head(name))
            .cloned();
        if let Some(head_name) = &head {
            debug!(
                head = %head_name,
                substitutes = index.substitutes_of(head_name).len(),
                "entering substitution group"
            );
            self.notify(|v| v.on_enter_substitution_group(&element));
            if element.occurs != Occurs::default() {
                let mut unconstrained = (*element).clone();
                unconstrained.occurs = Occurs::default();
                element = Arc::new(unconstrained);
            }
        }

        match self.element_scope(&element)? {
            Some(scope) => self.visit_typed_element(&element, &scope)?,
            None => trace!(
                element = %element.qname().map(|n| n.to_string()).unwrap_or_default(),
                "abstract element without type"
            ),
        }

        if let Some(head_name) = &head {
            for substitute in index.substitutes_of(head_name) {
                self.walk_element(substitute)?;
            }
            self.notify(|v| v.on_exit_substitution_group(&element));
        }
        Ok(())
    }

    fn visit_typed_element(&mut self, element: &Arc<Element>, scope: &ResolvedScope) -> Result<()> {
        let identity = element.qname();
        let previously_visited = identity.is_some_and(|name| self.visited.contains(name));
        trace!(
            element = %identity.map(|n| n.to_string()).unwrap_or_default(),
            previously_visited,
            "entering element"
        );
        self.notify(|v| v.on_enter_element(element, &scope.type_info, previously_visited));

        if previously_visited {
            trace!("element already expanded, skipping content");
        } else {
            if let Some(name) = identity {
                self.visited.insert(name.clone());
            }
            self.visit_attributes(element, scope)?;
            if let Some(particle) = &scope.child_particle {
                self.walk_particle(particle)?;
            }
        }

        self.notify(|v| v.on_exit_element(element, &scope.type_info, previously_visited));
        Ok(())
    }

    fn visit_attributes(&mut self, element: &Element, scope: &ResolvedScope) -> Result<()> {
        for info in scope.attributes.values() {
            let type_info = self.resolver().attribute_type(info)?;
            let resolved = info.with_type(type_info);
            self.notify(|v| v.on_visit_attribute(element, &resolved));
        }
        if let Some(any_attribute) = &scope.any_attribute {
            self.notify(|v| v.on_visit_any_attribute(element, any_attribute));
        }
        self.notify(|v| v.on_end_attributes(element));
        Ok(())
    }

    /// Follow an element reference. The reference contributes `id` and
    /// occurrence bounds; everything else comes from the global
    /// declaration.
    fn concrete_element(&self, declaration: &Arc<Element>) -> Result<Arc<Element>> {
        let Some(ref_name) = &declaration.ref_name else {
            return Ok(Arc::clone(declaration));
        };
        let global = self.index.element_by_name(ref_name).ok_or_else(|| {
            SchemaError::new("element reference cannot be resolved")
                .with_component(ref_name.to_string())
        })?;
        let mut element = (**global).clone();
        element.id = declaration.id.clone().or_else(|| global.id.clone());
        element.occurs = declaration.occurs;
        Ok(Arc::new(element))
    }

    fn element_scope(&mut self, element: &Element) -> Result<Option<Arc<ResolvedScope>>> {
        match (&element.inline_type, &element.type_name) {
            (Some(inline), _) => self.resolver().resolve(inline).map(Some),
            (None, Some(type_name)) => self.resolver().resolve_by_name(type_name).map(Some),
            (None, None) if element.is_abstract => Ok(None),
            (None, None) => {
                let mut err = SchemaError::new("non-abstract element with no type");
                if let Some(name) = element.qname() {
                    err = err.with_component(name.to_string());
                }
                if let Some(position) = element.position {
                    err = err.with_location(position.to_string());
                }
                Err(err.into())
            }
        }
    }

    fn walk_particle(&mut self, particle: &Particle) -> Result<()> {
        match particle {
            Particle::Element(element) => self.walk_element(element),
            Particle::Any(any) => {
                self.notify(|v| v.on_visit_any(any));
                Ok(())
            }
            Particle::Group(group) => self.walk_group(group, group.occurs),
            Particle::GroupRef(group_ref) => {
                let group = self.referenced_group(group_ref)?;
                self.walk_group(&group, group_ref.occurs)
            }
        }
    }

    fn referenced_group(&self, group_ref: &GroupRef) -> Result<Arc<ModelGroup>> {
        if let Some(group) = &group_ref.particle {
            return Ok(Arc::clone(group));
        }
        self.index
            .group_by_name(&group_ref.ref_name)
            .map(|def| Arc::clone(&def.particle))
            .ok_or_else(|| {
                SchemaError::new("group reference cannot be resolved")
                    .with_component(group_ref.ref_name.to_string())
                    .into()
            })
    }

    fn walk_group(&mut self, group: &Arc<ModelGroup>, occurs: Occurs) -> Result<()> {
        let group = if group.occurs == occurs {
            Arc::clone(group)
        } else {
            trace!(declared = %group.occurs, effective = %occurs, "overriding group occurrence");
            Arc::new(group.with_overridden_occurs(occurs))
        };

        match group.compositor {
            Compositor::Sequence => self.notify(|v| v.on_enter_sequence_group(&group)),
            Compositor::Choice => self.notify(|v| v.on_enter_choice_group(&group)),
            Compositor::All => self.notify(|v| v.on_enter_all_group(&group)),
        }
        for child in group.particles.iter() {
            self.walk_particle(child)?;
        }
        match group.compositor {
            Compositor::Sequence => self.notify(|v| v.on_exit_sequence_group(&group)),
            Compositor::Choice => self.notify(|v| v.on_exit_choice_group(&group)),
            Compositor::All => self.notify(|v| v.on_exit_all_group(&group)),
        }
        Ok(())
    }
}
