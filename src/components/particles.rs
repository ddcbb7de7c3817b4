//! XSD particles and model groups
//!
//! Particles occupy positions in a content model: element declarations,
//! element wildcards, model groups (sequence, choice, all) and references
//! to named model groups. Every particle carries occurrence bounds.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#p

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::namespaces::QName;

use super::elements::Element;
use super::wildcards::AnyElement;
use super::Annotation;

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Check if this particle can be empty (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if particle can occur without upper bound
    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

impl std::fmt::Display for Occurs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}..{}]", self.min, max),
            None => write!(f, "[{}..unbounded]", self.min),
        }
    }
}

/// Model group compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compositor {
    /// Ordered sequence of particles
    #[default]
    Sequence,
    /// One of multiple alternatives
    Choice,
    /// Unordered set of particles
    All,
}

impl std::fmt::Display for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Choice => write!(f, "choice"),
            Self::All => write!(f, "all"),
        }
    }
}

/// A particle in a content model
#[derive(Debug, Clone)]
pub enum Particle {
    /// Element declaration or element reference
    Element(Arc<Element>),
    /// Element wildcard (xs:any)
    Any(Arc<AnyElement>),
    /// Model group (xs:sequence, xs:choice, xs:all)
    Group(Arc<ModelGroup>),
    /// Reference to a named model group (xs:group ref="...")
    GroupRef(Arc<GroupRef>),
}

impl Particle {
    /// Get the occurrence constraints declared on this particle
    pub fn occurs(&self) -> Occurs {
        match self {
            Self::Element(e) => e.occurs,
            Self::Any(a) => a.occurs,
            Self::Group(g) => g.occurs,
            Self::GroupRef(r) => r.occurs,
        }
    }

    /// Wrap a model group
    pub fn group(group: ModelGroup) -> Self {
        Self::Group(Arc::new(group))
    }

    /// Wrap an element declaration
    pub fn element(element: Element) -> Self {
        Self::Element(Arc::new(element))
    }

    /// Wrap an element wildcard
    pub fn any(any: AnyElement) -> Self {
        Self::Any(Arc::new(any))
    }

    /// Wrap a model group reference
    pub fn group_ref(group_ref: GroupRef) -> Self {
        Self::GroupRef(Arc::new(group_ref))
    }
}

/// XSD model group (sequence, choice, all)
///
/// Children live behind an `Arc<[Particle]>`: copies made to carry
/// different occurrence bounds share them, and nobody can mutate them.
#[derive(Debug, Clone)]
pub struct ModelGroup {
    /// Compositor (sequence, choice, all)
    pub compositor: Compositor,
    /// Particles in this group
    pub particles: Arc<[Particle]>,
    /// Occurrence constraints
    pub occurs: Occurs,
    /// Annotation
    pub annotation: Option<Annotation>,
}

impl ModelGroup {
    /// Create a new model group
    pub fn new(compositor: Compositor, particles: Vec<Particle>) -> Self {
        Self {
            compositor,
            particles: particles.into(),
            occurs: Occurs::once(),
            annotation: None,
        }
    }

    /// Create a sequence
    pub fn sequence(particles: Vec<Particle>) -> Self {
        Self::new(Compositor::Sequence, particles)
    }

    /// Create a choice
    pub fn choice(particles: Vec<Particle>) -> Self {
        Self::new(Compositor::Choice, particles)
    }

    /// Create an all group
    pub fn all(particles: Vec<Particle>) -> Self {
        Self::new(Compositor::All, particles)
    }

    /// Set the occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Shallow copy carrying different occurrence bounds.
    /// The children are shared with `self`.
    pub fn with_overridden_occurs(&self, occurs: Occurs) -> Self {
        Self {
            compositor: self.compositor,
            particles: Arc::clone(&self.particles),
            occurs,
            annotation: self.annotation.clone(),
        }
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check if the group has no children
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Named model group definition (top-level xs:group)
#[derive(Debug, Clone)]
pub struct GroupDef {
    /// Group name
    pub name: QName,
    /// The group's model group
    pub particle: Arc<ModelGroup>,
    /// Annotation
    pub annotation: Option<Annotation>,
}

impl GroupDef {
    /// Create a named model group definition
    pub fn new(name: QName, particle: ModelGroup) -> Self {
        Self {
            name,
            particle: Arc::new(particle),
            annotation: None,
        }
    }
}

/// Reference to a named model group
#[derive(Debug, Clone)]
pub struct GroupRef {
    /// Name of the referenced group
    pub ref_name: QName,
    /// Already-resolved model group, when the parser attached one
    pub particle: Option<Arc<ModelGroup>>,
    /// Occurrence bounds of the reference
    pub occurs: Occurs,
}

impl GroupRef {
    /// Create a reference to a named group
    pub fn new(ref_name: QName) -> Self {
        Self {
            ref_name,
            particle: None,
            occurs: Occurs::once(),
        }
    }

    /// Set the occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Attach the referenced model group directly
    pub fn with_particle(mut self, particle: Arc<ModelGroup>) -> Self {
        self.particle = Some(particle);
        self
    }
}
