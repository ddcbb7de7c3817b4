//! Constraining facets of resolved simple types
//!
//! A [`Restriction`] is a classified facet. Only enumeration and pattern
//! are multi-valued; every other kind is a singleton constraint, so two
//! restrictions of such a kind compare equal whatever their values. That
//! equality drives override bookkeeping in [`FacetMap`]: inserting a
//! singleton facet replaces the one already present.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::components::Facet;
use crate::error::{Error, Result};

/// Kind of a constraining facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacetKind {
    /// xs:enumeration
    Enumeration,
    /// xs:pattern
    Pattern,
    /// xs:whiteSpace
    WhiteSpace,
    /// xs:length
    Length,
    /// xs:minLength
    LengthMin,
    /// xs:maxLength
    LengthMax,
    /// xs:minInclusive
    InclusiveMin,
    /// xs:maxInclusive
    InclusiveMax,
    /// xs:minExclusive
    ExclusiveMin,
    /// xs:maxExclusive
    ExclusiveMax,
    /// xs:fractionDigits
    FractionDigits,
    /// xs:totalDigits
    TotalDigits,
}

impl FacetKind {
    /// Classify a facet element by its local name
    pub fn from_facet_name(name: &str) -> Option<Self> {
        let kind = match name {
            "enumeration" => Self::Enumeration,
            "pattern" => Self::Pattern,
            "whiteSpace" => Self::WhiteSpace,
            "length" => Self::Length,
            "minLength" => Self::LengthMin,
            "maxLength" => Self::LengthMax,
            "minInclusive" => Self::InclusiveMin,
            "maxInclusive" => Self::InclusiveMax,
            "minExclusive" => Self::ExclusiveMin,
            "maxExclusive" => Self::ExclusiveMax,
            "fractionDigits" => Self::FractionDigits,
            "totalDigits" => Self::TotalDigits,
            _ => return None,
        };
        Some(kind)
    }

    /// The facet element's local name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enumeration => "enumeration",
            Self::Pattern => "pattern",
            Self::WhiteSpace => "whiteSpace",
            Self::Length => "length",
            Self::LengthMin => "minLength",
            Self::LengthMax => "maxLength",
            Self::InclusiveMin => "minInclusive",
            Self::InclusiveMax => "maxInclusive",
            Self::ExclusiveMin => "minExclusive",
            Self::ExclusiveMax => "maxExclusive",
            Self::FractionDigits => "fractionDigits",
            Self::TotalDigits => "totalDigits",
        }
    }

    /// Whether several facets of this kind may coexist
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::Enumeration | Self::Pattern)
    }
}

impl std::fmt::Display for FacetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified constraining facet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restriction {
    /// Facet kind
    pub kind: FacetKind,
    /// Facet value, as written in the schema
    pub value: String,
    /// Whether derived types may not change this facet
    pub fixed: bool,
}

impl Restriction {
    /// Create a restriction directly
    pub fn new(kind: FacetKind, value: impl Into<String>, fixed: bool) -> Self {
        Self {
            kind,
            value: value.into(),
            fixed,
        }
    }

    /// Classify a raw facet
    pub fn from_facet(facet: &Facet) -> Result<Self> {
        let kind = FacetKind::from_facet_name(&facet.name).ok_or_else(|| {
            Error::Facet(format!("unrecognized facet '{}'", facet.name))
        })?;
        Ok(Self::new(kind, facet.value.clone(), facet.fixed))
    }
}

impl PartialEq for Restriction {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if self.kind.is_multi_valued() {
            self.value == other.value && self.fixed == other.fixed
        } else {
            true
        }
    }
}

impl Eq for Restriction {}

impl Hash for Restriction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        if self.kind.is_multi_valued() {
            self.value.hash(state);
            self.fixed.hash(state);
        }
    }
}

/// Facets of a resolved simple type, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetMap {
    facets: IndexMap<FacetKind, IndexSet<Restriction>>,
}

impl FacetMap {
    /// Create an empty facet map
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and collect raw facets in declaration order
    pub fn from_facets(facets: &[Facet]) -> Result<Self> {
        let mut map = Self::new();
        for facet in facets {
            map.insert(Restriction::from_facet(facet)?);
        }
        Ok(map)
    }

    /// Insert a restriction. A singleton kind keeps only the latest value.
    pub fn insert(&mut self, restriction: Restriction) {
        self.facets
            .entry(restriction.kind)
            .or_default()
            .replace(restriction);
    }

    /// Merge a parent's facets with a child's. Child kinds replace the
    /// parent's facets of the same kind wholesale.
    pub fn merge(parent: Option<&FacetMap>, child: Option<&FacetMap>) -> Option<FacetMap> {
        match (parent, child) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (Some(parent), Some(child)) => {
                let mut merged = parent.clone();
                for (kind, restrictions) in &child.facets {
                    merged.facets.insert(*kind, restrictions.clone());
                }
                Some(merged)
            }
        }
    }

    /// Restrictions of a kind
    pub fn get(&self, kind: FacetKind) -> Option<&IndexSet<Restriction>> {
        self.facets.get(&kind)
    }

    /// The first value of a kind
    pub fn first_value(&self, kind: FacetKind) -> Option<&str> {
        self.get(kind)
            .and_then(|set| set.first())
            .map(|r| r.value.as_str())
    }

    /// All values of a kind, in declaration order
    pub fn values(&self, kind: FacetKind) -> Vec<&str> {
        self.get(kind)
            .map(|set| set.iter().map(|r| r.value.as_str()).collect())
            .unwrap_or_default()
    }

    /// Enumeration values
    pub fn enumeration_values(&self) -> Vec<&str> {
        self.values(FacetKind::Enumeration)
    }

    /// Pattern values
    pub fn patterns(&self) -> Vec<&str> {
        self.values(FacetKind::Pattern)
    }

    /// Check if a kind is constrained
    pub fn contains(&self, kind: FacetKind) -> bool {
        self.facets.contains_key(&kind)
    }

    /// Iterate over constrained kinds and their restrictions
    pub fn iter(&self) -> impl Iterator<Item = (&FacetKind, &IndexSet<Restriction>)> {
        self.facets.iter()
    }

    /// Number of constrained kinds
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Check if no kind is constrained
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}
