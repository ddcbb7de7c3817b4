//! Scope resolution
//!
//! Folds a type definition's derivation chain (list, union and facet
//! restriction for simple types; extension and restriction of simple and
//! complex content for complex types) into one [`ResolvedScope`]. Named
//! types are memoized in a caller-owned [`ScopeCache`]; anonymous types
//! are resolved afresh every time.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::components::{
    AnyAttribute, ComplexType, ContentDerivation, ContentExtension, ContentModel,
    ContentRestriction, Facet, ModelGroup, Particle, SimpleType, SimpleTypeContent, TypeDef,
};
use crate::error::{Error, Result, SchemaError};
use crate::index::NamespaceIndex;
use crate::limits::Limits;
use crate::namespaces::QName;

use super::attribute_info::AttributeInfo;
use super::attributes::{attribute_map, merge_restricted, union_attributes, AttributeMap};
use super::primitives::Primitive;
use super::restriction::FacetMap;
use super::type_info::{TypeInfo, TypeKind};

/// Everything in scope of a resolved type
#[derive(Debug, Clone)]
pub struct ResolvedScope {
    /// Effective type classification
    pub type_info: Arc<TypeInfo>,
    /// Attributes in scope, keyed by name
    pub attributes: AttributeMap,
    /// Effective child particle (complex types only)
    pub child_particle: Option<Particle>,
    /// Effective attribute wildcard (complex types only)
    pub any_attribute: Option<Arc<AnyAttribute>>,
}

impl ResolvedScope {
    fn simple(type_info: TypeInfo) -> Self {
        Self {
            type_info: Arc::new(type_info),
            attributes: AttributeMap::new(),
            child_particle: None,
            any_attribute: None,
        }
    }
}

/// Resolved scopes of named types
///
/// One cache belongs to one resolution session; concurrent sessions each
/// own theirs.
#[derive(Debug, Default)]
pub struct ScopeCache {
    scopes: HashMap<QName, Arc<ResolvedScope>>,
}

impl ScopeCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached scope of a named type
    pub fn get(&self, type_name: &QName) -> Option<&Arc<ResolvedScope>> {
        self.scopes.get(type_name)
    }

    /// Check if a named type has been resolved
    pub fn contains(&self, type_name: &QName) -> bool {
        self.scopes.contains_key(type_name)
    }

    /// Number of cached scopes
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Drop every cached scope
    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    fn insert(&mut self, type_name: QName, scope: Arc<ResolvedScope>) {
        self.scopes.insert(type_name, scope);
    }
}

/// Resolves type definitions against a namespace index
pub struct ScopeResolver<'a> {
    index: &'a NamespaceIndex,
    cache: &'a mut ScopeCache,
    recognized: Option<&'a HashSet<QName>>,
    limits: Limits,
    depth: usize,
}

impl<'a> ScopeResolver<'a> {
    /// Create a resolver over an index, memoizing into `cache`
    pub fn new(index: &'a NamespaceIndex, cache: &'a mut ScopeCache) -> Self {
        Self {
            index,
            cache,
            recognized: None,
            limits: Limits::default(),
            depth: 0,
        }
    }

    /// Tag resolved type infos with their nearest ancestor in `recognized`
    pub fn with_recognized_types(mut self, recognized: &'a HashSet<QName>) -> Self {
        self.recognized = Some(recognized);
        self
    }

    /// Set recursion limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolve a type definition
    pub fn resolve(&mut self, type_def: &TypeDef) -> Result<Arc<ResolvedScope>> {
        if let Some(name) = type_def.name() {
            if let Some(scope) = self.cache.get(name) {
                trace!(type_name = %name, "scope cache hit");
                return Ok(Arc::clone(scope));
            }
        }

        self.depth += 1;
        let resolved = self
            .limits
            .check_resolution_depth(self.depth)
            .and_then(|()| match type_def {
                TypeDef::Simple(simple) => self.resolve_simple(simple),
                TypeDef::Complex(complex) => self.resolve_complex(complex),
            });
        self.depth -= 1;

        let scope = Arc::new(resolved?);
        if let Some(name) = type_def.name() {
            debug!(
                type_name = %name,
                type_info = %scope.type_info.summary(),
                attributes = scope.attributes.len(),
                "resolved scope"
            );
            self.cache.insert(name.clone(), Arc::clone(&scope));
        }
        Ok(scope)
    }

    /// Resolve a named type
    pub fn resolve_by_name(&mut self, type_name: &QName) -> Result<Arc<ResolvedScope>> {
        if let Some(scope) = self.cache.get(type_name) {
            trace!(type_name = %type_name, "scope cache hit");
            return Ok(Arc::clone(scope));
        }
        let index = self.index;
        let type_def = index.type_by_name(type_name).ok_or_else(|| {
            SchemaError::new("type cannot be resolved").with_component(type_name.to_string())
        })?;
        self.resolve(type_def)
    }

    /// Resolved type of an attribute. Untyped attributes are anySimpleType.
    pub fn attribute_type(&mut self, info: &AttributeInfo) -> Result<Arc<TypeInfo>> {
        if let Some(type_info) = info.type_info() {
            return Ok(Arc::clone(type_info));
        }
        let attribute = info.attribute();
        let scope = match (&attribute.simple_type, &attribute.type_name) {
            (Some(inline), _) => self.resolve(&TypeDef::Simple(Arc::clone(inline)))?,
            (None, Some(type_name)) => self.resolve_by_name(type_name)?,
            (None, None) => {
                let any_simple = Primitive::AnySimpleType.qname();
                let tag = self.recognized_tag(Some(any_simple), None);
                return Ok(Arc::new(
                    TypeInfo::atomic(Primitive::AnySimpleType).with_recognized_type(tag),
                ));
            }
        };
        if scope.type_info.kind() == TypeKind::Complex {
            let mut err = SchemaError::new("attribute type is not a simple type");
            if let Some(name) = info.qname() {
                err = err.with_component(name.to_string());
            }
            return Err(err.into());
        }
        Ok(Arc::clone(&scope.type_info))
    }

    /// Most specific recognized ancestor: the type's own name, then for
    /// primitives anySimpleType or anyType, then the parent's tag.
    fn recognized_tag(&self, own_name: Option<&QName>, parent: Option<&QName>) -> Option<QName> {
        let recognized = self.recognized?;
        if let Some(name) = own_name {
            if recognized.contains(name) {
                return Some(name.clone());
            }
            let any_type = Primitive::AnyType.qname();
            if name != any_type && Primitive::is_primitive(name) {
                for fallback in [Primitive::AnySimpleType.qname(), any_type] {
                    if recognized.contains(fallback) {
                        return Some(fallback.clone());
                    }
                }
            }
        }
        parent.cloned()
    }

    fn resolve_simple(&mut self, simple: &SimpleType) -> Result<ResolvedScope> {
        let own_name = simple.name.as_ref();
        let type_info = match &simple.content {
            None => TypeInfo::atomic(Primitive::AnyType)
                .with_recognized_type(self.recognized_tag(own_name, None)),

            Some(SimpleTypeContent::List(list)) => {
                let item = self.resolve_simple_reference(
                    list.item_type.as_ref(),
                    list.item_type_name.as_ref(),
                    own_name,
                    "list has no item type",
                )?;
                if !matches!(item.type_info.kind(), TypeKind::Atomic | TypeKind::Union) {
                    return Err(Self::error("cannot list a list", own_name));
                }
                TypeInfo::List {
                    item_type: Arc::clone(&item.type_info),
                    facets: None,
                    recognized_type: self.recognized_tag(own_name, None),
                }
            }

            Some(SimpleTypeContent::Union(union)) => {
                let mut member_types = Vec::new();
                for member_name in &union.member_type_names {
                    let member = self.resolve_by_name(member_name)?;
                    Self::push_member(&mut member_types, &member.type_info);
                }
                for inline in &union.member_types {
                    let member = self.resolve(&TypeDef::Simple(Arc::clone(inline)))?;
                    Self::push_member(&mut member_types, &member.type_info);
                }
                if member_types.is_empty() {
                    return Err(Self::error("union has no member types", own_name));
                }
                TypeInfo::Union {
                    member_types,
                    facets: None,
                    recognized_type: self.recognized_tag(own_name, None),
                }
            }

            Some(SimpleTypeContent::Restriction(restriction)) => {
                let facets = Self::declared_facets(&restriction.facets)?;
                match own_name.and_then(Primitive::for_qname) {
                    Some(primitive) => TypeInfo::Atomic {
                        primitive,
                        facets,
                        recognized_type: self.recognized_tag(own_name, None),
                    },
                    None => {
                        let base = self.resolve_simple_reference(
                            restriction.base_type.as_ref(),
                            restriction.base_type_name.as_ref(),
                            own_name,
                            "restriction has no base type",
                        )?;
                        self.restrict(&base.type_info, facets, own_name)?
                    }
                }
            }
        };
        Ok(ResolvedScope::simple(type_info))
    }

    fn resolve_simple_reference(
        &mut self,
        inline: Option<&Arc<SimpleType>>,
        name: Option<&QName>,
        owner: Option<&QName>,
        missing: &str,
    ) -> Result<Arc<ResolvedScope>> {
        match (inline, name) {
            (Some(inline), _) => self.resolve(&TypeDef::Simple(Arc::clone(inline))),
            (None, Some(name)) => self.resolve_by_name(name),
            (None, None) => Err(Self::error(missing, owner)),
        }
    }

    fn push_member(members: &mut Vec<Arc<TypeInfo>>, member: &Arc<TypeInfo>) {
        match member.as_ref() {
            TypeInfo::Union { member_types, .. } => members.extend(member_types.iter().cloned()),
            _ => members.push(Arc::clone(member)),
        }
    }

    fn declared_facets(facets: &[Facet]) -> Result<Option<FacetMap>> {
        if facets.is_empty() {
            Ok(None)
        } else {
            FacetMap::from_facets(facets).map(Some)
        }
    }

    /// Restrict a simple base under merged facets
    fn restrict(
        &self,
        base: &TypeInfo,
        facets: Option<FacetMap>,
        own_name: Option<&QName>,
    ) -> Result<TypeInfo> {
        let merged = FacetMap::merge(base.facets(), facets.as_ref());
        let recognized_type = self.recognized_tag(own_name, base.recognized_type());
        match base {
            TypeInfo::Atomic { primitive, .. } => Ok(TypeInfo::Atomic {
                primitive: *primitive,
                facets: merged,
                recognized_type,
            }),
            TypeInfo::List { item_type, .. } => Ok(TypeInfo::List {
                item_type: Arc::clone(item_type),
                facets: merged,
                recognized_type,
            }),
            TypeInfo::Union { member_types, .. } => Ok(TypeInfo::Union {
                member_types: member_types.clone(),
                facets: merged,
                recognized_type,
            }),
            TypeInfo::Complex { .. } => Err(Self::error(
                "cannot restrict a complex type as simple content",
                own_name,
            )),
        }
    }

    fn resolve_complex(&mut self, complex: &ComplexType) -> Result<ResolvedScope> {
        let own_name = complex.name.as_ref();
        match &complex.content {
            None => {
                let mixed = complex.mixed.unwrap_or(false);
                Ok(ResolvedScope {
                    type_info: Arc::new(
                        TypeInfo::complex(mixed)
                            .with_recognized_type(self.recognized_tag(own_name, None)),
                    ),
                    attributes: attribute_map(self.index, &complex.attributes)?,
                    child_particle: complex.particle.clone(),
                    any_attribute: complex.any_attribute.clone(),
                })
            }
            Some(ContentModel::Complex(content)) => {
                let mixed = complex.mixed.or(content.mixed).unwrap_or(false);
                match &content.derivation {
                    ContentDerivation::Extension(extension) => {
                        self.extend_complex_content(own_name, mixed, extension)
                    }
                    ContentDerivation::Restriction(restriction) => {
                        self.restrict_complex_content(own_name, mixed, restriction)
                    }
                }
            }
            Some(ContentModel::Simple(derivation)) => match derivation {
                ContentDerivation::Extension(extension) => {
                    self.extend_simple_content(own_name, extension)
                }
                ContentDerivation::Restriction(restriction) => {
                    self.restrict_simple_content(own_name, restriction)
                }
            },
        }
    }

    /// Type info of a complex-content derivation: a fresh complex info,
    /// unless the base is a simple type other than anyType, whose info is
    /// propagated.
    fn derived_complex_info(
        &self,
        base: &ResolvedScope,
        mixed: bool,
        own_name: Option<&QName>,
    ) -> Arc<TypeInfo> {
        let base_info = &base.type_info;
        if base_info.kind() == TypeKind::Complex || base_info.is_any_type() {
            let tag = self.recognized_tag(own_name, base_info.recognized_type());
            Arc::new(TypeInfo::complex(mixed).with_recognized_type(tag))
        } else {
            self.retag(base_info, own_name)
        }
    }

    fn retag(&self, base_info: &Arc<TypeInfo>, own_name: Option<&QName>) -> Arc<TypeInfo> {
        let tag = self.recognized_tag(own_name, base_info.recognized_type());
        if tag.as_ref() == base_info.recognized_type() {
            Arc::clone(base_info)
        } else {
            Arc::new(base_info.with_recognized_type(tag))
        }
    }

    fn extend_complex_content(
        &mut self,
        own_name: Option<&QName>,
        mixed: bool,
        extension: &ContentExtension,
    ) -> Result<ResolvedScope> {
        let base = self.resolve_by_name(&extension.base_type_name)?;
        let own = attribute_map(self.index, &extension.attributes)?;

        let child_particle = match (&base.child_particle, &extension.particle) {
            (Some(inherited), Some(added)) => Some(Particle::group(ModelGroup::sequence(vec![
                inherited.clone(),
                added.clone(),
            ]))),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        };

        let any_attribute = match (&base.any_attribute, &extension.any_attribute) {
            (Some(inherited), Some(added)) => {
                Some(Arc::new(AnyAttribute::merge_extension(inherited, added)))
            }
            (Some(only), None) | (None, Some(only)) => Some(Arc::clone(only)),
            (None, None) => None,
        };

        Ok(ResolvedScope {
            type_info: self.derived_complex_info(&base, mixed, own_name),
            attributes: union_attributes(&base.attributes, &own),
            child_particle,
            any_attribute,
        })
    }

    fn restrict_complex_content(
        &mut self,
        own_name: Option<&QName>,
        mixed: bool,
        restriction: &ContentRestriction,
    ) -> Result<ResolvedScope> {
        let base_name = restriction
            .base_type_name
            .as_ref()
            .ok_or_else(|| Self::error("restriction has no base type", own_name))?;
        let base = self.resolve_by_name(base_name)?;
        let own = attribute_map(self.index, &restriction.attributes)?;

        Ok(ResolvedScope {
            type_info: self.derived_complex_info(&base, mixed, own_name),
            attributes: merge_restricted(&base.attributes, &own),
            child_particle: restriction
                .particle
                .clone()
                .or_else(|| base.child_particle.clone()),
            any_attribute: restriction.any_attribute.clone(),
        })
    }

    fn extend_simple_content(
        &mut self,
        own_name: Option<&QName>,
        extension: &ContentExtension,
    ) -> Result<ResolvedScope> {
        let base = self.resolve_by_name(&extension.base_type_name)?;
        let own = attribute_map(self.index, &extension.attributes)?;

        Ok(ResolvedScope {
            type_info: self.retag(&base.type_info, own_name),
            attributes: union_attributes(&base.attributes, &own),
            child_particle: None,
            any_attribute: extension.any_attribute.clone(),
        })
    }

    fn restrict_simple_content(
        &mut self,
        own_name: Option<&QName>,
        restriction: &ContentRestriction,
    ) -> Result<ResolvedScope> {
        // The named base contributes attributes; an inline simple type, when
        // present, replaces it as the value type being restricted.
        let named_base = match &restriction.base_type_name {
            Some(name) => Some(self.resolve_by_name(name)?),
            None => None,
        };
        let value_base = match (&restriction.base_type, &named_base) {
            (Some(inline), _) => self.resolve(&TypeDef::Simple(Arc::clone(inline)))?,
            (None, Some(named)) => Arc::clone(named),
            (None, None) => return Err(Self::error("restriction has no base type", own_name)),
        };

        let facets = Self::declared_facets(&restriction.facets)?;
        let type_info = self.restrict(&value_base.type_info, facets, own_name)?;
        let own = attribute_map(self.index, &restriction.attributes)?;
        let inherited = named_base
            .as_ref()
            .map(|base| base.attributes.clone())
            .unwrap_or_default();

        Ok(ResolvedScope {
            type_info: Arc::new(type_info),
            attributes: merge_restricted(&inherited, &own),
            child_particle: None,
            any_attribute: restriction.any_attribute.clone(),
        })
    }

    fn error(message: &str, owner: Option<&QName>) -> Error {
        let err = SchemaError::new(message);
        match owner {
            Some(name) => err.with_component(name.to_string()).into(),
            None => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Attribute, AttributeUse, Element, ProcessContents, Schema};
    use crate::resolve::restriction::FacetKind;

    fn index_with(build: impl FnOnce(&mut Schema)) -> NamespaceIndex {
        let mut schema = Schema::new(None::<String>);
        build(&mut schema);
        let mut index = NamespaceIndex::with_builtins();
        index.register(schema);
        index
    }

    fn resolve_named(index: &NamespaceIndex, local: &str) -> Arc<ResolvedScope> {
        let mut cache = ScopeCache::new();
        ScopeResolver::new(index, &mut cache)
            .resolve_by_name(&QName::local(local))
            .unwrap()
    }

    #[test]
    fn test_any_type_is_atomic_without_facets() {
        let index = NamespaceIndex::with_builtins();
        let mut cache = ScopeCache::new();
        let scope = ScopeResolver::new(&index, &mut cache)
            .resolve_by_name(&QName::xsd("anyType"))
            .unwrap();
        assert!(scope.type_info.is_any_type());
        assert!(scope.type_info.facets().is_none());
        assert!(scope.attributes.is_empty());
    }

    #[test]
    fn test_primitive_base_case() {
        let index = NamespaceIndex::with_builtins();
        let mut cache = ScopeCache::new();
        let scope = ScopeResolver::new(&index, &mut cache)
            .resolve_by_name(&QName::xsd("decimal"))
            .unwrap();
        assert_eq!(scope.type_info.primitive(), Some(Primitive::Decimal));
        assert_eq!(
            scope.type_info.facets().and_then(|f| f.first_value(FacetKind::WhiteSpace)),
            Some("collapse")
        );
    }

    #[test]
    fn test_derived_builtin_inherits_primitive() {
        let index = NamespaceIndex::with_builtins();
        let mut cache = ScopeCache::new();
        let scope = ScopeResolver::new(&index, &mut cache)
            .resolve_by_name(&QName::xsd("positiveInteger"))
            .unwrap();
        assert_eq!(scope.type_info.primitive(), Some(Primitive::Decimal));
        let facets = scope.type_info.facets().unwrap();
        assert_eq!(facets.first_value(FacetKind::InclusiveMin), Some("1"));
        assert_eq!(facets.first_value(FacetKind::FractionDigits), Some("0"));
    }

    #[test]
    fn test_singleton_facet_override() {
        let index = index_with(|s| {
            s.add_simple_type(
                SimpleType::restriction(QName::xsd("string"), vec![Facet::max_length(10)])
                    .named(QName::local("short")),
            )
            .unwrap();
            s.add_simple_type(
                SimpleType::restriction(QName::local("short"), vec![Facet::max_length(3)])
                    .named(QName::local("shorter")),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "shorter");
        let facets = scope.type_info.facets().unwrap();
        assert_eq!(facets.get(FacetKind::LengthMax).map(|s| s.len()), Some(1));
        assert_eq!(facets.first_value(FacetKind::LengthMax), Some("3"));
        assert_eq!(facets.first_value(FacetKind::WhiteSpace), Some("preserve"));
    }

    #[test]
    fn test_list_of_atomic() {
        let index = index_with(|s| {
            s.add_simple_type(SimpleType::list(QName::xsd("int")).named(QName::local("ints")))
                .unwrap();
        });
        let scope = resolve_named(&index, "ints");
        assert_eq!(scope.type_info.kind(), TypeKind::List);
        assert_eq!(
            scope.type_info.item_type().and_then(|i| i.primitive()),
            Some(Primitive::Decimal)
        );
    }

    #[test]
    fn test_list_of_list_is_error() {
        let index = index_with(|s| {
            s.add_simple_type(SimpleType::list(QName::xsd("NMTOKENS")).named(QName::local("nested")))
                .unwrap();
        });
        let mut cache = ScopeCache::new();
        let err = ScopeResolver::new(&index, &mut cache)
            .resolve_by_name(&QName::local("nested"))
            .unwrap_err();
        assert!(err.to_string().contains("cannot list a list"));
    }

    #[test]
    fn test_nested_union_is_flattened() {
        let index = index_with(|s| {
            s.add_simple_type(
                SimpleType::union(vec![QName::xsd("int"), QName::xsd("boolean")], vec![])
                    .named(QName::local("inner")),
            )
            .unwrap();
            s.add_simple_type(
                SimpleType::union(
                    vec![QName::local("inner")],
                    vec![SimpleType::restriction(QName::xsd("string"), vec![])],
                )
                .named(QName::local("outer")),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "outer");
        let members = scope.type_info.member_types();
        assert_eq!(members.len(), 3);
        assert!(members.iter().all(|m| m.kind() != TypeKind::Union));
    }

    #[test]
    fn test_empty_union_is_error() {
        let index = index_with(|s| {
            s.add_simple_type(SimpleType::union(vec![], vec![]).named(QName::local("empty")))
                .unwrap();
        });
        let mut cache = ScopeCache::new();
        assert!(ScopeResolver::new(&index, &mut cache)
            .resolve_by_name(&QName::local("empty"))
            .unwrap_err()
            .is_schema_error());
    }

    #[test]
    fn test_unresolvable_base_is_error() {
        let index = index_with(|s| {
            s.add_simple_type(
                SimpleType::restriction(QName::local("nowhere"), vec![]).named(QName::local("t")),
            )
            .unwrap();
        });
        let mut cache = ScopeCache::new();
        let err = ScopeResolver::new(&index, &mut cache)
            .resolve_by_name(&QName::local("t"))
            .unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn test_complex_extension_concatenates_particles() {
        let index = index_with(|s| {
            s.add_complex_type(
                ComplexType::new()
                    .named(QName::local("base"))
                    .with_particle(Particle::group(ModelGroup::sequence(vec![Particle::element(
                        Element::new(QName::local("a")).with_type_name(QName::xsd("string")),
                    )])))
                    .with_attribute(Attribute::new(QName::local("x")).with_type_name(QName::xsd("int")))
                    .with_any_attribute(AnyAttribute::new("urn:a")),
            )
            .unwrap();
            s.add_complex_type(
                ComplexType::new().named(QName::local("derived")).extending(
                    ContentExtension::new(QName::local("base"))
                        .with_particle(Particle::group(ModelGroup::sequence(vec![Particle::element(
                            Element::new(QName::local("b")).with_type_name(QName::xsd("string")),
                        )])))
                        .with_attribute(Attribute::new(QName::local("y")).with_type_name(QName::xsd("int")))
                        .with_any_attribute(AnyAttribute::new("urn:b urn:a")),
                ),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "derived");
        assert_eq!(scope.type_info.kind(), TypeKind::Complex);
        assert_eq!(scope.attributes.len(), 2);

        let Some(Particle::Group(group)) = &scope.child_particle else {
            panic!("expected a synthesized sequence");
        };
        assert_eq!(group.len(), 2);
        assert_eq!(scope.any_attribute.as_ref().map(|w| w.namespace.as_str()), Some("urn:a urn:b"));
    }

    #[test]
    fn test_complex_restriction_replaces_particle() {
        let index = index_with(|s| {
            s.add_complex_type(
                ComplexType::new()
                    .named(QName::local("base"))
                    .with_particle(Particle::element(Element::new(QName::local("a"))))
                    .with_attribute(
                        Attribute::new(QName::local("x"))
                            .with_type_name(QName::xsd("string"))
                            .with_default("a"),
                    )
                    .with_any_attribute(AnyAttribute::new("##any")),
            )
            .unwrap();
            s.add_complex_type(
                ComplexType::new().named(QName::local("narrow")).restricting(
                    ContentRestriction::new(QName::local("base"))
                        .with_particle(Particle::element(Element::new(QName::local("b"))))
                        .with_attribute(
                            Attribute::new(QName::local("x")).with_type_name(QName::xsd("token")),
                        ),
                ),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "narrow");
        let Some(Particle::Element(element)) = &scope.child_particle else {
            panic!("expected the restriction's own particle");
        };
        assert_eq!(element.qname(), Some(&QName::local("b")));
        assert!(scope.any_attribute.is_none());

        let x = &scope.attributes[&QName::local("x")];
        assert_eq!(x.attribute().type_name, Some(QName::xsd("token")));
        assert_eq!(x.use_mode(), AttributeUse::Optional);
        assert_eq!(x.default_value(), Some("a"));
    }

    #[test]
    fn test_complex_restriction_without_particle_keeps_base_particle() {
        let index = index_with(|s| {
            s.add_complex_type(
                ComplexType::new()
                    .named(QName::local("base"))
                    .with_particle(Particle::element(
                        Element::new(QName::local("a")).with_type_name(QName::xsd("string")),
                    ))
                    .with_attribute(Attribute::new(QName::local("x")).with_type_name(QName::xsd("string"))),
            )
            .unwrap();
            s.add_complex_type(
                ComplexType::new().named(QName::local("narrow")).restricting(
                    ContentRestriction::new(QName::local("base"))
                        .with_attribute(Attribute::new(QName::local("x")).with_type_name(QName::xsd("token"))),
                ),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "narrow");
        let Some(Particle::Element(element)) = &scope.child_particle else {
            panic!("expected the base particle");
        };
        assert_eq!(element.qname(), Some(&QName::local("a")));
    }

    #[test]
    fn test_extension_wildcard_from_one_side() {
        let index = index_with(|s| {
            s.add_complex_type(
                ComplexType::new()
                    .named(QName::local("open"))
                    .with_any_attribute(AnyAttribute::new("urn:a").with_process_contents(ProcessContents::Skip)),
            )
            .unwrap();
            s.add_complex_type(ComplexType::new().named(QName::local("closed")))
                .unwrap();
            s.add_complex_type(
                ComplexType::new()
                    .named(QName::local("inherits"))
                    .extending(ContentExtension::new(QName::local("open"))),
            )
            .unwrap();
            s.add_complex_type(
                ComplexType::new().named(QName::local("adds")).extending(
                    ContentExtension::new(QName::local("closed"))
                        .with_any_attribute(AnyAttribute::new("##other").with_process_contents(ProcessContents::Lax)),
                ),
            )
            .unwrap();
        });

        let inherited = resolve_named(&index, "inherits");
        let wildcard = inherited.any_attribute.as_ref().unwrap();
        assert_eq!(wildcard.namespace, "urn:a");
        assert_eq!(wildcard.process_contents, ProcessContents::Skip);

        let added = resolve_named(&index, "adds");
        let wildcard = added.any_attribute.as_ref().unwrap();
        assert_eq!(wildcard.namespace, "##other");
        assert_eq!(wildcard.process_contents, ProcessContents::Lax);
    }

    #[test]
    fn test_extension_of_any_type_is_complex() {
        let index = index_with(|s| {
            s.add_complex_type(
                ComplexType::new()
                    .named(QName::local("open"))
                    .with_mixed(true)
                    .extending(ContentExtension::new(QName::xsd("anyType"))),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "open");
        assert!(scope.type_info.is_mixed());
    }

    #[test]
    fn test_simple_content_extension_keeps_value_type() {
        let index = index_with(|s| {
            s.add_complex_type(
                ComplexType::new().named(QName::local("price")).extending_simple(
                    ContentExtension::new(QName::xsd("decimal")).with_attribute(
                        Attribute::new(QName::local("currency")).with_type_name(QName::xsd("string")),
                    ),
                ),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "price");
        assert_eq!(scope.type_info.primitive(), Some(Primitive::Decimal));
        assert!(scope.attributes.contains_key(&QName::local("currency")));
        assert!(scope.child_particle.is_none());
    }

    #[test]
    fn test_simple_content_restriction_merges_facets_and_attributes() {
        let index = index_with(|s| {
            s.add_complex_type(
                ComplexType::new().named(QName::local("price")).extending_simple(
                    ContentExtension::new(QName::xsd("decimal")).with_attribute(
                        Attribute::new(QName::local("currency")).with_type_name(QName::xsd("string")),
                    ),
                ),
            )
            .unwrap();
            s.add_complex_type(
                ComplexType::new().named(QName::local("smallPrice")).restricting_simple(
                    ContentRestriction::new(QName::local("price"))
                        .with_facet(Facet::max_inclusive("100")),
                ),
            )
            .unwrap();
        });
        let scope = resolve_named(&index, "smallPrice");
        assert_eq!(scope.type_info.primitive(), Some(Primitive::Decimal));
        assert_eq!(
            scope.type_info.facets().and_then(|f| f.first_value(FacetKind::InclusiveMax)),
            Some("100")
        );
        assert!(scope.attributes.contains_key(&QName::local("currency")));
    }

    #[test]
    fn test_restricting_complex_as_simple_content_is_error() {
        let index = index_with(|s| {
            s.add_complex_type(ComplexType::new().named(QName::local("plain"))).unwrap();
            s.add_complex_type(
                ComplexType::new()
                    .named(QName::local("bad"))
                    .restricting_simple(ContentRestriction::new(QName::local("plain"))),
            )
            .unwrap();
        });
        let mut cache = ScopeCache::new();
        let err = ScopeResolver::new(&index, &mut cache)
            .resolve_by_name(&QName::local("bad"))
            .unwrap_err();
        assert!(err.to_string().contains("cannot restrict a complex type"));
    }

    #[test]
    fn test_named_types_are_cached() {
        let index = NamespaceIndex::with_builtins();
        let mut cache = ScopeCache::new();
        let mut resolver = ScopeResolver::new(&index, &mut cache);
        let first = resolver.resolve_by_name(&QName::xsd("token")).unwrap();
        let second = resolver.resolve_by_name(&QName::xsd("token")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains(&QName::xsd("token")));
    }

    #[test]
    fn test_anonymous_types_are_not_cached() {
        let index = NamespaceIndex::with_builtins();
        let mut cache = ScopeCache::new();
        let anonymous = TypeDef::from(SimpleType::restriction(QName::xsd("string"), vec![]));
        let mut resolver = ScopeResolver::new(&index, &mut cache);
        let first = resolver.resolve(&anonymous).unwrap();
        let second = resolver.resolve(&anonymous).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        // Only the named base was memoized
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_recognized_type_tagging() {
        let index = index_with(|s| {
            s.add_simple_type(
                SimpleType::restriction(QName::xsd("token"), vec![Facet::max_length(5)])
                    .named(QName::local("code")),
            )
            .unwrap();
        });
        let recognized: HashSet<QName> = [QName::xsd("token"), QName::xsd("anySimpleType")].into();
        let mut cache = ScopeCache::new();
        let mut resolver = ScopeResolver::new(&index, &mut cache).with_recognized_types(&recognized);

        let code = resolver.resolve_by_name(&QName::local("code")).unwrap();
        assert_eq!(code.type_info.recognized_type(), Some(&QName::xsd("token")));

        let string = resolver.resolve_by_name(&QName::xsd("string")).unwrap();
        assert_eq!(string.type_info.recognized_type(), Some(&QName::xsd("anySimpleType")));
    }

    #[test]
    fn test_untyped_attribute_is_any_simple_type() {
        let index = NamespaceIndex::with_builtins();
        let mut cache = ScopeCache::new();
        let info = AttributeInfo::new(Arc::new(Attribute::new(QName::local("loose"))), false, false);
        let type_info = ScopeResolver::new(&index, &mut cache).attribute_type(&info).unwrap();
        assert_eq!(type_info.primitive(), Some(Primitive::AnySimpleType));
    }

    #[test]
    fn test_resolution_depth_limit() {
        let index = index_with(|s| {
            s.add_simple_type(
                SimpleType::restriction(QName::local("b"), vec![]).named(QName::local("a")),
            )
            .unwrap();
            s.add_simple_type(
                SimpleType::restriction(QName::local("a"), vec![]).named(QName::local("b")),
            )
            .unwrap();
        });
        let mut cache = ScopeCache::new();
        let err = ScopeResolver::new(&index, &mut cache)
            .with_limits(Limits::strict())
            .resolve_by_name(&QName::local("a"))
            .unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }
}
