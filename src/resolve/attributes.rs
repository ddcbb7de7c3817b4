//! Attribute resolution
//!
//! Follows attribute references to their global declarations, flattens
//! attribute groups, and merges attribute maps along restriction steps.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::components::{Attribute, AttributeItem};
use crate::error::{Error, Result, SchemaError};
use crate::index::NamespaceIndex;
use crate::namespaces::QName;

use super::attribute_info::AttributeInfo;

/// Attributes in scope of a type, keyed by name, in declaration order
pub type AttributeMap = IndexMap<QName, AttributeInfo>;

fn normalized(attribute: &Arc<Attribute>) -> Arc<Attribute> {
    if attribute.use_mode.is_some() {
        Arc::clone(attribute)
    } else {
        let mut copy = (**attribute).clone();
        copy.use_mode = Some(Default::default());
        Arc::new(copy)
    }
}

/// Apply a local default-or-fixed value over an inherited one. The two are
/// mutually exclusive: setting one clears the other.
fn override_value_constraint(target: &mut Attribute, local: &Attribute) {
    match (&local.default, &local.fixed) {
        (Some(default), None) => {
            target.default = Some(default.clone());
            target.fixed = None;
        }
        (None, Some(fixed)) => {
            target.fixed = Some(fixed.clone());
            target.default = None;
        }
        _ => {}
    }
}

/// Describe an attribute declaration.
///
/// A local declaration with its own type is returned as-is (with `use`
/// normalized) unless `force_copy` is set. Otherwise the declaration's
/// reference is followed (under `force_copy`, the declaration itself acts
/// as the global one) and a merged copy is synthesized: `use`, `id` and
/// position come from the local side, default/fixed from the local side
/// when it sets exactly one of them, and everything else from the global
/// declaration.
pub fn resolve_attribute(
    index: &NamespaceIndex,
    declaration: &Arc<Attribute>,
    force_copy: bool,
) -> Result<AttributeInfo> {
    let explicit_use = declaration.use_mode.is_some();

    if !force_copy && !declaration.is_reference() && declaration.has_type() {
        return Ok(AttributeInfo::new(
            normalized(declaration),
            declaration.top_level,
            explicit_use,
        ));
    }

    let global = match (&declaration.ref_name, force_copy) {
        (Some(ref_name), false) => index.attribute_by_name(ref_name).ok_or_else(|| {
            SchemaError::new("attribute reference cannot be resolved")
                .with_component(ref_name.to_string())
        })?,
        _ => declaration,
    };

    let mut copy = (**global).clone();
    copy.ref_name = None;
    copy.use_mode = Some(declaration.use_mode.unwrap_or_default());
    override_value_constraint(&mut copy, declaration);
    copy.id = declaration.id.clone().or_else(|| global.id.clone());
    copy.position = declaration.position.or(global.position);
    copy.top_level = false;

    Ok(AttributeInfo::new(Arc::new(copy), global.top_level, explicit_use))
}

/// Flatten attributes, nested attribute groups and attribute group
/// references into one ordered list of declarations
pub fn flatten_attributes(
    index: &NamespaceIndex,
    items: &[AttributeItem],
) -> Result<Vec<Arc<Attribute>>> {
    let mut flattened = Vec::new();
    let mut expanding = HashSet::new();
    flatten_into(index, items, &mut flattened, &mut expanding)?;
    Ok(flattened)
}

fn flatten_into(
    index: &NamespaceIndex,
    items: &[AttributeItem],
    out: &mut Vec<Arc<Attribute>>,
    expanding: &mut HashSet<QName>,
) -> Result<()> {
    for item in items {
        match item {
            AttributeItem::Attribute(attribute) => out.push(Arc::clone(attribute)),
            AttributeItem::Group(group) => flatten_into(index, &group.items, out, expanding)?,
            AttributeItem::GroupRef(group_ref) => {
                let group = match &group_ref.group {
                    Some(group) => group,
                    None => index
                        .attribute_group_by_name(&group_ref.ref_name)
                        .ok_or_else(|| {
                            SchemaError::new("attribute group reference cannot be resolved")
                                .with_component(group_ref.ref_name.to_string())
                        })?,
                };
                if !expanding.insert(group_ref.ref_name.clone()) {
                    return Err(SchemaError::new("attribute group references itself")
                        .with_component(group_ref.ref_name.to_string())
                        .into());
                }
                flatten_into(index, &group.items, out, expanding)?;
                expanding.remove(&group_ref.ref_name);
            }
        }
    }
    Ok(())
}

/// Build the attribute map of a declared attribute list
pub fn attribute_map(index: &NamespaceIndex, items: &[AttributeItem]) -> Result<AttributeMap> {
    let mut map = AttributeMap::new();
    for attribute in flatten_attributes(index, items)? {
        let info = resolve_attribute(index, &attribute, false)?;
        let name = info
            .qname()
            .cloned()
            .ok_or_else(|| Error::schema("attribute declaration has neither name nor ref"))?;
        map.insert(name, info);
    }
    Ok(map)
}

/// Union of two attribute maps; entries of `own` win on equal names
pub fn union_attributes(base: &AttributeMap, own: &AttributeMap) -> AttributeMap {
    let mut merged = base.clone();
    for (name, info) in own {
        merged.insert(name.clone(), info.clone());
    }
    merged
}

/// Merge a base type's attributes with a restriction's own.
///
/// Every base attribute stays in scope. A base attribute the restriction
/// redeclares becomes a copy of the base declaration overridden by the
/// redeclaration's type (if declared), use (if stated) and
/// default-or-fixed value.
pub fn merge_restricted(parent: &AttributeMap, child: &AttributeMap) -> AttributeMap {
    if parent.is_empty() {
        return child.clone();
    }
    if child.is_empty() {
        return parent.clone();
    }

    let mut merged = parent.clone();
    for (name, parent_info) in parent {
        let Some(child_info) = child.get(name) else {
            continue;
        };
        let child_attr = child_info.attribute();
        let mut copy = (**parent_info.attribute()).clone();

        let mut type_info = parent_info.type_info().cloned();
        if child_attr.has_type() {
            copy.type_name = child_attr.type_name.clone();
            copy.simple_type = child_attr.simple_type.clone();
            type_info = child_info.type_info().cloned();
        }
        if child_info.has_explicit_use() {
            copy.use_mode = child_attr.use_mode;
        }
        override_value_constraint(&mut copy, child_attr);

        let mut info = AttributeInfo::new(
            Arc::new(copy),
            parent_info.is_top_level(),
            parent_info.has_explicit_use() || child_info.has_explicit_use(),
        );
        if let Some(type_info) = type_info {
            info = info.with_type(type_info);
        }
        merged.insert(name.clone(), info);
    }

    for (name, child_info) in child {
        if !parent.contains_key(name) {
            merged.insert(name.clone(), child_info.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AttributeGroup, AttributeUse, Position, Schema};

    fn index_with_globals() -> NamespaceIndex {
        let mut schema = Schema::new(Some("urn:a"));
        schema
            .add_attribute(
                Attribute::new(QName::namespaced("urn:a", "lang"))
                    .with_type_name(QName::xsd("language"))
                    .with_default("en")
                    .with_id("global-id")
                    .at(1, 1),
            )
            .unwrap();
        schema
            .add_attribute_group(
                AttributeGroup::new(QName::namespaced("urn:a", "common"))
                    .with_item(Attribute::new(QName::local("id")).with_type_name(QName::xsd("ID")))
                    .with_item(Attribute::reference(QName::namespaced("urn:a", "lang"))),
            )
            .unwrap();
        let mut index = NamespaceIndex::with_builtins();
        index.register(schema);
        index
    }

    #[test]
    fn test_local_declaration_returned_as_is() {
        let index = NamespaceIndex::new();
        let attr = Arc::new(
            Attribute::new(QName::local("n"))
                .with_type_name(QName::xsd("int"))
                .with_use(AttributeUse::Required),
        );
        let info = resolve_attribute(&index, &attr, false).unwrap();
        assert!(Arc::ptr_eq(info.attribute(), &attr));
        assert!(info.is_required());
    }

    #[test]
    fn test_local_use_normalized() {
        let index = NamespaceIndex::new();
        let attr = Arc::new(Attribute::new(QName::local("n")).with_type_name(QName::xsd("int")));
        let info = resolve_attribute(&index, &attr, false).unwrap();
        assert_eq!(info.attribute().use_mode, Some(AttributeUse::Optional));
        assert!(!info.has_explicit_use());
    }

    #[test]
    fn test_reference_merges_with_global() {
        let index = index_with_globals();
        let reference = Arc::new(
            Attribute::reference(QName::namespaced("urn:a", "lang"))
                .with_use(AttributeUse::Required)
                .with_fixed("de")
                .at(9, 4),
        );
        let info = resolve_attribute(&index, &reference, false).unwrap();
        let attr = info.attribute();

        assert_eq!(attr.name, Some(QName::namespaced("urn:a", "lang")));
        assert_eq!(attr.type_name, Some(QName::xsd("language")));
        assert_eq!(attr.use_mode, Some(AttributeUse::Required));
        assert_eq!(attr.fixed.as_deref(), Some("de"));
        assert!(attr.default.is_none());
        assert_eq!(attr.id.as_deref(), Some("global-id"));
        assert_eq!(attr.position, Some(Position::new(9, 4)));
        assert!(!attr.is_reference());
        assert!(info.is_top_level());
        assert!(!attr.top_level);
    }

    #[test]
    fn test_reference_keeps_global_default() {
        let index = index_with_globals();
        let reference = Arc::new(Attribute::reference(QName::namespaced("urn:a", "lang")));
        let info = resolve_attribute(&index, &reference, false).unwrap();
        assert_eq!(info.default_value(), Some("en"));
        assert_eq!(info.use_mode(), AttributeUse::Optional);
    }

    #[test]
    fn test_unresolved_reference_is_error() {
        let index = NamespaceIndex::new();
        let reference = Arc::new(Attribute::reference(QName::local("missing")));
        let err = resolve_attribute(&index, &reference, false).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_flatten_group_references() {
        let index = index_with_globals();
        let items = vec![
            AttributeItem::attribute(Attribute::new(QName::local("first")).with_type_name(QName::xsd("string"))),
            AttributeItem::group_ref(QName::namespaced("urn:a", "common")),
            AttributeItem::Group(Arc::new(
                AttributeGroup::anonymous()
                    .with_item(Attribute::new(QName::local("last")).with_type_name(QName::xsd("string"))),
            )),
        ];
        let names: Vec<String> = flatten_attributes(&index, &items)
            .unwrap()
            .iter()
            .filter_map(|a| a.qname().map(|q| q.local_name.clone()))
            .collect();
        assert_eq!(names, vec!["first", "id", "lang", "last"]);

        let map = attribute_map(&index, &items).unwrap();
        assert_eq!(map.len(), 4);
        assert!(map.contains_key(&QName::namespaced("urn:a", "lang")));
    }

    #[test]
    fn test_self_referencing_group_is_error() {
        let mut schema = Schema::new(None::<String>);
        schema
            .add_attribute_group(
                AttributeGroup::new(QName::local("loop")).with_item(AttributeItem::group_ref(QName::local("loop"))),
            )
            .unwrap();
        let mut index = NamespaceIndex::new();
        index.register(schema);

        let err = flatten_attributes(&index, &[AttributeItem::group_ref(QName::local("loop"))]).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_merge_restricted_overrides_type_only() {
        let index = NamespaceIndex::with_builtins();
        let parent = attribute_map(
            &index,
            &[Attribute::new(QName::local("x"))
                .with_type_name(QName::xsd("string"))
                .with_use(AttributeUse::Optional)
                .with_default("a")
                .into()],
        )
        .unwrap();
        let child = attribute_map(
            &index,
            &[Attribute::new(QName::local("x")).with_type_name(QName::xsd("token")).into()],
        )
        .unwrap();

        let merged = merge_restricted(&parent, &child);
        let x = &merged[&QName::local("x")];
        assert_eq!(x.attribute().type_name, Some(QName::xsd("token")));
        assert_eq!(x.use_mode(), AttributeUse::Optional);
        assert_eq!(x.default_value(), Some("a"));
    }

    #[test]
    fn test_merge_restricted_keeps_parent_names() {
        let index = NamespaceIndex::with_builtins();
        let parent = attribute_map(
            &index,
            &[
                Attribute::new(QName::local("a")).with_type_name(QName::xsd("string")).into(),
                Attribute::new(QName::local("b"))
                    .with_type_name(QName::xsd("string"))
                    .with_use(AttributeUse::Required)
                    .into(),
            ],
        )
        .unwrap();
        let child = attribute_map(
            &index,
            &[Attribute::new(QName::local("b"))
                .with_use(AttributeUse::Prohibited)
                .with_fixed("z")
                .into()],
        )
        .unwrap();

        let merged = merge_restricted(&parent, &child);
        assert_eq!(merged.len(), 2);
        let b = &merged[&QName::local("b")];
        assert_eq!(b.use_mode(), AttributeUse::Prohibited);
        assert_eq!(b.attribute().type_name, Some(QName::xsd("string")));
        assert_eq!(b.fixed_value(), Some("z"));
    }

    #[test]
    fn test_merge_restricted_empty_sides() {
        let index = NamespaceIndex::with_builtins();
        let map = attribute_map(
            &index,
            &[Attribute::new(QName::local("a")).with_type_name(QName::xsd("string")).into()],
        )
        .unwrap();
        assert_eq!(merge_restricted(&map, &AttributeMap::new()).len(), 1);
        assert_eq!(merge_restricted(&AttributeMap::new(), &map).len(), 1);
    }

    #[test]
    fn test_union_attributes() {
        let index = NamespaceIndex::with_builtins();
        let base = attribute_map(
            &index,
            &[Attribute::new(QName::local("a")).with_type_name(QName::xsd("string")).into()],
        )
        .unwrap();
        let own = attribute_map(
            &index,
            &[Attribute::new(QName::local("b")).with_type_name(QName::xsd("int")).into()],
        )
        .unwrap();
        let names: Vec<_> = union_attributes(&base, &own).keys().map(|q| q.local_name.clone()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
