//! XSD built-in types
//!
//! The XML Schema namespace schema: `anyType`, `anySimpleType`, the
//! primitive datatypes, and the derived built-ins defined on top of them.
//! Register it with [`crate::index::NamespaceIndex::with_builtins`] so
//! that `xs:` names resolve like any user-defined type.

use lazy_static::lazy_static;
use std::sync::Arc;

use crate::error::Result;
use crate::namespaces::QName;
use crate::XSD_NAMESPACE;

use super::facets::Facet;
use super::schema::Schema;
use super::types::SimpleType;

// Special types
/// XSD anyType type name
pub const XSD_ANY_TYPE: &str = "anyType";
/// XSD anySimpleType type name
pub const XSD_ANY_SIMPLE_TYPE: &str = "anySimpleType";

// Primitive types
/// XSD string type name
pub const XSD_STRING: &str = "string";
/// XSD boolean type name
pub const XSD_BOOLEAN: &str = "boolean";
/// XSD decimal type name
pub const XSD_DECIMAL: &str = "decimal";
/// XSD float type name
pub const XSD_FLOAT: &str = "float";
/// XSD double type name
pub const XSD_DOUBLE: &str = "double";
/// XSD duration type name
pub const XSD_DURATION: &str = "duration";
/// XSD dateTime type name
pub const XSD_DATETIME: &str = "dateTime";
/// XSD time type name
pub const XSD_TIME: &str = "time";
/// XSD date type name
pub const XSD_DATE: &str = "date";
/// XSD gYearMonth type name
pub const XSD_GYEAR_MONTH: &str = "gYearMonth";
/// XSD gYear type name
pub const XSD_GYEAR: &str = "gYear";
/// XSD gMonthDay type name
pub const XSD_GMONTH_DAY: &str = "gMonthDay";
/// XSD gDay type name
pub const XSD_GDAY: &str = "gDay";
/// XSD gMonth type name
pub const XSD_GMONTH: &str = "gMonth";
/// XSD hexBinary type name
pub const XSD_HEX_BINARY: &str = "hexBinary";
/// XSD base64Binary type name
pub const XSD_BASE64_BINARY: &str = "base64Binary";
/// XSD anyURI type name
pub const XSD_ANY_URI: &str = "anyURI";
/// XSD QName type name
pub const XSD_QNAME: &str = "QName";
/// XSD NOTATION type name
pub const XSD_NOTATION: &str = "NOTATION";

/// Primitive datatypes, in the order of XML Schema Part 2
pub const PRIMITIVE_TYPE_NAMES: [&str; 19] = [
    XSD_STRING,
    XSD_BOOLEAN,
    XSD_DECIMAL,
    XSD_FLOAT,
    XSD_DOUBLE,
    XSD_DURATION,
    XSD_DATETIME,
    XSD_TIME,
    XSD_DATE,
    XSD_GYEAR_MONTH,
    XSD_GYEAR,
    XSD_GMONTH_DAY,
    XSD_GDAY,
    XSD_GMONTH,
    XSD_HEX_BINARY,
    XSD_BASE64_BINARY,
    XSD_ANY_URI,
    XSD_QNAME,
    XSD_NOTATION,
];

/// Derived built-in restrictions: (name, base, facets as (facet, value))
const DERIVED_RESTRICTIONS: &[(&str, &str, &[(&str, &str)])] = &[
    ("normalizedString", "string", &[("whiteSpace", "replace")]),
    ("token", "normalizedString", &[("whiteSpace", "collapse")]),
    ("language", "token", &[("pattern", "[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*")]),
    ("NMTOKEN", "token", &[("pattern", "\\c+")]),
    ("Name", "token", &[("pattern", "\\i\\c*")]),
    ("NCName", "Name", &[("pattern", "[\\i-[:]][\\c-[:]]*")]),
    ("ID", "NCName", &[]),
    ("IDREF", "NCName", &[]),
    ("ENTITY", "NCName", &[]),
    ("integer", "decimal", &[("fractionDigits", "0"), ("pattern", "[\\-+]?[0-9]+")]),
    ("nonPositiveInteger", "integer", &[("maxInclusive", "0")]),
    ("negativeInteger", "nonPositiveInteger", &[("maxInclusive", "-1")]),
    (
        "long",
        "integer",
        &[
            ("minInclusive", "-9223372036854775808"),
            ("maxInclusive", "9223372036854775807"),
        ],
    ),
    ("int", "long", &[("minInclusive", "-2147483648"), ("maxInclusive", "2147483647")]),
    ("short", "int", &[("minInclusive", "-32768"), ("maxInclusive", "32767")]),
    ("byte", "short", &[("minInclusive", "-128"), ("maxInclusive", "127")]),
    ("nonNegativeInteger", "integer", &[("minInclusive", "0")]),
    ("unsignedLong", "nonNegativeInteger", &[("maxInclusive", "18446744073709551615")]),
    ("unsignedInt", "unsignedLong", &[("maxInclusive", "4294967295")]),
    ("unsignedShort", "unsignedInt", &[("maxInclusive", "65535")]),
    ("unsignedByte", "unsignedShort", &[("maxInclusive", "255")]),
    ("positiveInteger", "nonNegativeInteger", &[("minInclusive", "1")]),
];

/// Built-in list types: (name, item type)
const DERIVED_LISTS: &[(&str, &str)] = &[
    ("NMTOKENS", "NMTOKEN"),
    ("IDREFS", "IDREF"),
    ("ENTITIES", "ENTITY"),
];

lazy_static! {
    static ref XSD_SCHEMA: Arc<Schema> =
        Arc::new(build_xsd_schema().expect("built-in type names are valid NCNames"));
}

/// The shared XML Schema namespace schema
pub fn xsd_schema() -> Arc<Schema> {
    Arc::clone(&XSD_SCHEMA)
}

/// Check whether a local name is one of the XSD built-in type names
pub fn is_builtin_type_name(local_name: &str) -> bool {
    XSD_SCHEMA.type_def(local_name).is_some()
}

fn facets(declared: &[(&str, &str)]) -> Vec<Facet> {
    declared
        .iter()
        .map(|(name, value)| Facet::new(*name, *value))
        .collect()
}

fn build_xsd_schema() -> Result<Schema> {
    let mut schema = Schema::new(Some(XSD_NAMESPACE));

    schema.add_simple_type(SimpleType {
        name: Some(QName::xsd(XSD_ANY_TYPE)),
        content: None,
        annotation: None,
    })?;
    schema.add_simple_type(
        SimpleType::restriction(QName::xsd(XSD_ANY_TYPE), vec![]).named(QName::xsd(XSD_ANY_SIMPLE_TYPE)),
    )?;

    for name in PRIMITIVE_TYPE_NAMES {
        let white_space = if name == XSD_STRING {
            Facet::white_space("preserve")
        } else {
            Facet::fixed("whiteSpace", "collapse")
        };
        schema.add_simple_type(
            SimpleType::restriction(QName::xsd(XSD_ANY_SIMPLE_TYPE), vec![white_space])
                .named(QName::xsd(name)),
        )?;
    }

    for (name, base, declared) in DERIVED_RESTRICTIONS {
        schema.add_simple_type(
            SimpleType::restriction(QName::xsd(*base), facets(declared)).named(QName::xsd(*name)),
        )?;
    }

    for (name, item) in DERIVED_LISTS {
        schema.add_simple_type(
            SimpleType::restriction_of(SimpleType::list(QName::xsd(*item)), vec![Facet::min_length(1)])
                .named(QName::xsd(*name)),
        )?;
    }

    Ok(schema)
}
