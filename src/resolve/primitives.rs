//! Primitive-type registry
//!
//! A fixed, bidirectional mapping between the XML Schema primitive and
//! special types and [`Primitive`]. Built once, never mutated.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::components::builtins::*;
use crate::namespaces::QName;

/// XML Schema primitive and special types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Primitive {
    /// xs:anyType
    AnyType,
    /// xs:anySimpleType
    AnySimpleType,
    /// xs:duration
    Duration,
    /// xs:dateTime
    DateTime,
    /// xs:time
    Time,
    /// xs:date
    Date,
    /// xs:gYearMonth
    YearMonth,
    /// xs:gYear
    Year,
    /// xs:gMonthDay
    MonthDay,
    /// xs:gDay
    Day,
    /// xs:gMonth
    Month,
    /// xs:string
    String,
    /// xs:boolean
    Boolean,
    /// xs:base64Binary
    Base64Binary,
    /// xs:hexBinary
    HexBinary,
    /// xs:float
    Float,
    /// xs:decimal
    Decimal,
    /// xs:double
    Double,
    /// xs:anyURI
    AnyUri,
    /// xs:QName
    QName,
    /// xs:NOTATION
    Notation,
}

const PRIMITIVE_TABLE: [(Primitive, &str); 21] = [
    (Primitive::AnyType, XSD_ANY_TYPE),
    (Primitive::AnySimpleType, XSD_ANY_SIMPLE_TYPE),
    (Primitive::Duration, XSD_DURATION),
    (Primitive::DateTime, XSD_DATETIME),
    (Primitive::Time, XSD_TIME),
    (Primitive::Date, XSD_DATE),
    (Primitive::YearMonth, XSD_GYEAR_MONTH),
    (Primitive::Year, XSD_GYEAR),
    (Primitive::MonthDay, XSD_GMONTH_DAY),
    (Primitive::Day, XSD_GDAY),
    (Primitive::Month, XSD_GMONTH),
    (Primitive::String, XSD_STRING),
    (Primitive::Boolean, XSD_BOOLEAN),
    (Primitive::Base64Binary, XSD_BASE64_BINARY),
    (Primitive::HexBinary, XSD_HEX_BINARY),
    (Primitive::Float, XSD_FLOAT),
    (Primitive::Decimal, XSD_DECIMAL),
    (Primitive::Double, XSD_DOUBLE),
    (Primitive::AnyUri, XSD_ANY_URI),
    (Primitive::QName, XSD_QNAME),
    (Primitive::Notation, XSD_NOTATION),
];

lazy_static! {
    static ref BY_NAME: HashMap<QName, Primitive> = PRIMITIVE_TABLE
        .iter()
        .map(|(primitive, local)| (QName::xsd(*local), *primitive))
        .collect();
    static ref BY_PRIMITIVE: HashMap<Primitive, QName> = PRIMITIVE_TABLE
        .iter()
        .map(|(primitive, local)| (*primitive, QName::xsd(*local)))
        .collect();
}

impl Primitive {
    /// All primitives, anyType and anySimpleType first
    pub fn all() -> impl Iterator<Item = Primitive> {
        PRIMITIVE_TABLE.iter().map(|(primitive, _)| *primitive)
    }

    /// The primitive registered for a qualified name
    pub fn for_qname(name: &QName) -> Option<Primitive> {
        BY_NAME.get(name).copied()
    }

    /// Check whether a qualified name is a registered primitive
    pub fn is_primitive(name: &QName) -> bool {
        BY_NAME.contains_key(name)
    }

    /// The qualified name of this primitive
    pub fn qname(&self) -> &'static QName {
        // Every variant is in the table.
        &BY_PRIMITIVE[self]
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "xs:{}", self.qname().local_name)
    }
}
