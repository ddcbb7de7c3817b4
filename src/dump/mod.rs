//! Walk dumps
//!
//! [`DumpBuilder`] listens to a walk and assembles a [`SchemaDump`], a
//! serde tree of elements, attributes, groups and wildcards with their
//! resolved types. Useful for snapshot testing and for inspecting how a
//! schema resolves.

pub mod builder;
pub mod model;

pub use builder::{dump_elements, DumpBuilder};
pub use model::*;

use crate::error::Result;

/// Render a dump as pretty-printed JSON
pub fn to_json(dump: &SchemaDump) -> Result<String> {
    Ok(serde_json::to_string_pretty(dump)?)
}

/// Parse a dump back from JSON
pub fn from_json(json: &str) -> Result<SchemaDump> {
    Ok(serde_json::from_str(json)?)
}
