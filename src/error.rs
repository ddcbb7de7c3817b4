//! Error types for xmlschema-walker
//!
//! Scope resolution and walking perform no I/O, so every error is a
//! synchronous, fatal failure of the call that triggered it. Malformed
//! schema graphs surface as [`SchemaError`]; caller bugs as [`Error::Usage`].

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`enum@Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for resolution and walking
#[derive(Error, Debug)]
pub enum Error {
    /// The schema graph is not well-formed
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A raw facet could not be classified
    #[error("facet error: {0}")]
    Facet(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// The API was used incorrectly
    #[error("usage error: {0}")]
    Usage(String),

    /// A configured limit was exceeded
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A malformed-schema error with context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error message
    pub message: String,
    /// Offending component, rendered as `{namespace}local`
    pub component: Option<String>,
    /// Location in the schema source (`line:column`)
    pub location: Option<String>,
}

impl SchemaError {
    /// Create a new schema error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            component: None,
            location: None,
        }
    }

    /// Set the offending component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref component) = self.component {
            write!(f, "\n\nComponent: {}", component)?;
        }

        if let Some(ref loc) = self.location {
            write!(f, "\n\nLocation: {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

impl Error {
    /// Shorthand for a malformed-schema error
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Error::Schema(SchemaError::new(message))
    }

    /// Check whether this error reports a malformed schema
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Schema(_))
    }
}
