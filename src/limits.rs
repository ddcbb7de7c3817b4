//! Limits for scope resolution and walking
//!
//! Cyclic schemas terminate through the visited-element set and the scope
//! cache. These limits only guard against pathological graphs where many
//! distinct anonymous types sit on a cycle and recursion would otherwise
//! run until the stack overflows.

use crate::error::{Error, Result};

/// Recursion limits configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth during a walk
    pub max_walk_depth: usize,

    /// Maximum nesting of base/item/member type resolution
    pub max_resolution_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_walk_depth: 1000,
            max_resolution_depth: 500,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_walk_depth: 100,
            max_resolution_depth: 50,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_walk_depth: 10000,
            max_resolution_depth: 5000,
        }
    }

    /// Check if walk depth is within limits
    pub fn check_walk_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_walk_depth {
            Err(Error::LimitExceeded(format!(
                "walk depth {} exceeds maximum {}",
                depth, self.max_walk_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if type resolution depth is within limits
    pub fn check_resolution_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_resolution_depth {
            Err(Error::LimitExceeded(format!(
                "type resolution depth {} exceeds maximum {}",
                depth, self.max_resolution_depth
            )))
        } else {
            Ok(())
        }
    }
}
