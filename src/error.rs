//! Error types for container operations.
//!
//! Absence is never an error: lookups, deletes and pops report it through
//! `Option`. The variants here are usage errors that leave the container
//! untouched.

use thiserror::Error;

use crate::Key;

/// Usage errors raised by bulk operations on an [`XHash`](crate::XHash).
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XHashError {
    /// A push or unshift named an anchor key that is not present.
    #[error("anchor key `{key}` does not exist")]
    MissingAnchor { key: Key },

    /// A reorder named a reference key that is not present.
    #[error("reorder reference key `{key}` does not exist")]
    MissingReference { key: Key },

    /// Two keys in a remap were mapped onto the same target.
    #[error("remap target `{key}` is not unique")]
    DuplicateRemapTarget { key: Key },

    /// A remap target is already held by a key that is not being renamed.
    #[error("remap target `{key}` collides with an existing key")]
    RemapCollision { key: Key },
}

impl XHashError {
    /// The key the error is about.
    pub fn key(&self) -> &Key {
        match self {
            XHashError::MissingAnchor { key }
            | XHashError::MissingReference { key }
            | XHashError::DuplicateRemapTarget { key }
            | XHashError::RemapCollision { key } => key,
        }
    }

    /// Check if this error was raised by a remap.
    pub fn is_remap_error(&self) -> bool {
        matches!(self, XHashError::DuplicateRemapTarget { .. } | XHashError::RemapCollision { .. })
    }

    /// Check if this error is about a key that was expected to exist.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, XHashError::MissingAnchor { .. } | XHashError::MissingReference { .. })
    }
}
