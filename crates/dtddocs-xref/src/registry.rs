//! Case-insensitive output identifier assignment.

use std::collections::{HashMap, HashSet};

/// Registry misuse. Both conditions are programming errors in the caller,
/// not user-facing input problems.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("key `{0}` is already registered")]
    AlreadyRegistered(String),

    #[error("key `{0}` was never registered")]
    Unregistered(String),
}

/// Maps display keys to collision-free output identifiers.
///
/// An identifier is the key lowercased with spaces replaced by
/// underscores; when that form is already taken by a different key,
/// underscores are prepended one at a time until it is unique. First
/// registered wins the unprefixed form, so output is deterministic only
/// when callers register keys in a fixed order. Assigned identifiers
/// never change on later insertions.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    identifiers: HashMap<String, String>,
    taken: HashSet<String>,
}

impl IdentifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key and eagerly compute its identifier.
    ///
    /// Registering the same key twice is an error.
    pub fn assign(&mut self, key: &str) -> Result<(), RegistryError> {
        if self.identifiers.contains_key(key) {
            return Err(RegistryError::AlreadyRegistered(key.to_owned()));
        }
        let mut identifier = key.to_lowercase().replace(' ', "_");
        while self.taken.contains(&identifier) {
            identifier.insert(0, '_');
        }
        self.taken.insert(identifier.clone());
        self.identifiers.insert(key.to_owned(), identifier);
        Ok(())
    }

    /// Return the identifier previously assigned to a key.
    pub fn resolve(&self, key: &str) -> Result<&str, RegistryError> {
        self.identifiers
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| RegistryError::Unregistered(key.to_owned()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}
