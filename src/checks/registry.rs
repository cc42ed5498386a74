//! Catalog of known checks.
//!
//! Built once at startup from explicit registration calls and only read
//! afterwards. Registration failures are defects in the build, not runtime
//! conditions, so callers should treat them as fatal.

use super::{Check, basic};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("check '{0}' is already registered")]
    DuplicateCheck(String),

    #[error("check '{0}' declares no groups")]
    NoGroups(String),
}

/// Mapping from check name to check.
#[derive(Default, Clone)]
pub struct Registry {
    checks: BTreeMap<String, Arc<dyn Check>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in check.
    pub fn with_builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        basic::register(&mut registry)?;
        Ok(registry)
    }

    /// Add a check. Fails if the name is taken or the check has no groups.
    pub fn register(&mut self, check: impl Check + 'static) -> Result<(), RegistryError> {
        let name = check.name().to_string();
        if self.checks.contains_key(&name) {
            return Err(RegistryError::DuplicateCheck(name));
        }
        if check.groups().is_empty() {
            return Err(RegistryError::NoGroups(name));
        }
        log::trace!("Registered check {}", name);
        self.checks.insert(name, Arc::new(check));
        Ok(())
    }

    /// All registered checks, ordered by name.
    pub fn all(&self) -> &BTreeMap<String, Arc<dyn Check>> {
        &self.checks
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.checks.keys()).finish()
    }
}
