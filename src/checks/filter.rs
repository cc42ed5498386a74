//! Check selection.
//!
//! Resolves which checks run from four independent selectors:
//! - include groups / exclude groups (coarse, by tag)
//! - include checks / exclude checks (explicit names)
//!
//! Resolution order:
//! 1. Unknown check names are rejected.
//! 2. A name both included and excluded is rejected.
//! 3. Start from every check, or only those in an included group.
//! 4. Drop checks in an excluded group.
//! 5. Explicit check names replace the group-based selection.
//! 6. Drop explicitly excluded checks. Exclusion always has the last word.

use super::{Check, Registry};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Selection errors, reported before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown check(s): {}", .0.join(", "))]
    UnknownChecks(Vec<String>),

    #[error("check(s) both included and excluded: {}", .0.join(", "))]
    ConflictingChecks(Vec<String>),
}

/// The four user-supplied selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub include_groups: BTreeSet<String>,
    pub exclude_groups: BTreeSet<String>,
    pub include_checks: BTreeSet<String>,
    pub exclude_checks: BTreeSet<String>,
}

impl Selection {
    /// Empty selection: every registered check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw lists.
    pub fn from_lists<S: AsRef<str>>(
        include_groups: &[S],
        exclude_groups: &[S],
        include_checks: &[S],
        exclude_checks: &[S],
    ) -> Self {
        fn set<S: AsRef<str>>(items: &[S]) -> BTreeSet<String> {
            items
                .iter()
                .map(|s| s.as_ref().trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        }
        Self {
            include_groups: set(include_groups),
            exclude_groups: set(exclude_groups),
            include_checks: set(include_checks),
            exclude_checks: set(exclude_checks),
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.include_groups.insert(group.into());
        self
    }

    pub fn ignore_group(mut self, group: impl Into<String>) -> Self {
        self.exclude_groups.insert(group.into());
        self
    }

    pub fn check(mut self, name: impl Into<String>) -> Self {
        self.include_checks.insert(name.into());
        self
    }

    pub fn ignore_check(mut self, name: impl Into<String>) -> Self {
        self.exclude_checks.insert(name.into());
        self
    }

    fn validate(&self, registry: &Registry) -> Result<(), FilterError> {
        let unknown: Vec<String> = self
            .include_checks
            .iter()
            .chain(&self.exclude_checks)
            .filter(|name| !registry.contains(name))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !unknown.is_empty() {
            return Err(FilterError::UnknownChecks(unknown));
        }

        let conflicting: Vec<String> = self
            .include_checks
            .intersection(&self.exclude_checks)
            .cloned()
            .collect();
        if !conflicting.is_empty() {
            return Err(FilterError::ConflictingChecks(conflicting));
        }

        Ok(())
    }
}

fn in_any(check: &Arc<dyn Check>, groups: &BTreeSet<String>) -> bool {
    check.groups().iter().any(|g| groups.contains(*g))
}

/// The resolved set of checks for one selection.
#[derive(Clone)]
pub struct CheckFilter {
    selection: Selection,
    checks: Vec<Arc<dyn Check>>,
}

impl CheckFilter {
    /// Resolve `selection` against the registry's current contents.
    ///
    /// An empty result is valid and means no checks run.
    pub fn new(selection: Selection, registry: &Registry) -> Result<Self, FilterError> {
        selection.validate(registry)?;

        let checks: Vec<Arc<dyn Check>> = if selection.include_checks.is_empty() {
            registry
                .all()
                .values()
                .filter(|c| {
                    selection.include_groups.is_empty()
                        || in_any(c, &selection.include_groups)
                })
                .filter(|c| !in_any(c, &selection.exclude_groups))
                .cloned()
                .collect()
        } else {
            registry
                .all()
                .iter()
                .filter(|(name, _)| selection.include_checks.contains(*name))
                .map(|(_, c)| c.clone())
                .collect()
        };

        let checks: Vec<Arc<dyn Check>> = checks
            .into_iter()
            .filter(|c| !selection.exclude_checks.contains(c.name()))
            .collect();

        log::debug!(
            "Resolved {} check(s): [{}]",
            checks.len(),
            checks
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { selection, checks })
    }

    /// Resolved checks in registry order.
    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl std::fmt::Debug for CheckFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckFilter")
            .field("selection", &self.selection)
            .field("checks", &self.names())
            .finish()
    }
}

/// Name, description and groups of a check, for discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub name: String,
    pub description: String,
    pub groups: Vec<String>,
}

impl CheckInfo {
    fn of(check: &dyn Check) -> Self {
        Self {
            name: check.name().to_string(),
            description: check.description().to_string(),
            groups: check.groups().iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// Checks matched by group selectors alone, without running anything.
pub fn list<S: AsRef<str>>(
    registry: &Registry,
    include_groups: &[S],
    exclude_groups: &[S],
) -> Result<Vec<CheckInfo>, FilterError> {
    let selection = Selection::from_lists(include_groups, exclude_groups, &[], &[]);
    let filter = CheckFilter::new(selection, registry)?;
    Ok(filter
        .checks()
        .iter()
        .map(|c| CheckInfo::of(c.as_ref()))
        .collect())
}
