//! Rule plugins and the engine that runs them.
//!
//! A check consumes an `Objects` snapshot and either produces diagnostics or
//! reports that it could not complete. Checks are registered explicitly in a
//! `Registry`, selected with a `CheckFilter` and executed by `run`.
//!
//! # Example
//!
//! ```rust,ignore
//! use clusterlint::checks::{self, CheckFilter, DiagnosticFilter, Registry, Selection};
//!
//! let registry = Registry::with_builtin()?;
//! let filter = CheckFilter::new(Selection::new().group("basic"), &registry)?;
//! let outcome = checks::run(&objects, filter.checks(), &DiagnosticFilter::default());
//! for d in &outcome.diagnostics {
//!     println!("{d}");
//! }
//! ```

pub mod basic;
pub mod diagnostic;
pub mod filter;
pub mod legacy;
pub mod registry;
pub mod run;

pub use diagnostic::{Diagnostic, DiagnosticFilter, Kind, ObjectRef, Severity};
pub use filter::{CheckFilter, CheckInfo, FilterError, Selection, list};
pub use legacy::{Legacy, LegacyCheck, LegacyFinding, LegacyReport};
pub use registry::{Registry, RegistryError};
pub use run::{CheckFailure, RunError, RunOutcome, run};

use crate::cluster::Objects;

/// A rule plugin evaluated against a cluster snapshot.
pub trait Check: Send + Sync {
    /// Unique name within a registry (e.g., "unused-secret").
    fn name(&self) -> &str;

    /// Group tags used for coarse selection. Never empty.
    fn groups(&self) -> &[&str];

    /// Human-readable description shown by `list`.
    fn description(&self) -> &str;

    /// Evaluate the snapshot.
    ///
    /// `Ok` with an empty list means the check ran and found nothing; `Err`
    /// means the check itself could not complete.
    fn run(&self, objects: &Objects) -> Result<Vec<Diagnostic>, CheckError>;
}

/// Why a check could not complete.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("malformed {kind} {object}: {reason}")]
    MalformedObject {
        kind: Kind,
        object: ObjectRef,
        reason: String,
    },

    #[error("{0}")]
    Failed(String),

    #[error("check panicked: {0}")]
    Panicked(String),

    #[error("{} scan unit(s) failed: {}", .0.len(), join_errors(.0))]
    Units(Vec<CheckError>),
}

fn join_errors(errors: &[CheckError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
