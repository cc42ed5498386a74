//! Adapter for checks that report separate warning and error lists.
//!
//! Older checks return a pair of lists instead of diagnostics. Wrapping such a
//! check in `Legacy` turns warnings into `Severity::Warning` diagnostics and
//! errors into `Severity::Error` diagnostics, so the orchestrator cannot tell
//! the two styles apart.

use super::{Check, CheckError, Diagnostic, Kind, ObjectRef, Severity};
use crate::cluster::Objects;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

/// One problem reported by a legacy check, without a severity.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyFinding {
    pub message: String,
    pub kind: Kind,
    pub object: ObjectRef,
    pub owners: Vec<OwnerReference>,
}

impl LegacyFinding {
    pub fn for_object(message: impl Into<String>, kind: Kind, meta: &ObjectMeta) -> Self {
        Self {
            message: message.into(),
            kind,
            object: ObjectRef::from_meta(meta),
            owners: meta.owner_references.clone().unwrap_or_default(),
        }
    }

    fn into_diagnostic(self, severity: Severity) -> Diagnostic {
        Diagnostic::new(severity, self.message, self.kind, self.object, self.owners)
    }
}

/// Low-priority and high-priority problems found by a legacy check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyReport {
    pub warnings: Vec<LegacyFinding>,
    pub errors: Vec<LegacyFinding>,
}

impl LegacyReport {
    pub fn extend(&mut self, other: LegacyReport) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }
}

/// A check written in the warnings/errors style.
pub trait LegacyCheck: Send + Sync {
    fn name(&self) -> &str;
    fn groups(&self) -> &[&str];
    fn description(&self) -> &str;
    fn run(&self, objects: &Objects) -> Result<LegacyReport, CheckError>;
}

/// Makes a `LegacyCheck` usable wherever a `Check` is expected.
pub struct Legacy<C>(pub C);

impl<C: LegacyCheck> Check for Legacy<C> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn groups(&self) -> &[&str] {
        self.0.groups()
    }

    fn description(&self) -> &str {
        self.0.description()
    }

    fn run(&self, objects: &Objects) -> Result<Vec<Diagnostic>, CheckError> {
        let report = self.0.run(objects)?;
        let warnings = report
            .warnings
            .into_iter()
            .map(|f| f.into_diagnostic(Severity::Warning));
        let errors = report
            .errors
            .into_iter()
            .map(|f| f.into_diagnostic(Severity::Error));
        Ok(warnings.chain(errors).collect())
    }
}
