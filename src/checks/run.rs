//! Check orchestration.
//!
//! Every resolved check runs against the same read-only snapshot on the
//! rayon pool. A check that fails, or panics, is recorded against its name and
//! does not stop its siblings. Results fan back in through rayon's indexed
//! collect and are merged on the calling thread in resolution order.

use super::{Check, CheckError, Diagnostic, DiagnosticFilter};
use crate::cluster::Objects;
use rayon::prelude::*;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// A check that could not complete.
#[derive(Debug)]
pub struct CheckFailure {
    pub check: String,
    pub error: CheckError,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check, self.error)
    }
}

/// Every check failure of one run.
#[derive(Debug)]
pub struct RunError {
    pub failures: Vec<CheckFailure>,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} check(s) failed to run", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for RunError {}

impl RunError {
    /// Names of the failed checks, in resolution order.
    pub fn checks(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.check.as_str()).collect()
    }
}

/// Result of a run. Diagnostics and an error may both be present.
#[derive(Debug)]
pub struct RunOutcome {
    /// Diagnostics that passed the severity filter, in check order.
    pub diagnostics: Vec<Diagnostic>,
    /// Set when at least one check failed to run.
    pub error: Option<RunError>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Split into diagnostics and a `Result` carrying any failures.
    pub fn into_parts(self) -> (Vec<Diagnostic>, Result<(), RunError>) {
        let status = match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        };
        (self.diagnostics, status)
    }
}

/// Run `checks` against `objects` and keep the diagnostics `filter` accepts.
pub fn run(objects: &Objects, checks: &[Arc<dyn Check>], filter: &DiagnosticFilter) -> RunOutcome {
    let started = Instant::now();
    log::info!(
        "Running {} check(s) against {} object(s)",
        checks.len(),
        objects.len()
    );

    let results: Vec<Result<Vec<Diagnostic>, CheckError>> = checks
        .par_iter()
        .map(|check| run_isolated(check.as_ref(), objects))
        .collect();

    let mut diagnostics = Vec::new();
    let mut failures = Vec::new();
    for (check, result) in checks.iter().zip(results) {
        match result {
            Ok(found) => {
                diagnostics.extend(found.into_iter().map(|d| d.attributed_to(check.name())));
            }
            Err(error) => {
                log::warn!("Check {} failed: {}", check.name(), error);
                failures.push(CheckFailure {
                    check: check.name().to_string(),
                    error,
                });
            }
        }
    }

    let total = diagnostics.len();
    let diagnostics = filter.apply(diagnostics);
    log::info!(
        "Checks finished in {:?}: {} diagnostic(s), {} shown, {} failed check(s)",
        started.elapsed(),
        total,
        diagnostics.len(),
        failures.len()
    );

    let error = if failures.is_empty() {
        None
    } else {
        Some(RunError { failures })
    };
    RunOutcome { diagnostics, error }
}

fn run_isolated(check: &dyn Check, objects: &Objects) -> Result<Vec<Diagnostic>, CheckError> {
    log::debug!("Starting check {}", check.name());
    let result = panic::catch_unwind(AssertUnwindSafe(|| check.run(objects)))
        .unwrap_or_else(|payload| Err(CheckError::Panicked(panic_message(payload.as_ref()))));
    if let Ok(found) = &result {
        log::debug!("Check {} produced {} diagnostic(s)", check.name(), found.len());
    }
    result
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
