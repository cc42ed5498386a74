//! The normalized finding shape shared by every check.
//!
//! - `Severity` - Ordered importance of a finding (`Suggestion < Warning < Error`)
//! - `Kind` - The resource category a finding is about
//! - `ObjectRef` - Minimal identity of the offending object
//! - `Diagnostic` - One finding, as emitted by a check
//! - `DiagnosticFilter` - Post-run severity filter

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic.
///
/// Declaration order is the total order: `Suggestion < Warning < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nice to have, no action required
    Suggestion,
    /// Should be addressed
    Warning,
    /// Must be fixed
    Error,
}

impl Severity {
    /// Parse a severity from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "suggestion" => Some(Self::Suggestion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resource category a diagnostic concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "pod")]
    Pod,
    #[serde(rename = "pod template")]
    PodTemplate,
    #[serde(rename = "persistent volume claim")]
    PersistentVolumeClaim,
    #[serde(rename = "config map")]
    ConfigMap,
    #[serde(rename = "service")]
    Service,
    #[serde(rename = "secret")]
    Secret,
    #[serde(rename = "service account")]
    ServiceAccount,
    #[serde(rename = "persistent volume")]
    PersistentVolume,
    #[serde(rename = "node")]
    Node,
    #[serde(rename = "namespace")]
    Namespace,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pod => "pod",
            Self::PodTemplate => "pod template",
            Self::PersistentVolumeClaim => "persistent volume claim",
            Self::ConfigMap => "config map",
            Self::Service => "service",
            Self::Secret => "secret",
            Self::ServiceAccount => "service account",
            Self::PersistentVolume => "persistent volume",
            Self::Node => "node",
            Self::Namespace => "namespace",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal identity of the object a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Object name.
    pub name: String,
    /// Namespace, empty for cluster-scoped objects.
    #[serde(default)]
    pub namespace: String,
}

impl ObjectRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Identity taken from an object's metadata.
    pub fn from_meta(meta: &ObjectMeta) -> Self {
        Self {
            name: meta.name.clone().unwrap_or_default(),
            namespace: meta.namespace.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

/// A single finding produced by a check.
///
/// Diagnostics are plain values: two diagnostics are equal when all of
/// their fields are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the check that emitted this diagnostic. Filled in by the
    /// orchestrator; empty until the diagnostic leaves its check.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub check: String,
    /// How important the finding is.
    pub severity: Severity,
    /// Human-readable description of the problem.
    pub message: String,
    /// Category of the offending resource.
    pub kind: Kind,
    /// The offending resource.
    pub object: ObjectRef,
    /// Controllers owning the offending resource.
    #[serde(default)]
    pub owners: Vec<OwnerReference>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        kind: Kind,
        object: ObjectRef,
        owners: Vec<OwnerReference>,
    ) -> Self {
        Self {
            check: String::new(),
            severity,
            message: message.into(),
            kind,
            object,
            owners,
        }
    }

    /// Diagnostic about an object, carrying its owner references along.
    pub fn for_object(
        severity: Severity,
        message: impl Into<String>,
        kind: Kind,
        meta: &ObjectMeta,
    ) -> Self {
        Self::new(
            severity,
            message,
            kind,
            ObjectRef::from_meta(meta),
            meta.owner_references.clone().unwrap_or_default(),
        )
    }

    pub(crate) fn attributed_to(mut self, check: &str) -> Self {
        self.check = check.to_string();
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.kind, self.object, self.message
        )
    }
}

/// Keeps only diagnostics of one severity. No severity keeps everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticFilter {
    pub severity: Option<Severity>,
}

impl DiagnosticFilter {
    pub fn new(severity: Option<Severity>) -> Self {
        Self { severity }
    }

    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        self.severity.is_none_or(|s| s == diagnostic.severity)
    }

    pub fn apply(&self, mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics.retain(|d| self.matches(d));
        diagnostics
    }
}
