use crate::formatter::OutputFormat;
use serde::Deserialize;

/// Contents of `.clusterlint.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Kubeconfig path, overriding `$KUBECONFIG` and `~/.kube/config`.
    pub kubeconfig: Option<String>,
    /// Kubeconfig context to use instead of the current one.
    pub context: Option<String>,
    /// Restrict acquisition to one namespace.
    pub namespace: Option<String>,
    /// Seconds allowed for fetching the snapshot.
    pub timeout_secs: Option<u64>,
    pub selection: SelectionConfig,
    pub output: OutputConfig,
}

/// Default check selection for `run`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub groups: Vec<String>,
    pub ignore_groups: Vec<String>,
    pub checks: Vec<String>,
    pub ignore_checks: Vec<String>,
}

/// Output defaults for `run`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    /// Only show diagnostics of this severity.
    pub level: Option<String>,
    pub no_color: bool,
}
