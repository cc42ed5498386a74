//! Unused secret check.
//!
//! Collects every secret a pod can reach (volumes, projected volumes, image
//! pull secrets, `envFrom`) and reports secrets nothing references. Service
//! account tokens are managed by the cluster and never reported.

use super::GROUP;
use crate::checks::{Check, CheckError, Diagnostic, Kind, ObjectRef, Severity};
use crate::cluster::{Identifier, Objects};
use k8s_openapi::api::core::v1::{Container, Pod};
use rayon::prelude::*;
use std::collections::HashSet;

const SERVICE_ACCOUNT_TOKEN_TYPE: &str = "kubernetes.io/service-account-token";

pub struct UnusedSecretCheck;

impl Check for UnusedSecretCheck {
    fn name(&self) -> &str {
        "unused-secret"
    }

    fn groups(&self) -> &[&str] {
        &[GROUP]
    }

    fn description(&self) -> &str {
        "Checks if there are unused secrets in the cluster. Ignores service account tokens"
    }

    fn run(&self, objects: &Objects) -> Result<Vec<Diagnostic>, CheckError> {
        let used = referenced_secrets(&objects.pods)?;

        let diagnostics = objects
            .secrets
            .iter()
            .filter(|secret| secret.type_.as_deref() != Some(SERVICE_ACCOUNT_TOKEN_TYPE))
            .filter(|secret| !used.contains(&Identifier::from_meta(&secret.metadata)))
            .map(|secret| {
                Diagnostic::for_object(
                    Severity::Warning,
                    "Unused secret",
                    Kind::Secret,
                    &secret.metadata,
                )
            })
            .collect();
        Ok(diagnostics)
    }
}

/// Every secret referenced by `pods`.
///
/// Each pod is scanned as its own unit. All units run even when some fail,
/// and every failure is returned together.
fn referenced_secrets(pods: &[Pod]) -> Result<HashSet<Identifier>, CheckError> {
    let units: Vec<Result<HashSet<Identifier>, CheckError>> =
        pods.par_iter().map(pod_references).collect();

    let mut used = HashSet::new();
    let mut errors = Vec::new();
    for unit in units {
        match unit {
            Ok(found) => used.extend(found),
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(used)
    } else {
        log::debug!("{} pod(s) could not be scanned for secret references", errors.len());
        Err(CheckError::Units(errors))
    }
}

fn pod_references(pod: &Pod) -> Result<HashSet<Identifier>, CheckError> {
    let spec = pod.spec.as_ref().ok_or_else(|| CheckError::MalformedObject {
        kind: Kind::Pod,
        object: ObjectRef::from_meta(&pod.metadata),
        reason: "pod has no spec".to_string(),
    })?;
    let namespace = pod.metadata.namespace.clone().unwrap_or_default();
    let mut names: Vec<&str> = Vec::new();

    for volume in spec.volumes.iter().flatten() {
        if let Some(name) = volume.secret.as_ref().and_then(|s| s.secret_name.as_deref()) {
            names.push(name);
        }
        if let Some(projected) = &volume.projected {
            for source in projected.sources.iter().flatten() {
                if let Some(secret) = &source.secret {
                    names.push(&secret.name);
                }
            }
        }
    }

    for pull_secret in spec.image_pull_secrets.iter().flatten() {
        names.push(&pull_secret.name);
    }

    let containers = spec.containers.iter().chain(spec.init_containers.iter().flatten());
    names.extend(containers.flat_map(env_from_secrets));

    Ok(names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| Identifier::new(name, namespace.as_str()))
        .collect())
}

fn env_from_secrets(container: &Container) -> impl Iterator<Item = &str> {
    container
        .env_from
        .iter()
        .flatten()
        .filter_map(|source| source.secret_ref.as_ref())
        .map(|secret| secret.name.as_str())
}
