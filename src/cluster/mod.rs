//! Cluster objects as seen by the checks.
//!
//! A run fetches one `Objects` snapshot up front and hands every check a
//! shared reference to it; nothing mutates it afterwards.

pub mod client;

pub use client::{AcquisitionError, ClusterClient, ConnectionOptions};

use k8s_openapi::api::core::v1::{Pod, Secret};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::fmt;

/// Point-in-time set of cluster resources a run evaluates against.
#[derive(Debug, Clone, Default)]
pub struct Objects {
    pub pods: Vec<Pod>,
    pub secrets: Vec<Secret>,
}

impl Objects {
    pub fn new(pods: Vec<Pod>, secrets: Vec<Secret>) -> Self {
        Self { pods, secrets }
    }

    /// Total number of objects in the snapshot.
    pub fn len(&self) -> usize {
        self.pods.len() + self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Name and namespace of a resource, used to track references between
/// objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    pub name: String,
    pub namespace: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn from_meta(meta: &ObjectMeta) -> Self {
        Self {
            name: meta.name.clone().unwrap_or_default(),
            namespace: meta.namespace.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identifier_equality_is_structural() {
        let mut set = HashSet::new();
        set.insert(Identifier::new("db", "prod"));
        assert!(set.contains(&Identifier::new("db", "prod")));
        assert!(!set.contains(&Identifier::new("db", "staging")));
    }

    #[test]
    fn test_identifier_from_meta() {
        let meta = ObjectMeta {
            name: Some("tls".to_string()),
            namespace: Some("ingress".to_string()),
            ..Default::default()
        };
        assert_eq!(Identifier::from_meta(&meta), Identifier::new("tls", "ingress"));
        assert_eq!(Identifier::from_meta(&meta).to_string(), "ingress/tls");
    }

    #[test]
    fn test_objects_len() {
        let objects = Objects::new(vec![Pod::default()], vec![Secret::default(), Secret::default()]);
        assert_eq!(objects.len(), 3);
        assert!(Objects::default().is_empty());
    }
}
