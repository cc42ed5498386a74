//! Snapshot acquisition from a live cluster.
//!
//! Builds a Kubernetes client from a kubeconfig (optionally a specific file
//! and context) and lists every resource kind the checks need.
//!
//! # Example
//!
//! ```rust,ignore
//! use clusterlint::cluster::{ClusterClient, ConnectionOptions};
//!
//! let client = ClusterClient::new(&ConnectionOptions::default()).await?;
//! let objects = client.fetch_objects().await?;
//! println!("{} pods", objects.pods.len());
//! ```

use super::Objects;
use k8s_openapi::api::core::v1::{Pod, Secret};
use kube::{
    Client, Config,
    api::{Api, ListParams},
    config::{KubeConfigOptions, Kubeconfig},
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::path::PathBuf;
use std::time::Duration;

/// Default bound on how long snapshot acquisition may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for snapshot acquisition.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("Failed to read kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Failed to create Kubernetes client: {0}")]
    Client(#[from] kube::Error),

    #[error("Failed to list {resource}: {source}")]
    List {
        resource: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("Timed out after {0:?} fetching cluster objects")]
    Timeout(Duration),
}

/// Where and how to connect.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Kubeconfig file. `None` uses the standard discovery (`$KUBECONFIG`,
    /// then `~/.kube/config`).
    pub kubeconfig: Option<PathBuf>,
    /// Context to use. `None` uses the kubeconfig's current context.
    pub context: Option<String>,
    /// Restrict listing to one namespace. `None` lists cluster-wide.
    pub namespace: Option<String>,
    /// Upper bound for fetching the whole snapshot.
    pub timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            namespace: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Kubernetes client that produces `Objects` snapshots.
pub struct ClusterClient {
    client: Client,
    namespace: Option<String>,
    timeout: Duration,
}

impl ClusterClient {
    /// Create a client from the given connection options.
    pub async fn new(options: &ConnectionOptions) -> Result<Self, AcquisitionError> {
        let kubeconfig = match &options.kubeconfig {
            Some(path) => Kubeconfig::read_from(path)?,
            None => Kubeconfig::read()?,
        };
        let config = Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: options.context.clone(),
                ..Default::default()
            },
        )
        .await?;
        log::info!(
            "Connecting to cluster at {} (context: {})",
            config.cluster_url,
            options.context.as_deref().unwrap_or("current")
        );
        let client = Client::try_from(config)?;
        Ok(Self {
            client,
            namespace: options.namespace.clone(),
            timeout: options.timeout,
        })
    }

    /// Fetch every resource list the checks need.
    ///
    /// The per-kind list calls run concurrently; the first failure aborts
    /// the whole acquisition.
    pub async fn fetch_objects(&self) -> Result<Objects, AcquisitionError> {
        let pods: Api<Pod> = self.api();
        let secrets: Api<Secret> = self.api();

        let fetch = async {
            tokio::try_join!(list_all(&pods, "pods"), list_all(&secrets, "secrets"))
        };
        let (pods, secrets) = tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| AcquisitionError::Timeout(self.timeout))??;

        log::info!(
            "Fetched {} pods and {} secrets",
            pods.len(),
            secrets.len()
        );
        Ok(Objects::new(pods, secrets))
    }

    fn api<K>(&self) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <K as kube::Resource>::DynamicType: Default,
    {
        match &self.namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        }
    }
}

async fn list_all<K>(api: &Api<K>, resource: &'static str) -> Result<Vec<K>, AcquisitionError>
where
    K: Clone + DeserializeOwned + Debug,
{
    log::debug!("Listing {}", resource);
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(|source| AcquisitionError::List { resource, source })?;
    Ok(list.items)
}
