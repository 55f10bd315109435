use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Args;
use k8s_openapi::api::core::v1::Pod;
use kube::Api;
use podprobe::ApiPodExt;
use serde_json::Value;
use snafu::{OptionExt, ResultExt};

use crate::{
    cli::{
        error::{self, Error},
        internal::ResourceResolver,
    },
    config::Config,
};

#[derive(Args, Clone)]
pub struct PodArgs {
    #[arg(required_unless_present = "file", help = "Name of the pod to inspect.")]
    pub pod_name: Option<String>,

    #[arg(
        short,
        long,
        help = "Kubernetes namespace of the pod. Defaults to the configured namespace, then the \
                current Kubernetes context's namespace."
    )]
    pub namespace: Option<String>,

    #[arg(
        short,
        long,
        help = "Read the pod from a manifest file (e.g. `kubectl get pod -o yaml`) instead of \
                the cluster."
    )]
    pub file: Option<PathBuf>,
}

impl PodArgs {
    pub async fn target(self, config: &Config) -> Result<PodTarget, Error> {
        let Self { pod_name, namespace, file } = self;
        if let Some(path) = file {
            return Ok(PodTarget::Manifest(path));
        }

        let pod_name = pod_name.context(error::MissingPodNameSnafu)?;
        let kube_client = kube::Client::try_default().await.context(error::KubeConfigSnafu)?;
        let namespace =
            ResourceResolver::from((Some(&kube_client), config)).resolve_namespace(namespace);
        let api = Api::namespaced(kube_client, &namespace);
        Ok(PodTarget::Cluster { api, namespace, pod_name })
    }
}

/// Where a pod is read from.
pub enum PodTarget {
    Manifest(PathBuf),
    Cluster { api: Api<Pod>, namespace: String, pod_name: String },
}

impl fmt::Display for PodTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest(path) => write!(f, "{}", path.display()),
            Self::Cluster { namespace, pod_name, .. } => write!(f, "{namespace}/{pod_name}"),
        }
    }
}

impl PodTarget {
    pub async fn get(&self) -> Result<Pod, Error> {
        match self {
            Self::Manifest(path) => read_manifest(path).await,
            Self::Cluster { api, namespace, pod_name } => {
                api.get(pod_name).await.with_context(|_| error::GetPodSnafu {
                    namespace: namespace.clone(),
                    pod_name: pod_name.clone(),
                })
            }
        }
    }

    /// Decodes the termination message of the pod, waiting up to `timeout`
    /// for it to appear when the pod lives in the cluster.
    pub async fn operations_result(&self, timeout: Option<Duration>) -> Result<Value, Error> {
        let pod = match (self, timeout) {
            (Self::Cluster { api, namespace, pod_name }, None) => {
                return Ok(api.operations_result(pod_name, namespace).await?);
            }
            (Self::Cluster { api, namespace, pod_name }, Some(timeout)) => {
                api.await_termination_message(pod_name, namespace, timeout).await?
            }
            (Self::Manifest(path), _) => read_manifest(path).await?,
        };

        let mut result = Value::Null;
        podprobe::decode_operations_result(Some(&pod), &mut result)?;
        Ok(result)
    }
}

async fn read_manifest(path: &Path) -> Result<Pod, Error> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|_| error::ReadFileSnafu { path: path.to_path_buf() })?;
    serde_yaml::from_slice(&data)
        .with_context(|_| error::ParsePodManifestSnafu { path: path.to_path_buf() })
}
