use std::time::Duration;

use k8s_openapi::api::core::v1::Pod;
use kube::{
    Api,
    runtime::wait::{Condition, await_condition},
};
use serde::de::DeserializeOwned;
use snafu::{OptionExt, ResultExt};

use crate::{error, error::Error, ext::PodExt};

/// Condition that holds once any container of the pod terminated with a
/// non-empty message.
#[must_use]
pub fn has_termination_message() -> impl Condition<Pod> {
    |pod: Option<&Pod>| pod.is_some_and(|pod| pod.first_termination_message().is_some())
}

pub trait ApiPodExt {
    /// Fetches the pod and decodes its termination message as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GetPod`] if the pod cannot be fetched, otherwise the
    /// errors of [`PodExt::operations_result`].
    async fn operations_result<T>(&self, pod_name: &str, namespace: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;

    /// Waits until the pod carries a termination message and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WaitForTerminationMessage`] once `timeout` elapses,
    /// [`Error::AwaitPodCondition`] if the watch fails and
    /// [`Error::PodNotFound`] if the pod is gone.
    async fn await_termination_message(
        &self,
        pod_name: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<Pod, Error>;
}

impl ApiPodExt for Api<Pod> {
    async fn operations_result<T>(&self, pod_name: &str, namespace: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let pod = self.get(pod_name).await.with_context(|_| error::GetPodSnafu {
            namespace: namespace.to_string(),
            pod_name: pod_name.to_string(),
        })?;
        pod.operations_result()
    }

    async fn await_termination_message(
        &self,
        pod_name: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<Pod, Error> {
        tracing::info!(
            "Waiting up to {}s for pod {namespace}/{pod_name} to report a termination message",
            timeout.as_secs()
        );
        tokio::time::timeout(
            timeout,
            await_condition(self.clone(), pod_name, has_termination_message()),
        )
        .await
        .map_err(|_| Error::WaitForTerminationMessage {
            namespace: namespace.to_string(),
            pod_name: pod_name.to_string(),
        })?
        .with_context(|_| error::AwaitPodConditionSnafu {
            namespace: namespace.to_string(),
            pod_name: pod_name.to_string(),
        })?
        .with_context(|| error::PodNotFoundSnafu {
            namespace: namespace.to_string(),
            pod_name: pod_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{
        ContainerState, ContainerStateTerminated, ContainerStatus, PodStatus,
    };

    use super::*;

    fn pod_with_message(message: &str) -> Pod {
        Pod {
            status: Some(PodStatus {
                container_statuses: Some(vec![ContainerStatus {
                    name: "main".to_string(),
                    state: Some(ContainerState {
                        terminated: Some(ContainerStateTerminated {
                            message: Some(message.to_string()),
                            ..ContainerStateTerminated::default()
                        }),
                        ..ContainerState::default()
                    }),
                    ..ContainerStatus::default()
                }]),
                ..PodStatus::default()
            }),
            ..Pod::default()
        }
    }

    #[test]
    fn test_condition_on_missing_pod() {
        assert!(!has_termination_message().matches_object(None));
    }

    #[test]
    fn test_condition_on_pod_without_message() {
        assert!(!has_termination_message().matches_object(Some(&Pod::default())));
        assert!(!has_termination_message().matches_object(Some(&pod_with_message(""))));
    }

    #[test]
    fn test_condition_on_terminated_pod() {
        assert!(has_termination_message().matches_object(Some(&pod_with_message("{}"))));
    }
}
