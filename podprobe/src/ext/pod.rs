use k8s_openapi::api::core::v1::Pod;
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::{error, error::Error};

pub trait PodExt {
    /// Returns the first non-empty message left by a terminated container,
    /// walking the container statuses in the order the API reports them.
    #[must_use]
    fn first_termination_message(&self) -> Option<&str>;

    /// Decodes the first termination message as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTerminationMessage`] if no terminated container
    /// left a message, or [`Error::DecodeTerminationMessage`] if the message
    /// does not deserialize into `T`.
    fn operations_result<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl PodExt for Pod {
    fn first_termination_message(&self) -> Option<&str> {
        self.status
            .as_ref()?
            .container_statuses
            .iter()
            .flatten()
            .filter_map(|status| status.state.as_ref()?.terminated.as_ref()?.message.as_deref())
            .find(|message| !message.is_empty())
    }

    fn operations_result<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let pod_name = self.metadata.name.clone().unwrap_or_default();
        let Some(message) = self.first_termination_message() else {
            return error::MissingTerminationMessageSnafu { pod_name }.fail();
        };
        tracing::debug!("Decoding termination message of pod {pod_name}: {message}");

        serde_json::from_str(message)
            .context(error::DecodeTerminationMessageSnafu { message: message.to_string() })
    }
}

/// Returns the first non-empty termination message of `pod`, or an empty
/// string when there is none.
#[must_use]
pub fn first_termination_message(pod: Option<&Pod>) -> String {
    pod.and_then(|pod| pod.first_termination_message()).map(ToString::to_string).unwrap_or_default()
}

/// Decodes the termination message of `pod` into `out`.
///
/// `out` is only written when decoding succeeds.
///
/// # Errors
///
/// Returns [`Error::NilPod`] if `pod` is `None`, otherwise the errors of
/// [`PodExt::operations_result`].
pub fn decode_operations_result<T>(pod: Option<&Pod>, out: &mut T) -> Result<(), Error>
where
    T: DeserializeOwned,
{
    let pod = pod.ok_or(Error::NilPod)?;
    *out = pod.operations_result()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        api::core::v1::{
            ContainerState, ContainerStateRunning, ContainerStateTerminated, ContainerStatus,
            PodStatus,
        },
        apimachinery::pkg::apis::meta::v1::ObjectMeta,
    };
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
    struct OperationsResult {
        success: bool,
        #[serde(default)]
        message: Option<String>,
    }

    fn terminated(name: &str, message: Option<&str>) -> ContainerStatus {
        ContainerStatus {
            name: name.to_string(),
            state: Some(ContainerState {
                terminated: Some(ContainerStateTerminated {
                    exit_code: 0,
                    message: message.map(ToString::to_string),
                    ..ContainerStateTerminated::default()
                }),
                ..ContainerState::default()
            }),
            ..ContainerStatus::default()
        }
    }

    fn running(name: &str) -> ContainerStatus {
        ContainerStatus {
            name: name.to_string(),
            state: Some(ContainerState {
                running: Some(ContainerStateRunning::default()),
                ..ContainerState::default()
            }),
            ..ContainerStatus::default()
        }
    }

    fn pod_with_statuses(statuses: Vec<ContainerStatus>) -> Pod {
        Pod {
            metadata: ObjectMeta { name: Some("sender".to_string()), ..ObjectMeta::default() },
            status: Some(PodStatus { container_statuses: Some(statuses), ..PodStatus::default() }),
            ..Pod::default()
        }
    }

    #[test]
    fn test_no_pod_has_no_message() {
        assert_eq!(first_termination_message(None), "");
    }

    #[test]
    fn test_pod_without_statuses_has_no_message() {
        assert_eq!(first_termination_message(Some(&Pod::default())), "");
        assert_eq!(first_termination_message(Some(&pod_with_statuses(Vec::new()))), "");
    }

    #[test]
    fn test_first_message_wins() {
        let pod = pod_with_statuses(vec![
            running("sidecar"),
            terminated("empty", Some("")),
            terminated("silent", None),
            terminated("first", Some("ok")),
            terminated("second", Some("later")),
        ]);
        assert_eq!(pod.first_termination_message(), Some("ok"));
        assert_eq!(first_termination_message(Some(&pod)), "ok");
    }

    #[test]
    fn test_only_running_containers() {
        let pod = pod_with_statuses(vec![running("a"), running("b")]);
        assert_eq!(pod.first_termination_message(), None);
    }

    #[test]
    fn test_decode_requires_pod() {
        let mut result = OperationsResult::default();
        let err = decode_operations_result(None, &mut result).unwrap_err();
        assert!(matches!(err, Error::NilPod));
    }

    #[test]
    fn test_decode_missing_message_names_pod() {
        let mut result = OperationsResult::default();
        let pod = pod_with_statuses(vec![running("a")]);
        let err = decode_operations_result(Some(&pod), &mut result).unwrap_err();
        assert!(
            matches!(err, Error::MissingTerminationMessage { ref pod_name } if pod_name == "sender")
        );
        assert!(err.to_string().contains("sender"));
    }

    #[test]
    fn test_decode_operations_result() {
        let expected = OperationsResult { success: true, message: Some("done".to_string()) };
        let encoded = serde_json::to_string(&expected).unwrap();
        let pod = pod_with_statuses(vec![terminated("main", Some(&encoded))]);

        let mut result = OperationsResult::default();
        decode_operations_result(Some(&pod), &mut result).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_decode_minimal_message() {
        let pod = pod_with_statuses(vec![terminated("main", Some(r#"{"success":true}"#))]);
        let result: OperationsResult = pod.operations_result().unwrap();
        assert_eq!(result, OperationsResult { success: true, message: None });
    }

    #[test]
    fn test_decode_invalid_message_keeps_raw_text() {
        let pod = pod_with_statuses(vec![terminated("main", Some("not-json"))]);
        let mut result = OperationsResult { success: true, message: Some("kept".to_string()) };

        let err = decode_operations_result(Some(&pod), &mut result).unwrap_err();
        assert!(
            matches!(err, Error::DecodeTerminationMessage { ref message, .. } if message == "not-json")
        );
        assert!(err.to_string().contains("not-json"));
        assert_eq!(result.message.as_deref(), Some("kept"));
    }
}
