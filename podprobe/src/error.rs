use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Pod was not provided"))]
    NilPod,

    #[snafu(display("Did not find termination message for pod {pod_name:?}"))]
    MissingTerminationMessage { pod_name: String },

    #[snafu(display("Failed to decode termination message {message:?}, error: {source}"))]
    DecodeTerminationMessage { message: String, source: serde_json::Error },

    #[snafu(display("Failed to resolve API version and kind of object {name:?}"))]
    ResolveKind { name: String },

    #[snafu(display("Object reference has no {field}"))]
    MissingReferenceField { field: &'static str },

    #[snafu(display("Expected {key:?} to be a mapping, found {found}"))]
    InvalidConfigShape { key: String, found: &'static str },

    #[snafu(display("Failed to get pod {pod_name} in namespace {namespace}, error: {source}"))]
    GetPod {
        namespace: String,
        pod_name: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display(
        "Timed out waiting for a termination message from pod {pod_name} in namespace \
         {namespace}"
    ))]
    WaitForTerminationMessage { namespace: String, pod_name: String },

    #[snafu(display(
        "Failed to watch pod {pod_name} in namespace {namespace}, error: {source}"
    ))]
    AwaitPodCondition {
        namespace: String,
        pod_name: String,
        #[snafu(source(from(kube::runtime::wait::Error, Box::new)))]
        source: Box<kube::runtime::wait::Error>,
    },

    #[snafu(display("Pod {pod_name} in namespace {namespace} disappeared while waiting"))]
    PodNotFound { namespace: String, pod_name: String },
}
