//! Extensions to Kubernetes API types.
//!
//! [`PodExt`] reads results that test containers leave behind in their
//! termination messages, [`ApiPodExt`] does the same against a live cluster.

mod api_pod;
mod pod;

pub use self::{
    api_pod::{ApiPodExt, has_termination_message},
    pod::{PodExt, decode_operations_result, first_termination_message},
};
