//! Helpers for Kubernetes end-to-end tests.
//!
//! Test workloads report their outcome through container termination
//! messages. This crate reads and decodes those messages, builds references
//! to the pods involved, and hardens the security settings of the workloads
//! a test deploys.

pub mod error;
pub mod ext;
pub mod reference;
pub mod security;

pub use self::{
    error::Error,
    ext::{ApiPodExt, PodExt, decode_operations_result, first_termination_message},
    reference::{object_reference, owner_reference, pod_reference},
    security::{PodSpecExt, SecurityDefaults, apply_default_pod_security_context},
};
