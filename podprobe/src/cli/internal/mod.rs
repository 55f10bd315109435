//! Internal utilities shared by the CLI commands.
//!
//! [`ResourceResolver`] picks the namespace a command works in and
//! [`pod_target::PodTarget`] hides whether a pod comes from the cluster or from a
//! manifest file on disk.

mod pod_target;
mod resource;

pub use self::{
    pod_target::PodArgs,
    resource::ResourceResolver,
};
