//! Restricted security settings for pods started by end-to-end tests.
//!
//! The same [`SecurityDefaults`] can be merged into a Helm-style values
//! mapping ([`apply_default_pod_security_context`]) or into a typed
//! [`PodSpec`](k8s_openapi::api::core::v1::PodSpec) through [`PodSpecExt`].

mod pod_spec;
mod values;

use k8s_openapi::api::core::v1::{
    Capabilities, PodSecurityContext, SeccompProfile, SecurityContext,
};
use podprobe_base::consts::k8s::security;
use serde::{Deserialize, Serialize};

pub use self::{pod_spec::PodSpecExt, values::apply_default_pod_security_context};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDefaults {
    #[serde(default = "SecurityDefaults::default_run_as_non_root")]
    pub run_as_non_root: bool,

    #[serde(default = "SecurityDefaults::default_seccomp_profile_type")]
    pub seccomp_profile_type: String,

    #[serde(default = "SecurityDefaults::default_allow_privilege_escalation")]
    pub allow_privilege_escalation: bool,

    #[serde(default = "SecurityDefaults::default_drop_capabilities")]
    pub drop_capabilities: Vec<String>,

    #[serde(default = "SecurityDefaults::default_add_capabilities")]
    pub add_capabilities: Vec<String>,
}

impl Default for SecurityDefaults {
    fn default() -> Self {
        Self {
            run_as_non_root: Self::default_run_as_non_root(),
            seccomp_profile_type: Self::default_seccomp_profile_type(),
            allow_privilege_escalation: Self::default_allow_privilege_escalation(),
            drop_capabilities: Self::default_drop_capabilities(),
            add_capabilities: Self::default_add_capabilities(),
        }
    }
}

impl SecurityDefaults {
    #[inline]
    #[must_use]
    pub const fn default_run_as_non_root() -> bool { security::DEFAULT_RUN_AS_NON_ROOT }

    #[inline]
    #[must_use]
    pub fn default_seccomp_profile_type() -> String {
        security::DEFAULT_SECCOMP_PROFILE_TYPE.to_string()
    }

    #[inline]
    #[must_use]
    pub const fn default_allow_privilege_escalation() -> bool {
        security::DEFAULT_ALLOW_PRIVILEGE_ESCALATION
    }

    #[inline]
    #[must_use]
    pub fn default_drop_capabilities() -> Vec<String> {
        security::DEFAULT_DROP_CAPABILITIES.iter().map(ToString::to_string).collect()
    }

    #[inline]
    #[must_use]
    pub fn default_add_capabilities() -> Vec<String> {
        security::DEFAULT_ADD_CAPABILITIES.iter().map(ToString::to_string).collect()
    }

    /// Pod level security context carrying these defaults.
    #[must_use]
    pub fn pod_security_context(&self) -> PodSecurityContext {
        PodSecurityContext {
            run_as_non_root: Some(self.run_as_non_root),
            seccomp_profile: Some(self.seccomp_profile()),
            ..PodSecurityContext::default()
        }
    }

    /// Container level security context carrying these defaults.
    #[must_use]
    pub fn container_security_context(&self) -> SecurityContext {
        SecurityContext {
            allow_privilege_escalation: Some(self.allow_privilege_escalation),
            capabilities: Some(self.capabilities()),
            ..SecurityContext::default()
        }
    }

    #[must_use]
    pub fn seccomp_profile(&self) -> SeccompProfile {
        SeccompProfile { type_: self.seccomp_profile_type.clone(), localhost_profile: None }
    }

    /// Empty lists are left out.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        let non_empty = |names: &Vec<String>| (!names.is_empty()).then(|| names.clone());
        Capabilities {
            add: non_empty(&self.add_capabilities),
            drop: non_empty(&self.drop_capabilities),
        }
    }
}
