use k8s_openapi::api::core::v1::PodSpec;

use crate::security::SecurityDefaults;

pub trait PodSpecExt {
    /// Fills in missing security settings of the pod and of all its
    /// containers and init containers. Values already present are kept.
    fn apply_security_defaults(&mut self, defaults: &SecurityDefaults);
}

impl PodSpecExt for PodSpec {
    fn apply_security_defaults(&mut self, defaults: &SecurityDefaults) {
        let pod = self.security_context.get_or_insert_with(|| defaults.pod_security_context());
        pod.run_as_non_root = pod.run_as_non_root.or(Some(defaults.run_as_non_root));
        if pod.seccomp_profile.is_none() {
            pod.seccomp_profile = Some(defaults.seccomp_profile());
        }

        for container in self.containers.iter_mut().chain(self.init_containers.iter_mut().flatten())
        {
            let security = container
                .security_context
                .get_or_insert_with(|| defaults.container_security_context());
            security.allow_privilege_escalation =
                security.allow_privilege_escalation.or(Some(defaults.allow_privilege_escalation));
            if security.capabilities.is_none() {
                security.capabilities = Some(defaults.capabilities());
            }
            tracing::debug!("Applied security defaults to container {}", container.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{
        Capabilities, Container, PodSecurityContext, SeccompProfile, SecurityContext,
    };

    use super::*;

    fn container(name: &str) -> Container {
        Container { name: name.to_string(), ..Container::default() }
    }

    #[test]
    fn test_defaults_on_bare_pod_spec() {
        let mut spec = PodSpec {
            containers: vec![container("main")],
            init_containers: Some(vec![container("setup")]),
            ..PodSpec::default()
        };
        spec.apply_security_defaults(&SecurityDefaults::default());

        let pod = spec.security_context.unwrap();
        assert_eq!(pod.run_as_non_root, Some(true));
        assert_eq!(pod.seccomp_profile.unwrap().type_, "RuntimeDefault");

        for container in spec.containers.iter().chain(spec.init_containers.iter().flatten()) {
            let security = container.security_context.as_ref().unwrap();
            assert_eq!(security.allow_privilege_escalation, Some(false));
            assert_eq!(
                security.capabilities.as_ref().and_then(|c| c.drop.clone()),
                Some(vec!["ALL".to_string()])
            );
        }
    }

    #[test]
    fn test_missing_blocks_match_typed_defaults() {
        let defaults = SecurityDefaults {
            add_capabilities: vec!["NET_BIND_SERVICE".to_string()],
            ..SecurityDefaults::default()
        };
        let mut spec = PodSpec { containers: vec![container("main")], ..PodSpec::default() };
        spec.apply_security_defaults(&defaults);

        assert_eq!(spec.security_context, Some(defaults.pod_security_context()));
        assert_eq!(
            spec.containers[0].security_context,
            Some(defaults.container_security_context())
        );
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let mut spec = PodSpec {
            security_context: Some(PodSecurityContext {
                run_as_non_root: Some(false),
                seccomp_profile: Some(SeccompProfile {
                    type_: "Localhost".to_string(),
                    localhost_profile: Some("profiles/e2e.json".to_string()),
                }),
                ..PodSecurityContext::default()
            }),
            containers: vec![Container {
                security_context: Some(SecurityContext {
                    allow_privilege_escalation: Some(true),
                    capabilities: Some(Capabilities {
                        add: Some(vec!["NET_ADMIN".to_string()]),
                        drop: None,
                    }),
                    ..SecurityContext::default()
                }),
                ..container("main")
            }],
            ..PodSpec::default()
        };
        spec.apply_security_defaults(&SecurityDefaults::default());

        let pod = spec.security_context.unwrap();
        assert_eq!(pod.run_as_non_root, Some(false));
        assert_eq!(pod.seccomp_profile.unwrap().type_, "Localhost");

        let security = spec.containers[0].security_context.clone().unwrap();
        assert_eq!(security.allow_privilege_escalation, Some(true));
        assert_eq!(security.capabilities.unwrap().add, Some(vec!["NET_ADMIN".to_string()]));
    }
}
