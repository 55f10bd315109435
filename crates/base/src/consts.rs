pub mod k8s {
    pub mod keys {
        //! Top-level keys of a Helm-style values mapping that carry security
        //! settings.

        pub const POD_SECURITY_CONTEXT: &str = "podSecurityContext";
        pub const CONTAINER_SECURITY_CONTEXT: &str = "containerSecurityContext";

        pub const RUN_AS_NON_ROOT: &str = "runAsNonRoot";
        pub const SECCOMP_PROFILE: &str = "seccompProfile";
        pub const SECCOMP_PROFILE_TYPE: &str = "type";
        pub const ALLOW_PRIVILEGE_ESCALATION: &str = "allowPrivilegeEscalation";
        pub const CAPABILITIES: &str = "capabilities";
        pub const CAPABILITIES_DROP: &str = "drop";
        pub const CAPABILITIES_ADD: &str = "add";
    }

    pub mod security {
        //! Restricted pod security standard defaults.

        pub const DEFAULT_RUN_AS_NON_ROOT: bool = true;
        pub const DEFAULT_SECCOMP_PROFILE_TYPE: &str = "RuntimeDefault";
        pub const DEFAULT_ALLOW_PRIVILEGE_ESCALATION: bool = false;
        pub const DEFAULT_DROP_CAPABILITIES: &[&str] = &["ALL"];
        pub const DEFAULT_ADD_CAPABILITIES: &[&str] = &[];
    }
}

pub const DEFAULT_NAMESPACE: &str = "default";
