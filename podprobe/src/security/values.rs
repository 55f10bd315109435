use podprobe_base::consts::k8s::keys;
use serde_json::{Map, Value};

use crate::{error, error::Error, security::SecurityDefaults};

/// Merges the restricted [`SecurityDefaults`] into a values mapping.
///
/// # Errors
///
/// See [`SecurityDefaults::apply_to_values`].
pub fn apply_default_pod_security_context(cfg: &mut Map<String, Value>) -> Result<(), Error> {
    SecurityDefaults::default().apply_to_values(cfg)
}

impl SecurityDefaults {
    /// Writes these defaults into the `podSecurityContext` and
    /// `containerSecurityContext` blocks of a Helm-style values mapping.
    ///
    /// Missing blocks are created. A block set to `null`, as an empty YAML
    /// key yields, counts as missing instead of being rejected. Existing
    /// blocks keep their other keys, but `runAsNonRoot`, `seccompProfile`,
    /// `allowPrivilegeEscalation` and `capabilities` are always replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfigShape`] if either block is present but
    /// not a mapping. `cfg` is not modified in that case.
    pub fn apply_to_values(&self, cfg: &mut Map<String, Value>) -> Result<(), Error> {
        check_mapping(cfg, keys::POD_SECURITY_CONTEXT)?;
        check_mapping(cfg, keys::CONTAINER_SECURITY_CONTEXT)?;

        let pod = mapping_entry(cfg, keys::POD_SECURITY_CONTEXT)?;
        set(pod, keys::RUN_AS_NON_ROOT, Value::Bool(self.run_as_non_root));
        let mut seccomp_profile = Map::new();
        set(
            &mut seccomp_profile,
            keys::SECCOMP_PROFILE_TYPE,
            Value::String(self.seccomp_profile_type.clone()),
        );
        set(pod, keys::SECCOMP_PROFILE, Value::Object(seccomp_profile));

        let container = mapping_entry(cfg, keys::CONTAINER_SECURITY_CONTEXT)?;
        set(container, keys::ALLOW_PRIVILEGE_ESCALATION, Value::Bool(self.allow_privilege_escalation));
        let mut capabilities = Map::new();
        if !self.drop_capabilities.is_empty() {
            set(&mut capabilities, keys::CAPABILITIES_DROP, string_list(&self.drop_capabilities));
        }
        if !self.add_capabilities.is_empty() {
            // Filled from the drop list, see "Open questions" in DESIGN.md.
            set(&mut capabilities, keys::CAPABILITIES_ADD, string_list(&self.drop_capabilities));
        }
        set(container, keys::CAPABILITIES, Value::Object(capabilities));

        tracing::debug!("Applied security defaults to values");
        Ok(())
    }
}

fn check_mapping(cfg: &Map<String, Value>, key: &str) -> Result<(), Error> {
    match cfg.get(key) {
        None | Some(Value::Null | Value::Object(_)) => Ok(()),
        Some(other) => error::InvalidConfigShapeSnafu { key, found: value_kind(other) }.fail(),
    }
}

fn mapping_entry<'a>(
    cfg: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, Error> {
    let value = cfg.entry(key).or_insert(Value::Null);
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => error::InvalidConfigShapeSnafu { key, found: value_kind(other) }.fail(),
    }
}

fn set(map: &mut Map<String, Value>, key: &str, value: Value) {
    *map.entry(key).or_insert(Value::Null) = value;
}

fn string_list(names: &[String]) -> Value {
    Value::Array(names.iter().cloned().map(Value::String).collect())
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
