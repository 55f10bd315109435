use podprobe_base::consts::DEFAULT_NAMESPACE;

use crate::config::Config;

/// Resolves the namespace a command operates in.
///
/// Precedence: the command line, then the configuration file, then the
/// namespace of the current kubeconfig context when a client is at hand,
/// then `default`.
pub struct ResourceResolver<'k, 'c> {
    kube_client: Option<&'k kube::Client>,
    config: &'c Config,
}

impl<'k, 'c> From<(Option<&'k kube::Client>, &'c Config)> for ResourceResolver<'k, 'c> {
    fn from((kube_client, config): (Option<&'k kube::Client>, &'c Config)) -> Self {
        Self { kube_client, config }
    }
}

impl ResourceResolver<'_, '_> {
    pub fn resolve_namespace(&self, namespace: Option<String>) -> String {
        let Self { kube_client, config } = self;
        namespace
            .filter(|s| !s.is_empty())
            .or_else(|| config.default_namespace.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| {
                kube_client.map_or_else(
                    || DEFAULT_NAMESPACE.to_string(),
                    |client| client.default_namespace().to_string(),
                )
            })
    }
}
