mod error;

use std::path::{Path, PathBuf};

use podprobe::SecurityDefaults;
use podprobe_cli::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::error::Error;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace used when the command line does not name one.
    #[serde(default)]
    pub default_namespace: Option<String>,

    #[serde(default)]
    pub security_defaults: SecurityDefaults,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Returns the first existing configuration file, if any.
    pub fn search_config_file_path() -> Option<PathBuf> {
        Self::default_path()
            .into_iter()
            .chain(podprobe_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(podprobe_base::CLI_CONFIG_NAME);
                    path
                },
            ))
            .find(|path| path.try_exists().unwrap_or(false))
    }

    #[inline]
    pub fn default_path() -> Option<PathBuf> {
        podprobe_base::PROJECT_CONFIG_DIR
            .as_ref()
            .map(|dir| dir.join(podprobe_base::CLI_CONFIG_NAME))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path =
                path.as_ref().try_resolve().map(|path| path.to_path_buf()).with_context(|_| {
                    error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() }
                })?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }

    /// The default configuration rendered as YAML.
    pub fn template_basic() -> Result<String, Error> {
        serde_yaml::to_string(&Self::default()).context(error::RenderConfigSnafu)
    }
}
