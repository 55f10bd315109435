use std::path::{Path, PathBuf};

use clap::Args;
use podprobe::SecurityDefaults;
use serde_json::{Map, Value};
use snafu::ResultExt;
use tokio::io::AsyncWriteExt;

use crate::{
    cli::error::{self, Error},
    config::Config,
};

#[derive(Args, Clone)]
pub struct SecureValuesCommand {
    #[arg(help = "Helm-style values file (YAML or JSON) to harden.")]
    pub file: PathBuf,

    #[arg(short, long, help = "Write the result to this file instead of stdout.")]
    pub output: Option<PathBuf>,
}

impl SecureValuesCommand {
    pub async fn run(self, config: Config) -> Result<i32, Error> {
        let Self { file, output } = self;

        let data = tokio::fs::read(&file)
            .await
            .with_context(|_| error::ReadFileSnafu { path: file.clone() })?;
        let rendered = secure_values(&data, &file, &config.security_defaults)?;

        if let Some(path) = output {
            tokio::fs::write(&path, rendered.as_bytes())
                .await
                .with_context(|_| error::WriteFileSnafu { path: path.clone() })?;
            tracing::info!("Wrote hardened values to {}", path.display());
        } else {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(rendered.as_bytes()).await.context(error::WriteStdoutSnafu)?;
            stdout.flush().await.context(error::WriteStdoutSnafu)?;
        }
        Ok(0)
    }
}

/// Parses a values document, applies `defaults` and renders it back as YAML.
fn secure_values(data: &[u8], path: &Path, defaults: &SecurityDefaults) -> Result<String, Error> {
    let mut values: Map<String, Value> = if data.iter().all(u8::is_ascii_whitespace) {
        Map::new()
    } else {
        serde_yaml::from_slice(data)
            .with_context(|_| error::ParseValuesSnafu { path: path.to_path_buf() })?
    };
    defaults.apply_to_values(&mut values)?;
    serde_yaml::to_string(&values).context(error::SerializeYamlSnafu)
}
