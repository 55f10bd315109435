use clap::Args;
use snafu::ResultExt;
use tokio::io::AsyncWriteExt;

use crate::{
    cli::{
        error::{self, Error},
        internal::ResourceResolver,
    },
    config::Config,
};

#[derive(Args, Clone)]
pub struct ReferenceCommand {
    #[arg(help = "Name of the pod to reference.")]
    pub pod_name: String,

    #[arg(
        short,
        long,
        help = "Kubernetes namespace of the pod. Defaults to the configured namespace or \
                `default`."
    )]
    pub namespace: Option<String>,

    #[arg(long, help = "UID of the existing pod. When given, an owner reference is printed.")]
    pub uid: Option<String>,
}

impl ReferenceCommand {
    pub async fn run(self, config: Config) -> Result<i32, Error> {
        let Self { pod_name, namespace, uid } = self;
        let namespace = ResourceResolver::from((None, &config)).resolve_namespace(namespace);

        let mut reference = podprobe::pod_reference(&namespace, &pod_name)?;
        let rendered = if let Some(uid) = uid {
            reference.uid = Some(uid);
            serde_yaml::to_string(&podprobe::owner_reference(&reference)?)
        } else {
            serde_yaml::to_string(&reference)
        }
        .context(error::SerializeYamlSnafu)?;

        let mut stdout = tokio::io::stdout();
        stdout.write_all(rendered.as_bytes()).await.context(error::WriteStdoutSnafu)?;
        stdout.flush().await.context(error::WriteStdoutSnafu)?;
        Ok(0)
    }
}
