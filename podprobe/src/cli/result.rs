use std::time::Duration;

use clap::Args;
use snafu::ResultExt;
use tokio::io::AsyncWriteExt;

use crate::{
    cli::{
        error::{self, Error},
        internal::PodArgs,
    },
    config::Config,
};

#[derive(Args, Clone)]
pub struct ResultCommand {
    #[command(flatten)]
    pub pod: PodArgs,

    #[arg(
        short,
        long,
        help = "Wait up to this many seconds for a container of the pod to terminate with a \
                message. Ignored for manifest files."
    )]
    pub timeout: Option<u64>,
}

impl ResultCommand {
    /// Decodes the termination message of the pod as JSON and pretty prints
    /// it.
    pub async fn run(self, config: Config) -> Result<i32, Error> {
        let Self { pod, timeout } = self;
        let target = pod.target(&config).await?;
        tracing::info!("Reading operations result of pod {target}");

        let result = target.operations_result(timeout.map(Duration::from_secs)).await?;
        let rendered = serde_json::to_string_pretty(&result).context(error::SerializeJsonSnafu)?;

        let mut stdout = tokio::io::stdout();
        stdout.write_all(rendered.as_bytes()).await.context(error::WriteStdoutSnafu)?;
        stdout.write_u8(b'\n').await.context(error::WriteStdoutSnafu)?;
        stdout.flush().await.context(error::WriteStdoutSnafu)?;
        Ok(0)
    }
}
