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
pub struct TerminationMessageCommand {
    #[command(flatten)]
    pub pod: PodArgs,
}

impl TerminationMessageCommand {
    /// Prints the first termination message of the pod. Exits with `1` when
    /// no container left one.
    pub async fn run(self, config: Config) -> Result<i32, Error> {
        let target = self.pod.target(&config).await?;
        let pod = target.get().await?;

        let message = podprobe::first_termination_message(Some(&pod));
        if message.is_empty() {
            tracing::warn!("Pod {target} has no termination message");
            return Ok(1);
        }

        let mut stdout = tokio::io::stdout();
        stdout.write_all(message.as_bytes()).await.context(error::WriteStdoutSnafu)?;
        stdout.write_u8(b'\n').await.context(error::WriteStdoutSnafu)?;
        stdout.flush().await.context(error::WriteStdoutSnafu)?;
        Ok(0)
    }
}
