//! Command line access to the podprobe helpers.
//!
//! # Examples
//!
//! ```bash
//! # Print the termination message of a pod in the current namespace
//! podprobe termination-message sender
//!
//! # Wait up to two minutes for the pod to finish and print its result
//! podprobe result sender -n e2e --timeout 120
//!
//! # Decode the result from a saved manifest
//! podprobe result -f sender.yaml
//!
//! # Print an object reference to a pod
//! podprobe reference sender -n e2e
//!
//! # Harden a Helm values file
//! podprobe secure-values values.yaml -o values.secure.yaml
//! ```

pub mod error;
mod internal;
mod reference;
mod result;
mod secure_values;
mod termination_message;

use std::{io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use podprobe_base::CLI_PROGRAM_NAME;
use snafu::ResultExt;
use tokio::runtime::Runtime;

pub use self::error::Error;
use self::{
    reference::ReferenceCommand, result::ResultCommand, secure_values::SecureValuesCommand,
    termination_message::TerminationMessageCommand,
};
use crate::config::Config;

#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    about = "Podprobe: inspect and harden pods in Kubernetes end-to-end tests.",
    long_about = "Podprobe reads the results that test workloads leave in their container \
                  termination messages, builds references to the pods involved, and applies \
                  restricted security defaults to Helm-style values files."
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[clap(
        long = "config",
        short = 'c',
        env = "PODPROBE_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/podprobe/config.yaml or \
                PODPROBE_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    #[clap(
        long = "log-level",
        env = "PODPROBE_LOG_LEVEL",
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Display client and server version information")]
    Version {
        #[clap(long = "client", help = "If true, shows client version only (no server required).")]
        client: bool,
    },

    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions { shell: clap_complete::Shell },

    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    #[command(
        aliases = ["tm", "message"],
        about = "Print the first termination message left by a container of a pod"
    )]
    TerminationMessage(TerminationMessageCommand),

    #[command(alias = "r", about = "Decode the termination message of a pod as JSON")]
    Result(ResultCommand),

    #[command(alias = "ref", about = "Print an object reference to a pod")]
    Reference(ReferenceCommand),

    #[command(
        alias = "sv",
        about = "Apply restricted security context defaults to a Helm-style values file"
    )]
    SecureValues(SecureValuesCommand),
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    /// Loads the configuration file given on the command line, or the first
    /// one found in the default locations. Without any file the defaults
    /// apply.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = match self.config_file.clone().or_else(Config::search_config_file_path) {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }

        Ok(config)
    }

    pub fn run(self) -> Result<i32, Error> {
        let client_version = Self::command().get_version().unwrap_or_default().to_string();
        match self.commands {
            Some(Commands::Version { client }) if client => {
                std::io::stdout()
                    .write_all(format!("Client Version: {client_version}\n").as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            Some(Commands::Completions { shell }) => {
                let mut app = Self::command();
                let bin_name = app.get_name().to_string();
                clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
                return Ok(0);
            }
            Some(Commands::DefaultConfig) => {
                std::io::stdout()
                    .write_all(Config::template_basic()?.as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();

        Runtime::new()
            .context(error::InitializeTokioRuntimeSnafu)?
            .block_on(self.dispatch(config, client_version))
    }

    async fn dispatch(self, config: Config, client_version: String) -> Result<i32, Error> {
        match self.commands {
            Some(Commands::Version { .. }) => {
                let kube_client =
                    kube::Client::try_default().await.context(error::KubeConfigSnafu)?;
                let server_version = kube_client.apiserver_version().await.map_or_else(
                    |_| "unknown".to_string(),
                    |info| format!("{}.{}", info.major, info.minor),
                );
                std::io::stdout()
                    .write_all(
                        format!("Client Version: {client_version}\nServer Version: {server_version}\n")
                            .as_bytes(),
                    )
                    .context(error::WriteStdoutSnafu)?;
                Ok(0)
            }
            Some(Commands::TerminationMessage(cmd)) => cmd.run(config).await,
            Some(Commands::Result(cmd)) => cmd.run(config).await,
            Some(Commands::Reference(cmd)) => cmd.run(config).await,
            Some(Commands::SecureValues(cmd)) => cmd.run(config).await,
            _ => {
                let help = Self::command().render_long_help().ansi().to_string();
                std::io::stderr().write_all(help.as_bytes()).context(error::WriteStdoutSnafu)?;
                Ok(-1)
            }
        }
    }
}
