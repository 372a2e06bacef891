//! CLI for the DGW redirect gateway.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dgw_core::config;
use std::path::PathBuf;

use commands::{run_resolve, run_serve, run_types, ServeOverrides};

/// Top-level CLI for the DGW dialog archive gateway.
#[derive(Debug, Parser)]
#[command(name = "dgw")]
#[command(about = "DGW: redirect gateway for dialog template archives", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/dgw/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the state-dir log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP gateway.
    Serve {
        /// Port to listen on (overrides config and PORT).
        #[arg(long)]
        port: Option<u16>,
        /// Address to bind (overrides config).
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Resolve one dialog type, probing the upstream, and print its URL.
    Resolve {
        /// Dialog type identifier, e.g. simpleDialog.
        dialog_type: String,
    },

    /// List allowed dialog types and their upstream URLs (no probing).
    Types,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = config::load_effective(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Serve { port, bind } => run_serve(cfg, ServeOverrides { port, bind }).await?,
            CliCommand::Resolve { dialog_type } => run_resolve(&cfg, &dialog_type).await?,
            CliCommand::Types => run_types(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
