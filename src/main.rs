#![deny(unused)]
//! Sandbox Connect - sandbox auto-connection and connect-link handling.
//!
//! Resolves connection credentials from connect links, `SANDBOX_*`
//! environment variables and the current git branch, connects through an
//! external connect program, and sets up the sandbox user's library list.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use sandbox_connect_core::config::AppConfig;
use sandbox_connect_host::{
    configure_tracing, ActiveConnection, CommandInvoker, DialoguerPrompter, GitSourceControl,
    JsonConfigStore, TerminalShell,
};
use sandbox_connect_resolver::{BootstrapResolver, LinkHandler, SandboxEnv};

#[derive(Parser, Debug)]
#[command(name = "sandbox-connect", version, about)]
struct Cli {
    /// Settings file (defaults to config/sandbox-connect.* when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to the sandbox described by SANDBOX_* variables and the git branch
    Startup,
    /// Handle a connect link, e.g. vscode://ext/connect?server=HOST&user=USER
    Open {
        /// The link to handle
        uri: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    configure_tracing(&config.logging)?;

    tracing::debug!("Starting sandbox-connect v{}", env!("CARGO_PKG_VERSION"));

    // =========================================================================
    // Host adapters
    // =========================================================================
    let active = ActiveConnection::new();
    let invoker = Arc::new(CommandInvoker::new(
        config.connection.command.clone(),
        config.connection.args.clone(),
        active.clone(),
    ));
    let shell = Arc::new(TerminalShell::stderr());

    // =========================================================================
    // Entry flows
    // =========================================================================
    match cli.command {
        Command::Startup => {
            let store = Arc::new(JsonConfigStore::new(
                config.workspace.settings_path.clone(),
                active,
            ));
            let git = Arc::new(GitSourceControl::new(config.workspace.repositories.clone()));

            let resolver = BootstrapResolver::new(SandboxEnv::from_env(), git, invoker, store, shell);
            let outcome = resolver.run().await;
            tracing::info!(outcome = ?outcome, "Startup finished");
        }
        Command::Open { uri } => {
            let handler = LinkHandler::new(invoker, Arc::new(DialoguerPrompter), shell);
            let outcome = handler.handle_uri(&uri).await;
            tracing::info!(outcome = ?outcome, "Link handled");
        }
    }

    Ok(())
}
