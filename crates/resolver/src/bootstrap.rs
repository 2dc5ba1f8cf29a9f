//! Startup auto-connection to the sandbox.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sandbox_connect_core::{
    ConfigProvider, ConnectionInvoker, ConnectionRequest, HostShell, MessageOptions,
    SourceControl, HELP_VIEW,
};

use crate::configurator::{ConfigureOutcome, SandboxConfigurator};
use crate::env::SandboxEnv;
use crate::identity::resolve_identity;
use crate::log_shell_error;

/// Result of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// This resolver already ran.
    AlreadyRan,
    /// Server, username or password could not be resolved.
    Skipped,
    /// Connected; carries what the configurator did, if it ran.
    Connected(Option<ConfigureOutcome>),
    /// The sandbox refused or failed the connection.
    Unavailable,
}

/// Resolves sandbox credentials at startup and connects once.
pub struct BootstrapResolver {
    env: SandboxEnv,
    source_control: Arc<dyn SourceControl>,
    invoker: Arc<dyn ConnectionInvoker>,
    shell: Arc<dyn HostShell>,
    configurator: SandboxConfigurator,
    started: AtomicBool,
}

impl BootstrapResolver {
    pub fn new(
        env: SandboxEnv,
        source_control: Arc<dyn SourceControl>,
        invoker: Arc<dyn ConnectionInvoker>,
        config: Arc<dyn ConfigProvider>,
        shell: Arc<dyn HostShell>,
    ) -> Self {
        Self {
            env,
            source_control,
            invoker,
            configurator: SandboxConfigurator::new(config, shell.clone()),
            shell,
            started: AtomicBool::new(false),
        }
    }

    /// Run the bootstrap flow. Only the first call does anything.
    pub async fn run(&self) -> BootstrapOutcome {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Bootstrap already ran");
            return BootstrapOutcome::AlreadyRan;
        }

        let sandbox_mode = self.env.sandbox_mode;
        let branch = if sandbox_mode {
            self.current_branch().await
        } else {
            None
        };

        let Some(identity) = resolve_identity(self.env.clone().into_inputs(branch)) else {
            tracing::debug!("Sandbox credentials incomplete, skipping auto-connect");
            return BootstrapOutcome::Skipped;
        };

        let username = identity.username.clone();
        let request =
            match ConnectionRequest::sandbox(identity.host, identity.username, identity.password) {
                Ok(request) => request,
                Err(e) => {
                    tracing::error!(error = %e, "Could not build sandbox connection request");
                    return BootstrapOutcome::Skipped;
                }
            };

        if sandbox_mode {
            tracing::info!("Sandbox mode enabled");
            log_shell_error(
                "show_info",
                self.shell
                    .show_info(
                        "Thanks for trying the IBM i Sandbox!",
                        MessageOptions::modal(
                            "You are using this system at your own risk. Do not share any sensitive or private information.",
                        ),
                    )
                    .await,
            );
        }

        tracing::info!(server = %request.host, user = %username, connection = %request.name, "Connecting to sandbox");
        let connected = match self.invoker.invoke(&request).await {
            Ok(connected) => connected,
            Err(e) => {
                tracing::warn!(server = %request.host, error = %e, "Connection invoker failed");
                false
            }
        };
        drop(request);

        if !connected {
            tracing::warn!(user = %username, "Sandbox unavailable");
            log_shell_error(
                "show_info",
                self.shell
                    .show_info(
                        "Oh no! The sandbox is down.",
                        MessageOptions::modal(
                            "Sorry, but the sandbox is offline right now. Try again another time.",
                        ),
                    )
                    .await,
            );
            return BootstrapOutcome::Unavailable;
        }

        let configured = match self.configurator.configure(&username).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(user = %username, error = %e, "Sandbox configuration failed");
                None
            }
        };

        log_shell_error("focus_view", self.shell.focus_view(HELP_VIEW).await);
        BootstrapOutcome::Connected(configured)
    }

    async fn current_branch(&self) -> Option<String> {
        match self.source_control.first_branch().await {
            Ok(branch) => {
                tracing::debug!(branch = ?branch, "Current branch");
                branch
            }
            Err(e) => {
                tracing::debug!(error = %e, "Branch lookup failed, using environment only");
                None
            }
        }
    }
}
