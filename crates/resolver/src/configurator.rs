//! One-time library and filter setup for a sandbox user.

use std::sync::Arc;

use sandbox_connect_core::{ConfigProvider, ConnectionConfig, HostShell, ObjectFilter, Result};

use crate::log_shell_error;

// =============================================================================
// Guarded Merge
// =============================================================================

/// Result of merging the sandbox library into a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxMerge {
    /// The library is already listed; nothing to change.
    AlreadyConfigured,
    /// A new snapshot with the library and its two filters appended.
    Updated(ConnectionConfig),
}

/// Append `library` to the library list along with a source filter and an
/// all-objects filter for it, unless the library is already listed.
///
/// The input snapshot is never modified.
pub fn merge_sandbox_library(config: &ConnectionConfig, library: &str) -> SandboxMerge {
    if config.has_library(library) {
        return SandboxMerge::AlreadyConfigured;
    }

    let mut updated = config.clone();
    updated.library_list.push(library.to_string());
    updated.object_filters.extend([
        ObjectFilter::sandbox_sources(library),
        ObjectFilter::sandbox_objects(library),
    ]);

    SandboxMerge::Updated(updated)
}

// =============================================================================
// Sandbox Configurator
// =============================================================================

/// What the configurator did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// No active connection configuration was available.
    NoConfiguration,
    /// The user's library was already configured.
    AlreadyConfigured,
    /// The configuration was updated and the views refreshed.
    Updated,
}

/// Applies [`merge_sandbox_library`] to the active connection's settings.
pub struct SandboxConfigurator {
    provider: Arc<dyn ConfigProvider>,
    shell: Arc<dyn HostShell>,
}

impl SandboxConfigurator {
    pub fn new(provider: Arc<dyn ConfigProvider>, shell: Arc<dyn HostShell>) -> Self {
        Self { provider, shell }
    }

    /// Read the active settings, merge `username`'s library, persist, and
    /// refresh the library list and object browser.
    pub async fn configure(&self, username: &str) -> Result<ConfigureOutcome> {
        let Some(config) = self.provider.current_config().await? else {
            tracing::debug!("No active connection configuration");
            return Ok(ConfigureOutcome::NoConfiguration);
        };

        let updated = match merge_sandbox_library(&config, username) {
            SandboxMerge::AlreadyConfigured => {
                tracing::debug!(user = %username, "Sandbox library already configured");
                return Ok(ConfigureOutcome::AlreadyConfigured);
            }
            SandboxMerge::Updated(updated) => updated,
        };

        self.provider.update(&updated).await?;
        tracing::info!(
            user = %username,
            connection = %updated.name,
            filters = updated.object_filters.len(),
            "Added sandbox library and filters"
        );

        log_shell_error("refresh_library_list", self.shell.refresh_library_list().await);
        log_shell_error("refresh_object_browser", self.shell.refresh_object_browser().await);

        Ok(ConfigureOutcome::Updated)
    }
}
