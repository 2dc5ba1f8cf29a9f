//! Connection configuration traits.

use async_trait::async_trait;
use crate::error::Result;
use crate::types::ConnectionConfig;

/// Access to the settings of the active connection.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Settings of the active connection, if one is active.
    async fn current_config(&self) -> Result<Option<ConnectionConfig>>;

    /// Persist updated settings for the connection they name.
    async fn update(&self, config: &ConnectionConfig) -> Result<()>;
}
