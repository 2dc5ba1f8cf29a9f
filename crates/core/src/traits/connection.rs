//! Connection traits.

use async_trait::async_trait;
use crate::error::Result;
use crate::types::ConnectionRequest;

/// Performs the transport and authentication handshake for a request.
#[async_trait]
pub trait ConnectionInvoker: Send + Sync {
    /// Attempt the connection. `Ok(false)` means the host refused it.
    async fn invoke(&self, request: &ConnectionRequest) -> Result<bool>;
}
