//! Source control traits.

use async_trait::async_trait;
use crate::error::Result;
use crate::types::Repository;

/// Read-only view of the repositories open in the host.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Registered repositories, in registration order.
    async fn repositories(&self) -> Result<Vec<Repository>>;

    /// Branch checked out in the first repository, if any.
    async fn first_branch(&self) -> Result<Option<String>> {
        Ok(self
            .repositories()
            .await?
            .into_iter()
            .next()
            .and_then(|repo| repo.current_branch))
    }
}
