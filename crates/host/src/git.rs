//! Branch lookup through the `git` command line.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use sandbox_connect_core::{Error, Repository, Result, SourceControl};

/// Source control backed by local git work trees.
pub struct GitSourceControl {
    roots: Vec<PathBuf>,
}

impl GitSourceControl {
    /// Inspect the given work tree roots, in order.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// `Ok(None)` when `root` is not a git work tree.
    async fn inspect(root: &Path) -> Result<Option<Repository>> {
        let inside = Command::new("git")
            .arg("-C")
            .arg(root)
            .args(["rev-parse", "--is-inside-work-tree"])
            .output()
            .await
            .map_err(|e| Error::source_control(format!("Failed to run git: {}", e)))?;

        if !inside.status.success() || String::from_utf8_lossy(&inside.stdout).trim() != "true" {
            return Ok(None);
        }

        // Prints the branch even before the first commit; fails quietly on a detached HEAD.
        let head = Command::new("git")
            .arg("-C")
            .arg(root)
            .args(["symbolic-ref", "--short", "-q", "HEAD"])
            .output()
            .await
            .map_err(|e| Error::source_control(format!("Failed to run git: {}", e)))?;

        let branch = if head.status.success() {
            let name = String::from_utf8_lossy(&head.stdout).trim().to_string();
            (!name.is_empty()).then_some(name)
        } else {
            None
        };

        Ok(Some(Repository {
            root: root.to_path_buf(),
            current_branch: branch,
        }))
    }
}

#[async_trait]
impl SourceControl for GitSourceControl {
    async fn repositories(&self) -> Result<Vec<Repository>> {
        let mut repositories = Vec::new();
        for root in &self.roots {
            match Self::inspect(root).await? {
                Some(repo) => repositories.push(repo),
                None => tracing::debug!(root = %root.display(), "Not a git work tree"),
            }
        }
        Ok(repositories)
    }
}
