use std::path::PathBuf;

/// A source control repository known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Work tree root.
    pub root: PathBuf,

    /// Checked-out branch, absent when HEAD is detached or unborn.
    pub current_branch: Option<String>,
}
