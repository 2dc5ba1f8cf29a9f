#![deny(unused)]
//! Connection resolution for Sandbox Connect.
//!
//! Two independent entry flows end in a single connection attempt:
//!
//! ```text
//! ┌──────────────────────┐     ┌──────────────────────────────┐
//! │ LinkHandler          │     │ BootstrapResolver            │
//! │  /connect?server&user│     │  SANDBOX_* env + git branch  │
//! └──────────┬───────────┘     └──────────────┬───────────────┘
//!            │                                │
//!            ▼                                ▼
//!       ┌─────────────────────────────────────────┐
//!       │ ConnectionInvoker (host collaborator)   │
//!       └─────────────────────────────────────────┘
//!                                             │ on success
//!                                             ▼
//!                              ┌──────────────────────────────┐
//!                              │ SandboxConfigurator          │
//!                              │  library list + filters, once│
//!                              └──────────────────────────────┘
//! ```
//!
//! Precedence and inference rules live in [`identity`] as pure functions;
//! the flows only gather inputs and talk to collaborators.

pub mod bootstrap;
pub mod configurator;
pub mod env;
pub mod identity;
pub mod link;

pub use bootstrap::{BootstrapOutcome, BootstrapResolver};
pub use configurator::{merge_sandbox_library, ConfigureOutcome, SandboxConfigurator, SandboxMerge};
pub use env::SandboxEnv;
pub use identity::{resolve_identity, BranchIdentity, CredentialInputs, ResolvedIdentity};
pub use link::{decode_password, ConnectLink, LinkHandler, LinkOutcome};

/// Log a failed fire-and-forget shell request; flows carry on regardless.
pub(crate) fn log_shell_error(action: &str, result: sandbox_connect_core::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(action, error = %e, "Host shell request failed");
    }
}
