//! Credential precedence and branch-name inference.
//!
//! Everything here is pure: inputs in, resolved identity out.

use secrecy::{ExposeSecret, SecretString};

// =============================================================================
// Branch-Derived Identity
// =============================================================================

/// Host and user inferred from a branch named `host/user` or `user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchIdentity {
    /// `host/user`: both candidates, user upper-cased.
    HostAndUser { host: String, username: String },
    /// `user`: username candidate only, upper-cased.
    UserOnly { username: String },
    /// Any other shape; contributes nothing.
    Unrecognized,
}

impl BranchIdentity {
    /// Parse a branch name.
    pub fn parse(branch: &str) -> Self {
        let parts: Vec<&str> = branch.split('/').collect();
        match parts.as_slice() {
            [host, user] => Self::HostAndUser {
                host: host.to_string(),
                username: user.to_uppercase(),
            },
            [user] => Self::UserOnly {
                username: user.to_uppercase(),
            },
            _ => Self::Unrecognized,
        }
    }

    /// Apply this identity over existing server and username candidates.
    ///
    /// `HostAndUser` replaces both. `UserOnly` fills the username only when
    /// none is known yet.
    pub fn overlay(
        self,
        server: Option<String>,
        username: Option<String>,
    ) -> (Option<String>, Option<String>) {
        match self {
            Self::HostAndUser { host, username } => (non_empty(host), non_empty(username)),
            Self::UserOnly { username: derived } => {
                (server, username.or_else(|| non_empty(derived)))
            }
            Self::Unrecognized => (server, username),
        }
    }
}

// =============================================================================
// Credential Resolution
// =============================================================================

/// Every input that can contribute to a bootstrap identity.
#[derive(Debug, Clone, Default)]
pub struct CredentialInputs {
    pub server: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Enables branch inference and the shared-password default.
    pub sandbox_mode: bool,
    /// Branch checked out in the first repository.
    pub branch: Option<String>,
}

/// A complete identity, ready to become a connection request.
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub host: String,
    pub username: String,
    pub password: SecretString,
}

/// Resolve host, username and password from layered inputs.
///
/// Environment values come first; in sandbox mode the branch name then
/// overrides them, and a missing password defaults to the upper-cased
/// username. Returns `None` unless all three end up non-empty.
pub fn resolve_identity(inputs: CredentialInputs) -> Option<ResolvedIdentity> {
    let CredentialInputs {
        server,
        username,
        password,
        sandbox_mode,
        branch,
    } = inputs;

    let mut server = server.and_then(non_empty);
    let mut username = username.and_then(non_empty);
    let mut password = password.filter(|p| !p.expose_secret().is_empty());

    if sandbox_mode {
        if let Some(branch) = branch.as_deref().filter(|b| !b.is_empty()) {
            (server, username) = BranchIdentity::parse(branch).overlay(server, username);
        }

        if password.is_none() {
            password = username
                .as_ref()
                .map(|user| SecretString::new(user.to_uppercase()));
        }
    }

    Some(ResolvedIdentity {
        host: server?,
        username: username?,
        password: password?,
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
