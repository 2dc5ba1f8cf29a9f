//! Process environment inputs for the bootstrap flow.

use secrecy::SecretString;

use crate::identity::CredentialInputs;

/// Host of the sandbox to connect to at startup.
pub const SERVER_VAR: &str = "SANDBOX_SERVER";
/// User profile for the startup connection.
pub const USER_VAR: &str = "SANDBOX_USER";
/// Password for the startup connection.
pub const PASS_VAR: &str = "SANDBOX_PASS";
/// Enables branch inference and the sandbox disclaimer.
pub const SANDBOX_MODE_VAR: &str = "VSCODE_IBMI_SANDBOX";

/// Snapshot of the `SANDBOX_*` variables.
#[derive(Debug, Clone, Default)]
pub struct SandboxEnv {
    pub server: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub sandbox_mode: bool,
}

impl SandboxEnv {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through an arbitrary lookup function.
    ///
    /// Empty values are treated as unset; sandbox mode is on for any
    /// non-empty flag value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            server: get(SERVER_VAR),
            username: get(USER_VAR),
            password: get(PASS_VAR).map(SecretString::new),
            sandbox_mode: get(SANDBOX_MODE_VAR).is_some(),
        }
    }

    /// Combine with the branch name into resolver inputs.
    pub fn into_inputs(self, branch: Option<String>) -> CredentialInputs {
        CredentialInputs {
            server: self.server,
            username: self.username,
            password: self.password,
            sandbox_mode: self.sandbox_mode,
            branch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> SandboxEnv {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SandboxEnv::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_reads_all_variables() {
        let env = env_of(&[
            ("SANDBOX_SERVER", "host1"),
            ("SANDBOX_USER", "bob"),
            ("SANDBOX_PASS", "secret"),
        ]);

        assert_eq!(env.server.as_deref(), Some("host1"));
        assert_eq!(env.username.as_deref(), Some("bob"));
        assert_eq!(env.password.unwrap().expose_secret(), "secret");
        assert!(!env.sandbox_mode);
    }

    #[test]
    fn test_any_flag_value_enables_sandbox_mode() {
        assert!(env_of(&[("VSCODE_IBMI_SANDBOX", "1")]).sandbox_mode);
        assert!(env_of(&[("VSCODE_IBMI_SANDBOX", "false")]).sandbox_mode);
        assert!(!env_of(&[("VSCODE_IBMI_SANDBOX", "")]).sandbox_mode);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let env = env_of(&[("SANDBOX_SERVER", ""), ("SANDBOX_PASS", "")]);
        assert!(env.server.is_none());
        assert!(env.password.is_none());
    }
}
