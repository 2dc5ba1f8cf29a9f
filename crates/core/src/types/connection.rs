use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{Error, Result};

// =============================================================================
// Connection Types
// =============================================================================

/// SSH port used for every sandbox connection.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Keepalive interval sent with every connection request.
pub const KEEPALIVE_INTERVAL_MS: u64 = 35_000;

/// Prefix of the display name used for bootstrap connections.
pub const SANDBOX_CONNECTION_PREFIX: &str = "Sandbox-";

/// Parameters for a single connection attempt.
///
/// Built fresh for each attempt and dropped once the invoker returns.
/// Construction rejects empty host, username or password.
#[derive(Debug, Clone)]
pub struct ConnectionRequest {
    /// Remote host name or address.
    pub host: String,

    /// Display name of the connection.
    pub name: String,

    /// User profile to sign on with.
    pub username: String,

    /// Plain-text password, never logged.
    pub password: SecretString,

    /// SSH port.
    pub port: u16,

    /// Private key path. Always absent for sandbox connections.
    pub private_key: Option<PathBuf>,

    /// Keepalive interval in milliseconds.
    pub keepalive_interval_ms: u64,
}

impl ConnectionRequest {
    /// Create a request with the fixed port and keepalive settings.
    pub fn new(
        host: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self> {
        let host = host.into();
        let username = username.into();

        if host.is_empty() {
            return Err(Error::invalid_request("connection host is empty"));
        }
        if username.is_empty() {
            return Err(Error::invalid_request("connection username is empty"));
        }
        if password.expose_secret().is_empty() {
            return Err(Error::invalid_request(format!(
                "password for {}@{} is empty",
                username, host
            )));
        }

        Ok(Self {
            host,
            name: name.into(),
            username,
            password,
            port: DEFAULT_SSH_PORT,
            private_key: None,
            keepalive_interval_ms: KEEPALIVE_INTERVAL_MS,
        })
    }

    /// Request for a link-triggered connection, named after its host.
    pub fn direct(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self> {
        let host = host.into();
        Self::new(host.clone(), host, username, password)
    }

    /// Request for a bootstrap connection, named `Sandbox-<username>`.
    pub fn sandbox(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self> {
        let username = username.into();
        let name = format!("{}{}", SANDBOX_CONNECTION_PREFIX, username);
        Self::new(host, name, username, password)
    }

    /// JSON document handed to an external connection command.
    ///
    /// This is the only place the password leaves its secret wrapper.
    pub fn to_payload(&self) -> serde_json::Value {
        let payload = ConnectionPayload {
            host: &self.host,
            name: &self.name,
            username: &self.username,
            password: self.password.expose_secret(),
            port: self.port,
            private_key: self.private_key.as_ref(),
            keepalive_interval: self.keepalive_interval_ms,
        };
        serde_json::json!(payload)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionPayload<'a> {
    host: &'a str,
    name: &'a str,
    username: &'a str,
    password: &'a str,
    port: u16,
    private_key: Option<&'a PathBuf>,
    keepalive_interval: u64,
}
