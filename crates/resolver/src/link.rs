//! Link-triggered connections.
//!
//! Handles `/connect?server=<host>&user=<user>[&pass=<base64>]` links. Any
//! other action is ignored so that newer links do not break older clients.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use sandbox_connect_core::{
    ConnectionInvoker, ConnectionRequest, Error, HostShell, MessageOptions, PasswordRequest,
    Prompter, Result, HELP_VIEW,
};

use crate::log_shell_error;

/// Path of the connect action.
pub const CONNECT_PATH: &str = "/connect";

/// Standard alphabet, padding optional, trailing bits tolerated.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

// =============================================================================
// Link Parsing
// =============================================================================

/// Fields of a connect link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectLink {
    pub server: String,
    pub user: String,
    /// Base64-encoded password, if the link carries one.
    pub pass: Option<String>,
}

impl ConnectLink {
    /// Parse a form-encoded query string.
    ///
    /// Returns `None` unless both `server` and `user` are present and
    /// non-empty. The first occurrence of a repeated field wins.
    pub fn from_query(query: &str) -> Option<Self> {
        let mut server = None;
        let mut user = None;
        let mut pass = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "server" => &mut server,
                "user" => &mut user,
                "pass" => &mut pass,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Some(Self {
            server: server.filter(|s| !s.is_empty())?,
            user: user.filter(|u| !u.is_empty())?,
            pass: pass.filter(|p| !p.is_empty()),
        })
    }
}

/// Decode a base64 password from a link.
///
/// Accepts the URL-safe alphabet and missing padding, and restores `+`
/// characters that query decoding turned into spaces. Invalid UTF-8 is
/// replaced rather than rejected.
///
/// Other characters outside the base64 alphabet are not skipped: the
/// link is rejected with a password decode error instead.
pub fn decode_password(encoded: &str) -> Result<SecretString> {
    let normalized: String = encoded
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' => Some('+'),
            '_' => Some('/'),
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect();

    let bytes = LENIENT_BASE64
        .decode(normalized)
        .map_err(|e| Error::password_decode(e.to_string()))?;

    Ok(SecretString::new(String::from_utf8_lossy(&bytes).into_owned()))
}

// =============================================================================
// Link Handler
// =============================================================================

/// Result of handling one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Unknown action or missing fields; nothing happened.
    Ignored,
    /// No password supplied or entered; no attempt made.
    PasswordMissing,
    /// The supplied password was not valid base64; no attempt made.
    PasswordUndecodable,
    /// Connected and focused the help view.
    Connected,
    /// The connection attempt failed.
    ConnectionFailed,
}

/// Turns connect links into connection attempts.
pub struct LinkHandler {
    invoker: Arc<dyn ConnectionInvoker>,
    prompter: Arc<dyn Prompter>,
    shell: Arc<dyn HostShell>,
}

impl LinkHandler {
    pub fn new(
        invoker: Arc<dyn ConnectionInvoker>,
        prompter: Arc<dyn Prompter>,
        shell: Arc<dyn HostShell>,
    ) -> Self {
        Self {
            invoker,
            prompter,
            shell,
        }
    }

    /// Handle a full link such as `vscode://ext.id/connect?server=..&user=..`.
    pub async fn handle_uri(&self, uri: &str) -> LinkOutcome {
        match url::Url::parse(uri) {
            Ok(parsed) => self.handle(parsed.path(), parsed.query().unwrap_or("")).await,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparseable link");
                LinkOutcome::Ignored
            }
        }
    }

    /// Handle a link given its path and raw query.
    pub async fn handle(&self, path: &str, query: &str) -> LinkOutcome {
        tracing::debug!(path, "Handling link");

        if path != CONNECT_PATH {
            tracing::debug!(path, "Ignoring link with unknown action");
            return LinkOutcome::Ignored;
        }

        let Some(link) = ConnectLink::from_query(query) else {
            tracing::debug!("Ignoring connect link without server and user");
            return LinkOutcome::Ignored;
        };

        self.connect(link).await
    }

    async fn connect(&self, link: ConnectLink) -> LinkOutcome {
        let ConnectLink { server, user, pass } = link;

        let password = match pass {
            Some(encoded) => match decode_password(&encoded) {
                Ok(password) => Some(password),
                Err(e) => {
                    tracing::warn!(server = %server, user = %user, error = %e, "Link password rejected");
                    log_shell_error(
                        "show_error",
                        self.shell
                            .show_error(
                                &format!(
                                    "Connection to {} ended as the supplied password could not be decoded.",
                                    server
                                ),
                                MessageOptions::default(),
                            )
                            .await,
                    );
                    return LinkOutcome::PasswordUndecodable;
                }
            },
            None => self.prompt(&server, &user).await,
        };

        let Some(password) = password.filter(|p| !p.expose_secret().is_empty()) else {
            tracing::info!(server = %server, user = %user, "No password provided, connection abandoned");
            log_shell_error(
                "show_error",
                self.shell
                    .show_error(
                        &format!("Connection to {} ended as no password was provided.", server),
                        MessageOptions::default(),
                    )
                    .await,
            );
            return LinkOutcome::PasswordMissing;
        };

        let connected = match ConnectionRequest::direct(server.as_str(), user.as_str(), password) {
            Ok(request) => {
                tracing::info!(server = %server, user = %user, "Connecting from link");
                match self.invoker.invoke(&request).await {
                    Ok(connected) => connected,
                    Err(e) => {
                        tracing::warn!(server = %server, user = %user, error = %e, "Connection invoker failed");
                        false
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not build connection request");
                false
            }
        };

        if connected {
            log_shell_error("focus_view", self.shell.focus_view(HELP_VIEW).await);
            LinkOutcome::Connected
        } else {
            log_shell_error(
                "show_error",
                self.shell
                    .show_error(
                        "Failed to connect",
                        MessageOptions::modal(format!(
                            "Failed to connect to {} as {}.",
                            server, user
                        )),
                    )
                    .await,
            );
            LinkOutcome::ConnectionFailed
        }
    }

    async fn prompt(&self, server: &str, user: &str) -> Option<SecretString> {
        match self
            .prompter
            .prompt_password(&PasswordRequest::for_server(user, server))
            .await
        {
            Ok(password) => password,
            Err(e) => {
                tracing::warn!(error = %e, "Password prompt failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_requires_server_and_user() {
        assert!(ConnectLink::from_query("server=host1").is_none());
        assert!(ConnectLink::from_query("user=bob").is_none());
        assert!(ConnectLink::from_query("server=&user=bob").is_none());
        assert!(ConnectLink::from_query("").is_none());
    }

    #[test]
    fn test_query_parses_fields() {
        let link = ConnectLink::from_query("server=host1&user=bob&pass=c2VjcmV0").unwrap();
        assert_eq!(link.server, "host1");
        assert_eq!(link.user, "bob");
        assert_eq!(link.pass.as_deref(), Some("c2VjcmV0"));
    }

    #[test]
    fn test_query_first_value_wins() {
        let link = ConnectLink::from_query("server=a&server=b&user=bob").unwrap();
        assert_eq!(link.server, "a");
    }

    #[test]
    fn test_query_empty_pass_means_prompt() {
        let link = ConnectLink::from_query("server=host1&user=bob&pass=").unwrap();
        assert!(link.pass.is_none());
    }

    #[test]
    fn test_decode_password() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("s3cr3t!");
        assert_eq!(decode_password(&encoded).unwrap().expose_secret(), "s3cr3t!");
    }

    #[test]
    fn test_decode_password_without_padding() {
        assert_eq!(decode_password("c2VjcmV0MQ").unwrap().expose_secret(), "secret1");
    }

    #[test]
    fn test_decode_password_restores_plus_from_query() {
        // "~~~" encodes to "fn5+"
        let link = ConnectLink::from_query("server=h&user=u&pass=fn5+").unwrap();
        assert_eq!(link.pass.as_deref(), Some("fn5 "));
        assert_eq!(decode_password(link.pass.as_deref().unwrap()).unwrap().expose_secret(), "~~~");
    }

    #[test]
    fn test_decode_password_url_safe_alphabet() {
        assert_eq!(decode_password("fn5-").unwrap().expose_secret(), "~~~");
    }

    #[test]
    fn test_decode_password_rejects_garbage() {
        assert!(decode_password("not*base64").is_err());
    }
}
