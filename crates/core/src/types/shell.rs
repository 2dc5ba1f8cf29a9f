// =============================================================================
// Host Shell Types
// =============================================================================

/// View showing connections and help; focused after a successful connection.
pub const HELP_VIEW: &str = "helpView";

/// Presentation options for a shell message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOptions {
    /// Whether the message blocks until acknowledged.
    pub modal: bool,

    /// Secondary text shown under the message.
    pub detail: Option<String>,
}

impl MessageOptions {
    /// Modal message with detail text.
    pub fn modal(detail: impl Into<String>) -> Self {
        Self {
            modal: true,
            detail: Some(detail.into()),
        }
    }
}

/// Request for a masked password prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRequest {
    /// Prompt title.
    pub title: String,

    /// Prompt text, naming the user and server.
    pub prompt: String,
}

impl PasswordRequest {
    /// Prompt for the password of `user` on `server`.
    pub fn for_server(user: &str, server: &str) -> Self {
        Self {
            title: "Password for server".to_string(),
            prompt: format!("Enter password for {}@{}", user, server),
        }
    }
}
