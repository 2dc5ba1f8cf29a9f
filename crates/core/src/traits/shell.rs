//! Host shell traits.

use async_trait::async_trait;
use secrecy::SecretString;
use crate::error::Result;
use crate::types::{MessageOptions, PasswordRequest};

/// Fire-and-forget requests to the host shell.
#[async_trait]
pub trait HostShell: Send + Sync {
    /// Bring a view into focus.
    async fn focus_view(&self, view_id: &str) -> Result<()>;

    /// Reload the library list view.
    async fn refresh_library_list(&self) -> Result<()>;

    /// Reload the object browser.
    async fn refresh_object_browser(&self) -> Result<()>;

    /// Show an informational message.
    async fn show_info(&self, message: &str, options: MessageOptions) -> Result<()>;

    /// Show an error message.
    async fn show_error(&self, message: &str, options: MessageOptions) -> Result<()>;
}

/// Interactive input from the user.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask for a password with masked input.
    ///
    /// Returns `None` when the user cancels or enters nothing.
    async fn prompt_password(&self, request: &PasswordRequest) -> Result<Option<SecretString>>;
}
