//! Terminal rendition of the host shell.

use async_trait::async_trait;
use secrecy::SecretString;
use std::io::Write;
use std::sync::Mutex;

use sandbox_connect_core::{Error, HostShell, MessageOptions, PasswordRequest, Prompter, Result};

// =============================================================================
// Terminal Shell
// =============================================================================

/// Shell that prints messages to a terminal stream.
///
/// There are no views in a terminal, so focus and refresh requests are only
/// logged.
pub struct TerminalShell {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalShell {
    /// Shell writing to stderr.
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_message(&self, prefix: &str, message: &str, options: &MessageOptions) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::shell("terminal writer poisoned"))?;

        writeln!(out, "{}{}", prefix, message)?;
        if let Some(detail) = &options.detail {
            writeln!(out, "  {}", detail)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl HostShell for TerminalShell {
    async fn focus_view(&self, view_id: &str) -> Result<()> {
        tracing::info!(view = view_id, "Focus view");
        Ok(())
    }

    async fn refresh_library_list(&self) -> Result<()> {
        tracing::info!("Library list refreshed");
        Ok(())
    }

    async fn refresh_object_browser(&self) -> Result<()> {
        tracing::info!("Object browser refreshed");
        Ok(())
    }

    async fn show_info(&self, message: &str, options: MessageOptions) -> Result<()> {
        self.write_message("", message, &options)
    }

    async fn show_error(&self, message: &str, options: MessageOptions) -> Result<()> {
        self.write_message("error: ", message, &options)
    }
}

// =============================================================================
// Password Prompt
// =============================================================================

/// Masked password prompt on the controlling terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn prompt_password(&self, request: &PasswordRequest) -> Result<Option<SecretString>> {
        tracing::debug!(title = %request.title, "Prompting for password");

        let prompt = request.prompt.clone();
        let answer = tokio::task::spawn_blocking(move || {
            dialoguer::Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
        })
        .await
        .map_err(|e| Error::prompt(format!("Prompt task failed: {}", e)))?
        .map_err(|e| Error::prompt(e.to_string()))?;

        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(SecretString::new(answer)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[tokio::test]
    async fn test_modal_message_includes_detail() {
        let buffer = SharedBuffer::default();
        let shell = TerminalShell::with_writer(Box::new(buffer.clone()));

        shell
            .show_info(
                "Oh no! The sandbox is down.",
                MessageOptions::modal("Try again another time."),
            )
            .await
            .unwrap();

        assert_eq!(
            buffer.text(),
            "Oh no! The sandbox is down.\n  Try again another time.\n"
        );
    }

    #[tokio::test]
    async fn test_error_prefix() {
        let buffer = SharedBuffer::default();
        let shell = TerminalShell::with_writer(Box::new(buffer.clone()));

        shell
            .show_error(
                "Connection to host1 ended as no password was provided.",
                MessageOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(
            buffer.text(),
            "error: Connection to host1 ended as no password was provided.\n"
        );
    }
}
