//! Connection attempts delegated to an external program.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use sandbox_connect_core::{ConnectionInvoker, ConnectionRequest, Error, Result};

use crate::session::ActiveConnection;

/// Invoker that runs a connect program per attempt.
///
/// The request is written to the program's stdin as a single JSON document
/// and exit status 0 means connected. On success the connection becomes the
/// active one.
pub struct CommandInvoker {
    program: String,
    args: Vec<String>,
    active: ActiveConnection,
}

impl CommandInvoker {
    pub fn new(program: impl Into<String>, args: Vec<String>, active: ActiveConnection) -> Self {
        Self {
            program: program.into(),
            args,
            active,
        }
    }
}

#[async_trait]
impl ConnectionInvoker for CommandInvoker {
    async fn invoke(&self, request: &ConnectionRequest) -> Result<bool> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::connection(format!("Failed to start {}: {}", self.program, e)))?;

        let payload = serde_json::to_vec(&request.to_payload())?;
        if let Some(mut stdin) = child.stdin.take() {
            let written = match stdin.write_all(&payload).await {
                Ok(()) => stdin.shutdown().await,
                Err(e) => Err(e),
            };
            // A program may decide without reading its input.
            if let Err(e) = written {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let status = child.wait().await?;
        tracing::debug!(program = %self.program, status = %status, connection = %request.name, "Connect program finished");

        if status.success() {
            self.active.set(request.name.clone());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
