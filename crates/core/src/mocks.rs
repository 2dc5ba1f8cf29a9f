//! Mock implementations of core traits for testing.
//!
//! Each mock records what it was asked to do so tests can assert on the
//! exact sequence of collaborator calls a flow produced.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Mutex;

use crate::{
    traits::{ConfigProvider, ConnectionInvoker, HostShell, Prompter, SourceControl},
    types::{ConnectionConfig, ConnectionRequest, MessageOptions, PasswordRequest, Repository},
    Error, Result,
};

// =============================================================================
// Mock Connection Invoker
// =============================================================================

/// A connection request as seen by the invoker, password exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub host: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub keepalive_interval_ms: u64,
}

impl From<&ConnectionRequest> for RecordedRequest {
    fn from(request: &ConnectionRequest) -> Self {
        Self {
            host: request.host.clone(),
            name: request.name.clone(),
            username: request.username.clone(),
            password: request.password.expose_secret().clone(),
            port: request.port,
            keepalive_interval_ms: request.keepalive_interval_ms,
        }
    }
}

/// Invoker returning a fixed result and recording every request.
pub struct MockInvoker {
    outcome: std::result::Result<bool, String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockInvoker {
    /// Invoker whose connections always succeed.
    pub fn succeeding() -> Self {
        Self::with_outcome(Ok(true))
    }

    /// Invoker whose connections are always refused.
    pub fn failing() -> Self {
        Self::with_outcome(Ok(false))
    }

    /// Invoker that errors on every call.
    pub fn erroring(message: &str) -> Self {
        Self::with_outcome(Err(message.to_string()))
    }

    fn with_outcome(outcome: std::result::Result<bool, String>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of invocations.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ConnectionInvoker for MockInvoker {
    async fn invoke(&self, request: &ConnectionRequest) -> Result<bool> {
        self.requests.lock().unwrap().push(request.into());
        self.outcome.clone().map_err(Error::connection)
    }
}

// =============================================================================
// Mock Config Provider
// =============================================================================

/// In-memory configuration provider.
#[derive(Default)]
pub struct MockConfigProvider {
    config: Mutex<Option<ConnectionConfig>>,
    updates: Mutex<Vec<ConnectionConfig>>,
}

impl MockConfigProvider {
    /// Provider with no active connection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Provider whose active connection has `config`.
    pub fn with_config(config: ConnectionConfig) -> Self {
        Self {
            config: Mutex::new(Some(config)),
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Current stored configuration.
    pub fn config(&self) -> Option<ConnectionConfig> {
        self.config.lock().unwrap().clone()
    }

    /// Every configuration passed to `update`.
    pub fn updates(&self) -> Vec<ConnectionConfig> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigProvider for MockConfigProvider {
    async fn current_config(&self) -> Result<Option<ConnectionConfig>> {
        Ok(self.config())
    }

    async fn update(&self, config: &ConnectionConfig) -> Result<()> {
        self.updates.lock().unwrap().push(config.clone());
        *self.config.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}

// =============================================================================
// Recording Shell
// =============================================================================

/// A request made to the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    FocusView(String),
    RefreshLibraryList,
    RefreshObjectBrowser,
    Info {
        message: String,
        options: MessageOptions,
    },
    Error {
        message: String,
        options: MessageOptions,
    },
}

/// Shell that records every request in order.
#[derive(Default)]
pub struct RecordingShell {
    events: Mutex<Vec<ShellEvent>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded requests, oldest first.
    pub fn events(&self) -> Vec<ShellEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Messages of recorded error requests.
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ShellEvent::Error { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ShellEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl HostShell for RecordingShell {
    async fn focus_view(&self, view_id: &str) -> Result<()> {
        self.record(ShellEvent::FocusView(view_id.to_string()));
        Ok(())
    }

    async fn refresh_library_list(&self) -> Result<()> {
        self.record(ShellEvent::RefreshLibraryList);
        Ok(())
    }

    async fn refresh_object_browser(&self) -> Result<()> {
        self.record(ShellEvent::RefreshObjectBrowser);
        Ok(())
    }

    async fn show_info(&self, message: &str, options: MessageOptions) -> Result<()> {
        self.record(ShellEvent::Info {
            message: message.to_string(),
            options,
        });
        Ok(())
    }

    async fn show_error(&self, message: &str, options: MessageOptions) -> Result<()> {
        self.record(ShellEvent::Error {
            message: message.to_string(),
            options,
        });
        Ok(())
    }
}

// =============================================================================
// Scripted Prompter
// =============================================================================

/// Prompter answering every request with the same value.
pub struct ScriptedPrompter {
    answer: Option<String>,
    requests: Mutex<Vec<PasswordRequest>>,
}

impl ScriptedPrompter {
    /// Prompter that answers with `password`.
    pub fn answering(password: &str) -> Self {
        Self {
            answer: Some(password.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Prompter whose prompts are always cancelled.
    pub fn cancelled() -> Self {
        Self {
            answer: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far.
    pub fn requests(&self) -> Vec<PasswordRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn prompt_password(&self, request: &PasswordRequest) -> Result<Option<SecretString>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .answer
            .clone()
            .filter(|answer| !answer.is_empty())
            .map(SecretString::new))
    }
}

// =============================================================================
// Static Source Control
// =============================================================================

/// Source control returning fixed repositories.
pub struct StaticSourceControl {
    repositories: std::result::Result<Vec<Repository>, String>,
    lookups: Mutex<usize>,
}

impl StaticSourceControl {
    /// No repositories registered.
    pub fn none() -> Self {
        Self::with_repositories(Vec::new())
    }

    /// A single repository with `branch` checked out.
    pub fn on_branch(branch: &str) -> Self {
        Self::with_repositories(vec![Repository {
            root: ".".into(),
            current_branch: Some(branch.to_string()),
        }])
    }

    pub fn with_repositories(repositories: Vec<Repository>) -> Self {
        Self {
            repositories: Ok(repositories),
            lookups: Mutex::new(0),
        }
    }

    /// Source control whose lookups always fail.
    pub fn unavailable(message: &str) -> Self {
        Self {
            repositories: Err(message.to_string()),
            lookups: Mutex::new(0),
        }
    }

    /// Number of repository lookups made.
    pub fn lookup_count(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl SourceControl for StaticSourceControl {
    async fn repositories(&self) -> Result<Vec<Repository>> {
        *self.lookups.lock().unwrap() += 1;
        self.repositories.clone().map_err(Error::source_control)
    }
}
