#![deny(unused)]
//! Host adapters for Sandbox Connect.
//!
//! Concrete implementations of the core capability traits that let the
//! resolution flows run from a terminal:
//!
//! - [`GitSourceControl`]: branch names from local git work trees
//! - [`JsonConfigStore`]: per-connection settings in a JSON file
//! - [`CommandInvoker`]: connection attempts delegated to an external program
//! - [`TerminalShell`] / [`DialoguerPrompter`]: messages and masked prompts

pub mod command;
pub mod git;
pub mod session;
pub mod store;
pub mod terminal;
pub mod tracing_layer;

pub use command::CommandInvoker;
pub use git::GitSourceControl;
pub use session::ActiveConnection;
pub use store::JsonConfigStore;
pub use terminal::{DialoguerPrompter, TerminalShell};
pub use tracing_layer::configure_tracing;
