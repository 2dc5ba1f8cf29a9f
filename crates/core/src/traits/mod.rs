//! Capability traits for Sandbox Connect.
//!
//! Every collaborator the resolution flows talk to is reached through one of
//! these traits:
//! - `connection`: ConnectionInvoker
//! - `config`: ConfigProvider
//! - `shell`: HostShell, Prompter
//! - `source`: SourceControl

pub mod config;
pub mod connection;
pub mod shell;
pub mod source;

pub use config::*;
pub use connection::*;
pub use shell::*;
pub use source::*;
