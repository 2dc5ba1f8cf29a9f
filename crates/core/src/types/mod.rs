//! Core type definitions for Sandbox Connect.
//!
//! Broken down into submodules: connection requests, per-connection
//! configuration, host shell messages, and source control state.

pub mod connection;
pub mod filters;
pub mod shell;
pub mod source;

pub use connection::*;
pub use filters::*;
pub use shell::*;
pub use source::*;
