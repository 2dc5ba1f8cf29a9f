#![deny(unused)]
//! Core types, traits, and error definitions for Sandbox Connect.
//!
//! This crate holds the pieces shared by the resolution flows and the host
//! adapters: the connection and configuration data model, the capability
//! traits through which every external collaborator is reached, and mock
//! implementations of those traits for tests.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
