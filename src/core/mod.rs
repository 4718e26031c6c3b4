//! Core functionality for gilbert
//!
//! This module contains shared business logic including:
//! - Application configuration
//! - Token storage
//! - Interactive credential prompting
//! - Per-request credential resolution

pub mod config;
pub mod credentials;
pub mod prompt;
pub mod resolver;

pub use config::{Config, StatusPolicy};
pub use credentials::CredentialStore;
pub use prompt::{Prompter, TerminalPrompter};
pub use resolver::{Credential, CredentialResolver};
