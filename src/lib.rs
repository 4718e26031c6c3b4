//! gilbert - a command-line client for GitHub gists
//!
//! This library provides the gist API client, payload builders and
//! credential handling used by the `gilbert` binary.

pub mod cli;
pub mod core;
pub mod error;
pub mod github;

pub use error::{GilbertError, Result};
