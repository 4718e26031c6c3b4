//! CLI module for gilbert
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod auth;
pub mod commands;
pub mod config;
pub mod gist;

pub use commands::{Cli, Commands};
