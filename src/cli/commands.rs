//! CLI command definitions using clap
//!
//! Defines the command structure for the `gilbert` CLI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// gilbert - GitHub gist client
///
/// Create, read, update and delete gists from the command line.
#[derive(Parser, Debug)]
#[command(name = "gilbert", version, about, long_about = None)]
pub struct Cli {
    /// Gists endpoint, overriding the configured one
    #[arg(long, global = true, env = "GILBERT_API_URL")]
    pub api_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a gist from a file, or from stdin with --name
    Create(CreateArgs),

    /// Show a gist, or save its files
    Get(GetArgs),

    /// Replace files of an existing gist
    Update(UpdateArgs),

    /// Delete a gist
    Delete(DeleteArgs),

    /// Manage the stored GitHub token
    Auth(AuthArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Gist Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Arguments for `create`
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// File to upload
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    pub file: Option<PathBuf>,

    /// Read content from stdin and store it under this file name
    #[arg(long, short)]
    pub name: Option<String>,

    /// Gist description
    #[arg(long, short, default_value = "")]
    pub description: String,

    /// Log in with username and password instead of the stored token
    #[arg(long, conflicts_with = "name")]
    pub basic: bool,
}

/// Arguments for `get`
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Gist id
    pub id: String,

    /// Write the files into this directory instead of printing them
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Arguments for `update`
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Gist id
    pub id: String,

    /// Files to upload; each replaces the gist file with the same name
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// New gist description
    #[arg(long, short)]
    pub description: Option<String>,
}

/// Arguments for `delete`
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Gist id
    pub id: String,

    /// Delete without confirmation
    #[arg(long, short)]
    pub force: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication commands
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store a Personal Access Token in the system keyring
    Login,
    /// Remove the stored token
    Logout,
    /// Show current authentication status
    Status,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Reset a configuration value to its default
    Remove {
        /// Configuration key
        key: ConfigKey,
    },
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// Gists endpoint URL
    #[value(name = "api-url")]
    ApiUrl,

    /// Request timeout in seconds
    #[value(name = "timeout")]
    Timeout,

    /// How unexpected HTTP statuses are handled (strict or legacy)
    #[value(name = "status-policy")]
    StatusPolicy,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_from_file() {
        let cli = Cli::parse_from(["gilbert", "create", "notes.txt", "-d", "my notes", "--basic"]);
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
                assert_eq!(args.description, "my notes");
                assert!(args.basic);
                assert!(args.name.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_create_needs_file_or_name() {
        assert!(Cli::try_parse_from(["gilbert", "create"]).is_err());
        assert!(Cli::try_parse_from(["gilbert", "create", "a.txt", "--name", "b.txt"]).is_err());
        assert!(Cli::try_parse_from(["gilbert", "create", "--name", "b.txt"]).is_ok());
    }

    #[test]
    fn test_update_requires_files() {
        assert!(Cli::try_parse_from(["gilbert", "update", "abc"]).is_err());
        let cli = Cli::try_parse_from(["gilbert", "update", "abc", "a.txt", "b.txt"]).unwrap();
        match cli.command {
            Commands::Update(args) => assert_eq!(args.files.len(), 2),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
