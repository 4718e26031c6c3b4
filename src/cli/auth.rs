//! Authentication CLI command handlers

use std::process::Command;

use secrecy::ExposeSecret;

use crate::cli::commands::AuthCommand;
use crate::core::credentials::{CredentialStore, TokenSource};
use crate::core::prompt::read_hidden;
use crate::error::{GilbertError, Result};

/// Page where a token with the `gist` scope can be created
const TOKEN_URL: &str = "https://github.com/settings/tokens/new?scopes=gist&description=gilbert";

/// Handle authentication commands
pub fn handle_auth(command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login => handle_login(),
        AuthCommand::Logout => handle_logout(),
        AuthCommand::Status => handle_status(),
    }
}

/// Store a Personal Access Token in the keyring
fn handle_login() -> Result<()> {
    if let Some((_, source)) = CredentialStore::find_github_token()? {
        println!("✓ Already authenticated with GitHub ({}).", source);
        println!();
        match source {
            TokenSource::Keyring => println!("  To re-authenticate, first run: gilbert auth logout"),
            TokenSource::Environment => println!("  Unset GITHUB_TOKEN to use a stored token instead."),
        }
        return Ok(());
    }

    println!("Personal Access Token Authentication");
    println!("====================================");
    println!();
    println!("To create a token:");
    println!("  1. Go to: https://github.com/settings/tokens/new");
    println!("  2. Give it a name (e.g., 'gilbert')");
    println!("  3. Select the 'gist' scope");
    println!("  4. Click 'Generate token' and copy it");
    println!();

    if open_browser(TOKEN_URL) {
        println!("✓ Browser opened to token creation page.");
        println!();
    }

    let token = read_hidden("Paste your token here: ")?;
    let token = token.expose_secret().trim();

    if token.is_empty() {
        return Err(GilbertError::InvalidInput("No token provided".to_string()));
    }

    CredentialStore::store_github_token(token)?;

    println!();
    println!("✓ Token stored in the system keyring.");
    Ok(())
}

/// Try to open a URL in the default browser
fn open_browser(url: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn().is_ok()
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn().is_ok()
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .is_ok()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = url;
        false
    }
}

/// Handle the logout command
fn handle_logout() -> Result<()> {
    match CredentialStore::find_github_token()? {
        None => println!("Not currently authenticated."),
        Some((_, TokenSource::Environment)) => {
            CredentialStore::delete_github_token()?;
            println!("Stored token removed; GITHUB_TOKEN is still set in your environment.");
        }
        Some((_, TokenSource::Keyring)) => {
            CredentialStore::delete_github_token()?;
            println!("Successfully logged out.");
        }
    }
    Ok(())
}

/// Handle the status command
fn handle_status() -> Result<()> {
    println!("Authentication Status:");

    match CredentialStore::find_github_token()? {
        Some((token, source)) => {
            println!("  GitHub: Authenticated");
            println!("  Token: {}", CredentialStore::mask_token(&token));
            println!("  Source: {}", source);
        }
        None => {
            println!("  GitHub: Not authenticated");
            println!();
            println!("  Creating a gist will ask for your username and password.");
        }
    }

    Ok(())
}
