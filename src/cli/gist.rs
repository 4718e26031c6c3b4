//! Gist CLI command handlers

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use secrecy::SecretString;

use crate::cli::commands::{CreateArgs, DeleteArgs, GetArgs, UpdateArgs};
use crate::core::config::{parse_endpoint, Config};
use crate::core::credentials::CredentialStore;
use crate::core::prompt::TerminalPrompter;
use crate::core::resolver::CredentialResolver;
use crate::error::{GilbertError, Result};
use crate::github::payload::{build_from_content, build_from_file, build_gist_from_files, Gist};
use crate::github::{GistClient, GistResponse, HttpTransport};

/// Handle `create`
pub async fn handle_create(args: CreateArgs, api_url: Option<String>) -> Result<()> {
    match (args.file, args.name) {
        (Some(file), _) => {
            let payload = build_from_file(&args.description, &file)?;
            let token = create_token(args.basic, CredentialStore::get_github_token);
            let client = build_client(api_url, token.clone())?;
            let resolver = CredentialResolver::new(token, TerminalPrompter::new());

            // No token yet: fall back to an interactive login
            let use_basic_auth = args.basic || !resolver.has_stored_token();
            let response = client
                .create_with_basic_auth_option(&payload, &resolver, use_basic_auth)
                .await?;
            print_created(&response)
        }
        (None, Some(name)) => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            let payload = build_from_content(&args.description, &name, &content);

            let client = build_client(api_url, CredentialStore::get_github_token()?)?;
            let response = client.create_with_token(&payload).await?;
            print_created(&response)
        }
        (None, None) => Err(GilbertError::InvalidInput(
            "Give a file to upload, or --name to read from stdin".to_string(),
        )),
    }
}

/// Handle `get`
pub async fn handle_get(args: GetArgs, api_url: Option<String>) -> Result<()> {
    let client = build_client(api_url, CredentialStore::get_github_token()?)?;
    let gist = client.get(&args.id).await?;

    match args.out {
        Some(dir) => save_files(&gist, &dir),
        None => print_files(&gist),
    }
}

/// Handle `update`
pub async fn handle_update(args: UpdateArgs, api_url: Option<String>) -> Result<()> {
    let gist = build_gist_from_files(args.description.as_deref(), &args.files)?;
    let client = build_client(api_url, CredentialStore::get_github_token()?)?;

    let response = client.patch(&args.id, &gist).await?;
    println!("{}", response.url);
    Ok(())
}

/// Handle `delete`
pub async fn handle_delete(args: DeleteArgs, api_url: Option<String>) -> Result<()> {
    if !args.force {
        eprint!("Delete gist '{}'? [y/N] ", args.id);
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let client = build_client(api_url, CredentialStore::get_github_token()?)?;
    client.delete(&args.id).await?;
    eprintln!("✓ Deleted gist '{}'", args.id);
    Ok(())
}

/// Token for a file create, which can always fall back to a login prompt
///
/// `--basic` skips the lookup. An unreachable keyring counts as no token.
fn create_token(
    basic: bool,
    lookup: impl FnOnce() -> Result<Option<SecretString>>,
) -> Option<SecretString> {
    if basic {
        return None;
    }
    match lookup() {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!("{}; falling back to a login prompt", e);
            None
        }
    }
}

/// Build a client from configuration, an optional endpoint override and a token
fn build_client(
    api_url: Option<String>,
    token: Option<SecretString>,
) -> Result<GistClient<HttpTransport>> {
    let config = Config::load()?;
    let endpoint = match api_url {
        Some(url) => parse_endpoint(&url)?,
        None => config.endpoint()?,
    };
    let transport = HttpTransport::new(config.timeout())?;

    tracing::debug!(
        "Using {} (status policy: {})",
        endpoint,
        config.status_policy
    );

    Ok(GistClient::new(transport, endpoint, token).with_status_policy(config.status_policy))
}

fn print_created(response: &GistResponse) -> Result<()> {
    if response.url.is_empty() {
        return Err(GilbertError::Custom(
            "GitHub did not create the gist.".to_string(),
        ));
    }
    println!("{}", response.url);
    Ok(())
}

fn print_files(gist: &Gist) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let several = gist.files.len() > 1;

    for (index, (name, file)) in gist.files.iter().enumerate() {
        if several {
            if index > 0 {
                writeln!(stdout)?;
            }
            writeln!(stdout, "==> {} <==", name)?;
        }
        write!(stdout, "{}", file.content)?;
    }

    stdout.flush()?;
    Ok(())
}

fn save_files(gist: &Gist, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    for (name, file) in &gist.files {
        // Names come from the server: keep only the final segment
        let safe_name = Path::new(name)
            .file_name()
            .filter(|n| *n == name.as_str())
            .ok_or_else(|| {
                GilbertError::InvalidInput(format!("Refusing to write gist file '{}'", name))
            })?;

        let path = dir.join(safe_name);
        fs::write(&path, &file.content)?;
        eprintln!("✓ Wrote {}", path.display());
    }

    Ok(())
}
