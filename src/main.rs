//! gilbert - GitHub gist client
//!
//! Create, read, update and delete gists from the command line.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gilbert::cli::commands::{Cli, Commands};
use gilbert::cli::{auth, config, gist};
use gilbert::error::Result;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let api_url = cli.api_url;

    match cli.command {
        Commands::Create(args) => gist::handle_create(args, api_url).await,
        Commands::Get(args) => gist::handle_get(args, api_url).await,
        Commands::Update(args) => gist::handle_update(args, api_url).await,
        Commands::Delete(args) => gist::handle_delete(args, api_url).await,
        Commands::Auth(args) => auth::handle_auth(args.command),
        Commands::Config(args) => config::handle_config(args.command),
    }
}
