//! secrets-vault - encrypted secrets management for CI/CD
//!
//! Usage:
//!   secrets-vault --encrypt   - Encrypt the secrets source directory
//!   secrets-vault --decrypt   - Decrypt the blob into secrets/files-dec
//!   secrets-vault --genkey    - Generate a new secret key
//!   secrets-vault --cicd      - Distribute decrypted files for a CI job
//!   secrets-vault --sync      - Sync local env files into the source dir
//!
//! Flags can be combined; they run in the fixed order
//! encrypt -> decrypt -> genkey -> cicd -> sync.

use clap::{CommandFactory, Parser};
use secrets_vault::{
    config::Config,
    vault::{EnvSyncTool, SecretsTool},
    Result,
};
use std::env;
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "secrets-vault")]
#[command(author = "secrets-vault Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage encrypted secrets, decrypted with SECRETS_KEY")]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Encrypt the secrets source directory into one blob
    #[arg(short, long)]
    encrypt: bool,

    /// Decrypt the blob into the decrypted directory
    #[arg(short, long)]
    decrypt: bool,

    /// Generate a secret key and print the CI setup command
    #[arg(short, long)]
    genkey: bool,

    /// Copy decrypted files into project root, backend root and ~/.ssh
    #[arg(long)]
    cicd: bool,

    /// Sync .env.local and backend/.env into the secrets source directory
    #[arg(long)]
    sync: bool,

    /// Answer yes to overwrite prompts
    #[arg(short, long)]
    yes: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    if !(cli.encrypt || cli.decrypt || cli.genkey || cli.cicd || cli.sync) {
        let _ = Cli::command().print_help();
        return;
    }

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let project_root = match &cli.root {
        Some(root) => root.clone(),
        None => env::current_dir()?,
    };
    let config = Config::from_env(project_root)?;

    let tool = SecretsTool::new(config.clone());

    if cli.encrypt {
        tool.encrypt()?;
    }
    if cli.decrypt {
        tool.decrypt()?;
    }
    if cli.genkey {
        tool.generate_key()?;
    }
    if cli.cicd {
        tool.prepare_cicd()?;
    }
    if cli.sync {
        EnvSyncTool::new(config).sync(cli.yes)?;
    }

    Ok(())
}
