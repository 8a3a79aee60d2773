//! coderev CLI - AI code review from the command line
//!
//! Submits code snippets or files for AI review and browses the review
//! history. Caller identity is resolved here (flag, environment, or config)
//! and passed into the core; reviews are always scoped to that identity.

mod commands;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use coderev_core::{Config, ModelClient, ReviewService, Secrets};
use coderev_db::Database;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{AnalyzeArgs, DeleteArgs, HistoryArgs, ShowArgs, UploadArgs};

/// coderev: AI code review and bug finding
#[derive(Parser, Debug)]
#[command(name = "coderev")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Identity that owns created and listed reviews
    #[arg(long, global = true, env = "CODEREV_USER")]
    user: Option<String>,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "CODEREV_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Review a code snippet from a file or stdin
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Review an uploaded source file, inferring its language
    #[command(visible_alias = "u")]
    Upload(UploadArgs),

    /// List your past reviews, newest first
    History(HistoryArgs),

    /// Show one review in full
    Show(ShowArgs),

    /// Delete one review, irreversibly
    Delete(DeleteArgs),

    /// Create a secrets file template for the model API key
    Init,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.model.clone(), cli.user.clone())?;

    if cli.verbose {
        tracing::info!(
            base_url = %config.model.base_url,
            model = config.model.model.as_deref().unwrap_or("(fallback)"),
            "Configuration loaded"
        );
    }

    let owner = config
        .user
        .name
        .clone()
        .unwrap_or_else(|| "default".to_string());

    match cli.command {
        Some(Commands::Version) => {
            println!("coderev {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Analyze(args)) => {
            let service = build_service(&config).await?;
            args.execute(&service, &owner).await?;
        }
        Some(Commands::Upload(args)) => {
            let service = build_service(&config).await?;
            args.execute(&service, &owner).await?;
        }
        Some(Commands::History(args)) => {
            let service = build_service(&config).await?;
            args.execute(&service, &owner).await?;
        }
        Some(Commands::Show(args)) => {
            let service = build_service(&config).await?;
            args.execute(&service, &owner).await?;
        }
        Some(Commands::Delete(args)) => {
            let service = build_service(&config).await?;
            args.execute(&service, &owner).await?;
        }
        Some(Commands::Init) => {
            let path = Secrets::create_template()?;
            println!("Created secrets template at {}", path.display());
            println!("Edit it and add your model API key.");
        }
        Some(Commands::Config) => {
            println!("coderev Configuration");
            println!("=====================");
            println!();
            println!("Model Settings:");
            println!("  base_url: {}", config.model.base_url);
            println!(
                "  model: {}",
                config.model.model.as_deref().unwrap_or("(fallback)")
            );
            println!("  fallback_model: {}", config.model.fallback_model);
            match config.model.timeout_secs {
                Some(secs) => println!("  timeout_secs: {}", secs),
                None => println!("  timeout_secs: (none)"),
            }
            println!();
            println!("User: {}", owner);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("coderev - AI code review and bug finding");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Wire the review service from configuration
///
/// The model credential comes from secrets; the model client is built once
/// here and shared for the lifetime of the command.
async fn build_service(config: &Config) -> anyhow::Result<ReviewService> {
    let secrets = Secrets::load()?;

    let mut model_config = config.model.clone();
    model_config.api_key = secrets.model_api_key();

    let client = ModelClient::new(model_config)?;

    let db = match &config.storage.path {
        Some(path) => Database::new(path).await?,
        None => Database::new(Database::default_path()?).await?,
    };

    Ok(ReviewService::new(Arc::new(client), db))
}
