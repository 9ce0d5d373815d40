//! revu CLI - Command line interface for revu
//!
//! Automated pull request reviews backed by a language model.

mod commands;

use clap::{Parser, Subcommand};
use revu_core::{Config, ConfigOverrides};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ContextArgs, ReviewArgs, SecretsArgs};

/// revu: AI review comments for pull requests
#[derive(Parser, Debug)]
#[command(name = "revu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "REVU_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Review a pull request and post feedback
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Print the context excerpt for a local file and patch
    #[command(visible_alias = "ctx")]
    Context(ContextArgs),

    /// Manage the secrets file
    Secrets(SecretsArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load configuration with overrides
    let config = Config::load_with_overrides(ConfigOverrides {
        model: cli.model.clone(),
        ..Default::default()
    })?;

    if cli.verbose {
        tracing::info!(
            model = %config.model.name,
            context_lines = config.review.context_lines,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("revu {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Review(args)) => {
            args.execute(config).await?;
        }
        Some(Commands::Context(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Secrets(args)) => {
            args.execute()?;
        }
        Some(Commands::Config) => {
            println!("revu Configuration");
            println!("==================");
            println!();
            println!("Review Settings:");
            println!("  context_lines: {}", config.review.context_lines);
            println!("  max_concurrency: {}", config.review.max_concurrency);
            println!("  summary: {}", config.review.summary);
            println!("  skip_drafts: {}", config.review.skip_drafts);
            println!();
            println!("Model Settings:");
            println!("  name: {}", config.model.name);
            println!("  temperature: {}", config.model.temperature);
            println!("  max_tokens: {}", config.model.max_tokens);
            println!("  api_url: {}", config.model.api_url);
            println!("  timeout: {:?}", config.model.timeout);
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
            println!("revu - AI review comments for pull requests");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
