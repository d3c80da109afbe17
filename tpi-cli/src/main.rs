//! tpi - Command line interface for test plan item validation

mod commands;

use clap::{Parser, Subcommand};
use tpi_core::config::ValidatorOverrides;
use tpi_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ParseArgs, ValidateArgs};

/// Validate test plan item issues
#[derive(Parser, Debug)]
#[command(name = "tpi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Label marking test plan items (overrides config and env)
    #[arg(long, global = true)]
    label: Option<String>,

    /// Label for invalid test plan items (overrides config and env)
    #[arg(long, global = true)]
    invalid_label: Option<String>,

    /// Comment posted on invalid test plan items (overrides config and env)
    #[arg(long, global = true)]
    comment: Option<String>,

    /// Label added to referenced issues; pass "" to disable
    #[arg(long, global = true)]
    refs_label: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Parse a test plan item body from a file or stdin
    #[command(visible_alias = "p")]
    Parse(ParseArgs),

    /// Validate a live issue and update its labels and comments
    #[command(visible_alias = "v")]
    Validate(ValidateArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load_with_overrides(ValidatorOverrides {
        label: cli.label.clone(),
        invalid_label: cli.invalid_label.clone(),
        comment: cli.comment.clone(),
        refs_label: cli.refs_label.clone(),
    })?;

    if cli.verbose {
        tracing::info!(
            label = %config.validator.label,
            invalid_label = %config.validator.invalid_label,
            refs_label = ?config.validator.refs_label,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("tpi {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Parse(args)) => {
            args.execute(cli.verbose)?;
        }
        Some(Commands::Validate(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config) => {
            println!("tpi Configuration");
            println!("=================");
            println!();
            println!("Validator Settings:");
            println!("  label: {}", config.validator.label);
            println!("  invalid_label: {}", config.validator.invalid_label);
            println!("  comment: {}", config.validator.comment);
            println!(
                "  refs_label: {}",
                config.validator.refs_label.as_deref().unwrap_or("(disabled)")
            );
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
            println!("tpi - Test plan item validation");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
