//! momgen - Minutes-of-meeting generator
//!
//! Entry point for the momgen CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use momgen::cli::{Cli, Commands};
use momgen::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            momgen::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;
            init_logging(&settings, cli.verbose);

            // Execute command
            match command {
                Commands::Serve { bind, template } => {
                    momgen::cli::commands::serve(&settings, bind, template).await?;
                }
                Commands::Extract { input, json } => {
                    momgen::cli::commands::extract_email(input, json)?;
                }
                Commands::Generate {
                    input,
                    output,
                    template,
                } => {
                    momgen::cli::commands::generate_minutes(&settings, input, output, template)?;
                }
                Commands::Template(template_cmd) => {
                    momgen::cli::commands::template_command(&settings, template_cmd)?;
                }
                Commands::Config(config_cmd) => {
                    momgen::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { shell } => {
                    momgen::cli::completions::print(shell);
                }
            }
        }
    }

    Ok(())
}

/// Log to stderr at the configured level; `-v` forces debug and `RUST_LOG`
/// overrides both
fn init_logging(settings: &Settings, verbose: bool) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        settings.general.log_level.clone()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
