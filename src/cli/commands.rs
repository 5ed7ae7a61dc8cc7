//! CLI command implementations

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::args::{ConfigCommand, TemplateCommand};
use crate::config::Settings;
use crate::extract::{extract_meeting_details, MeetingDetails};
use crate::template::{starter, TemplateFiller};

/// Run the HTTP server
pub async fn serve(
    settings: &Settings,
    bind: Option<String>,
    template: Option<PathBuf>,
) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }
    if let Some(template) = template {
        settings.template.path = template;
    }

    crate::web::serve(settings).await
}

/// Print the details extracted from an email
pub fn extract_email(input: Option<PathBuf>, json: bool) -> Result<()> {
    let text = read_input(input.as_deref())?;
    let details = extract_meeting_details(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    print_details(&details);
    Ok(())
}

/// Generate a MoM document from an email
pub fn generate_minutes(
    settings: &Settings,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    template: Option<PathBuf>,
) -> Result<()> {
    let text = read_input(input.as_deref())?;
    let details = extract_meeting_details(&text);

    let template = template.unwrap_or_else(|| settings.template.path.clone());
    let filler = TemplateFiller::new(template, settings.output_dir());

    let document = filler
        .fill(&details)
        .with_context(|| format!("Failed to fill template {}", filler.template_path().display()))?;

    let output = output.unwrap_or_else(|| PathBuf::from(document.file_name()));
    document
        .persist(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_details(&details);
    println!();
    println!("Written: {}", output.display());

    Ok(())
}

/// Handle template subcommands
pub fn template_command(settings: &Settings, cmd: TemplateCommand) -> Result<()> {
    match cmd {
        TemplateCommand::Init { path, force } => {
            let path = path.unwrap_or_else(|| settings.template.path.clone());
            if path.exists() && !force {
                anyhow::bail!(
                    "Template already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            starter::write_starter_template(&path)?;
            println!("Starter template written to: {}", path.display());
        }
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read email from stdin")?;
            Ok(text)
        }
    }
}

fn print_details(details: &MeetingDetails) {
    println!("Date: {}", details.meeting_date);

    if details.agenda_points.is_empty() {
        println!("Agenda: (none found)");
        return;
    }

    println!("Agenda:");
    for point in &details.agenda_points {
        println!("  {}", point);
    }
}
