//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// momgen - Turn a meeting invitation email into a minutes-of-meeting document
#[derive(Parser, Debug)]
#[command(name = "momgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web form and document download server
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,

        /// Template to fill (overrides template.path)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Show the meeting date and agenda found in an email
    Extract {
        /// Email text file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a MoM document from an email
    Generate {
        /// Email text file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Output file (defaults to "MoM of the MBA Committee meeting dated <date>.docx")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Template to fill (overrides template.path)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Template management
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Write a starter template with all placeholders
    Init {
        /// Where to write it (defaults to template.path)
        path: Option<PathBuf>,

        /// Force overwrite existing template
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
