//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use pluginyml::Platform;

/// plugin-yml - Generate and validate plugin descriptions for Minecraft servers
#[derive(Parser)]
#[command(name = "plugin-yml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to plugin-yml.toml (defaults to the nearest one upward)
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub color: bool,
    pub manifest_path: Option<PathBuf>,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            color: !self.no_color,
            manifest_path: self.manifest_path.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate plugin description files
    Generate(GenerateArgs),

    /// Fill defaults and validate without writing anything
    Validate(ValidateArgs),

    /// Print the libraries file contents as JSON
    Libraries(LibrariesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Only generate for these platforms
    #[arg(short, long, value_parser = parse_platform)]
    pub platform: Vec<Platform>,

    /// Output directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Resolved dependency graph (JSON)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Only validate these platforms
    #[arg(short, long, value_parser = parse_platform)]
    pub platform: Vec<Platform>,

    /// Resolved dependency graph (JSON)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,
}

#[derive(Args)]
pub struct LibrariesArgs {
    /// Resolved dependency graph (JSON)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    s.parse()
}
