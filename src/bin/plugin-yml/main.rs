//! plugin-yml CLI - Plugin description generator for Minecraft servers

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("pluginyml=debug")
    } else {
        EnvFilter::new("pluginyml=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global = cli.global();
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(&global, args),
        Commands::Validate(args) => commands::validate::execute(&global, args),
        Commands::Libraries(args) => commands::libraries::execute(&global, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
