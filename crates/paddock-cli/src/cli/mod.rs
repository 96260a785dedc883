mod config;
mod content;
mod horses;
mod init;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use paddock::services::{ConfigService, ContentStore, ProjectConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "paddock")]
#[command(about = "Browse and validate equestrian site content", long_about = None)]
pub struct Cli {
    /// Enable verbose output (info logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create paddock.toml and the content directories
    Init(init::InitArgs),

    /// List records of a content kind
    List(content::ListArgs),

    /// Show one record by slug, or a page/settings document by name
    Show(content::ShowArgs),

    /// List horses with listing filters applied
    Horses(horses::HorsesArgs),

    /// Check records against the publishing rules
    Validate(validate::ValidateArgs),

    /// Report how long ago dated content was published
    Freshness(validate::FreshnessArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init(args) => init::execute(args).await,
        Commands::List(args) => content::execute_list(args).await,
        Commands::Show(args) => content::execute_show(args).await,
        Commands::Horses(args) => horses::execute(args).await,
        Commands::Validate(args) => validate::execute_validate(args).await,
        Commands::Freshness(args) => validate::execute_freshness(args).await,
        Commands::Config(args) => config::execute(args).await,
    }
}

/// Load the project configuration for the current directory
fn load_project() -> Result<(PathBuf, ProjectConfig)> {
    let project_root = PathBuf::from(".");
    let config = ConfigService::new(&project_root).load()?;
    Ok((project_root, config))
}

fn open_store(project_root: &Path, config: &ProjectConfig) -> Arc<ContentStore> {
    Arc::new(ContentStore::from_config(project_root, config))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
