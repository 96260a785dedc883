use anyhow::{Context, Result};
use clap::Args;
use paddock::services::{ConfigService, ContentKind};
use std::path::PathBuf;

#[derive(Args)]
pub struct InitArgs {
    /// Content root, relative to the project root
    #[arg(long)]
    content_root: Option<String>,

    /// Overwrite an existing paddock.toml
    #[arg(long)]
    force: bool,

    /// Project root directory
    #[arg(default_value = ".")]
    path: PathBuf,
}

pub async fn execute(args: InitArgs) -> Result<()> {
    let project_root = args.path;
    tokio::fs::create_dir_all(&project_root).await?;

    let config_service = ConfigService::new(&project_root);
    if config_service.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "paddock.toml already exists in {}. Use --force to overwrite.",
            project_root.display()
        ));
    }

    let mut config = config_service.init()?;
    if let Some(root) = args.content_root {
        config.content.root = root;
        config_service.save(&config)?;
    }

    let content_root = project_root.join(&config.content.root);
    for kind in ContentKind::ALL {
        let dir = content_root.join(kind.dir_name());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    println!("Initialized paddock project at {}", project_root.display());
    println!("  Content root: {}", content_root.display());
    println!("  Pages: {}", config.content.pages.join(", "));
    println!("  Settings: {}", config.content.settings.join(", "));

    Ok(())
}
