use anyhow::Result;
use clap::{Args, Subcommand};
use paddock::services::config::CONFIG_KEYS;
use paddock::services::ConfigService;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value (comma-separated for lists)
        value: String,
    },

    /// Show every configuration value
    Show,
}

pub async fn execute(args: ConfigArgs) -> Result<()> {
    let project_root = PathBuf::from(".");
    let config_service = ConfigService::new(&project_root);

    match args.command {
        ConfigCommands::Get { key } => {
            let value = config_service.get(&key)?;
            println!("{}", value);
        },

        ConfigCommands::Set { key, value } => {
            if !config_service.exists() {
                return Err(anyhow::anyhow!(
                    "No paddock.toml found. Run 'paddock init' first."
                ));
            }
            config_service.set(&key, value.clone())?;
            println!("Set {} = {}", key, value);
        },

        ConfigCommands::Show => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config_service.get(key)?);
            }
        },
    }

    Ok(())
}
