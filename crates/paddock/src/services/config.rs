use super::types::ProjectConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "paddock.toml";

/// Keys accepted by [`ConfigService::get`] and [`ConfigService::set`]
pub const CONFIG_KEYS: &[&str] = &[
    "content.root",
    "content.pages",
    "content.settings",
    "display.featured_limit",
    "display.recent_limit",
    "display.currency",
];

/// Service for configuration management
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(project_root: &Path) -> Self {
        let config_path = project_root.join(CONFIG_FILE);
        Self { config_path }
    }

    /// Write a default configuration file
    pub fn init(&self) -> Result<ProjectConfig> {
        let config = ProjectConfig::default();
        self.save(&config)?;
        Ok(config)
    }

    /// Load configuration from file, with env var overrides (PADDOCK_ prefix, __ separator)
    pub fn load(&self) -> Result<ProjectConfig> {
        let mut figment = Figment::from(Serialized::defaults(ProjectConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("PADDOCK_").split("__"));

        let config: ProjectConfig = figment.extract().context("Failed to load configuration")?;
        Ok(config)
    }

    pub fn save(&self, config: &ProjectConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        std::fs::write(&self.config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Get a configuration value by dotted key. Lists are comma-joined.
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        match key {
            "content.root" => Ok(config.content.root),
            "content.pages" => Ok(config.content.pages.join(",")),
            "content.settings" => Ok(config.content.settings.join(",")),
            "display.featured_limit" => Ok(config.display.featured_limit.to_string()),
            "display.recent_limit" => Ok(config.display.recent_limit.to_string()),
            "display.currency" => Ok(config.display.currency),
            _ => Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
    }

    /// Set a configuration value by dotted key. Lists take comma-separated names.
    pub fn set(&self, key: &str, value: String) -> Result<()> {
        let mut config = self.load()?;
        match key {
            "content.root" => config.content.root = value,
            "content.pages" => config.content.pages = split_list(&value),
            "content.settings" => config.content.settings = split_list(&value),
            "display.featured_limit" => config.display.featured_limit = parse_limit(key, &value)?,
            "display.recent_limit" => config.display.recent_limit = parse_limit(key, &value)?,
            "display.currency" => config.display.currency = value.trim().to_uppercase(),
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        self.save(&config)?;
        Ok(())
    }

    /// Resolve the content root against the project root
    pub fn content_root(&self, project_root: &Path) -> Result<PathBuf> {
        let config = self.load()?;
        Ok(project_root.join(config.content.root))
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_limit(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a non-negative integer, got '{}'", key, value))
}
