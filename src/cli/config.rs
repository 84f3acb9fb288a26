// ABOUTME: Configuration management for the htmlrender application
// ABOUTME: Handles loading configuration from YAML files and merging environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::template::TemplatesConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Compile every page once at startup and serve from the cache
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub in_production: bool,

    #[serde(default)]
    pub templates: TemplatesConfig,

    /// String values merged into every payload that does not set them
    #[serde(default)]
    pub defaults: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_use_cache() -> bool {
    true
}

fn default_port() -> u16 {
    8080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            use_cache: default_use_cache(),
            port: default_port(),
            in_production: false,
            templates: TemplatesConfig::default(),
            defaults: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("Configuration file not found: {}", p.display());
                }
                p
            }
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid configuration in {}", config_path.display()))?
        } else {
            AppConfig::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = vec![
            PathBuf::from("htmlrender.yaml"),
            PathBuf::from("htmlrender.yml"),
            PathBuf::from(".htmlrender.yaml"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".htmlrender").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("htmlrender.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(use_cache) = std::env::var("HTMLRENDER_USE_CACHE") {
            self.use_cache = parse_bool("HTMLRENDER_USE_CACHE", &use_cache)?;
        }
        if let Ok(port) = std::env::var("HTMLRENDER_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("HTMLRENDER_PORT is not a port number: {}", port))?;
        }
        if let Ok(in_production) = std::env::var("HTMLRENDER_IN_PRODUCTION") {
            self.in_production = parse_bool("HTMLRENDER_IN_PRODUCTION", &in_production)?;
        }
        if let Ok(dir) = std::env::var("HTMLRENDER_TEMPLATES_DIR") {
            self.templates.dir = PathBuf::from(dir);
        }

        // Logging configuration
        if let Ok(level) = std::env::var("HTMLRENDER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HTMLRENDER_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Merge additional default values
    pub fn merge_defaults(&mut self, values: HashMap<String, String>) {
        self.defaults.extend(values);
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got {:?}", var, other),
    }
}
