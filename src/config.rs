use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub relmap: RelmapConfig,
}

/// Relmap-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelmapConfig {
    /// Path to the backing graph document. Created on first save if absent.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Project name used when the backing document does not exist yet.
    #[serde(default = "default_project")]
    pub default_project: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RelmapConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            default_project: default_project(),
            log_level: default_log_level(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data").join("graph.json")
}

fn default_project() -> String {
    "Untitled".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in RELMAP_CONFIG environment variable
    /// 2. ./config.toml in current directory
    ///
    /// A missing config file is not an error: the backing document itself is
    /// optional, so the config falls back to defaults.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let explicit = std::env::var("RELMAP_CONFIG").map(PathBuf::from).ok();
        let config_path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.toml"));

        if !config_path.exists() {
            // An explicitly requested config file must exist; the implicit
            // ./config.toml is optional.
            if explicit.is_some() {
                anyhow::bail!(
                    "Config file not found: {} (set via RELMAP_CONFIG)",
                    config_path.display()
                );
            }
            return Ok(Config::default_config());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config =
            toml::from_str(&config_str).context("Failed to parse config.toml")?;

        config.validate()?;

        Ok(config)
    }

    fn default_config() -> Self {
        Config {
            relmap: RelmapConfig::default(),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.relmap.data_path.as_os_str().is_empty() {
            anyhow::bail!("relmap.data_path must not be empty");
        }

        if self.relmap.default_project.trim().is_empty() {
            anyhow::bail!("relmap.default_project must not be empty");
        }

        Ok(())
    }

    /// Get the backing document path
    pub fn data_path(&self) -> &Path {
        &self.relmap.data_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_config_env(config_path: Option<&std::path::Path>, f: impl FnOnce()) {
        let original = std::env::var("RELMAP_CONFIG").ok();
        match config_path {
            Some(p) => std::env::set_var("RELMAP_CONFIG", p.to_str().unwrap()),
            None => std::env::remove_var("RELMAP_CONFIG"),
        }
        f();
        std::env::remove_var("RELMAP_CONFIG");
        if let Some(val) = original {
            std::env::set_var("RELMAP_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[relmap]
data_path = "./people.json"
default_project = "Book Club"
log_level = "debug"
"#,
        )
        .unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.relmap.log_level, "debug");
            assert_eq!(config.relmap.default_project, "Book Club");
            assert_eq!(config.data_path(), Path::new("./people.json"));
        });
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[relmap]\nlog_level = \"warn\"\n").unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load().unwrap();
            assert_eq!(config.relmap.log_level, "warn");
            assert_eq!(config.relmap.default_project, "Untitled");
            assert_eq!(config.data_path(), Path::new("data").join("graph.json").as_path());
        });
    }

    #[test]
    fn test_config_explicit_path_must_exist() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");
        with_config_env(Some(&missing), || {
            let config = Config::load();
            assert!(config.is_err());
        });
    }

    #[test]
    fn test_config_rejects_empty_project() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[relmap]\ndefault_project = \"   \"\n").unwrap();
        with_config_env(Some(&config_path), || {
            assert!(Config::load().is_err());
        });
    }
}
