//! Console configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/relay-console/console.toml`
//! - Windows: `%APPDATA%/relay-console/console.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// URL of the page the console belongs to; the socket endpoint is
    /// derived from it.
    #[serde(default = "default_page_url")]
    pub page_url: String,

    /// Also log outbound commands as `SEND: ...` lines.
    #[serde(default)]
    pub echo_outbound: bool,

    /// Connect as soon as the console starts.
    #[serde(default = "default_auto_connect")]
    pub auto_connect: bool,
}

fn default_page_url() -> String {
    "http://localhost:8080/".into()
}

fn default_auto_connect() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            echo_outbound: false,
            auto_connect: default_auto_connect(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Loads configuration from `path`, writing defaults there if missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: ConsoleConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = ConsoleConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("relay-console")
            .join("console.toml")
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
            .join("relay-console")
            .join("console.toml")
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from("/tmp/relay-console/console.toml")
    }
}
