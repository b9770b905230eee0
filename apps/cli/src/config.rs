//! CLI configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/gameshelf/cli.toml`
//! - Windows: `%APPDATA%/gameshelf/cli.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use gameshelf_controller::ControllerConfig;
use gameshelf_view::DEFAULT_PLACEHOLDER;
use serde::{Deserialize, Serialize};

/// Where row images without an explicit URL come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// The collection server's `/game-image` endpoint.
    #[default]
    Server,
    /// The RAWG search API (needs `rawg_api_key`).
    Rawg,
    /// No lookups; explicit URLs or the placeholder only.
    None,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the collection server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Image shown when a game has none.
    #[serde(default = "default_placeholder")]
    pub placeholder_image: String,

    /// Banner display time in milliseconds.
    #[serde(default = "default_banner_duration_ms")]
    pub banner_duration_ms: u64,

    /// Ask for a deletion code before deleting.
    #[serde(default)]
    pub require_deletion_code: bool,

    #[serde(default)]
    pub image_source: ImageSource,

    /// RAWG API key, used when `image_source = "rawg"`.
    #[serde(default)]
    pub rawg_api_key: String,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.into()
}

fn default_banner_duration_ms() -> u64 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            placeholder_image: default_placeholder(),
            banner_duration_ms: default_banner_duration_ms(),
            require_deletion_code: false,
            image_source: ImageSource::default(),
            rawg_api_key: String::new(),
        }
    }
}

impl Config {
    /// Loads configuration from the default path, creating it if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from `path`, writing defaults there if missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
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

        // Restrict permissions on Unix (may contain API key).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Controller settings derived from this configuration.
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            banner_duration: Duration::from_millis(self.banner_duration_ms),
            require_deletion_code: self.require_deletion_code,
        }
    }
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("gameshelf").join("cli.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("gameshelf")
            .join("cli.toml"))
    }
}
