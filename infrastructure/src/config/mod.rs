//! Configuration loading
//!
//! TOML files merged over built-in defaults, with environment variables
//! (prefix `TRIK_AGENT_`) on top. `OPENAI_API_KEY` is honored as a
//! fallback for the model key so an untouched environment still works.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Base URL of the trik gateway
    pub url: String,
    /// Bearer token, if the gateway requires one
    pub auth_token: Option<String>,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3002".to_string(),
            auth_token: None,
        }
    }
}

/// Raw decision model configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// OpenAI-compatible API base
    pub api_base: String,
    /// API key; falls back to OPENAI_API_KEY at session startup
    pub api_key: Option<String>,
    /// Model name
    pub name: String,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com".to_string(),
            api_key: None,
            name: "gpt-4o-mini".to_string(),
        }
    }
}

/// Raw agent configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum decision cycles per user turn
    pub max_cycles: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self { max_cycles: 8 }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: FileGatewayConfig,
    pub model: FileModelConfig,
    pub agent: FileAgentConfig,
}

impl FileConfig {
    /// Model key from config or the conventional environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.model
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TRIK_AGENT_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./trik-agent.toml` or `./.trik-agent.toml`
    /// 4. XDG config: `~/.config/trik-agent/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        for filename in &["trik-agent.toml", ".trik-agent.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TRIK_AGENT_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("trik-agent").join("config.toml"))
    }
}
