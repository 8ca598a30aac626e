//! Configuration loading for Feedpulse.
//! Reads feedpulse.toml from the current directory or the path in
//! FEEDPULSE_CONFIG, then applies environment overrides.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use feedpulse_llm::classifier::{AiSettings, API_KEY_ENV, DEFAULT_MODEL, MODEL_ENV};
use secrecy::SecretString;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "FEEDPULSE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "feedpulse.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origin.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

fn default_host()         -> String { "127.0.0.1".to_string() }
fn default_port()         -> u16    { 3001 }
fn default_frontend_url() -> String { "http://localhost:5173".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            frontend_url: default_frontend_url(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key. Empty or "demo-key" disables AI categorization.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model() -> String { DEFAULT_MODEL.to_string() }

impl Default for LlmConfig {
    fn default() -> Self {
        Self { api_key: None, model: default_model(), base_url: None }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LlmConfig {
    pub fn ai_settings(&self) -> AiSettings {
        AiSettings {
            api_key: self.api_key.clone().map(SecretString::from),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => anyhow::bail!("unknown storage backend: {other} (expected file or memory)"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf { PathBuf::from("./data/feedback.jsonl") }

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::default(), path: default_data_path() }
    }
}


impl Config {
    /// Load configuration.
    ///
    /// `.env.local` in the working directory and its parent is loaded first.
    /// A missing config file falls back to defaults; environment variables
    /// override whatever the file says.
    pub fn load() -> anyhow::Result<Self> {
        for candidate in [PathBuf::from(".env.local"), PathBuf::from("..").join(".env.local")] {
            if dotenvy::from_path(&candidate).is_ok() {
                tracing::debug!(path = %candidate.display(), "Loaded environment file");
            }
        }

        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            tracing::info!("Config file not found: {}, using defaults", path);
            Config::default()
        };

        let vars: HashMap<String, String> = std::env::vars().collect();
        config.apply_overrides(&vars)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides from `vars`.
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(key) = vars.get(API_KEY_ENV) {
            self.llm.api_key = Some(key.clone());
        }
        if let Some(model) = vars.get(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            self.llm.model = model.clone();
        }
        if let Some(port) = vars.get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {port:?}: {e}"))?;
        }
        if let Some(url) = vars.get("FRONTEND_URL") {
            self.server.frontend_url = url.clone();
        }
        if let Some(backend) = vars.get("FEEDPULSE_STORAGE") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(path) = vars.get("FEEDPULSE_DATA_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        Ok(())
    }
}
