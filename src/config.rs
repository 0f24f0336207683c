// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CAREER_API_URL: &str = "https://api-rbb.fhcibumn.id/general/career";
pub const DEFAULT_ORIGIN: &str = "https://rekrutmenbersama2025.fhcibumn.id";
pub const DEFAULT_PAGE_SIZE: u32 = 15;
pub const DEFAULT_LLM_API_URL: &str = "https://api.together.xyz/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub career_api: CareerApiConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CareerApiConfig {
    pub base_url: String,
    pub bearer_token: String,
    pub origin: String,
    pub page_size: u32,
    /// No timeout unless configured: a hung request stalls the caller.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: AppConfig,
    #[serde(default)]
    production: AppConfig,
}

impl Default for CareerApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CAREER_API_URL.to_string(),
            bearer_token: String::new(),
            origin: DEFAULT_ORIGIN.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LLM_API_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: 300,
            timeout_seconds: 60,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "vacancy_browser=info,rocket::server=off".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load `config.yaml` (or `path`) for the current environment, then apply env overrides.
    /// A missing file is not an error: built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        let config_path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("VACANCY_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config.yaml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn get_environment() -> String {
        std::env::var("VACANCY_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CAREER_API_URL") {
            self.career_api.base_url = url;
        }
        if let Ok(token) = std::env::var("CAREER_API_TOKEN") {
            self.career_api.bearer_token = token;
        }
        if let Ok(url) = std::env::var("LLM_API_URL") {
            self.llm.api_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(key) = std::env::var("TOGETHER_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(port) = std::env::var("ROCKET_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
        {
            self.server.port = port;
        }
    }

    pub fn log_summary(&self) {
        info!("Career API: {}", self.career_api.base_url);
        info!("Page size: {}", self.career_api.page_size);
        info!(
            "LLM endpoint: {} (model {}, key {})",
            self.llm.api_url,
            self.llm.model,
            if self.llm.api_key.is_some() { "set" } else { "missing" }
        );
    }
}
