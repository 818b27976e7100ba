use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub gemini: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            gemini: GeminiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// Forwarded as generationConfig when set; unset means the API default.
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub bind_addr: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub gemini: Option<PartialGeminiConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialGeminiConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl AppConfig {
    pub fn from_cli(cli: crate::Cli) -> Result<Self> {
        let file_cfg = load_file_config().unwrap_or_default();

        let api_key = cli
            .api_key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or(file_cfg.api_key);
        let base_url = if cli.base_url.is_empty() {
            std::env::var("GEMINI_BASE_URL")
                .ok()
                .or(file_cfg.base_url)
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string())
        } else {
            cli.base_url
        };
        let model = if cli.model.is_empty() {
            std::env::var("GEMINI_MODEL")
                .ok()
                .or(file_cfg.model)
                .unwrap_or_else(|| "gemini-2.0-flash".to_string())
        } else {
            cli.model
        };
        let bind_addr = if cli.bind.is_empty() {
            std::env::var("KANBAN_AI_BIND")
                .ok()
                .or(file_cfg.bind_addr)
                .unwrap_or_else(|| "127.0.0.1:8787".to_string())
        } else {
            cli.bind
        };

        let gemini_defaults = GeminiConfig::default();
        let gemini = if let Some(p) = file_cfg.gemini {
            GeminiConfig {
                connect_timeout_ms: p
                    .connect_timeout_ms
                    .unwrap_or(gemini_defaults.connect_timeout_ms),
                request_timeout_ms: p
                    .request_timeout_ms
                    .unwrap_or(gemini_defaults.request_timeout_ms),
                temperature: p.temperature.or(gemini_defaults.temperature),
                max_output_tokens: p.max_output_tokens.or(gemini_defaults.max_output_tokens),
            }
        } else {
            gemini_defaults
        };

        Ok(Self {
            bind_addr,
            base_url,
            model,
            api_key,
            gemini,
        })
    }
}

pub fn load_file_config() -> Result<FileConfig> {
    use std::env;
    use std::path::{Path, PathBuf};

    fn candidate_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Ok(p) = env::var("KANBAN_AI_CONFIG") {
            v.push(PathBuf::from(p));
        }
        if let Ok(xdg_home) = env::var("XDG_CONFIG_HOME") {
            v.push(Path::new(&xdg_home).join("kanban-ai/config.toml"));
        } else if let Ok(home) = env::var("HOME") {
            v.push(Path::new(&home).join(".config/kanban-ai/config.toml"));
        }
        if let Ok(dirs) = env::var("XDG_CONFIG_DIRS") {
            for d in dirs.split(':') {
                if !d.is_empty() {
                    v.push(Path::new(d).join("kanban-ai/config.toml"));
                }
            }
        }
        v
    }

    for p in candidate_paths() {
        if p.exists() {
            match read_config_file(&p) {
                Ok(cfg) => {
                    info!(path=%p.display(), "loaded config file");
                    return Ok(cfg);
                }
                Err(e) => {
                    warn!(path=%p.display(), error=%e.to_string(), "parse config failed");
                    continue;
                }
            }
        }
    }
    Ok(FileConfig::default())
}

/// Read and parse a single TOML config file.
pub fn read_config_file(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    toml::from_str::<FileConfig>(&s)
        .with_context(|| format!("parse config file: {}", path.display()))
}
