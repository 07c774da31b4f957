use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

const ENV_CONFIG_PATH: &str = "PILOT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
const ENV_MODEL: &str = "OPENROUTER_MODEL";
const ENV_API_URL: &str = "OPENROUTER_API_URL";
const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";

pub const DEFAULT_MODEL: &str = "openrouter/openai/gpt-4.1-mini";
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_ALLOWED_ORIGINS: &str = "https://khamlabs.org,https://www.khamlabs.org";

/// `ALLOWED_ORIGINS` entry that admits every browser origin
pub const ANY_ORIGIN: &str = "*";

/// Hosted completion provider settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer credential. `None` means the deployment runs in fallback-only mode.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Quality gate strictness
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QualityConfig {
    /// Minimum mapped treaty articles for an AI report to be accepted and for the gate to pass
    #[serde(default = "default_min_treaty_rows")]
    pub min_treaty_rows: usize,
    /// When disabled, responses carry no `quality_gate` object
    #[serde(default = "default_gate_enabled")]
    pub gate_enabled: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_treaty_rows: default_min_treaty_rows(),
            gate_enabled: default_gate_enabled(),
        }
    }
}

fn default_min_treaty_rows() -> usize {
    8
}

fn default_gate_enabled() -> bool {
    true
}

/// Request size limits
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_max_json_body_bytes")]
    pub max_json_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            max_json_body_bytes: default_max_json_body_bytes(),
        }
    }
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_max_json_body_bytes() -> usize {
    4 * 1024 * 1024
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Application configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub provider: ProviderConfig,
    pub allowed_origins: Vec<String>,
    pub quality: QualityConfig,
    pub limits: LimitsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            provider: ProviderConfig::default(),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            quality: QualityConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(8080);

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let provider = ProviderConfig {
            api_key,
            model: lookup(ENV_MODEL)
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };

        let allowed_origins = parse_origins(
            &lookup(ENV_ALLOWED_ORIGINS).unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        let config_path =
            lookup(ENV_CONFIG_PATH).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let mut quality = file.quality;
        quality.min_treaty_rows = quality.min_treaty_rows.max(1);

        Self {
            port,
            host,
            provider,
            allowed_origins,
            quality,
            limits: file.limits,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check that every CORS origin is `*` or a bare `scheme://host[:port]`
    pub fn validate_origins(&self) -> Result<(), String> {
        self.allowed_origins
            .iter()
            .try_for_each(|origin| check_origin(origin))
    }
}

fn check_origin(origin: &str) -> Result<(), String> {
    if origin == ANY_ORIGIN {
        return Ok(());
    }

    let url = Url::parse(origin).map_err(|e| format!("invalid CORS origin '{}': {}", origin, e))?;
    if !matches!(url.scheme(), "http" | "https") || url.origin().ascii_serialization() != origin {
        return Err(format!(
            "invalid CORS origin '{}': expected scheme://host[:port]",
            origin
        ));
    }

    Ok(())
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
