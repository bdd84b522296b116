use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub webhook_url: Option<String>,
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_source")]
    pub source: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Falls back to the built-in catalog when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enables `/api/component-structure` when set.
    pub component_root: Option<PathBuf>,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_source() -> String {
    "website".to_string()
}

fn default_max_depth() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
            source: default_source(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            component_root: None,
            max_depth: default_max_depth(),
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: SiteConfig =
            toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.contact.webhook_url = config.contact.webhook_url.filter(|u| !u.trim().is_empty());
        config.contact.api_token = config.contact.api_token.filter(|t| !t.trim().is_empty());
        Ok(config)
    }

    /// 替換環境變數 (例如 ${CRM_WEBHOOK_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.contact.timeout_seconds)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_range("server.port", self.server.port, 1, u16::MAX)?;

        if let Some(url) = &self.contact.webhook_url {
            validate_url("contact.webhook_url", url)?;
        }
        if let Some(token) = &self.contact.api_token {
            if let Some(unresolved) = ENV_VAR_RE.find(token) {
                return Err(SiteError::InvalidConfigValueError {
                    field: "contact.api_token".to_string(),
                    value: unresolved.as_str().to_string(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }
        validate_range("contact.timeout_seconds", self.contact.timeout_seconds, 1, 120)?;
        validate_non_empty_string("contact.source", &self.contact.source)?;

        if let Some(path) = &self.catalog.path {
            validate_path("catalog.path", &path.to_string_lossy())?;
        }

        if let Some(root) = &self.debug.component_root {
            validate_path("debug.component_root", &root.to_string_lossy())?;
        }
        validate_range("debug.max_depth", self.debug.max_depth, 1, 16)?;

        Ok(())
    }
}
