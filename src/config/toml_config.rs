use crate::core::dashboard::DEFAULT_RECENT_LIMIT;
use crate::core::ConfigProvider;
use crate::utils::error::{RentalError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_properties_file")]
    pub properties_file: String,
    #[serde(default = "default_tenants_file")]
    pub tenants_file: String,
    #[serde(default = "default_payments_file")]
    pub payments_file: String,
    /// 靜態前端檔案目錄（可選）
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> String {
    "./database".to_string()
}

fn default_properties_file() -> String {
    "properties.csv".to_string()
}

fn default_tenants_file() -> String {
    "tenants.csv".to_string()
}

fn default_payments_file() -> String {
    "payments.csv".to_string()
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            properties_file: default_properties_file(),
            tenants_file: default_tenants_file(),
            payments_file: default_payments_file(),
            static_dir: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| RentalError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RentalError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RENTAL_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RentalError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host).map_err(|_| {
            RentalError::InvalidConfigValueError {
                field: "server.host".to_string(),
                value: self.server.host.clone(),
                reason: "Host cannot be empty".to_string(),
            }
        })?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_file_name("storage.properties_file", &self.storage.properties_file)?;
        validation::validate_file_name("storage.tenants_file", &self.storage.tenants_file)?;
        validation::validate_file_name("storage.payments_file", &self.storage.payments_file)?;

        let files = [
            &self.storage.properties_file,
            &self.storage.tenants_file,
            &self.storage.payments_file,
        ];
        for (i, file) in files.iter().enumerate() {
            if files[i + 1..].contains(file) {
                return Err(RentalError::InvalidConfigValueError {
                    field: "storage".to_string(),
                    value: file.to_string(),
                    reason: "Each table needs its own file".to_string(),
                });
            }
        }

        if let Some(static_dir) = &self.storage.static_dir {
            validation::validate_path("storage.static_dir", static_dir)?;
        }

        validation::validate_range("dashboard.recent_limit", self.dashboard.recent_limit, 1, 100)?;

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn static_dir(&self) -> Option<&str> {
        self.storage.static_dir.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn properties_file(&self) -> &str {
        &self.storage.properties_file
    }

    fn tenants_file(&self) -> &str {
        &self.storage.tenants_file
    }

    fn payments_file(&self) -> &str {
        &self.storage.payments_file
    }

    fn recent_limit(&self) -> usize {
        self.dashboard.recent_limit
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
