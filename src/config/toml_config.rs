use crate::core::ConfigProvider;
use crate::utils::error::{JoinError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub base_dir: String,
    pub price_file: String,
    pub detail_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            price_file: "jsonA.json".to_string(),
            detail_file: "jsonB.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: String,
    pub echo_stdout: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: "combined_data.json".to_string(),
            echo_stdout: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => JoinError::FileNotFound {
                path: path.as_ref().display().to_string(),
            },
            _ => JoinError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| JoinError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| JoinError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl ConfigProvider for TomlConfig {
    fn base_dir(&self) -> &str {
        &self.input.base_dir
    }

    fn price_file(&self) -> &str {
        &self.input.price_file
    }

    fn detail_file(&self) -> &str {
        &self.input.detail_file
    }

    fn output_file(&self) -> &str {
        &self.output.file
    }

    fn echo_stdout(&self) -> bool {
        self.output.echo_stdout
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_files(self)?;
        validation::validate_one_of(
            "logging.level",
            &self.logging.level,
            &["trace", "debug", "info", "warn", "error"],
        )?;
        validation::validate_one_of("logging.format", &self.logging.format, &["compact", "json"])
    }
}
