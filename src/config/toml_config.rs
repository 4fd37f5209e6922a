use crate::core::filter::RecordFilter;
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{QueryError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, validate_required_field,
    Validate, SUPPORTED_INPUT_EXTENSIONS,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub filter: RecordFilter,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub base_dir: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    pub find: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| QueryError::from(e).in_file(&path.as_ref().display().to_string()))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QueryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QueryError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用命令列參數；有指定的值優先
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &crate::config::CliConfig) {
        if !cli.input_files.is_empty() {
            self.input.get_or_insert_with(InputConfig::default).files = cli.input_files.clone();
        }
        if cli.find.is_some() {
            self.query.find = cli.find.clone();
        }
        self.filter.merge(&cli.filter_overrides());
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.output_path.is_some() {
            self.output.path = cli.output_path.clone();
        }
    }

    pub fn base_dir(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|input| input.base_dir.as_deref())
            .unwrap_or(".")
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let input = validate_required_field("input", &self.input)?;
        if input.files.is_empty() {
            return Err(QueryError::MissingConfigError {
                field: "input.files".to_string(),
            });
        }
        validate_file_extensions("input.files", &input.files, SUPPORTED_INPUT_EXTENSIONS)?;

        if let Some(base_dir) = &input.base_dir {
            validate_path("input.base_dir", base_dir)?;
        }

        if let Some(find) = &self.query.find {
            validate_non_empty_string("query.find", find)?;
        }

        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }

        self.filter.validate()
    }
}

impl ConfigProvider for TomlConfig {
    fn input_files(&self) -> &[String] {
        self.input
            .as_ref()
            .map(|input| input.files.as_slice())
            .unwrap_or(&[])
    }

    fn find_key(&self) -> Option<&str> {
        self.query.find.as_deref()
    }

    fn filter(&self) -> RecordFilter {
        self.filter.clone()
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
