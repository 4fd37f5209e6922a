use crate::core::filter::RecordFilter;
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{QueryError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_path, validate_non_empty_string, Validate,
    SUPPORTED_INPUT_EXTENSIONS,
};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
pub struct CliConfig {
    /// Input files (.csv, .json, .jsonl), comma separated
    #[arg(long = "input", value_delimiter = ',')]
    pub input_files: Vec<String>,

    /// Look up the first record with this email
    #[arg(long)]
    pub find: Option<String>,

    #[arg(long, help = "Only keep records aged 18 or older")]
    pub adults_only: bool,

    #[arg(long, help = "Only keep records with a known age")]
    pub require_age: bool,

    #[arg(long)]
    pub min_age: Option<u32>,

    #[arg(long)]
    pub max_age: Option<u32>,

    #[arg(long)]
    pub email_domain: Option<String>,

    #[arg(long)]
    pub name_contains: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report here instead of stdout
    #[arg(long = "output")]
    pub output_path: Option<String>,

    /// TOML config file; flags given here override it
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Show what would be queried without reading any file")]
    pub dry_run: bool,
}

impl CliConfig {
    /// 只包含命令列有指定的條件
    pub fn filter_overrides(&self) -> RecordFilter {
        RecordFilter {
            adults_only: self.adults_only.then_some(true),
            require_age: self.require_age.then_some(true),
            min_age: self.min_age,
            max_age: self.max_age,
            email_domain: self.email_domain.clone(),
            name_contains: self.name_contains.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_files(&self) -> &[String] {
        &self.input_files
    }

    fn find_key(&self) -> Option<&str> {
        self.find.as_deref()
    }

    fn filter(&self) -> RecordFilter {
        self.filter_overrides()
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(QueryError::MissingConfigError {
                field: "--input".to_string(),
            });
        }
        validate_file_extensions("--input", &self.input_files, SUPPORTED_INPUT_EXTENSIONS)?;

        if let Some(find) = &self.find {
            validate_non_empty_string("--find", find)?;
        }

        if let Some(path) = &self.output_path {
            validate_path("--output", path)?;
        }

        self.filter_overrides().validate()
    }
}
