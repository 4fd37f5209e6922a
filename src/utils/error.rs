use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Cannot calculate mean of empty input")]
    EmptyInput,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid record #{record} in {file}: {reason}")]
    InvalidRecordError {
        file: String,
        record: usize,
        reason: String,
    },

    #[error("Unsupported input format: {path}")]
    UnsupportedFormatError { path: String },

    #[error("Failed to load '{file}': {source}")]
    InputFileError {
        file: String,
        #[source]
        source: Box<QueryError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl QueryError {
    /// 讀取或解析失敗時標上檔名；本身已帶檔名的錯誤原樣回傳
    pub fn in_file(self, file: &str) -> QueryError {
        match self {
            QueryError::IoError(_) | QueryError::CsvError(_) | QueryError::SerializationError(_) => {
                QueryError::InputFileError {
                    file: file.to_string(),
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            QueryError::InputFileError { source, .. } => source.category(),
            QueryError::EmptyInput => ErrorCategory::Input,
            QueryError::IoError(_) => ErrorCategory::Io,
            QueryError::CsvError(_)
            | QueryError::SerializationError(_)
            | QueryError::InvalidRecordError { .. } => ErrorCategory::Data,
            QueryError::ConfigValidationError { .. }
            | QueryError::InvalidConfigValueError { .. }
            | QueryError::MissingConfigError { .. }
            | QueryError::UnsupportedFormatError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QueryError::EmptyInput => "Provide at least one number",
            QueryError::IoError(_) => "Check that the file exists and is readable",
            QueryError::CsvError(_) => "Make sure the CSV has a 'name,email,age' header",
            QueryError::SerializationError(_) => "Check the JSON syntax of the input file",
            QueryError::ConfigValidationError { .. } => "Fix the TOML syntax in the config file",
            QueryError::InvalidConfigValueError { .. } => "Correct the highlighted value",
            QueryError::MissingConfigError { .. } => "Add the missing setting or pass it as a flag",
            QueryError::InvalidRecordError { .. } => {
                "Every record needs a non-empty name and email"
            }
            QueryError::UnsupportedFormatError { .. } => "Use a .csv, .json or .jsonl input file",
            QueryError::InputFileError { source, .. } => source.recovery_suggestion(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QueryError::EmptyInput => "No numbers were given, so there is no mean".to_string(),
            QueryError::IoError(e) => format!("Could not access a file: {}", e),
            QueryError::InvalidRecordError { file, record, .. } => {
                format!("Record #{} in '{}' is not valid", record, file)
            }
            QueryError::InputFileError { file, source } => {
                format!("Could not load '{}': {}", file, source)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_medium_input_error() {
        let err = QueryError::EmptyInput;
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "Cannot calculate mean of empty input");
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: QueryError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("gone"));
    }

    #[test]
    fn test_invalid_record_message() {
        let err = QueryError::InvalidRecordError {
            file: "users.csv".to_string(),
            record: 3,
            reason: "name is empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(
            err.user_friendly_message(),
            "Record #3 in 'users.csv' is not valid"
        );
        assert!(err.to_string().contains("name is empty"));
    }

    #[test]
    fn test_in_file_keeps_inner_classification() {
        let io: QueryError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        let err = io.in_file("data/users.csv");

        assert!(matches!(
            err,
            QueryError::InputFileError { ref file, .. } if file == "data/users.csv"
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            err.recovery_suggestion(),
            "Check that the file exists and is readable"
        );
        assert!(err.user_friendly_message().contains("data/users.csv"));
        assert!(err.user_friendly_message().contains("gone"));
    }

    #[test]
    fn test_in_file_leaves_located_errors_alone() {
        let err = QueryError::UnsupportedFormatError {
            path: "users.xml".to_string(),
        }
        .in_file("users.xml");
        assert!(matches!(err, QueryError::UnsupportedFormatError { .. }));
    }

    #[test]
    fn test_exit_code_by_severity() {
        assert_eq!(ErrorSeverity::Low.exit_code(), 1);
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);

        assert_eq!(QueryError::EmptyInput.severity().exit_code(), 2);
        let bad_range = QueryError::InvalidConfigValueError {
            field: "filter.min_age".to_string(),
            value: "50".to_string(),
            reason: "min_age must not exceed max_age (10)".to_string(),
        };
        assert_eq!(bad_range.severity().exit_code(), 1);
    }
}
