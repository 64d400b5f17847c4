use thiserror::Error;

/// 載入資料集時的錯誤
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No data source was provided")]
    MissingSource,

    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Malformed row {row}: field '{field}' has non-integer value '{value}'")]
    MalformedRow {
        row: usize,
        field: String,
        value: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// 查無此元素符號，屬於可恢復的狀態
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Element '{symbol}' not found")]
pub struct NotFound {
    pub symbol: String,
}

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Query,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExplorerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExplorerError::Load(_) | ExplorerError::CsvError(_) => ErrorCategory::Input,
            ExplorerError::NotFound(_) => ErrorCategory::Query,
            ExplorerError::ConfigError { .. }
            | ExplorerError::MissingConfigError { .. }
            | ExplorerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ExplorerError::ZipError(_)
            | ExplorerError::IoError(_)
            | ExplorerError::SerializationError(_)
            | ExplorerError::ProcessingError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 找不到元素只是提示，使用者可以換個符號再試
            ExplorerError::NotFound(_) => ErrorSeverity::Low,
            ExplorerError::Load(LoadError::MissingSource) => ErrorSeverity::Medium,
            ExplorerError::Load(_) | ExplorerError::CsvError(_) => ErrorSeverity::High,
            ExplorerError::ConfigError { .. }
            | ExplorerError::MissingConfigError { .. }
            | ExplorerError::InvalidConfigValueError { .. }
            | ExplorerError::ProcessingError { .. } => ErrorSeverity::High,
            ExplorerError::ZipError(_)
            | ExplorerError::IoError(_)
            | ExplorerError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ExplorerError::Load(LoadError::MissingSource) => {
                "No nuclide table was given. Provide a CSV file to begin.".to_string()
            }
            ExplorerError::Load(LoadError::MissingColumns { missing }) => format!(
                "The nuclide table is missing required columns: {}",
                missing.join(", ")
            ),
            ExplorerError::Load(LoadError::MalformedRow { row, field, value }) => format!(
                "Row {} of the nuclide table has an invalid {} value: '{}'",
                row, field, value
            ),
            ExplorerError::Load(e) => format!("Could not read the nuclide table: {}", e),
            ExplorerError::NotFound(e) => format!("Element not found: {}", e.symbol),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExplorerError::Load(LoadError::MissingSource) => {
                "Pass --source <file.csv> or set [source] path in the config file"
            }
            ExplorerError::Load(LoadError::MissingColumns { .. }) => {
                "Check the header row or extend the [columns] aliases in the config file"
            }
            ExplorerError::Load(LoadError::MalformedRow { .. }) => {
                "Fix the Z/A values in the reported row so they are whole numbers"
            }
            ExplorerError::Load(_) | ExplorerError::CsvError(_) => {
                "Make sure the file exists and is valid CSV"
            }
            ExplorerError::NotFound(_) => "Try another element symbol, e.g. Fe",
            ExplorerError::ConfigError { .. }
            | ExplorerError::MissingConfigError { .. }
            | ExplorerError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration"
            }
            ExplorerError::ZipError(_)
            | ExplorerError::IoError(_)
            | ExplorerError::SerializationError(_) => {
                "Check that the output directory is writable"
            }
            ExplorerError::ProcessingError { .. } => {
                "Reload the nuclide table and run the query again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
