use crate::core::validator::ValidationReport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Could not find: {path}")]
    MissingFile { path: String },

    #[error("Duplicate JSON keys found in {source_name}: {}", quote_all(.keys))]
    DuplicateKey { source_name: String, keys: Vec<String> },

    #[error("{source_name}: {message}")]
    ShapeError { source_name: String, message: String },

    #[error("{source_name}: invalid JSON: {error}")]
    Parse {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("Category mismatch between JSON files")]
    CategoryMismatch { report: ValidationReport },

    #[error("Invalid bin assignments in layout")]
    BinConflict { report: ValidationReport },

    #[error("Layout bin '{bin}' is outside the generated range ({range})")]
    OutOfRange { bin: String, range: String },

    #[error(
        "Not enough capacity for '{category}': {items} items but only {capacity} slots across bins [{}]",
        quote_all(.bins)
    )]
    Capacity {
        category: String,
        items: usize,
        capacity: usize,
        bins: Vec<String>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Validation,
    Layout,
    Config,
    System,
}

impl LayoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LayoutError::MissingFile { .. }
            | LayoutError::DuplicateKey { .. }
            | LayoutError::ShapeError { .. }
            | LayoutError::Parse { .. } => ErrorCategory::Input,
            LayoutError::CategoryMismatch { .. } | LayoutError::BinConflict { .. } => {
                ErrorCategory::Validation
            }
            LayoutError::OutOfRange { .. } | LayoutError::Capacity { .. } => ErrorCategory::Layout,
            LayoutError::ConfigError { .. }
            | LayoutError::InvalidConfigValueError { .. }
            | LayoutError::TomlError(_) => ErrorCategory::Config,
            LayoutError::CsvError(_) | LayoutError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Process exit code for this error. Category parity and bin conflicts
    /// get their own codes so scripts can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            LayoutError::CategoryMismatch { .. } => 2,
            LayoutError::BinConflict { .. } => 3,
            _ => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LayoutError::MissingFile { .. } => "Check the input paths and the base directory",
            LayoutError::DuplicateKey { .. } => {
                "Merge or rename the repeated keys; every key must appear once"
            }
            LayoutError::ShapeError { .. } => {
                "Each document must be a JSON object mapping names to lists of strings"
            }
            LayoutError::Parse { .. } => "Fix the JSON syntax at the reported line and column",
            LayoutError::CategoryMismatch { .. } => {
                "Add or remove categories so both documents list the same names"
            }
            LayoutError::BinConflict { .. } => "Give every bin to exactly one category, once",
            LayoutError::OutOfRange { .. } => {
                "Use bins inside the configured letter range, or widen the range"
            }
            LayoutError::Capacity { .. } => "Assign more bins to the category or remove items",
            LayoutError::ConfigError { .. }
            | LayoutError::InvalidConfigValueError { .. }
            | LayoutError::TomlError(_) => "Review the command-line flags or the TOML config",
            LayoutError::CsvError(_) | LayoutError::IoError(_) => {
                "Check that the output location is writable"
            }
        }
    }

    /// The validation report attached to batched validation failures.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            LayoutError::CategoryMismatch { report } | LayoutError::BinConflict { report } => {
                Some(report)
            }
            _ => None,
        }
    }
}

fn quote_all(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_lists_counts_and_bins() {
        let err = LayoutError::Capacity {
            category: "Tools".to_string(),
            items: 10,
            capacity: 9,
            bins: vec!["A1".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("10 items"));
        assert!(message.contains("9 slots"));
        assert!(message.contains("['A1']"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.category(), ErrorCategory::Layout);
    }

    #[test]
    fn test_duplicate_key_message_names_every_key() {
        let err = LayoutError::DuplicateKey {
            source_name: "categories.json".to_string(),
            keys: vec!["Tools".to_string(), "Misc".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Duplicate JSON keys found in categories.json: 'Tools', 'Misc'"
        );
    }

    #[test]
    fn test_validation_exit_codes() {
        let report = ValidationReport::default();
        assert_eq!(
            LayoutError::CategoryMismatch {
                report: report.clone()
            }
            .exit_code(),
            2
        );
        assert_eq!(LayoutError::BinConflict { report }.exit_code(), 3);
    }
}
