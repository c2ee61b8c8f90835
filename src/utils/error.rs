use thiserror::Error;

use crate::domain::model::Operation;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Arithmetic overflow: {a} {op} {b}", op = .operation.symbol())]
    Overflow { operation: Operation, a: i64, b: i64 },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

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
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Arithmetic,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn division_by_zero() -> Self {
        CalcError::InvalidArgument {
            message: "division by zero is not permitted".to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InvalidArgument { .. } | CalcError::Overflow { .. } => {
                ErrorCategory::Arithmetic
            }
            CalcError::ParseError { .. } | CalcError::CsvError(_) => ErrorCategory::Input,
            CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CalcError::IoError(_)
            | CalcError::SerializationError(_)
            | CalcError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Arithmetic => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalcError::InvalidArgument { .. } => "Check the operands; the divisor must not be 0",
            CalcError::Overflow { .. } => {
                "Use smaller operands or switch overflow mode to \"wrapping\""
            }
            CalcError::ParseError { .. } | CalcError::CsvError(_) => {
                "Input must be CSV with header 'operation,a,b' (optional 'id')"
            }
            CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => "Check the job file or command-line arguments",
            CalcError::IoError(_) => "Check that the paths exist and are writable",
            CalcError::SerializationError(_) | CalcError::ZipError(_) => {
                "Re-run with --verbose and check the output directory"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::InvalidArgument { message } => format!("Invalid argument: {}", message),
            CalcError::Overflow { operation, a, b } => format!(
                "{} {} {} does not fit in a 64-bit integer",
                a,
                operation.symbol(),
                b
            ),
            CalcError::ParseError { line, message } => {
                format!("Line {} of the input is malformed: {}", line, message)
            }
            CalcError::MissingConfigError { field } => format!("Missing required setting: {}", field),
            other => other.to_string(),
        }
    }
}
