//! Error types for sample learning, generation and grid I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Sample text does not follow the `;`-separated grid format
    ///
    /// Lenient readers recover from this by yielding an empty grid; only
    /// strict parsing surfaces it to callers.
    Format {
        /// One-based line number where the problem was detected
        line: usize,
        /// Description of what is wrong with the line
        reason: String,
    },

    /// Generation was requested from a model that learned no tile types
    EmptyModel,

    /// Caller-supplied parameter failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Internal consistency check failed
    ///
    /// Raised for out-of-range indices, queue/grid size mismatches and
    /// not-a-number probabilities. Aborts the current generation.
    InvariantViolation {
        /// Name of the operation that detected the violation
        operation: &'static str,
        /// Description of the broken invariant
        reason: String,
    },

    /// Grid label is not part of the catalog it is being rendered against
    UnknownLabel {
        /// The offending label
        label: String,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl GenerationError {
    /// Whether the error signals an internal bug rather than bad input
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format { line, reason } => {
                write!(f, "Malformed grid text at line {line}: {reason}")
            }
            Self::EmptyModel => {
                write!(
                    f,
                    "Sample model is empty: learn from a non-empty sample grid before generating"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvariantViolation { operation, reason } => {
                write!(f, "Invariant violated in {operation}: {reason}")
            }
            Self::UnknownLabel { label } => {
                write!(f, "Label '{label}' is not part of the tile catalog")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(operation: &'static str, reason: &impl ToString) -> GenerationError {
    GenerationError::InvariantViolation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a format error for the given one-based line
pub fn format_error(line: usize, reason: &impl ToString) -> GenerationError {
    GenerationError::Format {
        line,
        reason: reason.to_string(),
    }
}

/// Create a general I/O error for CLI target handling
pub fn io_error(msg: &str) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
