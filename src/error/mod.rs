//! Error handling for the opencraft metrics plugin

use thiserror::Error;

/// Custom error types for the opencraft metrics plugin
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing keys, rejected combinations)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Option value validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Worker output without a `timestamp` header line
    #[error("Worker node {node}: no header line containing 'timestamp' found in output")]
    MissingHeader { node: usize },

    /// Worker header line without a required column
    #[error("Worker node {node}: header has no '{column}' column")]
    MissingColumn { node: usize, column: String },

    /// Endpoint line whose latency is not an integer
    #[error("Malformed endpoint line (expected integer latency): {line:?}")]
    MalformedValue { line: String },

    /// Worker and endpoint metric lists cannot be paired
    #[error("Cannot merge {workers} worker metric record(s) with {endpoints} endpoint metric record(s)")]
    LengthMismatch { workers: usize, endpoints: usize },

    /// I/O errors (reading log and config files)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (JSON, numbers)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Output rendering errors (table, CSV)
    #[error("Output error: {0}")]
    Output(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new output error
    pub fn output<S: Into<String>>(message: S) -> Self {
        Self::Output(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Create a missing-header error for a worker node
    pub fn missing_header(node: usize) -> Self {
        Self::MissingHeader { node }
    }

    /// Create a malformed-value error carrying the offending line
    pub fn malformed_value<S: Into<String>>(line: S) -> Self {
        Self::MalformedValue { line: line.into() }
    }

    /// Create a length-mismatch error reporting both list lengths
    pub fn length_mismatch(workers: usize, endpoints: usize) -> Self {
        Self::LengthMismatch { workers, endpoints }
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::MissingHeader { .. } | Self::MissingColumn { .. } => "WORKER",
            Self::MalformedValue { .. } => "ENDPOINT",
            Self::LengthMismatch { .. } => "MERGE",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Output(_) => "OUTPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check the [benchmark] and [infrastructure] sections of your configuration.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid option value: {}\n\nSuggestion: steps_bot must be at least 1 and join_strategy one of LinearJoin, FixedJoin, Default.", msg)
            }
            Self::MissingHeader { node } => {
                format!("Worker node {} produced no metrics table.\n\nSuggestion: The game server may have crashed before writing its metrics; inspect that node's console log.", node)
            }
            Self::MissingColumn { node, column } => {
                format!("Worker node {} metrics table lacks the '{}' column.\n\nSuggestion: The server's metrics format may have changed.", node, column)
            }
            Self::MalformedValue { line } => {
                format!("Could not read a latency from bot output line {:?}.\n\nSuggestion: Dig/Place lines must end in an integer latency.", line)
            }
            Self::LengthMismatch { workers, endpoints } => {
                format!("Got {} worker result(s) but {} endpoint result(s).\n\nSuggestion: Every worker needs an endpoint result; run with at most one worker.", workers, endpoints)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check that the log and config paths exist and are readable.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check the format of your input data or configuration files.", msg)
            }
            Self::Output(msg) => {
                format!("Failed to render output: {}", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::MissingHeader { .. } | Self::MissingColumn { .. } | Self::MalformedValue { .. } => 2,
            Self::LengthMismatch { .. } | Self::Output(_) => 3,
            Self::Io(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::MissingHeader { .. } | Self::MissingColumn { .. } | Self::MalformedValue { .. } => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::LengthMismatch { .. } | Self::Output(_) | Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(error: std::fmt::Error) -> Self {
        Self::output(format!("Formatting error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        Self::output(format!("CSV error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let original_error = e.into();
            match original_error {
                AppError::Io(msg) => AppError::io(format!("{}: {}", f(), msg)),
                other => AppError::internal(format!("{}: {}", f(), other)),
            }
        })
    }
}

/// Error reporter for user feedback on the console
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", error.format_for_console(self.use_color));

        if self.verbose {
            eprintln!();
            eprintln!("{}", error.user_friendly_message());
        }
    }
}
