//! Errors shared by the stores, configuration and the CLI.
//!
//! An [`Error`] is a numbered code plus a message, with optional context,
//! a hint for the user and the underlying cause. The thousands digit of the
//! code picks the process exit status (see [`exit_codes`]).

use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Numbered error codes
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // 1xxx: bugs and environment
    Internal = 1001,

    // 2xxx: filesystem
    Io = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // 3xxx: configuration
    Config = 3000,
    ConfigNotFound = 3001,
    ConfigParse = 3002,
    ConfigInvalid = 3003,

    // 4xxx: store files
    Storage = 4000,
    StoreCorrupted = 4001,
    StoreWriteFailed = 4002,

    // 6xxx: user input
    Validation = 6000,
    UnknownUf = 6001,
    LocationNotFound = 6002,
}

impl ErrorCode {
    /// Numeric value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Short name of the code's range
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            2 => "io",
            3 => "config",
            4 => "storage",
            6 => "input",
            _ => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GC{}", self.code())
    }
}

/// geocatalog error
#[derive(Error, Debug)]
pub struct Error {
    /// What kind of failure
    pub code: ErrorCode,
    /// One-line description
    pub message: String,
    /// What was being done when it failed
    pub context: Option<String>,
    /// Hint for the user
    pub suggestion: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        if let Some(context) = &self.context {
            write!(f, "\n  while {}", context)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Error with no context, hint or cause
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Describe what was being done
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a hint
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Serializable view for JSON output
    pub fn report(&self) -> ErrorReport<'_> {
        ErrorReport {
            code: self.code,
            category: self.code.category(),
            message: &self.message,
            context: self.context.as_deref(),
            suggestion: self.suggestion.as_deref(),
            cause: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    /// Configuration problem
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    /// A `--config` path that does not exist
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .geocatalog.toml file or use --config to specify a path")
    }

    /// A store file exists but does not decode
    pub fn store_corrupted(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::StoreCorrupted,
            format!("Store file is not valid: {}", path.as_ref().display()),
        )
        .with_suggestion("Restore the file from a backup or move it aside to start fresh")
    }

    /// Rejected user input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// A state code outside the UF table
    pub fn unknown_uf(uf: &str) -> Self {
        Self::new(ErrorCode::UnknownUf, format!("'{}' is not a known UF", uf.trim()))
            .with_suggestion("Pass the state name with --name, or run `geocatalog ufs`")
    }

    /// No stored location with this name in the city
    pub fn location_not_found(name: &str, city: &str, state: &str) -> Self {
        Self::new(
            ErrorCode::LocationNotFound,
            format!("No location named '{}' in {}/{}", name, city.trim(), state.trim().to_uppercase()),
        )
        .with_suggestion("Run `geocatalog location list --city <CITY> --state <UF>`")
    }
}

/// JSON shape of an [`Error`]
#[derive(Debug, Serialize)]
pub struct ErrorReport<'a> {
    /// Numbered code
    pub code: ErrorCode,
    /// Range of the code
    pub category: &'static str,
    /// One-line description
    pub message: &'a str,
    /// What was being done
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a str>,
    /// Hint for the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
    /// Underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit statuses
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const STORAGE_ERROR: i32 = 4;

    /// Exit status for an error code
    pub fn for_code(code: super::ErrorCode) -> i32 {
        match code.code() / 1000 {
            2 | 4 => STORAGE_ERROR,
            3 => CONFIG_ERROR,
            6 => VALIDATION_ERROR,
            _ => FAILURE,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::Io,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Storage, format!("JSON encoding failed: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParse, err.message().to_string()).with_source(err)
    }
}

/// Add context to a [`Result`] in place
pub trait ResultExt<T> {
    /// Describe what was being done
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a hint
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
