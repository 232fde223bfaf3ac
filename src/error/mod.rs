use std::path::Path;
use thiserror::Error;

pub mod codes;

pub use codes::ErrorCode;

/// The unified error type for fnkit
///
/// Component APIs return narrow error types (`PathError`, `DebounceError`) or
/// the caller's own error type; this enum is what the CLI and demo layers
/// lift everything into.
#[derive(Error, Debug)]
pub enum FnkitError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Invalid path '{path}': {message}")]
    InvalidPath {
        code: u16,
        message: String,
        path: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Stage failed: {message}")]
    StageFailure {
        code: u16,
        message: String,
        stage: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Scheduler unavailable: {message}")]
    SchedulerUnavailable {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl FnkitError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// The configuration file could not be read
    pub fn config_not_found(path: &Path) -> Self {
        Self::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            format!("Configuration file not found: {}", path.display()),
        )
    }

    /// A configuration field holds a value outside its domain
    pub fn invalid_config_value(field: &str, value: &str, reason: &str) -> Self {
        Self::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            format!("Invalid value '{}' for '{}': {}", value, field, reason),
        )
    }

    /// Create an invalid path error with specific code
    pub fn invalid_path(code: u16, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidPath {
            code,
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    /// Lift a user stage failure into the crate error
    pub fn stage_failure(message: impl Into<String>) -> Self {
        Self::StageFailure {
            code: ErrorCode::STAGE_FAILED,
            message: message.into(),
            stage: None,
            source: None,
        }
    }

    /// Create a scheduler unavailable error
    pub fn scheduler_unavailable(message: impl Into<String>) -> Self {
        Self::SchedulerUnavailable {
            code: ErrorCode::SCHEDULER_UNAVAILABLE,
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create an other error with specific code
    pub fn other_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Other {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::InvalidPath { source: src, .. }
            | Self::StageFailure { source: src, .. }
            | Self::SchedulerUnavailable { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Name the stage of a stage failure
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        if let Self::StageFailure {
            stage: ref mut s, ..
        } = self
        {
            *s = Some(stage.into());
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::InvalidPath { .. } => 3,
            Self::StageFailure { .. } => 4,
            Self::SchedulerUnavailable { .. } => 5,
            Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::InvalidPath { code, .. }
            | Self::StageFailure { code, .. }
            | Self::SchedulerUnavailable { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::InvalidPath { message, path, .. } => {
                format!("Cannot update '{}': {}", path, message)
            }
            Self::StageFailure { message, stage, .. } => {
                if let Some(name) = stage {
                    format!("Stage '{}' failed: {}", name, message)
                } else {
                    format!("Stage failed: {}", message)
                }
            }
            Self::SchedulerUnavailable { message, .. } => {
                format!("No scheduler available: {}", message)
            }
            Self::Other { message, .. } => message.clone(),
        }
    }
}

/// Type alias for Results using FnkitError
pub type Result<T> = std::result::Result<T, FnkitError>;

impl From<serde_yaml::Error> for FnkitError {
    fn from(err: serde_yaml::Error) -> Self {
        FnkitError::config_with_code(ErrorCode::CONFIG_INVALID_YAML, "Invalid YAML syntax")
            .with_source(err)
    }
}

impl From<serde_json::Error> for FnkitError {
    fn from(err: serde_json::Error) -> Self {
        FnkitError::other_with_code(ErrorCode::OTHER_INVALID_INPUT, "Invalid JSON input")
            .with_source(err)
    }
}

impl From<crate::core::path_update::PathError> for FnkitError {
    fn from(err: crate::core::path_update::PathError) -> Self {
        use crate::core::path_update::PathError;

        let code = match &err {
            PathError::NotIndexable { .. } => ErrorCode::PATH_NOT_INDEXABLE,
            PathError::MissingKey { .. } => ErrorCode::PATH_MISSING_KEY,
            PathError::IndexOutOfBounds { .. } => ErrorCode::PATH_INDEX_OUT_OF_BOUNDS,
            PathError::KeyKindMismatch { .. } => ErrorCode::PATH_KEY_KIND_MISMATCH,
        };
        let path = err.path().to_string();
        FnkitError::invalid_path(code, err.to_string(), path)
    }
}

impl From<crate::debounce::DebounceError> for FnkitError {
    fn from(err: crate::debounce::DebounceError) -> Self {
        match err {
            crate::debounce::DebounceError::SchedulerUnavailable(msg) => {
                FnkitError::scheduler_unavailable(msg)
            }
        }
    }
}
