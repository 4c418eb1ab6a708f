//! Error taxonomy for provider calls and operator input

use thiserror::Error;

/// Coarse classification of a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    Transport,
    Validation,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::PermissionDenied => write!(f, "permission_denied"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Validation => write!(f, "validation"),
        }
    }
}

/// Failure returned by a single provider call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{operation}: resource not found: {message}")]
    NotFound {
        operation: &'static str,
        message: String,
    },
    #[error("{operation}: permission denied: {message}")]
    PermissionDenied {
        operation: &'static str,
        message: String,
    },
    #[error("{operation}: request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
    #[error("{operation}: invalid request: {message}")]
    Validation {
        operation: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn new(kind: ErrorKind, operation: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::NotFound => ProviderError::NotFound { operation, message },
            ErrorKind::PermissionDenied => ProviderError::PermissionDenied { operation, message },
            ErrorKind::Transport => ProviderError::Transport { operation, message },
            ErrorKind::Validation => ProviderError::Validation { operation, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::NotFound { .. } => ErrorKind::NotFound,
            ProviderError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            ProviderError::Transport { .. } => ErrorKind::Transport,
            ProviderError::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            ProviderError::NotFound { operation, .. }
            | ProviderError::PermissionDenied { operation, .. }
            | ProviderError::Transport { operation, .. }
            | ProviderError::Validation { operation, .. } => operation,
        }
    }

    /// Raw provider message without the operation prefix
    pub fn message(&self) -> &str {
        match self {
            ProviderError::NotFound { message, .. }
            | ProviderError::PermissionDenied { message, .. }
            | ProviderError::Transport { message, .. }
            | ProviderError::Validation { message, .. } => message,
        }
    }
}

/// Map an AWS service error code onto an [`ErrorKind`].
///
/// Unknown or missing codes are treated as transport faults.
pub fn classify_error_code(code: Option<&str>) -> ErrorKind {
    let Some(code) = code else {
        return ErrorKind::Transport;
    };

    match code {
        "AccessDenied" | "AccessDeniedException" | "UnauthorizedOperation"
        | "UnrecognizedClientException" | "InvalidClientTokenId" | "ExpiredToken"
        | "ExpiredTokenException" | "SignatureDoesNotMatch" => ErrorKind::PermissionDenied,
        "ValidationError" | "ValidationException" | "BadRequest" | "MissingParameter"
        | "IncompatibleParameterError" => ErrorKind::Validation,
        c if c.starts_with("InvalidParameter") => ErrorKind::Validation,
        c if c.ends_with("NotFound") || c.ends_with("NotFoundException") => ErrorKind::NotFound,
        _ => ErrorKind::Transport,
    }
}

/// Errors raised while reading operator choices
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no file systems to choose from")]
    NothingToSelect,
    #[error("input closed before a file system was selected")]
    InputClosed,
    #[error("failed to read operator input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading provisioning configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid config: {0}")]
    Validation(String),
}
