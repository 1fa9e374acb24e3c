use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Host error: {0}")]
    Host(String),
    #[error("Print window could not be opened")]
    PrintBlocked,
    #[error("No generated image to export")]
    NothingToExport,
}

impl GenerateError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GenerateError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GenerateError::Validation { .. })
    }

    /// The text shown to the user after the localized error prefix.
    pub fn detail(&self) -> String {
        match self {
            GenerateError::Validation { message, .. } => message.clone(),
            GenerateError::Transport(msg)
            | GenerateError::Parsing(msg)
            | GenerateError::Host(msg) => msg.clone(),
            GenerateError::Service { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
