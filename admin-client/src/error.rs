use thiserror::Error;

/// Failure reported by a remote data service.
#[derive(Debug, Error)]
pub enum ServiceError {
    // HTTP ошибки
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    // Бизнес-логика ошибки
    #[error("Resource not found")]
    NotFound,

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Request rejected: {}", .0.as_deref().unwrap_or("no details"))]
    Rejected(Option<String>),

    // Ошибки сериализации/десериализации
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ServiceError {
    /// Human-readable message carried by the failure, if the service gave one.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Status { message, .. } | Self::Rejected(message) => message.clone(),
            Self::Unsupported(message) | Self::SerializationError(message) => {
                Some(message.clone())
            }
            Self::HttpError(_) | Self::NotFound => Some(self.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound)
    }
}

/// Error raised while binding form input to a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// What went wrong with a controller operation, as shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("{0}")]
    Load(String),

    #[error("{0}")]
    Mutation(String),

    #[error("{0}")]
    RejectedTransition(String),
}

impl Failure {
    pub fn message(&self) -> &str {
        match self {
            Self::Load(message) | Self::Mutation(message) | Self::RejectedTransition(message) => {
                message
            }
        }
    }
}
