//! Domain errors for the resplan planning services.

use thiserror::Error;

/// A user-correctable validation failure.
///
/// `field` names the input the message belongs to (for example
/// `start_date`) when the failure is attached to a single field; it is
/// `None` for failures spanning several records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

/// Domain-level errors that can occur in resplan.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A stale reference surfaced while removing records during a confirm.
    /// Not user-correctable.
    #[error("Unexpected failure while removing {entity}: {source}")]
    CleanupFailed {
        entity: &'static str,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Conversation has not been started; call init first")]
    ConversationNotStarted,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message))
    }

    /// Returns the validation payload when this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_field() {
        let err: DomainError = ValidationError::for_field("start_date", "empty").into();
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.field.as_deref(), Some("start_date"));
        assert_eq!(err.to_string(), "Validation failed: empty");
    }

    #[test]
    fn test_cleanup_failed_wraps_source() {
        let err = DomainError::CleanupFailed {
            entity: "order sequence",
            source: Box::new(DomainError::not_found("OrderSequence", "abc")),
        };
        assert!(err.to_string().contains("OrderSequence not found: abc"));
        assert!(!err.is_validation());
    }
}
