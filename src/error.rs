use thiserror::Error;

/// Boxed error for carrying arbitrary underlying failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application error taxonomy shared by the repository, service, and API
/// layers. Each variant carries a message that is safe to expose to
/// clients; internal failures additionally carry the root cause, which is
/// only ever logged server-side.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Internal error with the underlying cause attached.
    pub fn internal(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Internal error where no underlying cause is available.
    pub fn internal_message(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_the_display_output() {
        let err = AppError::bad_request("no fields to update");
        assert_eq!(err.to_string(), "no fields to update");
    }

    #[test]
    fn internal_error_hides_cause_from_display() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = AppError::internal("failed to query company", cause);

        assert_eq!(err.to_string(), "failed to query company");
    }

    #[test]
    fn internal_error_keeps_cause_as_source() {
        use std::error::Error;

        let cause = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = AppError::internal("failed to query company", cause);

        let source = err.source().expect("cause should be preserved");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn internal_message_has_no_source() {
        use std::error::Error;

        let err = AppError::internal_message("unexpected error occurred");
        assert!(err.source().is_none());
    }
}
