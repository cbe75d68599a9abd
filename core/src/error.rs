//! Error types for the chart request builder.
//!
//! # Design
//! Configuration problems are caught before any network activity and always
//! carry a fixed message. Transport problems keep the numeric code and message
//! of the failure so callers can log or branch on them. A reply with a non-2xx
//! status is not an error at all; the body is handed back untouched.

/// A required parameter was missing when the URL was built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("data required")]
    DataRequired,

    #[error("size required")]
    SizeRequired,
}

/// The HTTP GET failed below the HTTP layer (DNS, connect, timeout, I/O).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error {code}: {message}")]
pub struct TransportError {
    pub code: i32,
    pub message: String,
}

impl TransportError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Errors returned by `QrRequestBuilder::view` and `QrRequestBuilder::create`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_messages() {
        assert_eq!(ConfigurationError::DataRequired.to_string(), "data required");
        assert_eq!(ConfigurationError::SizeRequired.to_string(), "size required");
    }

    #[test]
    fn transport_error_display_includes_code() {
        let err = TransportError::new(7, "connection refused");
        assert_eq!(err.to_string(), "transport error 7: connection refused");
    }

    #[test]
    fn qr_error_is_transparent() {
        let err: QrError = ConfigurationError::SizeRequired.into();
        assert_eq!(err.to_string(), "size required");
        let err: QrError = TransportError::new(28, "timed out").into();
        assert_eq!(err.to_string(), "transport error 28: timed out");
    }
}
