//! Directus client error types
//!
//! Errors carry the HTTP method and path of the failing call so that the
//! migration log can name the operation without extra context.

use thiserror::Error;

/// Error that can occur while talking to a Directus instance.
#[derive(Debug, Error)]
pub enum DirectusError {
    /// The request never produced an HTTP response (DNS, TLS, connect, timeout).
    #[error("{method} {path} failed: {source}")]
    Transport {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{method} {path} returned {status}: {body}")]
    Api {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response from {method} {path}: {message}")]
    Decode {
        method: &'static str,
        path: String,
        message: String,
    },

    /// Client configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl DirectusError {
    /// HTTP status returned by the server, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            DirectusError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the entity as missing.
    ///
    /// Directus answers `403 Forbidden` rather than `404` for collections that
    /// do not exist, so both count as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(403 | 404))
    }

    /// Whether the error is a connectivity problem rather than a server answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, DirectusError::Transport { .. })
    }

    /// Whether the server answered with a 5xx status.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

/// Result type for Directus client operations.
pub type DirectusResult<T> = Result<T, DirectusError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> DirectusError {
        DirectusError::Api {
            method: "GET",
            path: "collections/articles".to_string(),
            status,
            body: "{}".to_string(),
        }
    }

    #[test]
    fn test_not_found_covers_forbidden() {
        assert!(api(404).is_not_found());
        assert!(api(403).is_not_found());
        assert!(!api(400).is_not_found());
        assert!(!DirectusError::InvalidConfiguration("x".into()).is_not_found());
    }

    #[test]
    fn test_server_error_classification() {
        assert!(api(500).is_server_error());
        assert!(api(503).is_server_error());
        assert!(!api(422).is_server_error());
    }

    #[test]
    fn test_display_names_operation() {
        let err = api(500);
        assert_eq!(
            err.to_string(),
            "GET collections/articles returned 500: {}"
        );
    }
}
