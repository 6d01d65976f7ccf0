//! Error types for the cache node
//!
//! Provides unified error handling using thiserror. Every error is scoped to
//! a single request; none of them stops the node.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache node and load balancer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Missing or malformed request parameter
    #[error("{0}")]
    InvalidRequest(String),

    /// Key absent or expired, locally or at the peer a read was forwarded to
    #[error("{0}")]
    NotFound(String),

    /// A call to another node failed
    #[error("Peer unreachable: {0}")]
    PeerUnreachable(String),
}

impl CacheError {
    /// The response body used for every missing or expired key.
    pub fn key_not_found() -> Self {
        CacheError::NotFound("Key not found or expired".to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            CacheError::PeerUnreachable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, message).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache node.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CacheError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (CacheError::key_not_found(), StatusCode::NOT_FOUND),
            (
                CacheError::PeerUnreachable("localhost:1".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_display_is_bare_message() {
        let err = CacheError::InvalidRequest("Invalid TTL".into());
        assert_eq!(err.to_string(), "Invalid TTL");
    }
}
