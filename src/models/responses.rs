//! Response types for the cache node API
//!
//! Successful writes answer in plain text; reads answer with the value
//! encoded as JSON.

use serde::Serialize;

/// Confirmation text sent back for an accepted client write.
pub fn set_confirmation(key: &str) -> String {
    format!("Cache entry set for key: {}", key)
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
