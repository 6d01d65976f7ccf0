//! Request and Response models for the cache node API

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ReadParams, ValidatedWrite, WriteParams};
pub use responses::{set_confirmation, HealthResponse};
