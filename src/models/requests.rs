//! Request parameters for the cache node API
//!
//! Every operation takes its input from the query string. An empty
//! parameter counts as missing, and a repeated one keeps its first value.

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Query parameters for `/cache/set` and `/cache/broadcast_set`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WriteParams {
    pub key: Option<String>,
    pub value: Option<String>,
    pub ttl: Option<String>,
}

/// A write that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWrite {
    pub key: String,
    pub value: String,
    /// TTL in seconds; may be zero or negative
    pub ttl: i64,
}

impl WriteParams {
    /// Builds params from decoded query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            key: first_value(pairs, "key"),
            value: first_value(pairs, "value"),
            ttl: first_value(pairs, "ttl"),
        }
    }

    /// Checks presence of all three parameters, then parses the TTL.
    pub fn validate(self) -> Result<ValidatedWrite> {
        let (key, value, ttl) = match (
            non_empty(self.key),
            non_empty(self.value),
            non_empty(self.ttl),
        ) {
            (Some(key), Some(value), Some(ttl)) => (key, value, ttl),
            _ => return Err(CacheError::InvalidRequest("Missing parameters".to_string())),
        };

        let ttl = ttl
            .parse::<i64>()
            .map_err(|_| CacheError::InvalidRequest("Invalid TTL".to_string()))?;

        Ok(ValidatedWrite { key, value, ttl })
    }
}

/// Query parameters for `/cache/get`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadParams {
    pub key: Option<String>,
}

impl ReadParams {
    /// Builds params from decoded query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            key: first_value(pairs, "key"),
        }
    }

    pub fn validate(self) -> Result<String> {
        non_empty(self.key)
            .ok_or_else(|| CacheError::InvalidRequest("Missing key parameter".to_string()))
    }
}

fn first_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
}

fn non_empty(param: Option<String>) -> Option<String> {
    param.filter(|s| !s.is_empty())
}
