//! Configuration for the chat oracle.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for judgement requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Chat model to use (e.g. "gpt-4o")
    pub model: String,

    /// Maximum tokens for a judgement response
    pub max_tokens: usize,
}

impl OracleConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `LECTURA_MODEL`: Model name (default: "gpt-4o")
    /// - `LECTURA_MAX_TOKENS`: Max tokens (default: 4096)
    #[must_use = "creates config from environment variables"]
    pub fn from_env() -> Self {
        let model = env::var("LECTURA_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let max_tokens = env::var("LECTURA_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4096);

        Self { model, max_tokens }
    }
}

impl Default for OracleConfig {
    #[inline]
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_tokens: 4096,
        }
    }
}
