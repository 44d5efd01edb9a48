//! Error types for oracle judgement calls.
//!
//! Every failure mode of the judgement oracle is recoverable: the pipeline
//! stages catch these errors and degrade to their documented deterministic
//! fallback, so none of them ever escapes the curation entry point.

use thiserror::Error;

/// Errors produced while obtaining or decoding an oracle judgement.
#[derive(Error, Debug)]
pub enum OracleError {
    /// The request to the backing model failed (transport or API error).
    #[error("oracle request failed: {0}")]
    Request(String),

    /// The oracle returned no usable content.
    #[error("oracle returned an empty response")]
    EmptyResponse,

    /// The oracle response could not be decoded as structured data.
    #[error("could not parse oracle response: {0}")]
    Parse(String),
}

/// Type alias for [`Result<T, OracleError>`].
pub type Result<T> = std::result::Result<T, OracleError>;
