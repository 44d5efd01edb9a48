//! Chat-model judgement oracle for lecture script curation.
//!
//! This crate binds the [`lectura_core::Oracle`] capability interface to an
//! OpenAI-compatible chat endpoint. It owns everything the pipeline must not
//! know about: HTTP transport, prompt construction, and the defensive
//! decoding of best-effort model output.
//!
//! # Example
//!
//! ```no_run
//! use lectura_oracle::{ChatClient, ChatOracle, OracleConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = ChatClient::new()?;
//! let oracle = ChatOracle::new(client, OracleConfig::default());
//! // pass `&oracle` to lectura_curate::curate
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod oracle;
pub mod response;

pub use client::ChatClient;
pub use config::OracleConfig;
pub use oracle::ChatOracle;
pub use response::{extract_json, parse_assignment_reply, parse_cohesion_reply};
