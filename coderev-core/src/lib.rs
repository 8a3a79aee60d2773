//! coderev core - review generation for submitted source code
//!
//! This crate turns a raw code submission into a structured review: it
//! validates the input, issues one chat-completion request to the configured
//! model provider, coerces the response into the fixed review schema, and
//! persists the result as an immutable, owner-scoped record.

pub mod config;
pub mod error;
pub mod language;
pub mod model;
pub mod review;
pub mod secrets;

pub use config::{Config, ModelConfig, StorageConfig};
pub use error::{Error, Result};
pub use language::{resolve_language, Language};
pub use model::{ModelClient, ReviewModel};
pub use review::{Review, ReviewOutput, ReviewService, ReviewSummary};
pub use secrets::Secrets;
