//! Photo Transform Proxy library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `openai`: Thin client for the OpenAI image-edit REST endpoint.
//! - `transform`: Prompt table and canvas normalization for uploads.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config` and
//! `OpenAiImageClient`.
pub mod api;
pub mod config;
pub mod error;
pub mod openai;
pub mod transform;

pub use config::Config;
pub use openai::client::OpenAiImageClient;
