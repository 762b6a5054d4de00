//! # Astro AI
//!
//! A palm-reading astrology report service driven by a tool-calling LLM agent.
//!
//! This library provides:
//! - An HTTP API accepting user biodata and two palm images
//! - Google Drive storage for the uploaded images (public URLs)
//! - A tool-based agent loop that produces the final astrology report
//!
//! ## Architecture
//!
//! The service follows the "tools in a loop" pattern:
//! 1. Receive biodata and palm images via `POST /read`
//! 2. Upload both images to Drive and embed the public URLs in the prompt
//! 3. Call the LLM, execute any tool calls it requests, feed results back
//! 4. Repeat until the model answers without tool calls; return that text
//!
//! ## Example
//!
//! ```rust,ignore
//! use astro_ai::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod storage;
pub mod tools;

pub use config::Config;
