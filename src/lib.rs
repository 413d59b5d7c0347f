//! ascii-oracle - proxies topic requests to a generative-language API
//!
//! Exposes two POST endpoints: `/api/art` returns ASCII art plus a
//! one-sentence description as JSON, `/api/stream` streams a plain-text
//! definition. A reqwest-based [`fetcher::ResultFetcher`] consumes both.

pub mod ai;
pub mod api;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod models;
pub mod prompts;
pub mod state;

pub use error::{Error, Result};
