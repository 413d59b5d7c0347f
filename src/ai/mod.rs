//! AI service integration for text generation
//!
//! Provides the model-client capability both handlers are parameterized
//! over, a Gemini implementation, and a scripted mock for tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiTextClient;
pub use mock::MockTextClient;

use crate::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Ordered, finite sequence of text fragments from the model.
///
/// An `Err` item is terminal: no further fragments follow it.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait]
pub trait TextService: Send + Sync {
    /// Generate the full text for a prompt in one call.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text incrementally. Fails up front on transport or API
    /// errors; mid-stream failures surface as an `Err` fragment.
    async fn generate_stream(&self, prompt: &str) -> Result<TextStream>;
}
