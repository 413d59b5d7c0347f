use super::{TextService, TextStream};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One scripted reply for `generate_stream`.
#[derive(Debug, Clone)]
struct StreamScript {
    chunks: Vec<String>,
    /// When set, the stream yields its chunks and then this error.
    trailing_error: Option<String>,
}

/// Deterministic [`TextService`] fake.
///
/// Responses are scripted with the `with_*` builders and cycled when
/// exhausted. Cloning shares the underlying scripts and counters, so a clone
/// kept by a test observes calls made through the service under test.
#[derive(Clone)]
pub struct MockTextClient {
    text_responses: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    stream_scripts: Arc<Mutex<Vec<StreamScript>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            text_responses: Arc::new(Mutex::new(Vec::new())),
            stream_scripts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_text_response(self, response: impl Into<String>) -> Self {
        self.text_responses.lock().unwrap().push(Ok(response.into()));
        self
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.text_responses
            .lock()
            .unwrap()
            .push(Err(message.into()));
        self
    }

    pub fn with_stream_chunks(self, chunks: Vec<&str>) -> Self {
        self.stream_scripts.lock().unwrap().push(StreamScript {
            chunks: chunks.into_iter().map(String::from).collect(),
            trailing_error: None,
        });
        self
    }

    /// Script a stream that yields `chunks` and then fails mid-stream.
    pub fn with_stream_failure(self, chunks: Vec<&str>, message: impl Into<String>) -> Self {
        self.stream_scripts.lock().unwrap().push(StreamScript {
            chunks: chunks.into_iter().map(String::from).collect(),
            trailing_error: Some(message.into()),
        });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn next_index(&self, len: usize) -> usize {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        (*count - 1) % len.max(1)
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextService for MockTextClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let responses = self.text_responses.lock().unwrap().clone();
        let index = self.next_index(responses.len());

        if responses.is_empty() {
            // Default mock response
            return Ok(format!("Mock response for: {}", prompt));
        }

        match responses[index].clone() {
            Ok(text) => Ok(text),
            Err(message) => Err(Error::AiProvider(message)),
        }
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream> {
        let scripts = self.stream_scripts.lock().unwrap().clone();

        let script = if scripts.is_empty() {
            // Fall back to the text script, split into word-sized chunks so
            // that concatenation still equals the unary result.
            let text = self.generate(prompt).await?;
            StreamScript {
                chunks: text.split_inclusive(' ').map(String::from).collect(),
                trailing_error: None,
            }
        } else {
            let index = self.next_index(scripts.len());
            scripts[index].clone()
        };

        let mut items: Vec<Result<String>> = script.chunks.into_iter().map(Ok).collect();
        if let Some(message) = script.trailing_error {
            items.push(Err(Error::AiProvider(message)));
        }

        Ok(Box::pin(tokio_stream::iter(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_default_response_mentions_prompt() {
        let client = MockTextClient::new();

        let text = client.generate("Define entropy").await.unwrap();
        assert!(text.contains("Define entropy"));
    }

    #[tokio::test]
    async fn test_scripted_responses_cycle() {
        let client = MockTextClient::new()
            .with_text_response("first")
            .with_text_response("second");

        assert_eq!(client.generate("x").await.unwrap(), "first");
        assert_eq!(client.generate("x").await.unwrap(), "second");
        assert_eq!(client.generate("x").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_scripted_error_surfaces_as_provider_error() {
        let client = MockTextClient::new().with_error("quota exceeded");

        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(ref m) if m == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_default_stream_concatenates_to_unary_result() {
        let unary = MockTextClient::new();
        let streaming = MockTextClient::new();

        let whole = unary.generate("entropy").await.unwrap();

        let stream = streaming.generate_stream("entropy").await.unwrap();
        let fragments: Vec<String> = stream.map(|item| item.unwrap()).collect().await;

        assert!(fragments.len() > 1);
        assert_eq!(fragments.concat(), whole);
    }

    #[tokio::test]
    async fn test_stream_failure_script_ends_with_error() {
        let client = MockTextClient::new().with_stream_failure(vec!["partial "], "cut off");

        let stream = client.generate_stream("x").await.unwrap();
        let items: Vec<Result<String>> = stream.collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), "partial ");
        assert!(items[1].is_err());
    }

    #[tokio::test]
    async fn test_call_count_tracks_both_operations() {
        let client = MockTextClient::new().with_text_response("text");
        let probe = client.clone();

        client.generate("x").await.unwrap();
        client.generate_stream("x").await.unwrap();

        assert_eq!(probe.get_call_count(), 2);
    }
}
