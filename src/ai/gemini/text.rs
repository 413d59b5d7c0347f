use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::{TextService, TextStream};
use crate::{Error, Result};
use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Gemini-backed implementation of [`TextService`].
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(30),
                client,
            ),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
    }

    /// Pull the text fragment out of one SSE event block, if any.
    fn parse_sse_event(event: &[u8]) -> Option<String> {
        let event = std::str::from_utf8(event).ok()?;
        let data = event
            .lines()
            .find_map(|line| line.strip_prefix("data: "))?;

        let response = serde_json::from_str::<GenerateContentResponse>(data).ok()?;
        Self::extract_text(&response).filter(|text| !text.is_empty())
    }
}

#[async_trait]
impl TextService for GeminiTextClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.http.model(), "Sending generateContent request");

        let request = GenerateContentRequest::from_prompt(prompt);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        Self::extract_text(&response)
            .ok_or_else(|| Error::AiProvider("No text in Gemini response".to_string()))
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream> {
        tracing::debug!(model = %self.http.model(), "Starting streamGenerateContent request");

        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self.http.stream_generate_content(&request).await?;

        let (tx, rx) = mpsc::channel::<Result<String>>(32);

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            // Raw bytes so that a multi-byte character split across network
            // chunks never lands mid-decode. Events end at a blank line.
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        buffer.extend_from_slice(&bytes);

                        while let Some(end) = find_event_end(&buffer) {
                            let event: Vec<u8> = buffer.drain(..end + 2).collect();
                            if let Some(text) = Self::parse_sse_event(&event) {
                                if tx.send(Ok(text)).await.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(Error::Http(e))).await;
                        return;
                    }
                }
            }

            // The final event may arrive without a trailing blank line.
            if let Some(text) = Self::parse_sse_event(&buffer) {
                let _ = tx.send(Ok(text)).await;
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}

fn find_event_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}
