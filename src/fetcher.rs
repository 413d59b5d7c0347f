//! Client-side access to the two endpoints.
//!
//! The two operations deliberately carry different failure contracts:
//! [`ResultFetcher::fetch_art`] is a one-shot call that returns `Err` on any
//! failure, surfacing the server-provided message; the definition stream is
//! consumed incrementally by UI code with no error channel, so
//! [`ResultFetcher::stream_definition`] never fails - any failure becomes a
//! single `"Error: ..."` fragment and the stream ends.

use crate::models::{ArtResponse, ErrorResponse, TopicRequest};
use crate::{Error, Result};
use futures::Stream;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Fragment stream returned by [`ResultFetcher::stream_definition`].
pub type DefinitionStream = Pin<Box<dyn Stream<Item = String> + Send>>;

pub struct ResultFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ResultFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::new_with_client(base_url, client)
    }

    pub fn new_with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Fetch ASCII art for a topic.
    ///
    /// Rejects on any non-success status, carrying the server's `error`
    /// message when one was provided.
    pub async fn fetch_art(&self, topic: &str) -> Result<ArtResponse> {
        let response = self
            .client
            .post(format!("{}/api/art", self.base_url))
            .json(&TopicRequest {
                topic: topic.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
                .map(|envelope| envelope.error)
                .unwrap_or_else(|| format!("Server responded with {}", status));
            return Err(Error::Server(message));
        }

        Ok(response.json().await?)
    }

    /// Stream a definition for a topic, fragment by fragment.
    ///
    /// Never fails: connection errors, non-success statuses, and mid-body
    /// failures all surface as one final fragment starting with `"Error: "`.
    pub fn stream_definition(&self, topic: &str) -> DefinitionStream {
        let client = self.client.clone();
        let url = format!("{}/api/stream", self.base_url);
        let request = TopicRequest {
            topic: topic.to_string(),
        };

        let (tx, rx) = mpsc::channel::<String>(32);

        tokio::spawn(async move {
            let response = match client.post(url).json(&request).send().await {
                Ok(response) => response,
                Err(e) => {
                    let _ = tx.send(format!("Error: {}", e)).await;
                    return;
                }
            };

            if !response.status().is_success() {
                let status = response.status();
                let message = response
                    .text()
                    .await
                    .ok()
                    .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
                    .map(|envelope| envelope.error)
                    .unwrap_or_else(|| format!("Server responded with {}", status));
                let _ = tx.send(format!("Error: {}", message)).await;
                return;
            }

            let mut response = response;
            // Carry buffer so a UTF-8 sequence split across network chunks
            // is decoded once it completes, never lossily in the middle.
            let mut carry: Vec<u8> = Vec::new();

            loop {
                match response.chunk().await {
                    Ok(Some(bytes)) => {
                        carry.extend_from_slice(&bytes);
                        if let Some(fragment) = drain_complete_utf8(&mut carry) {
                            if tx.send(fragment).await.is_err() {
                                return;
                            }
                        }
                    }
                    Ok(None) => {
                        if !carry.is_empty() {
                            let _ = tx.send(String::from_utf8_lossy(&carry).into_owned()).await;
                        }
                        return;
                    }
                    Err(e) => {
                        let _ = tx.send(format!("Error: {}", e)).await;
                        return;
                    }
                }
            }
        });

        Box::pin(ReceiverStream::new(rx))
    }
}

/// Split off the longest valid UTF-8 prefix of `carry`, leaving any trailing
/// incomplete sequence in place.
fn drain_complete_utf8(carry: &mut Vec<u8>) -> Option<String> {
    let valid_len = match std::str::from_utf8(carry) {
        Ok(text) => text.len(),
        Err(e) => e.valid_up_to(),
    };

    if valid_len == 0 {
        return None;
    }

    let prefix: Vec<u8> = carry.drain(..valid_len).collect();
    Some(String::from_utf8_lossy(&prefix).into_owned())
}
