//! Data models and structures
//!
//! Defines the request/response shapes for both endpoints and the
//! environment-backed service configuration.

use serde::{Deserialize, Serialize};

/// Body accepted by both `/api/art` and `/api/stream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

/// Success payload for `/api/art`.
///
/// `text` is empty when the model omitted the separator and everything was
/// treated as art.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtResponse {
    pub art: String,
    pub text: String,
}

/// JSON error envelope used by every non-success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Every variable has a fallback. A missing `GEMINI_API_KEY` is left
    /// empty rather than rejected here: the provider turns it into a request
    /// failure, which the handlers surface as a 500.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(8080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_request_roundtrip() {
        let request: TopicRequest = serde_json::from_str(r#"{"topic":"entropy"}"#).unwrap();
        assert_eq!(request.topic, "entropy");

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"topic":"entropy"}"#);
    }

    #[test]
    fn test_art_response_serializes_both_fields() {
        let response = ArtResponse {
            art: "+--+".to_string(),
            text: String::new(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"art":"+--+","text":""}"#);
    }
}
