use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::StreamExt;

use crate::format::split_art;
use crate::models::{ArtResponse, ErrorResponse};
use crate::prompts;
use crate::state::AppState;

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Pull a non-empty `topic` string out of a raw JSON body.
///
/// Anything else - unparseable body, missing field, wrong type, empty or
/// whitespace topic - is a validation failure, reported before the model is
/// ever invoked.
fn extract_topic(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body).ok()?;
    let topic = payload.get("topic")?.as_str()?.trim();

    if topic.is_empty() {
        return None;
    }

    Some(topic.to_string())
}

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn internal_error(error: crate::Error) -> HandlerError {
    tracing::error!("Request failed: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// `POST /api/art` - topic in, `{art, text}` out.
pub async fn art(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ArtResponse>, HandlerError> {
    let topic =
        extract_topic(&body).ok_or_else(|| bad_request("Missing or invalid 'topic'"))?;

    let prompt = prompts::render(prompts::ART, &[("topic", &topic)]);
    let raw = state.text.generate(&prompt).await.map_err(internal_error)?;

    let response = split_art(&raw).map_err(internal_error)?;
    Ok(Json(response))
}

/// `POST /api/stream` - topic in, plain-text definition out, chunked as the
/// model produces it.
///
/// Failures before the first byte get the JSON error envelope. Once the body
/// has started, an `Err` fragment ends the stream and the connection is
/// closed without a second response.
pub async fn stream_definition(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, HandlerError> {
    let topic = extract_topic(&body)
        .ok_or_else(|| bad_request("Missing or invalid 'topic' in request body"))?;

    let prompt = prompts::render(prompts::DEFINITION, &[("topic", &topic)]);
    let stream = state
        .text
        .generate_stream(&prompt)
        .await
        .map_err(internal_error)?;

    let body = Body::from_stream(stream.map(|fragment| fragment.map(axum::body::Bytes::from)));

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method Not Allowed".to_string(),
        }),
    )
        .into_response()
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
