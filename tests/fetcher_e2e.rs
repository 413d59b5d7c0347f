use ascii_oracle::ai::MockTextClient;
use ascii_oracle::api;
use ascii_oracle::fetcher::ResultFetcher;
use ascii_oracle::state::AppState;
use ascii_oracle::Error;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::sync::Arc;

async fn spawn_app(mock: MockTextClient) -> String {
    let app = api::router(AppState::new(Arc::new(mock)));
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn e2e_fetch_art_returns_parsed_response() {
    let mock = MockTextClient::new()
        .with_text_response("( o.o )\n twin eyes \n---SEPARATOR---\nA face emerges.");
    let base_url = spawn_app(mock).await;

    let fetcher = ResultFetcher::new(base_url);
    let art = fetcher.fetch_art("face").await.unwrap();

    assert_eq!(art.art, "( o.o )\n twin eyes");
    assert_eq!(art.text, "A face emerges.");
}

#[tokio::test]
async fn e2e_fetch_art_rejects_on_server_error_with_server_message() {
    let mock = MockTextClient::new().with_error("model exploded");
    let base_url = spawn_app(mock).await;

    let fetcher = ResultFetcher::new(base_url);
    let err = fetcher.fetch_art("face").await.unwrap_err();

    assert!(matches!(err, Error::Server(_)));
    assert!(err.to_string().contains("model exploded"));
}

#[tokio::test]
async fn e2e_fetch_art_rejects_on_validation_error() {
    let base_url = spawn_app(MockTextClient::new()).await;

    let fetcher = ResultFetcher::new(base_url);
    let err = fetcher.fetch_art("").await.unwrap_err();

    assert_eq!(err.to_string(), "Missing or invalid 'topic'");
}

#[tokio::test]
async fn e2e_stream_definition_yields_fragments_that_concatenate() {
    let mock = MockTextClient::new().with_stream_chunks(vec!["Entropy ", "is ", "disorder."]);
    let base_url = spawn_app(mock).await;

    let fetcher = ResultFetcher::new(base_url);
    let fragments: Vec<String> = fetcher.stream_definition("entropy").collect().await;

    assert!(!fragments.is_empty());
    assert_eq!(fragments.concat(), "Entropy is disorder.");
    assert!(fragments.iter().all(|f| !f.starts_with("Error: ")));
}

#[tokio::test]
async fn e2e_stream_definition_turns_validation_failure_into_error_fragment() {
    let mock = MockTextClient::new();
    let probe = mock.clone();
    let base_url = spawn_app(mock).await;

    let fetcher = ResultFetcher::new(base_url);
    let fragments: Vec<String> = fetcher.stream_definition("").collect().await;

    assert_eq!(
        fragments,
        vec!["Error: Missing or invalid 'topic' in request body".to_string()]
    );
    assert_eq!(probe.get_call_count(), 0);
}

#[tokio::test]
async fn e2e_stream_definition_turns_connection_failure_into_error_fragment() {
    // Port 1 is never listening.
    let fetcher = ResultFetcher::new("http://127.0.0.1:1");
    let fragments: Vec<String> = fetcher.stream_definition("entropy").collect().await;

    assert_eq!(fragments.len(), 1);
    assert!(fragments[0].starts_with("Error: "));
}

#[tokio::test]
async fn e2e_stream_definition_ends_with_error_fragment_on_mid_stream_failure() {
    let mock = MockTextClient::new().with_stream_failure(vec!["partial "], "upstream cut");
    let base_url = spawn_app(mock).await;

    let fetcher = ResultFetcher::new(base_url);
    let fragments: Vec<String> = fetcher.stream_definition("entropy").collect().await;

    let last = fragments.last().unwrap();
    assert!(last.starts_with("Error: "));
    assert_eq!(
        fragments
            .iter()
            .filter(|f| f.starts_with("Error: "))
            .count(),
        1
    );
}
