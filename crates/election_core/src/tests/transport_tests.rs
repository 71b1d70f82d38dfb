use super::*;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
    Router,
};
use shared::domain::CandidateId;
use tokio::{net::TcpListener, sync::mpsc};

#[derive(Debug)]
struct CapturedRequest {
    path: String,
    content_type: Option<String>,
    body: serde_json::Value,
}

async fn capture(
    State(tx): State<mpsc::UnboundedSender<CapturedRequest>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let captured = CapturedRequest {
        path: uri.path().to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };
    let _ = tx.send(captured);
    StatusCode::OK
}

async fn start_host() -> (HostEndpoint, mpsc::UnboundedReceiver<CapturedRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/electionVote", post(capture))
        .route("/electionClose", post(capture))
        .with_state(tx);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let endpoint = HostEndpoint::from_base(&format!("http://{addr}")).expect("endpoint");
    (endpoint, rx)
}

async fn next_request(rx: &mut mpsc::UnboundedReceiver<CapturedRequest>) -> CapturedRequest {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("request within timeout")
        .expect("captured request")
}

#[test]
fn resource_endpoint_builds_host_urls() {
    let endpoint = HostEndpoint::for_resource("my-election").expect("endpoint");
    assert_eq!(
        endpoint
            .url_for(&HostRequest::vote(CandidateId(3)))
            .expect("vote url")
            .as_str(),
        "https://my-election/electionVote"
    );

    let fallback = HostEndpoint::for_resource("  ").expect("fallback endpoint");
    assert_eq!(
        fallback
            .url_for(&HostRequest::close())
            .expect("close url")
            .as_str(),
        "https://rsg-election/electionClose"
    );
}

#[test]
fn base_override_keeps_path_prefix() {
    let endpoint = HostEndpoint::from_base("http://127.0.0.1:9000/nui").expect("endpoint");
    assert_eq!(
        endpoint
            .url_for(&HostRequest::close())
            .expect("url")
            .as_str(),
        "http://127.0.0.1:9000/nui/electionClose"
    );
}

#[tokio::test]
async fn posts_vote_and_close_bodies() {
    let (endpoint, mut rx) = start_host().await;
    let client = Client::new();

    post_request(&client, &endpoint, HostRequest::vote(CandidateId(7)))
        .await
        .expect("vote delivered");
    let vote = next_request(&mut rx).await;
    assert_eq!(vote.path, "/electionVote");
    assert_eq!(vote.content_type.as_deref(), Some(JSON_CONTENT_TYPE));
    assert_eq!(vote.body, serde_json::json!({ "candidateId": 7 }));

    post_request(&client, &endpoint, HostRequest::close())
        .await
        .expect("close delivered");
    let close = next_request(&mut rx).await;
    assert_eq!(close.path, "/electionClose");
    assert_eq!(close.body, serde_json::json!({}));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let app = Router::new().route(
        "/electionVote",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let endpoint = HostEndpoint::from_base(&format!("http://{addr}/")).expect("endpoint");
    let err = post_request(&Client::new(), &endpoint, HostRequest::vote(CandidateId(1)))
        .await
        .expect_err("should fail");
    assert!(matches!(
        err,
        TransportError::Status(status) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn worker_delivers_queued_requests_in_order() {
    let (endpoint, mut rx) = start_host().await;
    let transport = spawn_http_worker(endpoint);

    transport.send(HostRequest::vote(CandidateId(2)));
    transport.send(HostRequest::close());

    assert_eq!(next_request(&mut rx).await.path, "/electionVote");
    assert_eq!(next_request(&mut rx).await.path, "/electionClose");
}

#[test]
fn worker_swallows_unreachable_host() {
    let endpoint = HostEndpoint::from_base("http://127.0.0.1:9/").expect("endpoint");
    let transport = spawn_http_worker(endpoint);
    transport.send(HostRequest::close());
    transport.send(HostRequest::vote(CandidateId(1)));
}

#[test]
fn recording_transport_keeps_send_order() {
    let transport = RecordingTransport::new();
    transport.send(HostRequest::vote(CandidateId(1)));
    transport.send(HostRequest::close());
    assert_eq!(
        transport.take(),
        vec![HostRequest::vote(CandidateId(1)), HostRequest::close()]
    );
    assert!(transport.sent().is_empty());
}
