//! Download ticket integration tests.
//!
//! These tests drive `Agent::create_download_ticket` through the mock
//! transport:
//! - Ticket contents (URL, name, size, User-Agent, Cookie)
//! - Query parameters and the freshness marker
//! - Provider and transport failures never yield a ticket

use chrono::Utc;
use tokio_test::{assert_err, assert_ok};

use pickport_core::{
    agent::{HEADER_COOKIE, HEADER_USER_AGENT},
    testing::{fixtures, MockTransport, RecordedCall},
    Agent, AgentError, TransportError,
};

const AGENT_NAME: &str = "pickport-test/1.0";

async fn setup() -> (Agent<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    let agent = Agent::new(transport.clone(), AGENT_NAME);
    (agent, transport)
}

#[tokio::test]
async fn test_ticket_for_successful_answer() {
    let (agent, transport) = setup().await;
    transport
        .set_json(
            "/files/download",
            serde_json::json!({
                "url": "https://x/y",
                "file_name": "movie.mp4",
                "file_size": "1048576",
                "state": 1
            }),
        )
        .await;
    transport.add_cookie("x", "SESS", "tok").await;

    let ticket = assert_ok!(agent.create_download_ticket("abc123").await);

    assert_eq!(ticket.url, "https://x/y");
    assert_eq!(ticket.file_name, "movie.mp4");
    assert_eq!(ticket.file_size, 1_048_576);
    assert_eq!(ticket.headers.len(), 2);
    assert_eq!(ticket.headers[HEADER_USER_AGENT], AGENT_NAME);
    assert_eq!(ticket.headers[HEADER_COOKIE], "SESS=tok;");
}

#[tokio::test]
async fn test_cookie_header_holds_every_cookie_for_resolved_domain() {
    let (agent, transport) = setup().await;
    transport
        .set_json(
            "/files/download",
            fixtures::download_ok("https://cdnfhnfile.115.com/f/abc", "a.bin", "10"),
        )
        .await;
    transport.add_cookie(".115.com", "UID", "u1").await;
    transport.add_cookie(".115.com", "CID", "c1").await;
    transport.add_cookie(".115.com", "SEID", "s1").await;
    transport.add_cookie("other.example", "NOPE", "x").await;

    let ticket = assert_ok!(agent.create_download_ticket("abc123").await);
    let cookie = &ticket.headers[HEADER_COOKIE];

    for entry in ["UID=u1;", "CID=c1;", "SEID=s1;"] {
        assert!(cookie.contains(entry), "missing {} in {}", entry, cookie);
    }
    assert!(!cookie.contains("NOPE"));

    // Cookies are looked up for the resolved URL, not the API endpoint.
    let calls = transport.recorded_calls().await;
    assert!(calls.contains(&RecordedCall::Cookies {
        url: "https://cdnfhnfile.115.com/f/abc".to_string()
    }));
}

#[tokio::test]
async fn test_no_cookies_gives_empty_cookie_header() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", fixtures::download_ok("https://x/y", "a", "1"))
        .await;

    let ticket = assert_ok!(agent.create_download_ticket("abc123").await);
    assert_eq!(ticket.headers[HEADER_COOKIE], "");
    assert_eq!(ticket.headers[HEADER_USER_AGENT], AGENT_NAME);
}

#[tokio::test]
async fn test_query_carries_pickcode_and_freshness_marker() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", fixtures::download_ok("https://x/y", "a", "1"))
        .await;

    let before = Utc::now().timestamp();
    assert_ok!(agent.create_download_ticket("abc123").await);
    let after = Utc::now().timestamp();

    let calls = transport.recorded_calls().await;
    let (endpoint, query, form) = match &calls[0] {
        RecordedCall::Json {
            endpoint,
            query,
            form,
        } => (endpoint, query, form),
        other => panic!("expected JSON call first, got {:?}", other),
    };

    assert_eq!(endpoint, "https://webapi.115.com/files/download");
    assert!(form.is_none());
    assert_eq!(query.get("pickcode"), Some("abc123"));

    let marker: i64 = query.get("_").unwrap().parse().unwrap();
    assert!(marker >= before && marker <= after);
}

#[tokio::test]
async fn test_every_call_queries_the_provider() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", fixtures::download_ok("https://x/y", "a", "1"))
        .await;

    let first = assert_ok!(agent.create_download_ticket("abc123").await);
    let second = assert_ok!(agent.create_download_ticket("abc123").await);

    assert_eq!(first, second);
    assert_eq!(transport.json_call_count().await, 2);
}

#[tokio::test]
async fn test_provider_failure_returns_exact_code_and_message() {
    let (agent, transport) = setup().await;
    transport
        .set_json(
            "/files/download",
            fixtures::download_failed(70005, "file not found"),
        )
        .await;
    transport.add_cookie("x", "SESS", "tok").await;

    let err = assert_err!(agent.create_download_ticket("missing").await);
    assert_eq!(
        err,
        AgentError::Provider {
            code: 70005,
            message: "file not found".to_string(),
        }
    );

    // Nothing was assembled, so no cookie lookup happened.
    let calls = transport.recorded_calls().await;
    assert!(!calls
        .iter()
        .any(|c| matches!(c, RecordedCall::Cookies { .. })));
}

#[tokio::test]
async fn test_repeated_failure_is_identical() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", fixtures::download_failed(50028, "too fast"))
        .await;

    let first = assert_err!(agent.create_download_ticket("abc123").await);
    let second = assert_err!(agent.create_download_ticket("abc123").await);
    let third = assert_err!(agent.create_download_ticket("abc123").await);

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(first.provider_code(), Some(50028));
}

#[tokio::test]
async fn test_transport_error_is_propagated() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", fixtures::download_ok("https://x/y", "a", "1"))
        .await;
    transport.set_next_error(TransportError::Timeout).await;

    let err = assert_err!(agent.create_download_ticket("abc123").await);
    assert_eq!(err, AgentError::Transport(TransportError::Timeout));
}

#[tokio::test]
async fn test_undecodable_answer_is_transport_error() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", serde_json::json!("unexpected"))
        .await;

    let err = assert_err!(agent.create_download_ticket("abc123").await);
    assert!(matches!(
        err,
        AgentError::Transport(TransportError::Decode(_))
    ));
}

#[tokio::test]
#[should_panic(expected = "malformed file size")]
async fn test_malformed_size_on_success_is_fatal() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", fixtures::download_ok("https://x/y", "a", "big"))
        .await;

    let _ = agent.create_download_ticket("abc123").await;
}

#[tokio::test]
async fn test_large_file_size() {
    let (agent, transport) = setup().await;
    transport
        .set_json(
            "/files/download",
            fixtures::download_ok("https://x/y", "disk.img", "18446744073709551615"),
        )
        .await;

    let ticket = assert_ok!(agent.create_download_ticket("abc123").await);
    assert_eq!(ticket.file_size, u64::MAX);
}

#[tokio::test]
async fn test_concurrent_tickets_share_agent() {
    let (agent, transport) = setup().await;
    transport
        .set_json("/files/download", fixtures::download_ok("https://x/y", "a", "5"))
        .await;
    transport.add_cookie("x", "SESS", "tok").await;

    let (a, b) = tokio::join!(
        agent.create_download_ticket("one"),
        agent.create_download_ticket("two")
    );

    assert_eq!(assert_ok!(a).headers[HEADER_COOKIE], "SESS=tok;");
    assert_eq!(assert_ok!(b).headers[HEADER_COOKIE], "SESS=tok;");
    assert_eq!(transport.json_call_count().await, 2);
}
