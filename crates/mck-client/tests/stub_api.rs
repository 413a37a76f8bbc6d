//! Integration tests for the request/assertion primitive against local stub
//! servers.
//!
//! Each test binds a `tiny_http` server on `127.0.0.1:0` and serves a fixed
//! list of canned responses from a plain thread (`tiny_http` recv blocks, so
//! it stays off the async runtime).

use std::io::Read as _;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use mck_client::{ApiError, Expectation, Session};
use pretty_assertions::assert_eq;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

/// What the stub saw for a single request.
struct Seen {
    method: String,
    url: String,
    authorization: Option<String>,
    body: String,
}

/// Serve `responses` (status, content type, body) for exactly
/// `responses.len()` requests, recording what each request looked like.
fn serve(
    responses: Vec<(u16, &'static str, &'static str)>,
) -> (String, thread::JoinHandle<Vec<Seen>>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind stub server");
    let addr = server.server_addr().to_ip().expect("stub has an IP address");
    let base_url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, content_type, payload) in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            seen.push(Seen {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization: request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string()),
                body,
            });
            let response = tiny_http::Response::from_string(payload)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", content_type)
                        .expect("static header"),
                );
            let _ = request.respond(response);
        }
        seen
    });

    (base_url, handle)
}

#[tokio::test]
async fn matching_status_returns_decoded_body() {
    let (base_url, stub) = serve(vec![(200, "application/json", r#"{"id":1,"email":"x"}"#)]);
    let session = Session::new(base_url, Duration::from_secs(5));

    let body = session
        .call(Method::GET, "/auth/me", Expectation::Exact(StatusCode::OK))
        .await
        .expect("matching status should succeed");
    assert_eq!(body["id"], 1);

    let seen = stub.join().expect("stub thread");
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].url, "/auth/me");
}

#[tokio::test]
async fn status_mismatch_is_contract_violation_with_both_codes() {
    let (base_url, stub) = serve(vec![(201, "application/json", r#"{"id":7}"#)]);
    let session = Session::new(base_url, Duration::from_secs(5));

    let error = session
        .call(Method::GET, "/medications", Expectation::Exact(StatusCode::OK))
        .await
        .expect_err("mismatched status should fail");

    match error {
        ApiError::ContractViolation {
            method,
            path,
            expected,
            actual,
            body,
        } => {
            assert_eq!(method, "GET");
            assert_eq!(path, "/medications");
            assert_eq!(expected, Expectation::Exact(StatusCode::OK));
            assert_eq!(actual, StatusCode::CREATED);
            assert_eq!(body["id"], 7);
        }
        ApiError::Transport { .. } => panic!("expected a contract violation"),
    }

    drop(stub.join().expect("stub thread"));
}

#[tokio::test]
async fn non_json_body_falls_back_to_raw_text() {
    let (base_url, stub) = serve(vec![(200, "text/plain", "pong")]);
    let session = Session::new(base_url, Duration::from_secs(5));

    let body = session
        .call(
            Method::GET,
            "/dashboard/stats",
            Expectation::Exact(StatusCode::OK),
        )
        .await
        .expect("status still decides the outcome");
    assert_eq!(body, Value::String("pong".to_string()));

    drop(stub.join().expect("stub thread"));
}

#[tokio::test]
async fn json_body_is_sent_and_bearer_attached_after_authenticate() {
    let (base_url, stub) = serve(vec![
        (200, "application/json", r#"{"access_token":"tok-123"}"#),
        (200, "application/json", r#"{"ok":true}"#),
    ]);
    let mut session = Session::new(base_url, Duration::from_secs(5));

    let login = json!({"email": "a@example.com", "password": "Passw0rd!"});
    let body = session
        .call_json(
            Method::POST,
            "/auth/login",
            Expectation::Exact(StatusCode::OK),
            &login,
        )
        .await
        .expect("login call should succeed");
    session.authenticate(body["access_token"].as_str().expect("token"));

    session
        .call(Method::GET, "/auth/me", Expectation::Exact(StatusCode::OK))
        .await
        .expect("authenticated call should succeed");

    let seen = stub.join().expect("stub thread");
    assert_eq!(seen[0].authorization, None);
    let sent: Value = serde_json::from_str(&seen[0].body).expect("request body is JSON");
    assert_eq!(sent, login);
    assert_eq!(seen[1].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn success_expectation_accepts_204() {
    let (base_url, stub) = serve(vec![(204, "application/json", "")]);
    let session = Session::new(base_url, Duration::from_secs(5));

    session
        .call(Method::DELETE, "/appointments/41", Expectation::Success)
        .await
        .expect("204 satisfies a 2xx expectation");

    let seen = stub.join().expect("stub thread");
    assert_eq!(seen[0].method, "DELETE");
    assert_eq!(seen[0].url, "/appointments/41");
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Bind and immediately drop a listener so the port is known-dead.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
        listener.local_addr().expect("probe addr").port()
    };
    let session = Session::new(format!("http://127.0.0.1:{port}"), Duration::from_secs(5));

    let error = session
        .call(Method::GET, "/auth/me", Expectation::Exact(StatusCode::OK))
        .await
        .expect_err("dead port should fail");
    assert!(matches!(error, ApiError::Transport { .. }));
}

#[tokio::test]
async fn slow_response_times_out_as_transport_error() {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind stub server");
    let addr = server.server_addr().to_ip().expect("stub has an IP address");
    let base_url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            thread::sleep(Duration::from_millis(500));
            let _ = request.respond(tiny_http::Response::from_string("{}"));
        }
    });

    let session = Session::new(base_url, Duration::from_millis(100));
    let error = session
        .call(Method::GET, "/auth/me", Expectation::Exact(StatusCode::OK))
        .await
        .expect_err("response past the timeout should fail");
    assert!(matches!(error, ApiError::Transport { .. }));

    handle.join().expect("stub thread");
}
