//! HTTP session and the request/assertion primitive.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode, header};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// What a call expects of the response status line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Expectation {
    /// Exactly this status code.
    Exact(StatusCode),
    /// Any 2xx status. Cleanup deletes accept 200 and 204 alike.
    Success,
}

impl Expectation {
    /// Whether `status` satisfies this expectation.
    #[must_use]
    pub fn matches(self, status: StatusCode) -> bool {
        match self {
            Self::Exact(code) => status == code,
            Self::Success => status.is_success(),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{}", code.as_u16()),
            Self::Success => f.write_str("2xx"),
        }
    }
}

/// One HTTP session against the configured API root.
///
/// Owns the reqwest client, so every call in a run reuses the same connection
/// pool. After login succeeds, [`Session::authenticate`] attaches the bearer
/// token carried by every subsequent request. There is exactly one writer of
/// that token per run and no retries anywhere.
pub struct Session {
    client: Client,
    base_url: String,
    timeout: Duration,
    bearer: Option<String>,
}

impl Session {
    /// Create a session for `base_url`. Trailing slashes are trimmed; request
    /// paths begin with `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout,
            bearer: None,
        }
    }

    /// The API root this session talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach the bearer token issued at login.
    ///
    /// Every request after this carries `Authorization: Bearer <token>`.
    pub fn authenticate(&mut self, token: impl Into<String>) {
        self.bearer = Some(token.into());
    }

    /// Issue a bodyless request and assert the response status.
    ///
    /// Prints one trace line (`METHOD path -> status`) per request. The body
    /// is decoded as JSON, falling back to the raw text when decoding fails.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ContractViolation` if the status does not satisfy
    /// `expect`, or `ApiError::Transport` on a network-layer failure.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        expect: Expectation,
    ) -> Result<Value, ApiError> {
        self.dispatch(method, path, expect, None::<&Value>).await
    }

    /// Issue a request with a JSON body and assert the response status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ContractViolation` if the status does not satisfy
    /// `expect`, or `ApiError::Transport` on a network-layer failure.
    pub async fn call_json<T>(
        &self,
        method: Method,
        path: &str,
        expect: Expectation,
        body: &T,
    ) -> Result<Value, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.dispatch(method, path, expect, Some(body)).await
    }

    async fn dispatch<T>(
        &self,
        method: Method,
        path: &str,
        expect: Expectation,
        body: Option<&T>,
    ) -> Result<Value, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url).timeout(self.timeout);
        if let Some(token) = &self.bearer {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source,
        })?;
        let body = decode_body(&text);

        println!("{method} {path} -> {}", status.as_u16());
        tracing::debug!(%method, path, status = status.as_u16(), "api call completed");

        if expect.matches(status) {
            Ok(body)
        } else {
            Err(ApiError::ContractViolation {
                method: method.to_string(),
                path: path.to_string(),
                expected: expect,
                actual: status,
                body,
            })
        }
    }
}

/// Decode a response body as JSON, falling back to the raw text.
///
/// A non-JSON body is never an error by itself; the status comparison still
/// decides the outcome.
fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
