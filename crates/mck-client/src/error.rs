//! Error types for the request/assertion primitive.
//!
//! Exactly two failure kinds exist, both fatal to a run: the API answered
//! with the wrong status, or the network layer failed outright.

use reqwest::StatusCode;
use thiserror::Error;

use crate::session::Expectation;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The observed HTTP status differs from the expected one.
    #[error("unexpected status for {method} {path}: expected {expected}, got {actual} (body: {body})")]
    ContractViolation {
        method: String,
        path: String,
        expected: Expectation,
        actual: StatusCode,
        body: serde_json::Value,
    },

    /// Network-layer failure: DNS, connection refused, timeout.
    #[error("request failed for {method} {path}: {source}")]
    Transport {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },
}
