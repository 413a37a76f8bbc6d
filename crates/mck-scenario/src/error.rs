//! Scenario-level failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The request/assertion primitive failed: status mismatch or transport.
    #[error(transparent)]
    Api(#[from] mck_client::ApiError),

    /// A response body lacked a field a later step depends on.
    #[error("response for {method} {path} is missing '{field}' (body: {body})")]
    MissingField {
        method: String,
        path: String,
        field: String,
        body: serde_json::Value,
    },

    /// The OS randomness source failed while generating the run identity.
    #[error("failed to generate run identity: {0}")]
    Identity(String),
}

impl ScenarioError {
    /// Whether the failure came from the network layer rather than the API
    /// contract.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Api(mck_client::ApiError::Transport { .. }))
    }
}
