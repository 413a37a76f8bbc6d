//! Per-run identity generation.
//!
//! Each run registers a brand-new account. An 8-hex-char random suffix keeps
//! consecutive runs from colliding on email or username; the account itself
//! is never deleted, so collisions would otherwise be guaranteed.

use crate::error::ScenarioError;

#[derive(Debug, Clone)]
pub struct RunIdentity {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RunIdentity {
    /// Generate a fresh identity with a random suffix.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Identity` if the OS randomness source fails.
    pub fn generate() -> Result<Self, ScenarioError> {
        let suffix = random_suffix()?;
        Ok(Self {
            email: format!("test-{suffix}@example.com"),
            username: format!("testuser_{suffix}"),
            password: "Passw0rd!".to_string(),
        })
    }
}

/// Four random bytes rendered as 8 lowercase hex chars.
fn random_suffix() -> Result<String, ScenarioError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| ScenarioError::Identity(format!("randomness source failed: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
