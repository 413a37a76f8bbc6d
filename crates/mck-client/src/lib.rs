//! # mck-client
//!
//! HTTP session and request/assertion primitive for the MindCare smoke
//! checks.
//!
//! One [`Session`] is created per run. Every call issues a single request
//! (no retries), prints one trace line, decodes the body as JSON with a
//! raw-text fallback, and fails with a typed [`ApiError`] when the observed
//! status differs from the expected one.

pub mod error;
pub mod session;

pub use error::ApiError;
pub use session::{Expectation, Session};
