//! # mck-scenario
//!
//! The sequential MindCare smoke scenario: typed request payloads plus the
//! driver that threads server-assigned ids and the login token from each
//! response into the calls after it.

pub mod error;
pub mod flow;
pub mod identity;
pub mod payloads;

pub use error::ScenarioError;
pub use flow::run;
pub use identity::RunIdentity;
