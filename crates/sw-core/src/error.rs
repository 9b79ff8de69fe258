//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `SwError` as one variant
//! where they need to surface a core failure.

use thiserror::Error;

use crate::{AgentId, HazardId};

/// The top-level error type for `sw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SwError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("hazard {0} not found")]
    HazardNotFound(HazardId),

    #[error("non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: f64 },
}

/// Shorthand result type for the `sw-*` crates.
pub type SwResult<T> = Result<T, SwError>;
