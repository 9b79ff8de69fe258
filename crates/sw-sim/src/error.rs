use thiserror::Error;

use sw_core::{AgentId, Position3D, SwError};
use sw_field::FieldError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("tick interval must be finite and positive, got {0}")]
    InvalidInterval(f64),
}

pub type SimResult<T> = Result<T, SimError>;

/// Rejection of an administrative mutation.  Nothing was changed.
///
/// The `Display` text is meant to be shown to the operator as-is.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("no tracked agent {0}")]
    UnknownAgent(AgentId),

    #[error("stability must be a number between 0 and 1 ({0})")]
    InvalidStability(#[source] SwError),

    #[error("reference point {0} is not finite")]
    NonFiniteReference(Position3D),

    #[error("could not store config: {0}")]
    Store(#[from] FieldError),
}
