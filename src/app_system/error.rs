use thiserror::Error;
use crate::actor_framework::FrameworkError;
use crate::settings_actor::SettingsError;
use crate::workflow::WorkflowError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Missing, or owned by another tenant.
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order validation error: {0}")]
    Validation(#[from] WorkflowError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<WorkflowError>> for OrderError {
    fn from(e: FrameworkError<WorkflowError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Domain(e) => OrderError::Validation(e),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<FrameworkError<SettingsError>> for SettingsError {
    fn from(e: FrameworkError<SettingsError>) -> Self {
        match e {
            FrameworkError::Domain(e) => e,
            FrameworkError::NotFound(id) => SettingsError::NotFound(id),
            other => SettingsError::ActorCommunicationError(other.to_string()),
        }
    }
}
