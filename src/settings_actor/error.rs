use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("Setting key must not be blank")]
    BlankKey,
    #[error("Settings not found: {0}")]
    NotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
