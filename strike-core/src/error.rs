use thiserror::Error;

/// Represents all possible errors that can occur when interacting with the
/// options engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The caller is not allowed to perform the operation
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// A request parameter is invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is outside its permitted time window
    #[error("Timing error: {0}")]
    Timing(String),

    /// The option is not in the state the operation requires
    #[error("State error: {0}")]
    State(String),

    /// A collateral pool collaborator rejected a request
    #[error("Pool error: {0}")]
    Pool(String),

    /// The price calculator collaborator rejected a request
    #[error("Pricing error: {0}")]
    Pricing(String),

    /// Anyhow error wrapper for error context
    #[error(transparent)]
    Context(#[from] anyhow::Error),
}

impl EngineError {
    /// Whether this is an authorization rejection
    pub fn is_authorization(&self) -> bool {
        matches!(self, EngineError::Authorization(_))
    }

    /// Whether this is a validation rejection
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }

    /// Whether this is a timing rejection
    pub fn is_timing(&self) -> bool {
        matches!(self, EngineError::Timing(_))
    }

    /// Whether this is a wrong-state rejection
    pub fn is_state(&self) -> bool {
        matches!(self, EngineError::State(_))
    }
}
