// Shared error types

/// Errors surfaced by the analysis pipeline and its collaborators.
///
/// The reference agents never fail on their own, but the orchestrator
/// treats every stage as fallible so a real data-source integration can
/// slot in behind the same contract.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{agent} agent failed: {message}")]
    Agent {
        agent: &'static str,
        message: String,
    },

    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    #[error("An analysis run is already in progress")]
    RunInProgress,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
