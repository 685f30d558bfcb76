/// A generation call that produced no usable text.
///
/// These never escape the orchestrator: each one is rendered as an inline
/// `Error: <cause>` string in the slot its call would have filled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("failed to reach the generation service: {0}")]
    Transport(String),

    #[error("generation request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("generation service error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse generation response: {0}")]
    Decode(String),

    #[error("generation service returned an empty response")]
    EmptyResponse,
}
