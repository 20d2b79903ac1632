/// Convenience result type used across papercast.
pub type PapercastResult<T> = Result<T, PapercastError>;

/// Error taxonomy for the edges of the crate (loading, validation, CLI).
///
/// The repairer, keyframe engine and timeline never fail: they degrade instead.
#[derive(thiserror::Error, Debug)]
pub enum PapercastError {
    /// Structurally invalid script data (durations, offsets, counts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data contracts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PapercastError {
    /// Build a [`PapercastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PapercastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
