/// Convenience result type used across sparkle.
pub type SparkleResult<T> = Result<T, SparkleError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SparkleError {
    /// Invalid user-provided or session data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoded image bytes or data URIs that could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Failures while rasterizing a visual tree.
    #[error("render error: {0}")]
    Render(String),

    /// Export pipeline failures (missing rasterizer, nothing to export, capture failure).
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SparkleError {
    /// Build a [`SparkleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SparkleError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SparkleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SparkleError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`SparkleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
