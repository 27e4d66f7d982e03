/// Result alias used by all fallible library APIs.
pub type TsgResult<T> = Result<T, TsgError>;

/// Crate error type.
///
/// Per-widget failures inside a frame are reported as statuses, not as `TsgError`s; this type
/// covers configuration, setup and output failures around the scheduler.
#[derive(thiserror::Error, Debug)]
pub enum TsgError {
    /// Invalid value in a document or API call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or inconsistent test-card configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Location or geometry resolution failed.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Widget type registration failed.
    #[error("registration error: {0}")]
    Registration(String),

    /// Rendering, compositing or encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TsgError {
    /// Build a [`TsgError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TsgError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TsgError::Geometry`].
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`TsgError::Registration`].
    pub fn registration(msg: impl Into<String>) -> Self {
        Self::Registration(msg.into())
    }

    /// Build a [`TsgError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TsgError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TsgError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
