use crate::path::accessor::TraversalError;

/// Convenience result type used across layout-reflect.
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Top-level error taxonomy used by registration and loading APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReflectError {
    /// Invalid type, capability or descriptor registration.
    #[error("registration error: {0}")]
    Registration(String),

    /// Schema file content that cannot be turned into a registry.
    #[error("schema error: {0}")]
    Schema(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Structural failure while walking a member path.
    #[error(transparent)]
    Traversal(#[from] TraversalError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReflectError {
    /// Build a [`ReflectError::Registration`] value.
    pub fn registration(msg: impl Into<String>) -> Self {
        Self::Registration(msg.into())
    }

    /// Build a [`ReflectError::Schema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`ReflectError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
