/// Convenience result type used across the crate.
pub type CounterResult<T> = Result<T, CounterError>;

/// Error taxonomy for the frame renderer, GIF assembler, and request boundary.
///
/// An empty frame directory is not an error: assembly reports zero frames and writes nothing.
#[derive(thiserror::Error, Debug)]
pub enum CounterError {
    /// A request value could not be parsed (non-numeric form input and similar).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The font resource could not be opened or parsed. Fatal for the whole render.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Structurally invalid data handed to a pipeline stage.
    #[error("validation error: {0}")]
    Validation(String),

    /// PNG or GIF encoder failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CounterError {
    /// Build a [`CounterError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`CounterError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`CounterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CounterError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Whether this error stems from caller-supplied input (the "bad request" class).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
