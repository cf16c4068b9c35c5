/// Crate-wide result alias.
pub type CardResult<T> = Result<T, CardError>;

/// Errors surfaced by layout, rendering and export stages.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid input (bad theme color, zero-sized canvas, malformed JSON, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// The container could not be measured yet; layout is skipped until a size is known.
    #[error("measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding or delivering an export failed.
    #[error("export error: {0}")]
    Export(String),

    /// Any other error with preserved source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Construct [`CardError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Construct [`CardError::MeasurementUnavailable`].
    pub fn measurement_unavailable(msg: impl Into<String>) -> Self {
        Self::MeasurementUnavailable(msg.into())
    }

    /// Construct [`CardError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Construct [`CardError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
