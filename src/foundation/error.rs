/// Convenience result type used across scenery.
pub type SceneryResult<T> = Result<T, SceneryError>;

/// Top-level error taxonomy used by toolkit APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneryError {
    /// Invalid caller-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A texture, surface, font or file could not be created or loaded.
    #[error("resource error: {0}")]
    Resource(String),

    /// A drawing operation failed at the renderer boundary.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneryError {
    /// Build a [`SceneryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneryError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`SceneryError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// True for failures at the resource-creation boundary (missing files, bad fonts, zero-size
    /// surfaces). Widgets treat these as "draw nothing this frame".
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_) | Self::Other(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
