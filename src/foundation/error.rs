/// Convenience result type used across meshgrad.
pub type MeshResult<T> = Result<T, MeshError>;

/// Top-level error taxonomy used by generator, document and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    /// Invalid user-provided or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mutation referenced a shape id that is not in the document.
    #[error("unknown shape '{0}'")]
    UnknownShape(String),

    /// A vertex edit referenced an index past the end of the shape outline.
    #[error("vertex {index} out of range for shape '{shape}' ({len} points)")]
    VertexOutOfRange {
        /// Shape identifier.
        shape: String,
        /// Requested vertex index.
        index: usize,
        /// Number of points in the shape.
        len: usize,
    },

    /// A palette operation referenced a color id that is not in the palette.
    #[error("unknown color '{0}'")]
    UnknownColor(String),

    /// Markup could not be decoded into a drawable image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Export could not produce an image.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing scene snapshots.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeshError {
    /// Build a [`MeshError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MeshError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MeshError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`MeshError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error reports an invalid mutation target rather than a broken document.
    pub fn is_invalid_target(&self) -> bool {
        matches!(
            self,
            Self::UnknownShape(_) | Self::VertexOutOfRange { .. } | Self::UnknownColor(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
