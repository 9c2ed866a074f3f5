//! Error types for the sprite pipeline core.

use isosprite_spec::{DiagonalPair, PipelineErrorCode, SpecError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core pipeline operations.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// What kind of scene object a lookup expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneObjectKind {
    Object,
    Camera,
    Collection,
}

impl fmt::Display for SceneObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SceneObjectKind::Object => "object",
            SceneObjectKind::Camera => "camera",
            SceneObjectKind::Collection => "collection",
        })
    }
}

/// Errors that can occur while sizing, laying out or extracting sprites.
///
/// Every variant is fatal for the current item. The core never retries and
/// never emits partial output; the driving stage decides whether to abort
/// the batch or skip the item.
#[derive(Debug, Error)]
pub enum SpriteError {
    /// Item has no catalog entry.
    #[error("Unknown item '{item}': no footprint in catalog")]
    UnknownItem { item: String },

    /// Scale factor is not a positive finite number, or yields an empty sprite.
    #[error("Invalid sprite scale {scale}: {reason}")]
    InvalidScale { scale: f64, reason: &'static str },

    /// The camera could not project a point.
    #[error("Projection failed: {message}")]
    Projection { message: String },

    /// Atlas cell has a zero dimension.
    #[error("Invalid atlas cell size {width}x{height}: both dimensions must be positive")]
    InvalidCellSize { width: u32, height: u32 },

    /// Directories or files do not match the declared grid.
    #[error("Grid cardinality mismatch: {message}")]
    GridCardinality { message: String },

    /// A required scene object is absent.
    #[error("Scene {kind} '{name}' not found")]
    MissingSceneObject { kind: SceneObjectKind, name: String },

    /// Construction atlas requested for an item without construction data.
    #[error("Item '{item}' has no construction data in catalog")]
    NotConstructible { item: String },

    /// The same travel direction was supplied twice.
    #[error("Direction {pair} supplied more than once")]
    DuplicateDirection { pair: DiagonalPair },

    /// Scene snapshot is malformed.
    #[error("Invalid scene snapshot: {message}")]
    InvalidSnapshot { message: String },

    /// Failed to write an output record.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog, configuration or record error.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl SpriteError {
    /// Creates a new projection error.
    pub fn projection(message: impl Into<String>) -> Self {
        Self::Projection {
            message: message.into(),
        }
    }

    /// Creates a new grid cardinality error.
    pub fn grid_cardinality(message: impl Into<String>) -> Self {
        Self::GridCardinality {
            message: message.into(),
        }
    }

    /// Creates a new missing scene object error.
    pub fn missing(kind: SceneObjectKind, name: impl Into<String>) -> Self {
        Self::MissingSceneObject {
            kind,
            name: name.into(),
        }
    }

    /// Creates a new invalid snapshot error.
    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            message: message.into(),
        }
    }
}

impl PipelineErrorCode for SpriteError {
    fn code(&self) -> &'static str {
        match self {
            SpriteError::UnknownItem { .. } => "SPRITE_001",
            SpriteError::InvalidScale { .. } => "SPRITE_002",
            SpriteError::Projection { .. } => "SPRITE_003",
            SpriteError::InvalidCellSize { .. } => "SPRITE_004",
            SpriteError::GridCardinality { .. } => "SPRITE_005",
            SpriteError::MissingSceneObject { .. } => "SPRITE_006",
            SpriteError::NotConstructible { .. } => "SPRITE_007",
            SpriteError::DuplicateDirection { .. } => "SPRITE_008",
            SpriteError::InvalidSnapshot { .. } => "SPRITE_009",
            SpriteError::WriteFailed { .. } => "SPRITE_010",
            SpriteError::Spec(inner) => inner.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            SpriteError::Spec(inner) => inner.category(),
            _ => "sprite",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpriteError::UnknownItem {
            item: "tram".to_string(),
        };
        assert!(err.to_string().contains("tram"));

        let err = SpriteError::missing(SceneObjectKind::Collection, "SmokeEmitters");
        assert_eq!(err.to_string(), "Scene collection 'SmokeEmitters' not found");

        let err = SpriteError::InvalidCellSize {
            width: 0,
            height: 80,
        };
        assert!(err.to_string().contains("0x80"));
    }

    #[test]
    fn test_spec_errors_keep_their_code() {
        let err: SpriteError = SpecError::unknown_direction_label("XX-YY").into();
        assert_eq!(err.code(), "SPEC_004");
        assert_eq!(err.category(), "spec");

        let err = SpriteError::grid_cardinality("3 rows for 4");
        assert_eq!(err.code(), "SPRITE_005");
        assert_eq!(err.category(), "sprite");
    }
}
