//! Error types for catalog, configuration and record handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for spec-level operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Common trait for pipeline errors.
///
/// Every error surfaced to a pipeline driver carries a stable code and a
/// category, so a driver can decide whether to abort a batch or skip one item
/// without matching on concrete error types.
///
/// # Example
///
/// ```
/// use isosprite_spec::{PipelineErrorCode, SpecError};
///
/// let err = SpecError::unknown_direction_label("XX-YY");
/// assert_eq!(err.code(), "SPEC_004");
/// assert_eq!(err.category(), "spec");
/// ```
pub trait PipelineErrorCode: std::error::Error {
    /// Stable code like "SPEC_001" or "SPRITE_003".
    fn code(&self) -> &'static str;

    /// Human-readable message, same as `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category ("spec", "sprite").
    fn category(&self) -> &'static str;
}

/// Errors raised while loading or validating catalogs and configuration.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Failed to read a configuration file.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog entry failed validation.
    #[error("Invalid catalog entry '{item}': {message}")]
    InvalidCatalogEntry { item: String, message: String },

    /// An item referenced by a pipeline has no catalog entry.
    #[error("Items missing from catalog: {}", items.join(", "))]
    MissingCatalogEntries { items: Vec<String> },

    /// A direction label is not one of the twelve canonical labels.
    #[error("Unknown diagonal direction label '{label}'")]
    UnknownDirectionLabel { label: String },

    /// Pipeline configuration is invalid.
    #[error("Invalid pipeline configuration: {message}")]
    InvalidConfig { message: String },
}

impl SpecError {
    /// Creates a new invalid catalog entry error.
    pub fn invalid_entry(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCatalogEntry {
            item: item.into(),
            message: message.into(),
        }
    }

    /// Creates a new unknown direction label error.
    pub fn unknown_direction_label(label: impl Into<String>) -> Self {
        Self::UnknownDirectionLabel {
            label: label.into(),
        }
    }

    /// Creates a new invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl PipelineErrorCode for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::JsonParse(_) => "SPEC_001",
            SpecError::ReadFailed { .. } => "SPEC_002",
            SpecError::InvalidCatalogEntry { .. } => "SPEC_003",
            SpecError::UnknownDirectionLabel { .. } => "SPEC_004",
            SpecError::MissingCatalogEntries { .. } => "SPEC_005",
            SpecError::InvalidConfig { .. } => "SPEC_006",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecError::invalid_entry("harbour", "footprint has zero width");
        assert!(err.to_string().contains("harbour"));
        assert!(err.to_string().contains("zero width"));

        let err = SpecError::MissingCatalogEntries {
            items: vec!["tram".to_string(), "bus".to_string()],
        };
        assert_eq!(err.to_string(), "Items missing from catalog: tram, bus");
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = [
            SpecError::JsonParse(serde_json::from_str::<u32>("x").unwrap_err()),
            SpecError::ReadFailed {
                path: PathBuf::from("items.json"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            },
            SpecError::invalid_entry("a", "b"),
            SpecError::unknown_direction_label("XX"),
            SpecError::MissingCatalogEntries { items: vec![] },
            SpecError::invalid_config("bad"),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
