//! Loading the catalog and configuration every command starts from.

use anyhow::{Context, Result};
use isosprite_spec::{ItemCatalog, PipelineConfig};
use std::path::Path;
use tracing::debug;

/// Catalog and configuration of one invocation.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub catalog: ItemCatalog,
    pub config: PipelineConfig,
}

impl Inputs {
    /// Loads both inputs, falling back to the built-in catalog and defaults.
    pub fn load(catalog: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        Ok(Self {
            catalog: load_catalog(catalog)?,
            config: load_config(config)?,
        })
    }
}

/// Loads and validates an item catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<ItemCatalog> {
    let catalog = match path {
        Some(path) => ItemCatalog::from_path(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
        None => ItemCatalog::builtin().context("Built-in catalog is invalid")?,
    };
    debug!(items = catalog.len(), "loaded item catalog");
    Ok(catalog)
}

/// Loads and validates a pipeline configuration.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}
