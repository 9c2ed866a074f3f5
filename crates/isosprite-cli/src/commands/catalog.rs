//! Catalog command implementation
//!
//! Lists the items of the catalog with their in-game and atlas sprite sizes.
//! The catalog has already been validated when it was loaded.

use anyhow::Result;
use colored::Colorize;
use isosprite_core::{SpriteResult, SpriteSizer};
use isosprite_spec::{PipelineErrorCode, SpriteSize};
use serde::Serialize;
use std::process::ExitCode;

use super::json_output::{CommandOutput, JsonError};
use crate::input::Inputs;

/// One catalog item in the command output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub footprint: [u32; 3],
    pub base_scale: f64,
    pub sprite: SpriteSize,
    pub atlas: SpriteSize,
    pub constructible: bool,
}

/// Result of the catalog command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogResult {
    pub items: Vec<CatalogItem>,
}

/// Run the catalog command
///
/// # Arguments
/// * `inputs` - Catalog and configuration
/// * `require` - Items that must be present
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every required item is present, 1 otherwise
pub fn run(inputs: &Inputs, require: &[String], json_output: bool) -> Result<ExitCode> {
    let missing = inputs
        .catalog
        .require(require.iter().map(String::as_str))
        .err();
    let listing = list(inputs);

    if json_output {
        let output = match (missing, listing) {
            (None, Ok(result)) => CommandOutput::success(result),
            (Some(err), _) => CommandOutput::failure(vec![JsonError::from_error(&err)]),
            (None, Err(err)) => CommandOutput::failure(vec![JsonError::from_error(&err)]),
        };
        return output.print();
    }

    println!(
        "{} {} items",
        "Catalog:".cyan().bold(),
        inputs.catalog.len()
    );
    let result = listing?;
    for item in &result.items {
        let [x, y, z] = item.footprint;
        let construction = if item.constructible {
            " construction".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {:<28} {}x{}x{}  {:>9}  atlas {:>9}{}",
            "->".green(),
            item.name,
            x,
            y,
            z,
            item.sprite.to_string(),
            item.atlas.to_string(),
            construction
        );
    }

    match missing {
        None => {
            println!("\n{} Catalog is valid", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Some(err) => {
            println!("\n{} [{}] {}", "FAILED".red().bold(), err.code(), err);
            Ok(ExitCode::from(1))
        }
    }
}

fn list(inputs: &Inputs) -> SpriteResult<CatalogResult> {
    let sizer = SpriteSizer::with_config(inputs.catalog.clone(), &inputs.config);
    let items = inputs
        .catalog
        .iter()
        .map(|(name, entry)| {
            Ok(CatalogItem {
                name: name.to_string(),
                footprint: entry.footprint.into(),
                base_scale: entry.base_scale,
                sprite: sizer.size(name, 1.0)?,
                atlas: sizer.atlas_size(name)?,
                constructible: entry.construction.is_some(),
            })
        })
        .collect::<SpriteResult<Vec<_>>>()?;
    Ok(CatalogResult { items })
}
