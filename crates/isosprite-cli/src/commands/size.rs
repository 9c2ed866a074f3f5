//! Size command implementation
//!
//! Prints the pixel size of an item's sprite.

use anyhow::{Context, Result};
use colored::Colorize;
use isosprite_core::{SpriteError, SpriteResult, SpriteSizer};
use serde::Serialize;
use std::process::ExitCode;

use super::json_output::CommandOutput;
use crate::input::Inputs;

/// Result of the size command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SizeResult {
    pub item: String,
    pub footprint: [u32; 3],
    pub base_scale: f64,
    pub extra_scale: f64,
    pub width: u32,
    pub height: u32,
}

/// Run the size command
///
/// # Arguments
/// * `inputs` - Catalog and configuration
/// * `item` - Item identifier
/// * `scale` - Extra scale factor
/// * `atlas` - Use the configured oversampling factor instead of `scale`
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    inputs: &Inputs,
    item: &str,
    scale: f64,
    atlas: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let extra_scale = if atlas {
        inputs.config.oversampling
    } else {
        scale
    };
    let outcome = size(inputs, item, extra_scale);

    if json_output {
        return CommandOutput::from_result(outcome).print();
    }

    let result = outcome.with_context(|| format!("Failed to size '{}'", item))?;
    println!("{} {}", "Item:".cyan().bold(), result.item);
    let [x, y, z] = result.footprint;
    println!("  {} {}x{}x{}", "Footprint:".dimmed(), x, y, z);
    println!(
        "  {} {} (base {})",
        "Scale:".dimmed(),
        result.extra_scale,
        result.base_scale
    );
    println!(
        "  {} {}x{}",
        "Size:".green().bold(),
        result.width,
        result.height
    );
    Ok(ExitCode::SUCCESS)
}

fn size(inputs: &Inputs, item: &str, extra_scale: f64) -> SpriteResult<SizeResult> {
    let entry = inputs
        .catalog
        .get(item)
        .ok_or_else(|| SpriteError::UnknownItem {
            item: item.to_string(),
        })?;
    let sizer = SpriteSizer::with_config(inputs.catalog.clone(), &inputs.config);
    let size = sizer.size(item, extra_scale)?;
    Ok(SizeResult {
        item: item.to_string(),
        footprint: entry.footprint.into(),
        base_scale: entry.base_scale,
        extra_scale,
        width: size.width,
        height: size.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inputs() -> Inputs {
        Inputs::load(None, None).unwrap()
    }

    #[test]
    fn test_size_result() {
        let result = size(&inputs(), "ship", 2.0).unwrap();
        assert_eq!(
            result,
            SizeResult {
                item: "ship".to_string(),
                footprint: [1, 1, 1],
                base_scale: 2.0,
                extra_scale: 2.0,
                width: 256,
                height: 256,
            }
        );
    }

    #[test]
    fn test_size_errors() {
        assert!(matches!(
            size(&inputs(), "tram", 1.0),
            Err(SpriteError::UnknownItem { .. })
        ));
        assert!(matches!(
            size(&inputs(), "cart", 0.0),
            Err(SpriteError::InvalidScale { .. })
        ));
    }

    #[test]
    fn test_run_exit_codes() {
        let inputs = inputs();
        assert_eq!(
            run(&inputs, "coal_mine", 1.0, true, true).unwrap(),
            ExitCode::SUCCESS
        );
        assert_eq!(
            run(&inputs, "tram", 1.0, false, true).unwrap(),
            ExitCode::from(1)
        );
        assert!(run(&inputs, "tram", 1.0, false, false).is_err());
    }
}
