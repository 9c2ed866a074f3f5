//! Plan command implementation
//!
//! Resolves the sprite sheet of one render stage: cell size, grid, plane
//! tiling, camera framing and the frame bound to every cell.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use isosprite_core::{direction_render_dirs, SheetPlan, SheetPlanner, SpriteResult, SpriteSizer};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::CommandOutput;
use crate::input::Inputs;

/// Render stage a sheet is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Vehicle animations in the twelve travel directions
    Moving,
    /// Static building stills at four rotations
    Rotatable,
    /// Housing construction animation, one row per variety
    Housing,
    /// Industry construction animation, one row per rotation
    Industry,
}

/// Arguments of the plan command.
#[derive(Debug, Clone)]
pub struct PlanArgs<'a> {
    pub stage: Stage,
    pub item: &'a str,
    pub version: &'a str,
    pub renders_dir: Option<&'a Path>,
    pub frames: Option<u32>,
    pub varieties: &'a [PathBuf],
}

/// Run the plan command
///
/// # Returns
/// Exit code: 0 if the sheet could be planned, 1 otherwise
pub fn run(inputs: &Inputs, args: &PlanArgs<'_>, json_output: bool) -> Result<ExitCode> {
    let outcome = plan(inputs, args);

    if json_output {
        return CommandOutput::from_result(outcome).print();
    }

    println!(
        "{} {:?} sheet for {} ({})",
        "Planning:".cyan().bold(),
        args.stage,
        args.item,
        args.version
    );
    let plan = outcome.with_context(|| format!("Failed to plan sheet for '{}'", args.item))?;
    print_plan(&plan);
    println!(
        "\n{} {} cells bound",
        "SUCCESS".green().bold(),
        plan.bindings.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn plan(inputs: &Inputs, args: &PlanArgs<'_>) -> SpriteResult<SheetPlan> {
    let sizer = SpriteSizer::with_config(inputs.catalog.clone(), &inputs.config);
    let planner = SheetPlanner::new(&sizer, &inputs.config);
    let renders_dir = args
        .renders_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new("renders").join(args.item).join(args.version));
    let frames = args.frames.unwrap_or(inputs.config.default_frames);

    match args.stage {
        Stage::Moving => planner.moving(
            args.item,
            args.version,
            &direction_render_dirs(&renders_dir),
            frames,
        ),
        Stage::Rotatable => planner.rotatable(args.item, args.version, &renders_dir),
        Stage::Housing => {
            planner.housing_construction(args.item, args.version, args.varieties, frames)
        }
        Stage::Industry => {
            planner.industry_construction(args.item, args.version, &renders_dir, frames)
        }
    }
}

fn print_plan(plan: &SheetPlan) {
    let layout = &plan.layout;
    let camera = layout.camera_location;
    println!("  {} {}", "Cell:".dimmed(), plan.grid.cell);
    println!(
        "  {} {} x {} ({})",
        "Grid:".dimmed(),
        plan.grid.n_cols,
        plan.grid.n_rows,
        plan.grid.mode.as_str()
    );
    println!(
        "  {} {}x{}",
        "Resolution:".dimmed(),
        layout.resolution[0],
        layout.resolution[1]
    );
    println!("  {} {:.3}", "Ortho scale:".dimmed(), layout.ortho_scale);
    println!(
        "  {} ({:.3}, {:.3}, {:.3})",
        "Camera:".dimmed(),
        camera.x,
        camera.y,
        camera.z
    );
    if let Some(sweep) = &plan.construction {
        println!(
            "  {} z {} -> {} over frames {}-{} ({})",
            "Sweep:".dimmed(),
            sweep.spawn_z,
            sweep.max_z,
            sweep.first_frame,
            sweep.last_frame,
            sweep.collections.join(", ")
        );
    }
    println!("  {} {}", "Sheet:".dimmed(), plan.texture_path().display());
}
