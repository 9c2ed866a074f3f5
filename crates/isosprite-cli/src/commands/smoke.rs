//! Smoke command implementation
//!
//! Extracts smoke anchor records from scene snapshots and writes them where
//! the game loads them from.

use anyhow::{Context, Result};
use colored::Colorize;
use isosprite_core::{
    smoke_data_dir, write_record, MovingSequence, SmokeExtractor, SnapshotScene, SpriteResult,
    SpriteSizer,
};
use isosprite_spec::{Rotation, SmokeKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use super::json_output::CommandOutput;
use crate::input::Inputs;

/// Result of `smoke moving`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovingSmokeResult {
    pub path: PathBuf,
    pub directions: Vec<String>,
    pub frames: u32,
}

/// Result of `smoke static`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaticSmokeResult {
    pub path: PathBuf,
    /// Emitter count at each rotation, in rotation order.
    pub emitters: Vec<usize>,
}

/// Run `smoke moving`
///
/// # Arguments
/// * `inputs` - Catalog and configuration
/// * `item` - Item identifier
/// * `version` - Model version
/// * `sequences` - Snapshot of each direction sequence
/// * `frames` - Frame count, or the configured default
/// * `out_dir` - Output directory, or the moving smoke data directory
/// * `json_output` - Whether to output machine-readable JSON
pub fn run_moving(
    inputs: &Inputs,
    item: &str,
    version: &str,
    sequences: &[PathBuf],
    frames: Option<u32>,
    out_dir: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let frames = frames.unwrap_or(inputs.config.default_frames);
    let out_dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(smoke_data_dir(SmokeKind::Moving)));
    let outcome = moving(inputs, item, version, sequences, frames, &out_dir);

    if json_output {
        return CommandOutput::from_result(outcome).print();
    }

    println!(
        "{} {} sequences of {}",
        "Extracting:".cyan().bold(),
        sequences.len(),
        item
    );
    let result = outcome.with_context(|| format!("Failed to extract smoke for '{}'", item))?;
    println!(
        "  {} {}",
        "Directions:".dimmed(),
        result.directions.join(", ")
    );
    println!("  {} {}", "Frames:".dimmed(), result.frames);
    println!(
        "\n{} wrote {}",
        "SUCCESS".green().bold(),
        result.path.display()
    );
    Ok(ExitCode::SUCCESS)
}

/// Run `smoke static`
pub fn run_static(
    inputs: &Inputs,
    item: &str,
    version: &str,
    snapshot: &Path,
    out_dir: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let out_dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(smoke_data_dir(SmokeKind::Static)));
    let outcome = building(inputs, item, version, snapshot, &out_dir);

    if json_output {
        return CommandOutput::from_result(outcome).print();
    }

    println!(
        "{} {} ({})",
        "Extracting:".cyan().bold(),
        item,
        snapshot.display()
    );
    let result = outcome.with_context(|| format!("Failed to extract smoke for '{}'", item))?;
    for (rotation, count) in Rotation::ALL.iter().zip(&result.emitters) {
        println!("  {:>3}° {} emitters", rotation.degrees(), count);
    }
    println!(
        "\n{} wrote {}",
        "SUCCESS".green().bold(),
        result.path.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn moving(
    inputs: &Inputs,
    item: &str,
    version: &str,
    paths: &[PathBuf],
    frames: u32,
    out_dir: &Path,
) -> SpriteResult<MovingSmokeResult> {
    let mut sequences = paths
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "loading sequence snapshot");
            MovingSequence::from_path(path, SnapshotScene::from_path(path)?)
        })
        .collect::<SpriteResult<Vec<_>>>()?;

    let sizer = SpriteSizer::with_config(inputs.catalog.clone(), &inputs.config);
    let extractor = SmokeExtractor::new(&sizer, &inputs.config.scene);
    let data = extractor.extract_moving_smoke(item, &mut sequences, frames)?;
    let path = write_record(out_dir, item, version, SmokeKind::Moving, &data)?;

    Ok(MovingSmokeResult {
        path,
        directions: data
            .direction_frames
            .iter()
            .map(|direction| direction.diagonal_pair().source_label().to_string())
            .collect(),
        frames,
    })
}

fn building(
    inputs: &Inputs,
    item: &str,
    version: &str,
    snapshot: &Path,
    out_dir: &Path,
) -> SpriteResult<StaticSmokeResult> {
    let mut scene = SnapshotScene::from_path(snapshot)?;

    let sizer = SpriteSizer::with_config(inputs.catalog.clone(), &inputs.config);
    let extractor = SmokeExtractor::new(&sizer, &inputs.config.scene);
    let data = extractor.extract_static_smoke(item, &mut scene)?;
    let path = write_record(out_dir, item, version, SmokeKind::Static, &data)?;

    Ok(StaticSmokeResult {
        path,
        emitters: Rotation::ALL
            .iter()
            .map(|rotation| data.anchors(*rotation).len())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use isosprite_core::SpriteError;
    use pretty_assertions::assert_eq;
    use std::fs;

    const CAMERA: &str = r#"{
        "name": "NAME",
        "location": [0, -10, 0],
        "rotation": [1.5707963267948966, 0, 0],
        "camera": { "type": "orthographic", "ortho_scale": 4.0 }
    }"#;

    fn vehicle_snapshot() -> String {
        format!(
            r#"{{ "objects": [
                {},
                {{ "name": "SmokeEmitter", "location": [0, 0, 0.5] }},
                {{ "name": "DirectionReference", "location": [0, 0, 1] }}
            ] }}"#,
            CAMERA.replace("NAME", "Camera.001")
        )
    }

    fn building_snapshot() -> String {
        format!(
            r#"{{
                "objects": [
                    {},
                    {{ "name": "Origin" }},
                    {{ "name": "Chimney", "parent": "Origin", "location": [0, 0, 1] }}
                ],
                "collections": [ {{ "name": "SmokeEmitters", "objects": ["Chimney"] }} ]
            }}"#,
            CAMERA.replace("NAME", "Camera")
        )
    }

    #[test]
    fn test_moving_writes_record() {
        let tmp = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for label in ["BL-TR", "TR-BL"] {
            let path = tmp.path().join(format!("cart_{}.json", label));
            fs::write(&path, vehicle_snapshot()).unwrap();
            paths.push(path);
        }
        let out_dir = tmp.path().join("out");

        let inputs = Inputs::load(None, None).unwrap();
        let result = moving(&inputs, "cart", "v2", &paths, 3, &out_dir).unwrap();

        assert_eq!(result.path, out_dir.join("cart_v2.moving_smoke.json"));
        assert_eq!(result.directions, vec!["BL-TR", "TR-BL"]);
        assert!(result.path.exists());
    }

    #[test]
    fn test_moving_rejects_unlabelled_sequence() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cart.json");
        fs::write(&path, vehicle_snapshot()).unwrap();

        let inputs = Inputs::load(None, None).unwrap();
        let err = moving(&inputs, "cart", "v1", &[path], 2, tmp.path()).unwrap_err();
        assert!(matches!(err, SpriteError::Spec(_)));
    }

    #[test]
    fn test_static_counts_emitters_per_rotation() {
        let tmp = tempfile::tempdir().unwrap();
        let snapshot = tmp.path().join("steel_works.json");
        fs::write(&snapshot, building_snapshot()).unwrap();

        let inputs = Inputs::load(None, None).unwrap();
        let result = building(&inputs, "steel_works", "default", &snapshot, tmp.path()).unwrap();

        assert_eq!(result.emitters, vec![1, 1, 1, 1]);
        assert_eq!(
            result.path,
            tmp.path().join("steel_works_default.static_smoke.json")
        );
    }

    #[test]
    fn test_static_missing_snapshot_json_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = Inputs::load(None, None).unwrap();
        let code = run_static(
            &inputs,
            "steel_works",
            "default",
            &tmp.path().join("missing.json"),
            Some(tmp.path()),
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
