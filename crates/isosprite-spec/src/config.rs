//! Pipeline configuration.
//!
//! Every constant the pipeline stages share lives here: isometric tile size,
//! atlas oversampling, the base cell plane used for atlas layout, and the names
//! of the scene objects the smoke extraction looks up. All fields have
//! defaults, so a configuration file only needs to list what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Width of one isometric tile in pixels.
pub const TILE_WIDTH: u32 = 64;

/// Height of one isometric tile in pixels.
pub const TILE_HEIGHT: u32 = 32;

/// Scale applied to atlas source frames relative to in-game sprites.
pub const ATLAS_OVERSAMPLING: f64 = 2.0;

/// Default number of frames in an animation sequence.
pub const DEFAULT_FRAME_COUNT: u32 = 24;

/// Physical size of the unit plane that one atlas cell is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasePlane {
    pub width: f64,
    pub height: f64,
}

impl Default for BasePlane {
    fn default() -> Self {
        // Primitive plane of the host: 2x2 units centred at the origin.
        Self {
            width: 2.0,
            height: 2.0,
        }
    }
}

/// Names of the scene objects the extraction stages look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneNames {
    /// Camera used by moving-smoke sequences.
    pub moving_camera: String,
    /// Camera used by static models.
    pub static_camera: String,
    /// Marker at the smoke source of a vehicle.
    pub smoke_emitter: String,
    /// Marker the smoke drifts towards.
    pub direction_reference: String,
    /// Empty every static model is parented to; rotating it rotates the model.
    pub origin: String,
    /// Collection holding the static smoke emitters.
    pub smoke_emitters: String,
}

impl Default for SceneNames {
    fn default() -> Self {
        Self {
            moving_camera: "Camera.001".to_string(),
            static_camera: "Camera".to_string(),
            smoke_emitter: "SmokeEmitter".to_string(),
            direction_reference: "DirectionReference".to_string(),
            origin: "Origin".to_string(),
            smoke_emitters: "SmokeEmitters".to_string(),
        }
    }
}

/// Configuration shared by all pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Isometric tile width in pixels.
    pub tile_width: u32,
    /// Isometric tile height in pixels.
    pub tile_height: u32,
    /// Extra scale applied to atlas source frames.
    pub oversampling: f64,
    /// Frame count used when a stage does not specify one.
    pub default_frames: u32,
    /// Geometry of a single atlas cell before aspect correction.
    pub base_plane: BasePlane,
    /// Height the construction cutting volume starts at.
    pub construction_spawn_z: f64,
    /// Scene object names.
    pub scene: SceneNames,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            oversampling: ATLAS_OVERSAMPLING,
            default_frames: DEFAULT_FRAME_COUNT,
            base_plane: BasePlane::default(),
            construction_spawn_z: 4.025,
            scene: SceneNames::default(),
        }
    }
}

impl PipelineConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_path(path: &Path) -> SpecResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Sets the oversampling factor.
    pub fn oversampling(mut self, factor: f64) -> Self {
        self.oversampling = factor;
        self
    }

    /// Sets the default frame count.
    pub fn default_frames(mut self, frames: u32) -> Self {
        self.default_frames = frames;
        self
    }

    /// Sets the base plane geometry.
    pub fn base_plane(mut self, width: f64, height: f64) -> Self {
        self.base_plane = BasePlane { width, height };
        self
    }

    pub fn validate(&self) -> SpecResult<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(SpecError::invalid_config("tile size must be non-zero"));
        }
        if !self.oversampling.is_finite() || self.oversampling <= 0.0 {
            return Err(SpecError::invalid_config(format!(
                "oversampling must be positive, got {}",
                self.oversampling
            )));
        }
        if self.default_frames == 0 {
            return Err(SpecError::invalid_config("default_frames must be at least 1"));
        }
        let plane = self.base_plane;
        if !(plane.width.is_finite() && plane.height.is_finite())
            || plane.width <= 0.0
            || plane.height <= 0.0
        {
            return Err(SpecError::invalid_config(format!(
                "base plane must have positive size, got {}x{}",
                plane.width, plane.height
            )));
        }
        Ok(())
    }
}
