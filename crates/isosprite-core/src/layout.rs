//! Atlas layout planning.
//!
//! An atlas is rendered by tiling one textured plane per cell in front of an
//! orthographic camera. The base plane (2x2 units, centred at the origin,
//! standing upright in the XZ plane) keeps its height and is stretched to the
//! cell's aspect ratio with its left edge pinned. Columns repeat along +X and
//! rows along -Z, so cell `(0, 0)` stays top-left in the render. The camera
//! looks along +Y at the middle of the tiling and its orthographic scale
//! covers the longer side, which makes the frame match the tiling exactly.

use glam::DVec3;
use isosprite_spec::{BasePlane, CellAddress, GridSpec, SpecError, SpriteSize};
use serde::Serialize;
use tracing::debug;

use crate::camera::{CameraLens, CameraModel};
use crate::error::{SpriteError, SpriteResult};

/// Geometry and camera framing of one atlas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasLayout {
    pub cell: SpriteSize,
    pub n_cols: u32,
    pub n_rows: u32,
    /// Plane the cells are stretched from.
    pub base_plane: BasePlane,
    /// Physical size of one replicated cell plane.
    pub cell_plane: BasePlane,
    /// Shift along X that keeps the stretched plane's left edge in place.
    pub plane_offset_x: f64,
    pub ortho_scale: f64,
    pub camera_location: DVec3,
    /// XYZ Euler rotation of the camera, in radians.
    pub camera_rotation: DVec3,
    /// Render resolution `[width, height]` in pixels.
    pub resolution: [u32; 2],
}

impl AtlasLayout {
    /// Render width divided by height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.resolution[0]) / f64::from(self.resolution[1])
    }

    /// World position of the centre of a cell.
    pub fn cell_center(&self, address: CellAddress) -> DVec3 {
        DVec3::new(
            -self.base_plane.width / 2.0 + self.cell_plane.width * (f64::from(address.col) + 0.5),
            0.0,
            self.base_plane.height / 2.0
                - self.cell_plane.height * (f64::from(address.row) + 0.5),
        )
    }

    /// The camera the atlas is rendered with.
    pub fn camera_model(&self) -> CameraModel {
        CameraModel::new(
            self.camera_location,
            self.camera_rotation,
            CameraLens::orthographic(self.ortho_scale, self.aspect()),
        )
    }
}

/// Computes atlas layouts from a base cell plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtlasLayoutPlanner {
    base_plane: BasePlane,
}

impl AtlasLayoutPlanner {
    pub fn new(base_plane: BasePlane) -> Self {
        Self { base_plane }
    }

    pub fn base_plane(&self) -> BasePlane {
        self.base_plane
    }

    /// Lays out an `n_cols` x `n_rows` atlas of `cell`-sized sprites.
    ///
    /// # Errors
    ///
    /// - [`SpriteError::InvalidCellSize`] if the cell has a zero dimension.
    /// - [`SpriteError::GridCardinality`] if either count is zero or the
    ///   atlas resolution does not fit in `u32`.
    pub fn plan(&self, cell: SpriteSize, n_cols: u32, n_rows: u32) -> SpriteResult<AtlasLayout> {
        if cell.width == 0 || cell.height == 0 {
            return Err(SpriteError::InvalidCellSize {
                width: cell.width,
                height: cell.height,
            });
        }
        if n_cols == 0 || n_rows == 0 {
            return Err(SpriteError::grid_cardinality(format!(
                "atlas needs at least one column and one row, got {n_cols}x{n_rows}"
            )));
        }
        let resolution = match (cell.width.checked_mul(n_cols), cell.height.checked_mul(n_rows)) {
            (Some(width), Some(height)) => [width, height],
            _ => {
                return Err(SpriteError::grid_cardinality(format!(
                    "{n_cols}x{n_rows} cells of {cell} exceed the atlas pixel range"
                )))
            }
        };
        let base = self.base_plane;
        if !(base.width.is_finite() && base.height.is_finite() && base.width > 0.0 && base.height > 0.0)
        {
            return Err(SpecError::invalid_config(format!(
                "base plane must have positive size, got {}x{}",
                base.width, base.height
            ))
            .into());
        }

        let cell_plane = BasePlane {
            width: base.height * cell.aspect(),
            height: base.height,
        };
        let (half_w, half_h) = (base.width / 2.0, base.height / 2.0);
        let extent_w = cell_plane.width * f64::from(n_cols);
        let extent_h = cell_plane.height * f64::from(n_rows);

        let layout = AtlasLayout {
            cell,
            n_cols,
            n_rows,
            base_plane: base,
            cell_plane,
            plane_offset_x: (cell_plane.width - base.width) / 2.0,
            ortho_scale: extent_w.max(extent_h),
            camera_location: DVec3::new(extent_w / 2.0 - half_w, -half_h, -(extent_h / 2.0) + half_h),
            camera_rotation: DVec3::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0),
            resolution,
        };
        debug!(
            %cell,
            n_cols,
            n_rows,
            ortho_scale = layout.ortho_scale,
            "planned atlas layout"
        );
        Ok(layout)
    }

    /// Lays out the atlas a grid describes.
    pub fn plan_grid(&self, grid: &GridSpec) -> SpriteResult<AtlasLayout> {
        self.plan(grid.cell, grid.n_cols, grid.n_rows)
    }
}
