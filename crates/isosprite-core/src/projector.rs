//! Projection of world points into sprite pixel space.
//!
//! Projection happens in two steps. [`project`] asks the camera for the
//! normalized view coordinates of a world point, and [`to_sprite_pixels`]
//! rescales them by the sprite size. The vertical axis is kept as the camera
//! reports it, so `y = 0` is the bottom edge of the frame.

use glam::DVec3;
use isosprite_spec::{AnchorRecord, SpriteSize};

use crate::camera::RenderCamera;
use crate::error::{SpriteError, SpriteResult};

/// Normalized view coordinates: `(0, 0)` bottom-left, `(1, 1)` top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCoords {
    pub u: f64,
    pub v: f64,
}

impl ViewCoords {
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// Projects a world point through `camera`.
///
/// # Errors
///
/// [`SpriteError::Projection`] if the camera is not valid, the point lies on
/// or behind the camera plane, or the result is not finite.
pub fn project<C: RenderCamera + ?Sized>(camera: &C, point: DVec3) -> SpriteResult<ViewCoords> {
    if !point.is_finite() {
        return Err(SpriteError::projection(format!(
            "point {point} is not finite"
        )));
    }
    if !camera.is_valid() {
        return Err(SpriteError::projection("camera cannot resolve projections"));
    }

    let view = camera.world_to_camera_view(point);
    if !view.is_finite() {
        return Err(SpriteError::projection(format!(
            "projection of {point} is not finite"
        )));
    }
    if view.z <= 0.0 {
        return Err(SpriteError::projection(format!(
            "point {point} is behind the camera (depth {})",
            view.z
        )));
    }
    Ok(ViewCoords::new(view.x, view.y))
}

/// Scales normalized view coordinates to sprite pixels.
pub fn to_sprite_pixels(size: SpriteSize, u: f64, v: f64) -> SpriteResult<AnchorRecord> {
    if !(u.is_finite() && v.is_finite()) {
        return Err(SpriteError::projection(format!(
            "view coordinates ({u}, {v}) are not finite"
        )));
    }
    Ok(AnchorRecord::new(
        u * f64::from(size.width),
        v * f64::from(size.height),
    ))
}

/// [`project`] followed by [`to_sprite_pixels`].
pub fn project_to_sprite<C: RenderCamera + ?Sized>(
    camera: &C,
    point: DVec3,
    size: SpriteSize,
) -> SpriteResult<AnchorRecord> {
    let view = project(camera, point)?;
    to_sprite_pixels(size, view.u, view.v)
}
