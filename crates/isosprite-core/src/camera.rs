//! Render camera capability and a host-equivalent camera model.
//!
//! The host exposes "world to camera view": a world point mapped into the
//! camera's normalized frame, `(0, 0)` at the bottom-left and `(1, 1)` at the
//! top-right, with the distance in front of the camera as the third
//! component. [`CameraModel`] reproduces that mapping for cameras described
//! by a pose and a lens, which is what scene snapshots and atlas layouts use.

use glam::{DAffine3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Camera capability supplied by the scene host.
pub trait RenderCamera {
    /// Whether the camera can currently resolve projections.
    fn is_valid(&self) -> bool;

    /// Maps a world point to `(u, v, depth)` in normalized camera view space.
    ///
    /// `depth` is positive for points in front of the camera. No clipping is
    /// applied; callers check the result.
    fn world_to_camera_view(&self, point: DVec3) -> DVec3;
}

/// Projection type and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraProjection {
    /// Parallel projection covering `ortho_scale` units along the wider axis.
    Orthographic { ortho_scale: f64 },
    /// Pinhole projection; the sensor width spans the wider axis.
    Perspective { lens_mm: f64, sensor_width_mm: f64 },
}

/// Projection plus the aspect ratio of the render it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraLens {
    #[serde(flatten)]
    pub projection: CameraProjection,
    /// Render resolution width divided by height.
    #[serde(default = "default_aspect")]
    pub aspect: f64,
}

fn default_aspect() -> f64 {
    1.0
}

impl CameraLens {
    pub fn orthographic(ortho_scale: f64, aspect: f64) -> Self {
        Self {
            projection: CameraProjection::Orthographic { ortho_scale },
            aspect,
        }
    }

    pub fn perspective(lens_mm: f64, sensor_width_mm: f64, aspect: f64) -> Self {
        Self {
            projection: CameraProjection::Perspective {
                lens_mm,
                sensor_width_mm,
            },
            aspect,
        }
    }

    fn is_valid(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.aspect)
            && match self.projection {
                CameraProjection::Orthographic { ortho_scale } => positive(ortho_scale),
                CameraProjection::Perspective {
                    lens_mm,
                    sensor_width_mm,
                } => positive(lens_mm) && positive(sensor_width_mm),
            }
    }

    /// Half width and half height of the visible frame at `depth`.
    fn half_extents(&self, depth: f64) -> (f64, f64) {
        let half = match self.projection {
            CameraProjection::Orthographic { ortho_scale } => ortho_scale / 2.0,
            CameraProjection::Perspective {
                lens_mm,
                sensor_width_mm,
            } => sensor_width_mm / 2.0 / lens_mm * depth,
        };
        // The frame size applies to the wider axis.
        if self.aspect >= 1.0 {
            (half, half / self.aspect)
        } else {
            (half * self.aspect, half)
        }
    }
}

/// A posed camera. Looks down its local −Z axis with +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraModel {
    world: DAffine3,
    lens: CameraLens,
}

/// Rotation from XYZ Euler angles in the host's convention (X applied first).
pub fn euler_xyz(rotation: DVec3) -> DQuat {
    DQuat::from_rotation_z(rotation.z)
        * DQuat::from_rotation_y(rotation.y)
        * DQuat::from_rotation_x(rotation.x)
}

impl CameraModel {
    /// Creates a camera from a location and XYZ Euler rotation in radians.
    pub fn new(location: DVec3, rotation: DVec3, lens: CameraLens) -> Self {
        Self::from_world(
            DAffine3::from_rotation_translation(euler_xyz(rotation), location),
            lens,
        )
    }

    /// Creates a camera from its world transform.
    pub fn from_world(world: DAffine3, lens: CameraLens) -> Self {
        Self { world, lens }
    }
}

impl RenderCamera for CameraModel {
    fn is_valid(&self) -> bool {
        let det = self.world.matrix3.determinant();
        self.lens.is_valid() && det.is_finite() && det.abs() > f64::EPSILON
    }

    fn world_to_camera_view(&self, point: DVec3) -> DVec3 {
        let local = self.world.inverse().transform_point3(point);
        let depth = -local.z;
        let (half_w, half_h) = self.lens.half_extents(depth);
        DVec3::new(
            (local.x + half_w) / (2.0 * half_w),
            (local.y + half_h) / (2.0 * half_h),
            depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(actual: DVec3, expected: DVec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-9),
            "expected {expected:?}, got {actual:?}"
        );
    }

    /// Front camera: 10 units down −Y, rotated to look along +Y with +Z up.
    fn front_camera(lens: CameraLens) -> CameraModel {
        CameraModel::new(
            DVec3::new(0.0, -10.0, 0.0),
            DVec3::new(FRAC_PI_2, 0.0, 0.0),
            lens,
        )
    }

    #[test]
    fn orthographic_centre_and_edges() {
        let camera = front_camera(CameraLens::orthographic(4.0, 1.0));
        assert!(camera.is_valid());

        assert_close(
            camera.world_to_camera_view(DVec3::ZERO),
            DVec3::new(0.5, 0.5, 10.0),
        );
        assert_close(
            camera.world_to_camera_view(DVec3::new(1.0, 0.0, 1.0)),
            DVec3::new(0.75, 0.75, 10.0),
        );
        // Bottom-left and top-right corners of the frame.
        assert_close(
            camera.world_to_camera_view(DVec3::new(-2.0, 3.0, -2.0)),
            DVec3::new(0.0, 0.0, 13.0),
        );
        assert_close(
            camera.world_to_camera_view(DVec3::new(2.0, 0.0, 2.0)),
            DVec3::new(1.0, 1.0, 10.0),
        );
    }

    #[test]
    fn orthographic_aspect_applies_to_wider_axis() {
        // 2:1 frame, 4 units wide and 2 tall.
        let camera = front_camera(CameraLens::orthographic(4.0, 2.0));
        assert_close(
            camera.world_to_camera_view(DVec3::new(2.0, 0.0, 1.0)),
            DVec3::new(1.0, 1.0, 10.0),
        );

        // 1:2 frame, 2 units wide and 4 tall.
        let camera = front_camera(CameraLens::orthographic(4.0, 0.5));
        assert_close(
            camera.world_to_camera_view(DVec3::new(1.0, 0.0, 2.0)),
            DVec3::new(1.0, 1.0, 10.0),
        );
    }

    #[test]
    fn perspective_scales_with_depth() {
        // 36mm sensor on a 36mm lens: half width equals half the depth.
        let camera = front_camera(CameraLens::perspective(36.0, 36.0, 1.0));
        assert_close(
            camera.world_to_camera_view(DVec3::new(5.0, 0.0, 0.0)),
            DVec3::new(1.0, 0.5, 10.0),
        );
        assert_close(
            camera.world_to_camera_view(DVec3::new(5.0, 10.0, 0.0)),
            DVec3::new(0.75, 0.5, 20.0),
        );
    }

    #[test]
    fn point_behind_camera_has_negative_depth() {
        let camera = front_camera(CameraLens::orthographic(4.0, 1.0));
        let view = camera.world_to_camera_view(DVec3::new(0.0, -20.0, 0.0));
        assert!(view.z < 0.0);
    }

    #[test]
    fn degenerate_cameras_are_invalid() {
        assert!(!front_camera(CameraLens::orthographic(0.0, 1.0)).is_valid());
        assert!(!front_camera(CameraLens::perspective(0.0, 36.0, 1.0)).is_valid());
        assert!(!front_camera(CameraLens::orthographic(4.0, f64::NAN)).is_valid());

        let collapsed = CameraModel::from_world(
            DAffine3::from_scale(DVec3::new(1.0, 0.0, 1.0)),
            CameraLens::orthographic(4.0, 1.0),
        );
        assert!(!collapsed.is_valid());
    }

    #[test]
    fn lens_json_shape() {
        let lens: CameraLens =
            serde_json::from_str(r#"{ "type": "orthographic", "ortho_scale": 4.0, "aspect": 1.2 }"#)
                .unwrap();
        assert_eq!(lens, CameraLens::orthographic(4.0, 1.2));

        let lens: CameraLens = serde_json::from_str(
            r#"{ "type": "perspective", "lens_mm": 50.0, "sensor_width_mm": 36.0 }"#,
        )
        .unwrap();
        assert_eq!(lens, CameraLens::perspective(50.0, 36.0, 1.0));
    }
}
