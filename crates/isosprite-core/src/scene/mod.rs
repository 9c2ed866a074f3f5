//! Scene-state capability.
//!
//! Smoke extraction never talks to the 3D host directly. It drives a
//! [`SceneContext`]: select an object, move the timeline, rotate the active
//! object, then read positions and project them through the active camera.
//! The host adapter implements the trait against the live scene;
//! [`SnapshotScene`] implements it from a JSON description so the extraction
//! can run without the host.

mod snapshot;


use glam::DVec3;

use crate::camera::RenderCamera;
use crate::error::SpriteResult;

pub use snapshot::{SnapshotCollection, SnapshotObject, SnapshotScene};

/// Mutable scene state the extraction stages drive.
///
/// Calls are strictly sequential: a caller sets state, reads positions and
/// projects before issuing the next state change.
pub trait SceneContext {
    /// Camera type resolved by [`SceneContext::active_camera`].
    type Camera: RenderCamera;

    /// Makes `name` the active object.
    ///
    /// Fails with [`SpriteError::MissingSceneObject`](crate::SpriteError::MissingSceneObject)
    /// if the scene has no such object.
    fn set_active_object(&mut self, name: &str) -> SpriteResult<()>;

    /// Moves the timeline to a 1-based host frame.
    fn set_frame(&mut self, frame: u32) -> SpriteResult<()>;

    /// Sets the Z Euler rotation of the active object, in radians.
    fn set_active_rotation_z(&mut self, radians: f64) -> SpriteResult<()>;

    /// Camera of the active object at the current scene state.
    fn active_camera(&self) -> SpriteResult<Self::Camera>;

    /// World-space position of an object at the current scene state.
    fn world_location(&self, name: &str) -> SpriteResult<DVec3>;

    /// Objects of a collection with their world positions, in host order.
    fn list_named_children(&self, collection: &str) -> SpriteResult<Vec<(String, DVec3)>>;
}
