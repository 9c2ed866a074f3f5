//! Scene snapshots: a host scene captured as JSON.
//!
//! A snapshot lists objects with their parent, location, XYZ Euler rotation
//! (radians) and an optional per-frame location track, plus ordered
//! collections. Camera objects carry a lens. World transforms compose through
//! the parent chain the way the host composes them, so rotating an `Origin`
//! empty carries every child with it.
//!
//! ```json
//! {
//!     "objects": [
//!         { "name": "Camera.001", "location": [0, -10, 0], "rotation": [1.5708, 0, 0],
//!           "camera": { "type": "orthographic", "ortho_scale": 4.0 } },
//!         { "name": "SmokeEmitter", "track": [[0, 0, 1], [0.1, 0, 1]] }
//!     ],
//!     "collections": [ { "name": "SmokeEmitters", "objects": ["SmokeEmitter"] } ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use glam::{DAffine3, DVec3};
use isosprite_spec::SpecError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SceneContext;
use crate::camera::{euler_xyz, CameraLens, CameraModel};
use crate::error::{SceneObjectKind, SpriteError, SpriteResult};

/// One object of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotObject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Location relative to the parent.
    #[serde(default)]
    pub location: [f64; 3],
    /// XYZ Euler rotation relative to the parent, in radians.
    #[serde(default)]
    pub rotation: [f64; 3],
    /// Per-frame locations from host frame 1 on. Replaces `location` when
    /// present; frames past the end hold the last key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub track: Vec<[f64; 3]>,
    /// Lens of a camera object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraLens>,
}

impl SnapshotObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            location: [0.0; 3],
            rotation: [0.0; 3],
            track: Vec::new(),
            camera: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_location(mut self, location: DVec3) -> Self {
        self.location = location.to_array();
        self
    }

    pub fn with_rotation(mut self, rotation: DVec3) -> Self {
        self.rotation = rotation.to_array();
        self
    }

    pub fn with_track(mut self, track: impl IntoIterator<Item = DVec3>) -> Self {
        self.track = track.into_iter().map(|p| p.to_array()).collect();
        self
    }

    pub fn with_camera(mut self, lens: CameraLens) -> Self {
        self.camera = Some(lens);
        self
    }

    fn location_at(&self, frame: u32) -> DVec3 {
        let key = frame.saturating_sub(1) as usize;
        let location = self
            .track
            .get(key)
            .or(self.track.last())
            .unwrap_or(&self.location);
        DVec3::from_array(*location)
    }

    fn local_transform(&self, frame: u32) -> DAffine3 {
        DAffine3::from_rotation_translation(
            euler_xyz(DVec3::from_array(self.rotation)),
            self.location_at(frame),
        )
    }
}

/// A named, ordered group of objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotCollection {
    pub name: String,
    pub objects: Vec<String>,
}

impl SnapshotCollection {
    pub fn new<S: Into<String>>(name: impl Into<String>, objects: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            objects: objects.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    objects: Vec<SnapshotObject>,
    #[serde(default)]
    collections: Vec<SnapshotCollection>,
}

/// A scene reconstructed from a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotScene {
    objects: Vec<SnapshotObject>,
    parents: Vec<Option<usize>>,
    index: HashMap<String, usize>,
    collections: Vec<SnapshotCollection>,
    frame: u32,
    active: Option<usize>,
}

impl SnapshotScene {
    /// Builds a scene, validating names, parents and collections.
    ///
    /// # Errors
    ///
    /// [`SpriteError::InvalidSnapshot`] for duplicate names, unknown parents
    /// or collection members, and parent cycles.
    pub fn new(
        objects: Vec<SnapshotObject>,
        collections: Vec<SnapshotCollection>,
    ) -> SpriteResult<Self> {
        let mut index = HashMap::with_capacity(objects.len());
        for (i, object) in objects.iter().enumerate() {
            if index.insert(object.name.clone(), i).is_some() {
                return Err(SpriteError::invalid_snapshot(format!(
                    "duplicate object '{}'",
                    object.name
                )));
            }
        }

        let parents = objects
            .iter()
            .map(|object| match &object.parent {
                None => Ok(None),
                Some(parent) => index.get(parent).copied().map(Some).ok_or_else(|| {
                    SpriteError::invalid_snapshot(format!(
                        "object '{}' has unknown parent '{}'",
                        object.name, parent
                    ))
                }),
            })
            .collect::<SpriteResult<Vec<_>>>()?;

        for (i, object) in objects.iter().enumerate() {
            let mut current = i;
            let mut depth = 0;
            while let Some(parent) = parents[current] {
                depth += 1;
                if depth > objects.len() {
                    return Err(SpriteError::invalid_snapshot(format!(
                        "parent cycle through '{}'",
                        object.name
                    )));
                }
                current = parent;
            }
        }

        let mut seen = HashSet::with_capacity(collections.len());
        for collection in &collections {
            if !seen.insert(collection.name.as_str()) {
                return Err(SpriteError::invalid_snapshot(format!(
                    "duplicate collection '{}'",
                    collection.name
                )));
            }
            if let Some(member) = collection.objects.iter().find(|m| !index.contains_key(*m)) {
                return Err(SpriteError::invalid_snapshot(format!(
                    "collection '{}' lists unknown object '{}'",
                    collection.name, member
                )));
            }
        }

        Ok(Self {
            objects,
            parents,
            index,
            collections,
            frame: 1,
            active: None,
        })
    }

    /// Parses a snapshot document.
    pub fn from_json(json: &str) -> SpriteResult<Self> {
        let file: SnapshotFile = serde_json::from_str(json).map_err(SpecError::from)?;
        Self::new(file.objects, file.collections)
    }

    /// Reads and parses a snapshot file.
    pub fn from_path(path: &Path) -> SpriteResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Current 1-based host frame.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn active_object(&self) -> Option<&str> {
        self.active.map(|i| self.objects[i].name.as_str())
    }

    pub fn object(&self, name: &str) -> Option<&SnapshotObject> {
        self.index.get(name).map(|&i| &self.objects[i])
    }

    fn lookup(&self, name: &str) -> SpriteResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SpriteError::missing(SceneObjectKind::Object, name))
    }

    fn active_index(&self) -> SpriteResult<usize> {
        self.active
            .ok_or_else(|| SpriteError::missing(SceneObjectKind::Object, "<active object>"))
    }

    fn world_transform(&self, mut i: usize) -> DAffine3 {
        let mut world = self.objects[i].local_transform(self.frame);
        while let Some(parent) = self.parents[i] {
            world = self.objects[parent].local_transform(self.frame) * world;
            i = parent;
        }
        world
    }
}

impl SceneContext for SnapshotScene {
    type Camera = CameraModel;

    fn set_active_object(&mut self, name: &str) -> SpriteResult<()> {
        self.active = Some(self.lookup(name)?);
        debug!(object = name, "active object");
        Ok(())
    }

    fn set_frame(&mut self, frame: u32) -> SpriteResult<()> {
        self.frame = frame;
        Ok(())
    }

    fn set_active_rotation_z(&mut self, radians: f64) -> SpriteResult<()> {
        let i = self.active_index()?;
        self.objects[i].rotation[2] = radians;
        Ok(())
    }

    fn active_camera(&self) -> SpriteResult<CameraModel> {
        let i = self.active_index()?;
        let object = &self.objects[i];
        let lens = object
            .camera
            .ok_or_else(|| SpriteError::missing(SceneObjectKind::Camera, object.name.as_str()))?;
        Ok(CameraModel::from_world(self.world_transform(i), lens))
    }

    fn world_location(&self, name: &str) -> SpriteResult<DVec3> {
        let i = self.lookup(name)?;
        Ok(self.world_transform(i).translation)
    }

    fn list_named_children(&self, collection: &str) -> SpriteResult<Vec<(String, DVec3)>> {
        let collection = self
            .collections
            .iter()
            .find(|c| c.name == collection)
            .ok_or_else(|| SpriteError::missing(SceneObjectKind::Collection, collection))?;
        collection
            .objects
            .iter()
            .map(|name| Ok((name.clone(), self.world_location(name)?)))
            .collect()
    }
}
