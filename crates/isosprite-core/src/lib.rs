//! isosprite core
//!
//! Sprite sizing, atlas layout and smoke anchor projection for pre-rendered
//! isometric sprites.
//!
//! # Overview
//!
//! Game objects are modelled in 3D and rendered by a host application into
//! individual frames. This crate computes everything around those renders:
//!
//! - **Sizing**: the pixel size of a sprite follows from the item's logical
//!   footprint (see [`SpriteSizer`]).
//! - **Atlas layout**: frames are tiled into one atlas rendered through an
//!   orthographic camera (see [`AtlasLayoutPlanner`] and [`AtlasAddresser`]).
//! - **Smoke anchors**: 3D markers are projected into sprite pixels for every
//!   frame or rotation (see [`SmokeExtractor`]).
//!
//! The host is reached only through two capabilities: a [`RenderCamera`] that
//! maps world points into normalized view space, and a [`SceneContext`] that
//! changes scene state and reports object positions. [`SnapshotScene`]
//! implements both from a JSON snapshot.
//!
//! # Example
//!
//! ```
//! use isosprite_core::{AtlasLayoutPlanner, SpriteSizer};
//! use isosprite_spec::ItemCatalog;
//!
//! let sizer = SpriteSizer::new(ItemCatalog::builtin().unwrap());
//! let cell = sizer.atlas_size("coal_mine").unwrap();
//! assert_eq!((cell.width, cell.height), (192, 160));
//!
//! let layout = AtlasLayoutPlanner::default().plan(cell, 24, 12).unwrap();
//! assert_eq!(layout.resolution, [4608, 1920]);
//! ```
//!
//! # Crate Structure
//!
//! - [`sizer`] - Sprite sizes from footprints
//! - [`camera`] - Camera capability and camera model
//! - [`projector`] - World points to sprite pixels
//! - [`scene`] - Scene-state capability and snapshot scenes
//! - [`layout`] - Atlas plane tiling and camera framing
//! - [`addresser`] - Frame to cell bindings
//! - [`sheet`] - Atlas plans for each render stage
//! - [`smoke`] - Smoke anchor extraction
//! - [`persist`] - Writing smoke records
//! - [`error`] - Error types

pub mod addresser;
pub mod camera;
pub mod error;
pub mod layout;
pub mod persist;
pub mod projector;
pub mod scene;
pub mod sheet;
pub mod sizer;
pub mod smoke;

pub use addresser::AtlasAddresser;
pub use camera::{euler_xyz, CameraLens, CameraModel, CameraProjection, RenderCamera};
pub use error::{SceneObjectKind, SpriteError, SpriteResult};
pub use layout::{AtlasLayout, AtlasLayoutPlanner};
pub use persist::{smoke_data_dir, write_record};
pub use projector::{project, project_to_sprite, to_sprite_pixels, ViewCoords};
pub use scene::{SceneContext, SnapshotCollection, SnapshotObject, SnapshotScene};
pub use sheet::{
    direction_render_dirs, rotation_render_dirs, ConstructionSweep, SheetPlan, SheetPlanner,
    TEXTURES_DIR,
};
pub use sizer::{sprite_size, SpriteSizer};
pub use smoke::{MovingSequence, SmokeExtractor};
