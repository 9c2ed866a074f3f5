//! isosprite data model
//!
//! Types shared by the isosprite pipeline stages: the item catalog that maps
//! item identifiers to logical footprints, pipeline configuration, atlas grid
//! addressing, and the smoke anchor records written for the game renderer.
//!
//! # Example
//!
//! ```
//! use isosprite_spec::{ItemCatalog, PipelineConfig};
//!
//! let catalog = ItemCatalog::builtin().unwrap();
//! assert!(catalog.require(["coal_mine", "ship"]).is_ok());
//!
//! let config = PipelineConfig::default();
//! assert_eq!(config.tile_width, 64);
//! ```
//!
//! # Modules
//!
//! - [`atlas`]: sprite sizes, grid specs, cell addresses and bindings
//! - [`catalog`]: item footprints and construction data
//! - [`config`]: pipeline configuration and scene object names
//! - [`direction`]: diagonal travel directions and model rotations
//! - [`error`]: error type and error codes
//! - [`naming`]: render and atlas file names
//! - [`smoke`]: smoke anchor records

pub mod atlas;
pub mod catalog;
pub mod config;
pub mod direction;
pub mod error;
pub mod naming;
pub mod smoke;

pub use atlas::{AtlasKind, AxisMode, CellAddress, CellBinding, GridSpec, PixelRect, SpriteSize};
pub use catalog::{ConstructionEntry, Footprint, ItemCatalog, ItemEntry};
pub use config::{
    BasePlane, PipelineConfig, SceneNames, ATLAS_OVERSAMPLING, DEFAULT_FRAME_COUNT, TILE_HEIGHT,
    TILE_WIDTH,
};
pub use direction::{DiagonalPair, Rotation, DIAGONAL_PAIR_COUNT};
pub use error::{PipelineErrorCode, SpecError, SpecResult};
pub use naming::{frame_file_names, rotation_file_name, rotation_file_names, sheet_file_name};
pub use smoke::{
    to_record_json, AnchorRecord, DirectionFrame, MovingSmokeData, PairLabel, SmokeFrame,
    SmokeKind, StaticSmokeData,
};
