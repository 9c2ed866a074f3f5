//! Sheet plans for the render stages.
//!
//! Each stage renders its frames into a directory layout of its own and then
//! packs them into one atlas. A [`SheetPlan`] is everything the host needs to
//! build that atlas: the oversampled cell size, grid, layout and cell
//! bindings, plus the cutting-volume sweep for construction sheets.

use std::path::{Path, PathBuf};

use isosprite_spec::{
    frame_file_names, rotation_file_names, sheet_file_name, AtlasKind, AxisMode, CellBinding,
    DiagonalPair, GridSpec, PipelineConfig, Rotation, DIAGONAL_PAIR_COUNT,
};
use serde::Serialize;
use tracing::info;

use crate::addresser::AtlasAddresser;
use crate::error::{SpriteError, SpriteResult};
use crate::layout::{AtlasLayout, AtlasLayoutPlanner};
use crate::sizer::SpriteSizer;

/// Directory the finished atlases of every kind are delivered under.
pub const TEXTURES_DIR: &str = "assets/textures";

/// Cutting volume animation of a construction sheet.
///
/// The volume is keyed at `spawn_z` on `first_frame` and at `max_z` on
/// `last_frame`, and is subtracted from every mesh in `collections`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructionSweep {
    pub spawn_z: f64,
    pub max_z: f64,
    pub first_frame: u32,
    pub last_frame: u32,
    pub collections: Vec<String>,
}

/// A fully resolved atlas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetPlan {
    pub item: String,
    pub version: String,
    pub kind: AtlasKind,
    pub grid: GridSpec,
    pub layout: AtlasLayout,
    pub bindings: Vec<CellBinding>,
    /// File name of the rendered atlas.
    pub sheet_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construction: Option<ConstructionSweep>,
}

impl SheetPlan {
    /// Path the atlas is delivered to, relative to the game repository.
    pub fn texture_path(&self) -> PathBuf {
        Path::new(TEXTURES_DIR)
            .join(self.kind.as_str())
            .join(&self.sheet_file)
    }
}

/// Render directories of a moving item, one per direction in canonical order.
pub fn direction_render_dirs(renders_dir: &Path) -> Vec<PathBuf> {
    DiagonalPair::ALL
        .iter()
        .map(|pair| renders_dir.join(pair.source_label()))
        .collect()
}

/// Render directories of a rotating construction, one per rotation.
pub fn rotation_render_dirs(renders_dir: &Path) -> Vec<PathBuf> {
    Rotation::ALL
        .iter()
        .map(|rotation| renders_dir.join(rotation.degrees().to_string()))
        .collect()
}

/// Plans the atlases of each render stage.
#[derive(Debug, Clone)]
pub struct SheetPlanner<'a> {
    sizer: &'a SpriteSizer,
    layout: AtlasLayoutPlanner,
    spawn_z: f64,
}

impl<'a> SheetPlanner<'a> {
    pub fn new(sizer: &'a SpriteSizer, config: &PipelineConfig) -> Self {
        Self {
            sizer,
            layout: AtlasLayoutPlanner::new(config.base_plane),
            spawn_z: config.construction_spawn_z,
        }
    }

    /// Vehicle animation: one row per travel direction, one column per frame.
    pub fn moving(
        &self,
        item: &str,
        version: &str,
        direction_dirs: &[PathBuf],
        n_frames: u32,
    ) -> SpriteResult<SheetPlan> {
        self.build(
            item,
            version,
            AtlasKind::Moving,
            GridShape::new(n_frames, DIAGONAL_PAIR_COUNT as u32, AxisMode::Animation),
            direction_dirs,
            &frame_file_names(n_frames),
        )
    }

    /// Static building: one column of the four rotation stills.
    pub fn rotatable(&self, item: &str, version: &str, renders_dir: &Path) -> SpriteResult<SheetPlan> {
        self.build(
            item,
            version,
            AtlasKind::Variety,
            GridShape::new(1, Rotation::ALL.len() as u32, AxisMode::Static),
            &[renders_dir],
            &rotation_file_names(),
        )
    }

    /// Housing construction: one row per variety, one column per frame.
    pub fn housing_construction(
        &self,
        item: &str,
        version: &str,
        variety_dirs: &[PathBuf],
        n_frames: u32,
    ) -> SpriteResult<SheetPlan> {
        let sweep = self.sweep(item, n_frames)?;
        let mut plan = self.build(
            item,
            version,
            AtlasKind::Construction,
            GridShape::new(n_frames, variety_dirs.len() as u32, AxisMode::Animation),
            variety_dirs,
            &frame_file_names(n_frames),
        )?;
        plan.construction = Some(sweep);
        Ok(plan)
    }

    /// Industry construction: one row per rotation, one column per frame.
    pub fn industry_construction(
        &self,
        item: &str,
        version: &str,
        renders_dir: &Path,
        n_frames: u32,
    ) -> SpriteResult<SheetPlan> {
        let sweep = self.sweep(item, n_frames)?;
        let mut plan = self.build(
            item,
            version,
            AtlasKind::Construction,
            GridShape::new(n_frames, Rotation::ALL.len() as u32, AxisMode::Animation),
            &rotation_render_dirs(renders_dir),
            &frame_file_names(n_frames),
        )?;
        plan.construction = Some(sweep);
        Ok(plan)
    }

    fn sweep(&self, item: &str, n_frames: u32) -> SpriteResult<ConstructionSweep> {
        let entry = self
            .sizer
            .catalog()
            .get(item)
            .ok_or_else(|| SpriteError::UnknownItem {
                item: item.to_string(),
            })?;
        let construction = entry
            .construction
            .as_ref()
            .ok_or_else(|| SpriteError::NotConstructible {
                item: item.to_string(),
            })?;
        Ok(ConstructionSweep {
            spawn_z: self.spawn_z,
            max_z: construction.max_z,
            first_frame: 1,
            last_frame: n_frames,
            collections: construction.collections.clone(),
        })
    }

    fn build<D: AsRef<Path>>(
        &self,
        item: &str,
        version: &str,
        kind: AtlasKind,
        shape: GridShape,
        dirs: &[D],
        files: &[String],
    ) -> SpriteResult<SheetPlan> {
        let cell = self.sizer.atlas_size(item)?;
        let grid = GridSpec::new(shape.n_cols, shape.n_rows, cell, shape.mode);
        let layout = self.layout.plan_grid(&grid)?;
        let bindings = AtlasAddresser::new(grid).address(dirs, files)?;

        info!(
            item,
            version,
            kind = kind.as_str(),
            %cell,
            n_cols = grid.n_cols,
            n_rows = grid.n_rows,
            "planned sprite sheet"
        );
        Ok(SheetPlan {
            item: item.to_string(),
            version: version.to_string(),
            kind,
            grid,
            layout,
            bindings,
            sheet_file: sheet_file_name(item, version),
            construction: None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct GridShape {
    n_cols: u32,
    n_rows: u32,
    mode: AxisMode,
}

impl GridShape {
    fn new(n_cols: u32, n_rows: u32, mode: AxisMode) -> Self {
        Self {
            n_cols,
            n_rows,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isosprite_spec::{CellAddress, ItemCatalog, SpriteSize};
    use pretty_assertions::assert_eq;

    fn sizer() -> SpriteSizer {
        SpriteSizer::new(ItemCatalog::builtin().unwrap())
    }

    #[test]
    fn moving_sheet() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        let dirs = direction_render_dirs(Path::new("renders/cart/v1"));
        let plan = planner.moving("cart", "v1", &dirs, 24).unwrap();

        assert_eq!(plan.kind, AtlasKind::Moving);
        assert_eq!(plan.grid.cell, SpriteSize::new(128, 128));
        assert_eq!(plan.layout.resolution, [128 * 24, 128 * 12]);
        assert_eq!(plan.bindings.len(), 288);
        assert_eq!(
            plan.bindings[25].source,
            PathBuf::from("renders/cart/v1/BL-TL/0002.png")
        );
        assert_eq!(plan.sheet_file, "cart_v1.png");
        assert_eq!(
            plan.texture_path(),
            PathBuf::from("assets/textures/moving/cart_v1.png")
        );
        assert!(plan.construction.is_none());
    }

    #[test]
    fn moving_sheet_needs_twelve_directions() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        let dirs = vec![PathBuf::from("renders/BL-TR")];
        assert!(matches!(
            planner.moving("cart", "v1", &dirs, 24),
            Err(SpriteError::GridCardinality { .. })
        ));
    }

    #[test]
    fn rotatable_sheet() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        let plan = planner
            .rotatable("coal_mine", "default", Path::new("renders/coal_mine"))
            .unwrap();

        assert_eq!(plan.kind, AtlasKind::Variety);
        assert_eq!(plan.grid.mode, AxisMode::Static);
        assert_eq!(plan.layout.resolution, [192, 640]);
        let last = plan.bindings.last().unwrap();
        assert_eq!(last.address, CellAddress::new(0, 3));
        assert_eq!(last.source, PathBuf::from("renders/coal_mine/270.png"));
    }

    #[test]
    fn housing_construction_sheet() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        let varieties = vec![PathBuf::from("renders/town/1"), PathBuf::from("renders/town/2")];
        let plan = planner
            .housing_construction("town", "v1", &varieties, 12)
            .unwrap();

        assert_eq!(plan.kind, AtlasKind::Construction);
        assert_eq!((plan.grid.n_cols, plan.grid.n_rows), (12, 2));
        let sweep = plan.construction.unwrap();
        assert_eq!(sweep.spawn_z, 4.025);
        assert_eq!(sweep.max_z, 4.8);
        assert_eq!((sweep.first_frame, sweep.last_frame), (1, 12));
        assert_eq!(sweep.collections, ["Houses"]);
    }

    #[test]
    fn industry_construction_sheet() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        let plan = planner
            .industry_construction("steel_works", "default", Path::new("renders/steel_works"), 24)
            .unwrap();

        assert_eq!((plan.grid.n_cols, plan.grid.n_rows), (24, 4));
        assert_eq!(
            plan.bindings[24].source,
            PathBuf::from("renders/steel_works/90/0001.png")
        );
        assert_eq!(plan.construction.unwrap().max_z, 7.8);
    }

    #[test]
    fn construction_requires_catalog_data() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        assert!(matches!(
            planner.industry_construction("cart", "v1", Path::new("renders"), 24),
            Err(SpriteError::NotConstructible { .. })
        ));
        assert!(matches!(
            planner.industry_construction("tram", "v1", Path::new("renders"), 24),
            Err(SpriteError::UnknownItem { .. })
        ));
    }

    #[test]
    fn zero_frames_is_rejected() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        let dirs = direction_render_dirs(Path::new("renders"));
        assert!(matches!(
            planner.moving("cart", "v1", &dirs, 0),
            Err(SpriteError::GridCardinality { .. })
        ));
    }

    #[test]
    fn plan_serializes() {
        let sizer = sizer();
        let planner = SheetPlanner::new(&sizer, &PipelineConfig::default());
        let plan = planner
            .rotatable("depot", "default", Path::new("renders/depot"))
            .unwrap();
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["kind"], "variety");
        assert_eq!(value["bindings"][1]["material"], "0,1");
        assert!(value.get("construction").is_none());
    }
}
