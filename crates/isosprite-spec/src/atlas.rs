//! Atlas grid types: sprite sizes, grid specs and cell addressing.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Pixel size of one isometric sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: u32,
    pub height: u32,
}

impl SpriteSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for SpriteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which grid axis the render directories run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
    /// Rows are directories (directions, varieties, degrees), columns are
    /// time-ordered frames.
    Animation,
    /// Columns are directories, rows are files within a directory.
    Static,
}

impl AxisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisMode::Animation => "animation",
            AxisMode::Static => "static",
        }
    }
}

/// Shape of an atlas: grid dimensions plus the size of every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub n_cols: u32,
    pub n_rows: u32,
    pub cell: SpriteSize,
    pub mode: AxisMode,
}

impl GridSpec {
    pub fn new(n_cols: u32, n_rows: u32, cell: SpriteSize, mode: AxisMode) -> Self {
        Self {
            n_cols,
            n_rows,
            cell,
            mode,
        }
    }

    /// Atlas resolution `[cell_width * n_cols, cell_height * n_rows]`, or
    /// `None` if it does not fit in `u32`.
    pub fn resolution(&self) -> Option<[u32; 2]> {
        Some([
            self.cell.width.checked_mul(self.n_cols)?,
            self.cell.height.checked_mul(self.n_rows)?,
        ])
    }

    pub fn cell_count(&self) -> usize {
        self.n_cols as usize * self.n_rows as usize
    }

    /// Number of directories the grid expects for its mode.
    pub fn expected_dirs(&self) -> u32 {
        match self.mode {
            AxisMode::Animation => self.n_rows,
            AxisMode::Static => self.n_cols,
        }
    }

    /// Number of files per directory the grid expects for its mode.
    pub fn expected_files(&self) -> u32 {
        match self.mode {
            AxisMode::Animation => self.n_cols,
            AxisMode::Static => self.n_rows,
        }
    }
}

/// A cell in the atlas grid. `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    pub col: u32,
    pub row: u32,
}

impl CellAddress {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Pixel region of this cell in an atlas of `cell`-sized cells.
    pub fn pixel_rect(&self, cell: SpriteSize) -> PixelRect {
        PixelRect {
            x: self.col * cell.width,
            y: self.row * cell.height,
            width: cell.width,
            height: cell.height,
        }
    }
}

/// Formats as `"col,row"`, the name the cell's mesh and material carry.
impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Pixel rectangle in atlas space, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A rendered frame bound to one atlas cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBinding {
    pub address: CellAddress,
    /// Name shared by the cell's mesh and material.
    pub material: String,
    /// Rendered frame drawn into the cell.
    pub source: PathBuf,
    pub rect: PixelRect,
}

/// The atlas family a sheet is delivered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtlasKind {
    /// Vehicles moving along the twelve diagonal directions.
    Moving,
    /// Static buildings at four rotations.
    Variety,
    /// Building construction animations.
    Construction,
}

impl AtlasKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtlasKind::Moving => "moving",
            AtlasKind::Variety => "variety",
            AtlasKind::Construction => "construction",
        }
    }
}

impl fmt::Display for AtlasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
