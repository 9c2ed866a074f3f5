//! Assignment of rendered frames to atlas cells.
//!
//! In [`AxisMode::Animation`] every render directory is one row and every file
//! name one column. In [`AxisMode::Static`] the roles swap. Cells are emitted
//! row-major: columns advance first and wrap after `n_cols`.

use std::path::Path;

use isosprite_spec::{AxisMode, CellAddress, CellBinding, GridSpec};
use tracing::debug;

use crate::error::{SpriteError, SpriteResult};

/// Binds render outputs to the cells of one grid.
#[derive(Debug, Clone, Copy)]
pub struct AtlasAddresser {
    grid: GridSpec,
}

impl AtlasAddresser {
    pub fn new(grid: GridSpec) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Binds every `dir/file` pair to its cell.
    ///
    /// Returns exactly `dirs.len() * files.len()` bindings, one per cell.
    ///
    /// # Errors
    ///
    /// - [`SpriteError::GridCardinality`] if the grid is empty or the
    ///   directory or file count does not match the grid axes for its mode.
    ///   Nothing is emitted in that case.
    /// - [`SpriteError::InvalidCellSize`] if the cell has a zero dimension.
    pub fn address<D, F>(&self, dirs: &[D], files: &[F]) -> SpriteResult<Vec<CellBinding>>
    where
        D: AsRef<Path>,
        F: AsRef<str>,
    {
        let grid = &self.grid;
        if grid.n_cols == 0 || grid.n_rows == 0 {
            return Err(SpriteError::grid_cardinality(format!(
                "grid must have at least one column and one row, got {}x{}",
                grid.n_cols, grid.n_rows
            )));
        }
        if grid.cell.width == 0 || grid.cell.height == 0 {
            return Err(SpriteError::InvalidCellSize {
                width: grid.cell.width,
                height: grid.cell.height,
            });
        }

        let (dir_axis, file_axis) = match grid.mode {
            AxisMode::Animation => ("rows", "columns"),
            AxisMode::Static => ("columns", "rows"),
        };
        if dirs.len() != grid.expected_dirs() as usize {
            return Err(SpriteError::grid_cardinality(format!(
                "{} render directories for {} {} ({} mode)",
                dirs.len(),
                grid.expected_dirs(),
                dir_axis,
                grid.mode.as_str()
            )));
        }
        if files.len() != grid.expected_files() as usize {
            return Err(SpriteError::grid_cardinality(format!(
                "{} file names for {} {} ({} mode)",
                files.len(),
                grid.expected_files(),
                file_axis,
                grid.mode.as_str()
            )));
        }

        let mut bindings = Vec::with_capacity(grid.cell_count());
        for row in 0..grid.n_rows {
            for col in 0..grid.n_cols {
                let (dir, file) = match grid.mode {
                    AxisMode::Animation => (&dirs[row as usize], &files[col as usize]),
                    AxisMode::Static => (&dirs[col as usize], &files[row as usize]),
                };
                let address = CellAddress::new(col, row);
                bindings.push(CellBinding {
                    address,
                    material: address.to_string(),
                    source: dir.as_ref().join(file.as_ref()),
                    rect: address.pixel_rect(grid.cell),
                });
            }
        }
        debug!(
            cells = bindings.len(),
            mode = grid.mode.as_str(),
            "addressed atlas cells"
        );
        Ok(bindings)
    }
}
