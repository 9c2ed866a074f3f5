//! Sprite sizing from logical footprints.
//!
//! An isometric sprite of an item with footprint `(x, y, z)` is
//! `tile_width / 2 * (x + y)` pixels wide (the diamond spans `x + y` half
//! tiles) and half that plus `tile_height * z` pixels tall. Both are then
//! multiplied by the item's base scale and the caller's extra scale.

use isosprite_spec::{Footprint, ItemCatalog, PipelineConfig, SpriteSize};
use tracing::debug;

use crate::error::{SpriteError, SpriteResult};

/// Sizes sprites for the items of a catalog.
#[derive(Debug, Clone)]
pub struct SpriteSizer {
    catalog: ItemCatalog,
    tile_width: u32,
    tile_height: u32,
    oversampling: f64,
}

impl SpriteSizer {
    /// Creates a sizer with the default tile size and oversampling.
    pub fn new(catalog: ItemCatalog) -> Self {
        Self::with_config(catalog, &PipelineConfig::default())
    }

    /// Creates a sizer using the tile size and oversampling of `config`.
    pub fn with_config(catalog: ItemCatalog, config: &PipelineConfig) -> Self {
        Self {
            catalog,
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            oversampling: config.oversampling,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// In-game sprite size of `item`, multiplied by `extra_scale`.
    ///
    /// # Errors
    ///
    /// - [`SpriteError::UnknownItem`] if the item is not in the catalog.
    /// - [`SpriteError::InvalidScale`] if `extra_scale` is not positive and
    ///   finite, or the resulting sprite would be empty.
    pub fn size(&self, item: &str, extra_scale: f64) -> SpriteResult<SpriteSize> {
        let entry = self
            .catalog
            .get(item)
            .ok_or_else(|| SpriteError::UnknownItem {
                item: item.to_string(),
            })?;
        check_scale(extra_scale)?;

        let size = sprite_size(
            entry.footprint,
            entry.base_scale * extra_scale,
            self.tile_width,
            self.tile_height,
        )?;
        debug!(item, extra_scale, %size, "sized sprite");
        Ok(size)
    }

    /// Size of the oversampled source frames rendered for an atlas.
    pub fn atlas_size(&self, item: &str) -> SpriteResult<SpriteSize> {
        self.size(item, self.oversampling)
    }
}

fn check_scale(scale: f64) -> SpriteResult<()> {
    if !scale.is_finite() {
        return Err(SpriteError::InvalidScale {
            scale,
            reason: "scale must be finite",
        });
    }
    if scale <= 0.0 {
        return Err(SpriteError::InvalidScale {
            scale,
            reason: "scale must be positive",
        });
    }
    Ok(())
}

/// Pixel size of a sprite with the given footprint and total scale.
pub fn sprite_size(
    footprint: Footprint,
    scale: f64,
    tile_width: u32,
    tile_height: u32,
) -> SpriteResult<SpriteSize> {
    check_scale(scale)?;

    let half_tile = f64::from(tile_width) / 2.0;
    let width = half_tile * (f64::from(footprint.x) + f64::from(footprint.y)) * scale;
    let height = width / 2.0 + f64::from(tile_height) * f64::from(footprint.z) * scale;

    let (width, height) = (width.round(), height.round());
    if width < 1.0 || height < 1.0 {
        return Err(SpriteError::InvalidScale {
            scale,
            reason: "sprite would be less than one pixel",
        });
    }
    if width > f64::from(u32::MAX) || height > f64::from(u32::MAX) {
        return Err(SpriteError::InvalidScale {
            scale,
            reason: "sprite would exceed the pixel range",
        });
    }
    Ok(SpriteSize::new(width as u32, height as u32))
}
