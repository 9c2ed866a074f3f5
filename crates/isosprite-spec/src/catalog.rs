//! Item catalog: logical footprints and per-item sprite data.
//!
//! The catalog maps an item identifier (`"coal_mine"`, `"ship"`, ...) to the
//! footprint used for sprite sizing, plus optional construction data used by
//! the construction atlas stages. It is loaded once at startup, validated, and
//! never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

const EMBEDDED_ITEMS_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/items.json"));

/// An item's logical extent in world grid units.
///
/// Serialized as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 3]", into = "[u32; 3]")]
pub struct Footprint {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Footprint {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl From<[u32; 3]> for Footprint {
    fn from([x, y, z]: [u32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Footprint> for [u32; 3] {
    fn from(f: Footprint) -> Self {
        [f.x, f.y, f.z]
    }
}

/// Construction-animation data for buildings that have a construction atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructionEntry {
    /// Height the cutting volume rises to by the last frame.
    pub max_z: f64,
    /// Collections whose meshes are cut by the volume.
    pub collections: Vec<String>,
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    /// Logical footprint.
    pub footprint: Footprint,

    /// Base sprite scale. Ships render at 2, everything else at 1.
    #[serde(default = "default_base_scale")]
    pub base_scale: f64,

    /// Construction data (only for constructible buildings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction: Option<ConstructionEntry>,
}

fn default_base_scale() -> f64 {
    1.0
}

impl ItemEntry {
    /// Creates an entry with the default base scale and no construction data.
    pub fn new(footprint: Footprint) -> Self {
        Self {
            footprint,
            base_scale: default_base_scale(),
            construction: None,
        }
    }

    /// Sets the base scale.
    pub fn with_base_scale(mut self, base_scale: f64) -> Self {
        self.base_scale = base_scale;
        self
    }
}

/// Catalog of all items the pipeline knows how to size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemCatalog {
    items: BTreeMap<String, ItemEntry>,
}

impl ItemCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the catalog shipped with the crate.
    pub fn builtin() -> SpecResult<Self> {
        Self::from_json(EMBEDDED_ITEMS_JSON)
    }

    /// Parses and validates a catalog from JSON.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        let catalog: ItemCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a catalog file.
    pub fn from_path(path: &Path) -> SpecResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Adds or replaces an entry.
    pub fn with_item(mut self, name: impl Into<String>, entry: ItemEntry) -> Self {
        self.items.insert(name.into(), entry);
        self
    }

    /// Looks up an entry by item identifier.
    pub fn get(&self, item: &str) -> Option<&ItemEntry> {
        self.items.get(item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates entries in item-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemEntry)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Checks every entry for values that would produce a degenerate sprite.
    pub fn validate(&self) -> SpecResult<()> {
        for (name, entry) in &self.items {
            let f = entry.footprint;
            if u64::from(f.x) + u64::from(f.y) == 0 {
                return Err(SpecError::invalid_entry(
                    name,
                    "footprint x + y must be at least 1",
                ));
            }
            if !entry.base_scale.is_finite() || entry.base_scale <= 0.0 {
                return Err(SpecError::invalid_entry(
                    name,
                    format!("base_scale must be positive, got {}", entry.base_scale),
                ));
            }
            if let Some(construction) = &entry.construction {
                if !construction.max_z.is_finite() || construction.max_z <= 0.0 {
                    return Err(SpecError::invalid_entry(
                        name,
                        format!(
                            "construction max_z must be positive, got {}",
                            construction.max_z
                        ),
                    ));
                }
                if construction.collections.is_empty() {
                    return Err(SpecError::invalid_entry(
                        name,
                        "construction needs at least one collection",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Checks that every referenced item has an entry.
    ///
    /// Reports all missing items at once rather than the first one.
    pub fn require<'a>(&self, items: impl IntoIterator<Item = &'a str>) -> SpecResult<()> {
        let missing: Vec<String> = items
            .into_iter()
            .filter(|item| !self.contains(item))
            .map(String::from)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SpecError::MissingCatalogEntries { items: missing })
        }
    }
}
