//! Travel directions and model rotations.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Number of canonical diagonal travel directions.
pub const DIAGONAL_PAIR_COUNT: usize = 12;

/// A diagonal travel direction, named by the tile corner a vehicle leaves
/// from and the corner it heads to.
///
/// Source sequences use a short label (`"BL-TR"`); records use the long
/// name (`"BottomLeftTopRight"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagonalPair {
    BottomLeftBottomRight,
    BottomLeftTopLeft,
    BottomLeftTopRight,
    BottomRightBottomLeft,
    BottomRightTopLeft,
    BottomRightTopRight,
    TopLeftBottomLeft,
    TopLeftBottomRight,
    TopLeftTopRight,
    TopRightBottomLeft,
    TopRightBottomRight,
    TopRightTopLeft,
}

impl DiagonalPair {
    /// All labels in source-label order.
    pub const ALL: [DiagonalPair; DIAGONAL_PAIR_COUNT] = [
        DiagonalPair::BottomLeftBottomRight,
        DiagonalPair::BottomLeftTopLeft,
        DiagonalPair::BottomLeftTopRight,
        DiagonalPair::BottomRightBottomLeft,
        DiagonalPair::BottomRightTopLeft,
        DiagonalPair::BottomRightTopRight,
        DiagonalPair::TopLeftBottomLeft,
        DiagonalPair::TopLeftBottomRight,
        DiagonalPair::TopLeftTopRight,
        DiagonalPair::TopRightBottomLeft,
        DiagonalPair::TopRightBottomRight,
        DiagonalPair::TopRightTopLeft,
    ];

    /// Short label used in sequence file names.
    pub fn source_label(&self) -> &'static str {
        match self {
            DiagonalPair::BottomLeftBottomRight => "BL-BR",
            DiagonalPair::BottomLeftTopLeft => "BL-TL",
            DiagonalPair::BottomLeftTopRight => "BL-TR",
            DiagonalPair::BottomRightBottomLeft => "BR-BL",
            DiagonalPair::BottomRightTopLeft => "BR-TL",
            DiagonalPair::BottomRightTopRight => "BR-TR",
            DiagonalPair::TopLeftBottomLeft => "TL-BL",
            DiagonalPair::TopLeftBottomRight => "TL-BR",
            DiagonalPair::TopLeftTopRight => "TL-TR",
            DiagonalPair::TopRightBottomLeft => "TR-BL",
            DiagonalPair::TopRightBottomRight => "TR-BR",
            DiagonalPair::TopRightTopLeft => "TR-TL",
        }
    }

    /// Long label written to smoke records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagonalPair::BottomLeftBottomRight => "BottomLeftBottomRight",
            DiagonalPair::BottomLeftTopLeft => "BottomLeftTopLeft",
            DiagonalPair::BottomLeftTopRight => "BottomLeftTopRight",
            DiagonalPair::BottomRightBottomLeft => "BottomRightBottomLeft",
            DiagonalPair::BottomRightTopLeft => "BottomRightTopLeft",
            DiagonalPair::BottomRightTopRight => "BottomRightTopRight",
            DiagonalPair::TopLeftBottomLeft => "TopLeftBottomLeft",
            DiagonalPair::TopLeftBottomRight => "TopLeftBottomRight",
            DiagonalPair::TopLeftTopRight => "TopLeftTopRight",
            DiagonalPair::TopRightBottomLeft => "TopRightBottomLeft",
            DiagonalPair::TopRightBottomRight => "TopRightBottomRight",
            DiagonalPair::TopRightTopLeft => "TopRightTopLeft",
        }
    }

    /// Parses a short source label such as `"BL-TR"`.
    pub fn from_source_label(label: &str) -> SpecResult<Self> {
        Self::ALL
            .into_iter()
            .find(|pair| pair.source_label() == label)
            .ok_or_else(|| SpecError::unknown_direction_label(label))
    }

    /// Derives the direction from a sequence file name.
    ///
    /// The label is the last five characters of the file stem, so
    /// `models/locomotive_BL-TR.blend` maps to `BottomLeftTopRight`.
    pub fn from_sequence_path(path: &Path) -> SpecResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SpecError::unknown_direction_label(path.display().to_string()))?;
        let label = stem
            .char_indices()
            .rev()
            .nth(4)
            .map(|(i, _)| &stem[i..])
            .ok_or_else(|| SpecError::unknown_direction_label(stem))?;
        Self::from_source_label(label)
    }
}

impl fmt::Display for DiagonalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four cardinal rotations a static model is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations in render order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn radians(&self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }

    /// Record key, e.g. `"degree_90"`.
    pub fn key(&self) -> &'static str {
        match self {
            Rotation::Deg0 => "degree_0",
            Rotation::Deg90 => "degree_90",
            Rotation::Deg180 => "degree_180",
            Rotation::Deg270 => "degree_270",
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_labels_round_trip() {
        for pair in DiagonalPair::ALL {
            assert_eq!(DiagonalPair::from_source_label(pair.source_label()).unwrap(), pair);
        }
    }

    #[test]
    fn bl_tr_maps_to_long_label() {
        let pair = DiagonalPair::from_source_label("BL-TR").unwrap();
        assert_eq!(pair.as_str(), "BottomLeftTopRight");
        assert_eq!(
            serde_json::to_string(&pair).unwrap(),
            "\"BottomLeftTopRight\""
        );
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(matches!(
            DiagonalPair::from_source_label("BL-BL"),
            Err(SpecError::UnknownDirectionLabel { .. })
        ));
    }

    #[test]
    fn label_from_sequence_path() {
        let pair =
            DiagonalPair::from_sequence_path(Path::new("models/locomotive/v1/loco_TR-BL.blend"))
                .unwrap();
        assert_eq!(pair, DiagonalPair::TopRightBottomLeft);

        assert!(DiagonalPair::from_sequence_path(Path::new("abc.blend")).is_err());
        assert!(DiagonalPair::from_sequence_path(Path::new("loco_front.blend")).is_err());
    }

    #[test]
    fn rotation_keys_and_radians() {
        let keys: Vec<_> = Rotation::ALL.iter().map(|r| r.key()).collect();
        assert_eq!(keys, ["degree_0", "degree_90", "degree_180", "degree_270"]);
        assert!((Rotation::Deg90.radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
