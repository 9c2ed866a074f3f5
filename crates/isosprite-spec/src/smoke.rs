//! Smoke anchor records.
//!
//! These are the JSON documents other pipeline stages read, so the field
//! names and nesting below are a stable contract:
//!
//! ```text
//! moving: { "direction_frames": [ { "pair": { "diagonal_pair": "BottomLeftTopRight" },
//!                                    "frames": [ { "frame": 0,
//!                                                  "emitter_coords": [x, y],
//!                                                  "smoke_direction": [dx, dy] } ] } ] }
//! static: { "degree_0": [[x, y], ...], "degree_90": [...], "degree_180": [...], "degree_270": [...] }
//! ```
//!
//! Anchor coordinates are sprite-local pixels scaled from the camera's
//! normalized view space without flipping the vertical axis: `y = 0` is the
//! bottom edge of the camera frame.

use serde::{Deserialize, Serialize};

use crate::direction::{DiagonalPair, Rotation};
use crate::error::SpecResult;

/// A point in sprite-local pixel space. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct AnchorRecord {
    pub x: f64,
    pub y: f64,
}

impl AnchorRecord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `target`.
    pub fn offset_to(&self, target: &AnchorRecord) -> [f64; 2] {
        [target.x - self.x, target.y - self.y]
    }
}

impl From<[f64; 2]> for AnchorRecord {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<AnchorRecord> for [f64; 2] {
    fn from(a: AnchorRecord) -> Self {
        [a.x, a.y]
    }
}

/// Smoke data for one frame of a moving sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmokeFrame {
    /// 0-based frame index.
    pub frame: u32,
    /// Emitter anchor in sprite pixels.
    pub emitter_coords: AnchorRecord,
    /// Direction reference anchor minus emitter anchor, in sprite pixels.
    pub smoke_direction: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairLabel {
    pub diagonal_pair: DiagonalPair,
}

/// All frames of one travel direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionFrame {
    pub pair: PairLabel,
    pub frames: Vec<SmokeFrame>,
}

impl DirectionFrame {
    pub fn new(pair: DiagonalPair, frames: Vec<SmokeFrame>) -> Self {
        Self {
            pair: PairLabel {
                diagonal_pair: pair,
            },
            frames,
        }
    }

    pub fn diagonal_pair(&self) -> DiagonalPair {
        self.pair.diagonal_pair
    }
}

/// Moving-smoke record for one item version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovingSmokeData {
    pub direction_frames: Vec<DirectionFrame>,
}

impl MovingSmokeData {
    /// Finds the frames recorded for a direction.
    pub fn direction(&self, pair: DiagonalPair) -> Option<&DirectionFrame> {
        self.direction_frames
            .iter()
            .find(|d| d.diagonal_pair() == pair)
    }
}

/// Static-smoke record: emitter anchors per rotation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticSmokeData {
    pub degree_0: Vec<AnchorRecord>,
    pub degree_90: Vec<AnchorRecord>,
    pub degree_180: Vec<AnchorRecord>,
    pub degree_270: Vec<AnchorRecord>,
}

impl StaticSmokeData {
    pub fn anchors(&self, rotation: Rotation) -> &[AnchorRecord] {
        match rotation {
            Rotation::Deg0 => &self.degree_0,
            Rotation::Deg90 => &self.degree_90,
            Rotation::Deg180 => &self.degree_180,
            Rotation::Deg270 => &self.degree_270,
        }
    }

    pub fn anchors_mut(&mut self, rotation: Rotation) -> &mut Vec<AnchorRecord> {
        match rotation {
            Rotation::Deg0 => &mut self.degree_0,
            Rotation::Deg90 => &mut self.degree_90,
            Rotation::Deg180 => &mut self.degree_180,
            Rotation::Deg270 => &mut self.degree_270,
        }
    }
}

/// Which smoke record a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeKind {
    Moving,
    Static,
}

impl SmokeKind {
    /// File extension, including the record kind.
    pub fn extension(&self) -> &'static str {
        match self {
            SmokeKind::Moving => "moving_smoke.json",
            SmokeKind::Static => "static_smoke.json",
        }
    }

    /// Output file name, e.g. `locomotive_v2.moving_smoke.json`.
    pub fn file_name(&self, item: &str, version: &str) -> String {
        format!("{}_{}.{}", item, version, self.extension())
    }
}

/// Serializes a record as JSON indented with four spaces.
pub fn to_record_json<T: Serialize>(value: &T) -> SpecResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
