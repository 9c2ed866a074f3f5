//! File names the render stages produce and the atlas stages consume.

use crate::direction::Rotation;

/// Frame file names for an animation of `n_frames` frames.
///
/// The host numbers frames from 1 with four digits: `0001.png`, `0002.png`, ...
pub fn frame_file_names(n_frames: u32) -> Vec<String> {
    (1..=n_frames).map(|id| format!("{:04}.png", id)).collect()
}

/// File name of a still rendered at `rotation`, e.g. `090.png`.
pub fn rotation_file_name(rotation: Rotation) -> String {
    format!("{:03}.png", rotation.degrees())
}

/// Rotation still names in render order.
pub fn rotation_file_names() -> Vec<String> {
    Rotation::ALL.into_iter().map(rotation_file_name).collect()
}

/// Atlas image name for an item version.
pub fn sheet_file_name(item: &str, version: &str) -> String {
    format!("{}_{}.png", item, version)
}
