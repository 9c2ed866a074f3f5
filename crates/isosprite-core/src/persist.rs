//! Writing smoke records to disk.

use std::fs;
use std::path::{Path, PathBuf};

use isosprite_spec::{to_record_json, SmokeKind};
use serde::Serialize;
use tracing::info;

use crate::error::{SpriteError, SpriteResult};

/// Directory, relative to the game repository, that holds smoke records of
/// `kind`.
pub fn smoke_data_dir(kind: SmokeKind) -> &'static str {
    match kind {
        SmokeKind::Moving => "assets/smoke_data/moving",
        SmokeKind::Static => "assets/smoke_data/static",
    }
}

/// Writes `record` to `<out_dir>/<item>_<version>.<kind>_smoke.json`.
///
/// The directory is created if needed and an existing file is replaced.
pub fn write_record<T: Serialize>(
    out_dir: &Path,
    item: &str,
    version: &str,
    kind: SmokeKind,
    record: &T,
) -> SpriteResult<PathBuf> {
    let json = to_record_json(record)?;
    let path = out_dir.join(kind.file_name(item, version));

    fs::create_dir_all(out_dir).map_err(|source| SpriteError::WriteFailed {
        path: out_dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| SpriteError::WriteFailed {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "wrote smoke record");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isosprite_spec::{AnchorRecord, MovingSmokeData, Rotation, StaticSmokeData};
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_into_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join(smoke_data_dir(SmokeKind::Static));

        let mut data = StaticSmokeData::default();
        data.anchors_mut(Rotation::Deg180)
            .push(AnchorRecord::new(12.5, 40.0));
        let path = write_record(&out_dir, "steel_works", "default", SmokeKind::Static, &data)
            .unwrap();

        assert_eq!(path, out_dir.join("steel_works_default.static_smoke.json"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"degree_0\": []"));
        let parsed: StaticSmokeData = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn replaces_existing_record() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_record(
            tmp.path(),
            "cart",
            "v1",
            SmokeKind::Moving,
            &StaticSmokeData::default(),
        )
        .unwrap();
        write_record(
            tmp.path(),
            "cart",
            "v1",
            SmokeKind::Moving,
            &MovingSmokeData::default(),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "{\n    \"direction_frames\": []\n}"
        );
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_record(
            &blocker,
            "cart",
            "v1",
            SmokeKind::Moving,
            &MovingSmokeData::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SpriteError::WriteFailed { .. }));
    }
}
