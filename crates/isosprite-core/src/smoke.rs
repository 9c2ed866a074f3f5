//! Smoke anchor extraction.
//!
//! Vehicles carry a `SmokeEmitter` marker and a `DirectionReference` marker
//! the smoke drifts towards. For every travel direction and frame both are
//! projected into sprite pixels. Buildings carry a collection of emitters
//! that are projected once per model rotation.
//!
//! Anchors are scaled by the in-game sprite size, not the oversampled atlas
//! size.

use std::collections::HashSet;
use std::path::Path;

use isosprite_spec::{
    AnchorRecord, DiagonalPair, DirectionFrame, MovingSmokeData, Rotation, SceneNames, SmokeFrame,
    SpriteSize, StaticSmokeData,
};
use tracing::{debug, info, warn};

use crate::error::{SpriteError, SpriteResult};
use crate::projector::project_to_sprite;
use crate::scene::SceneContext;
use crate::sizer::SpriteSizer;

/// One travel direction of a moving item and the scene it was animated in.
#[derive(Debug)]
pub struct MovingSequence<S> {
    pub pair: DiagonalPair,
    pub scene: S,
}

impl<S> MovingSequence<S> {
    pub fn new(pair: DiagonalPair, scene: S) -> Self {
        Self { pair, scene }
    }

    /// Takes the direction from a sequence file name like `cart_BL-TR.blend`.
    pub fn from_path(path: &Path, scene: S) -> SpriteResult<Self> {
        Ok(Self::new(DiagonalPair::from_sequence_path(path)?, scene))
    }
}

/// Extracts smoke anchor records from scenes.
#[derive(Debug, Clone)]
pub struct SmokeExtractor<'a> {
    sizer: &'a SpriteSizer,
    names: SceneNames,
}

impl<'a> SmokeExtractor<'a> {
    pub fn new(sizer: &'a SpriteSizer, names: &SceneNames) -> Self {
        Self {
            sizer,
            names: names.clone(),
        }
    }

    /// Emitter anchors and smoke directions for every frame of every
    /// sequence.
    ///
    /// Host frames are 1-based; records are numbered from 0. Directions are
    /// recorded in the order the sequences are given.
    ///
    /// # Errors
    ///
    /// - [`SpriteError::UnknownItem`] if the item has no footprint.
    /// - [`SpriteError::DuplicateDirection`] if two sequences share a label.
    /// - [`SpriteError::MissingSceneObject`] if the camera, emitter or
    ///   direction reference is absent from a sequence.
    /// - [`SpriteError::Projection`] if a marker cannot be projected.
    pub fn extract_moving_smoke<S: SceneContext>(
        &self,
        item: &str,
        sequences: &mut [MovingSequence<S>],
        n_frames: u32,
    ) -> SpriteResult<MovingSmokeData> {
        let size = self.sizer.size(item, 1.0)?;

        let mut seen = HashSet::with_capacity(sequences.len());
        for sequence in sequences.iter() {
            if !seen.insert(sequence.pair) {
                return Err(SpriteError::DuplicateDirection {
                    pair: sequence.pair,
                });
            }
        }
        if sequences.len() != DiagonalPair::ALL.len() {
            warn!(
                item,
                directions = sequences.len(),
                "moving smoke extracted for an incomplete direction set"
            );
        }

        let mut data = MovingSmokeData::default();
        for sequence in sequences.iter_mut() {
            let frames = self.moving_frames(&mut sequence.scene, size, n_frames)?;
            info!(item, direction = %sequence.pair, frames = frames.len(), "extracted moving smoke");
            data.direction_frames
                .push(DirectionFrame::new(sequence.pair, frames));
        }
        Ok(data)
    }

    fn moving_frames<S: SceneContext>(
        &self,
        scene: &mut S,
        size: SpriteSize,
        n_frames: u32,
    ) -> SpriteResult<Vec<SmokeFrame>> {
        scene.set_active_object(&self.names.moving_camera)?;

        let mut frames = Vec::with_capacity(n_frames as usize);
        for frame in 0..n_frames {
            scene.set_frame(frame + 1)?;
            let camera = scene.active_camera()?;
            let emitter = scene.world_location(&self.names.smoke_emitter)?;
            let reference = scene.world_location(&self.names.direction_reference)?;

            let emitter_coords = project_to_sprite(&camera, emitter, size)?;
            let reference_coords = project_to_sprite(&camera, reference, size)?;
            debug!(frame, x = emitter_coords.x, y = emitter_coords.y, "smoke frame");

            frames.push(SmokeFrame {
                frame,
                emitter_coords,
                smoke_direction: emitter_coords.offset_to(&reference_coords),
            });
        }
        Ok(frames)
    }

    /// Emitter anchors at each of the four model rotations.
    ///
    /// The origin's rotation is reset to zero afterwards, also when the
    /// extraction fails part-way. The extraction error takes precedence over a
    /// failed reset.
    pub fn extract_static_smoke<S: SceneContext>(
        &self,
        item: &str,
        scene: &mut S,
    ) -> SpriteResult<StaticSmokeData> {
        let size = self.sizer.size(item, 1.0)?;

        let extracted = self.static_anchors(scene, size);
        let reset = scene
            .set_active_object(&self.names.origin)
            .and_then(|()| scene.set_active_rotation_z(0.0));

        let data = extracted?;
        reset?;
        info!(item, emitters = data.degree_0.len(), "extracted static smoke");
        Ok(data)
    }

    fn static_anchors<S: SceneContext>(
        &self,
        scene: &mut S,
        size: SpriteSize,
    ) -> SpriteResult<StaticSmokeData> {
        let mut data = StaticSmokeData::default();
        for rotation in Rotation::ALL {
            scene.set_active_object(&self.names.origin)?;
            scene.set_active_rotation_z(rotation.radians())?;

            scene.set_active_object(&self.names.static_camera)?;
            let camera = scene.active_camera()?;
            let anchors = scene
                .list_named_children(&self.names.smoke_emitters)?
                .into_iter()
                .map(|(_, location)| project_to_sprite(&camera, location, size))
                .collect::<SpriteResult<Vec<AnchorRecord>>>()?;
            debug!(degrees = rotation.degrees(), emitters = anchors.len(), "static smoke");

            *data.anchors_mut(rotation) = anchors;
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraLens;
    use crate::scene::{SnapshotCollection, SnapshotObject, SnapshotScene};
    use glam::DVec3;
    use isosprite_spec::ItemCatalog;
    use pretty_assertions::assert_eq;
    use std::f64::consts::FRAC_PI_2;

    fn sizer() -> SpriteSizer {
        SpriteSizer::new(ItemCatalog::builtin().unwrap())
    }

    fn assert_anchor(actual: AnchorRecord, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    /// Front camera framing x and z in [-1, 1].
    fn camera(name: &str) -> SnapshotObject {
        SnapshotObject::new(name)
            .with_location(DVec3::new(0.0, -10.0, 0.0))
            .with_rotation(DVec3::new(FRAC_PI_2, 0.0, 0.0))
            .with_camera(CameraLens::orthographic(2.0, 1.0))
    }

    fn vehicle_scene() -> SnapshotScene {
        SnapshotScene::new(
            vec![
                camera("Camera.001"),
                SnapshotObject::new("SmokeEmitter").with_track([
                    DVec3::new(0.0, 0.0, 0.5),
                    DVec3::new(0.5, 0.0, 0.5),
                    DVec3::new(1.0, 0.0, 0.5),
                ]),
                SnapshotObject::new("DirectionReference").with_location(DVec3::new(0.0, 0.0, 1.0)),
            ],
            vec![],
        )
        .unwrap()
    }

    fn building_scene() -> SnapshotScene {
        SnapshotScene::new(
            vec![
                camera("Camera"),
                SnapshotObject::new("Origin"),
                SnapshotObject::new("Chimney.A")
                    .with_parent("Origin")
                    .with_location(DVec3::new(0.5, 0.0, 0.0)),
                SnapshotObject::new("Chimney.B")
                    .with_parent("Origin")
                    .with_location(DVec3::new(0.0, 0.0, 0.5)),
            ],
            vec![SnapshotCollection::new(
                "SmokeEmitters",
                ["Chimney.A", "Chimney.B"],
            )],
        )
        .unwrap()
    }

    #[test]
    fn moving_smoke_frames() {
        let sizer = sizer();
        let extractor = SmokeExtractor::new(&sizer, &SceneNames::default());
        let mut sequences = vec![MovingSequence::new(
            DiagonalPair::BottomLeftTopRight,
            vehicle_scene(),
        )];

        let data = extractor
            .extract_moving_smoke("cart", &mut sequences, 3)
            .unwrap();
        assert_eq!(data.direction_frames.len(), 1);

        let direction = &data.direction_frames[0];
        assert_eq!(direction.diagonal_pair(), DiagonalPair::BottomLeftTopRight);
        let numbers: Vec<_> = direction.frames.iter().map(|f| f.frame).collect();
        assert_eq!(numbers, [0, 1, 2]);

        // Cart sprites are 64x64; the reference sits at (32, 64).
        let expected = [(32.0, 48.0), (48.0, 48.0), (64.0, 48.0)];
        for (frame, (x, y)) in direction.frames.iter().zip(expected) {
            assert_anchor(frame.emitter_coords, x, y);
            assert!((frame.smoke_direction[0] - (32.0 - x)).abs() < 1e-9);
            assert!((frame.smoke_direction[1] - 16.0).abs() < 1e-9);
        }
        assert_eq!(sequences[0].scene.frame(), 3);
    }

    #[test]
    fn moving_smoke_from_sequence_paths() {
        let sizer = sizer();
        let extractor = SmokeExtractor::new(&sizer, &SceneNames::default());
        let mut sequences = vec![
            MovingSequence::from_path(Path::new("cart/v1/cart_TR-BL.blend"), vehicle_scene())
                .unwrap(),
            MovingSequence::from_path(Path::new("cart/v1/cart_BL-TR.blend"), vehicle_scene())
                .unwrap(),
        ];
        let data = extractor
            .extract_moving_smoke("cart", &mut sequences, 24)
            .unwrap();

        let pairs: Vec<_> = data
            .direction_frames
            .iter()
            .map(|d| d.diagonal_pair())
            .collect();
        assert_eq!(
            pairs,
            [DiagonalPair::TopRightBottomLeft, DiagonalPair::BottomLeftTopRight]
        );
        // Frames past the end of the track hold the last key.
        assert_anchor(data.direction_frames[0].frames[23].emitter_coords, 64.0, 48.0);

        assert!(
            MovingSequence::from_path(Path::new("cart_XX-YY.blend"), vehicle_scene()).is_err()
        );
    }

    #[test]
    fn duplicate_directions_are_rejected() {
        let sizer = sizer();
        let extractor = SmokeExtractor::new(&sizer, &SceneNames::default());
        let mut sequences = vec![
            MovingSequence::new(DiagonalPair::TopLeftTopRight, vehicle_scene()),
            MovingSequence::new(DiagonalPair::TopLeftTopRight, vehicle_scene()),
        ];
        assert!(matches!(
            extractor.extract_moving_smoke("cart", &mut sequences, 3),
            Err(SpriteError::DuplicateDirection {
                pair: DiagonalPair::TopLeftTopRight
            })
        ));
    }

    #[test]
    fn moving_smoke_missing_markers() {
        let sizer = sizer();
        let extractor = SmokeExtractor::new(&sizer, &SceneNames::default());
        let scene = SnapshotScene::new(vec![camera("Camera.001")], vec![]).unwrap();
        let mut sequences = vec![MovingSequence::new(DiagonalPair::BottomLeftBottomRight, scene)];

        let err = extractor
            .extract_moving_smoke("cart", &mut sequences, 3)
            .unwrap_err();
        assert_eq!(err.to_string(), "Scene object 'SmokeEmitter' not found");

        assert!(matches!(
            extractor.extract_moving_smoke("tram", &mut sequences, 3),
            Err(SpriteError::UnknownItem { .. })
        ));
    }

    #[test]
    fn static_smoke_per_rotation() {
        let sizer = sizer();
        let extractor = SmokeExtractor::new(&sizer, &SceneNames::default());
        let mut scene = building_scene();

        let data = extractor
            .extract_static_smoke("stonemason", &mut scene)
            .unwrap();

        let expected_a = [(48.0, 32.0), (32.0, 32.0), (16.0, 32.0), (32.0, 32.0)];
        for (rotation, (x, y)) in Rotation::ALL.into_iter().zip(expected_a) {
            let anchors = data.anchors(rotation);
            assert_eq!(anchors.len(), 2);
            assert_anchor(anchors[0], x, y);
            assert_anchor(anchors[1], 32.0, 48.0);
        }
        assert_eq!(scene.object("Origin").unwrap().rotation[2], 0.0);
    }

    #[test]
    fn static_smoke_resets_rotation_on_failure() {
        let sizer = sizer();
        let extractor = SmokeExtractor::new(&sizer, &SceneNames::default());
        // At 270 degrees the chimney swings behind the camera.
        let mut scene = SnapshotScene::new(
            vec![
                camera("Camera"),
                SnapshotObject::new("Origin"),
                SnapshotObject::new("Chimney")
                    .with_parent("Origin")
                    .with_location(DVec3::new(12.0, 0.0, 0.0)),
            ],
            vec![SnapshotCollection::new("SmokeEmitters", ["Chimney"])],
        )
        .unwrap();

        let err = extractor
            .extract_static_smoke("stonemason", &mut scene)
            .unwrap_err();
        assert!(matches!(err, SpriteError::Projection { .. }));
        assert_eq!(scene.object("Origin").unwrap().rotation[2], 0.0);
        assert_eq!(scene.active_object(), Some("Origin"));
    }

    #[test]
    fn static_smoke_missing_collection() {
        let sizer = sizer();
        let names = SceneNames {
            smoke_emitters: "Chimneys".to_string(),
            ..SceneNames::default()
        };
        let extractor = SmokeExtractor::new(&sizer, &names);
        let err = extractor
            .extract_static_smoke("stonemason", &mut building_scene())
            .unwrap_err();
        assert_eq!(err.to_string(), "Scene collection 'Chimneys' not found");
    }

    #[test]
    fn static_smoke_without_origin() {
        let sizer = sizer();
        let extractor = SmokeExtractor::new(&sizer, &SceneNames::default());
        let mut scene = SnapshotScene::new(vec![camera("Camera")], vec![]).unwrap();
        let err = extractor
            .extract_static_smoke("stonemason", &mut scene)
            .unwrap_err();
        assert_eq!(err.to_string(), "Scene object 'Origin' not found");
    }
}
