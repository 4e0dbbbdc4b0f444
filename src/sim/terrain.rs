//! Terrain streaming
//!
//! Three ground segments cover the corridor ahead of the camera. When one
//! scrolls past the camera it jumps back by the full corridor span and gets a
//! freshly generated set of hills and trees.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A decorative feature standing on a terrain segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TerrainFeature {
    Hill { x: f32, z: f32, size: f32 },
    Tree { x: f32, z: f32 },
}

impl TerrainFeature {
    pub fn is_hill(&self) -> bool {
        matches!(self, TerrainFeature::Hill { .. })
    }
}

/// One recyclable slice of the corridor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSegment {
    /// Logical slot; keys the segment's feature list
    pub base_z: i32,
    /// Current scroll offset along z
    pub offset: f32,
}

#[derive(Debug, Clone)]
pub struct Terrain {
    segments: [TerrainSegment; TERRAIN_SEGMENT_COUNT],
    /// One list per live base_z
    features: BTreeMap<i32, Vec<TerrainFeature>>,
}

impl Terrain {
    /// Lay out the initial segments at z = 0, -20, -40
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let segments: [TerrainSegment; TERRAIN_SEGMENT_COUNT] = std::array::from_fn(|i| {
            let base_z = -(i as i32) * TERRAIN_SEGMENT_SPACING;
            TerrainSegment {
                base_z,
                offset: base_z as f32,
            }
        });

        let features = segments
            .iter()
            .map(|s| (s.base_z, generate_features(rng)))
            .collect();

        Self { segments, features }
    }

    pub fn segments(&self) -> &[TerrainSegment] {
        &self.segments
    }

    /// Feature list of a live base_z
    pub fn features_for(&self, base_z: i32) -> Option<&[TerrainFeature]> {
        self.features.get(&base_z).map(Vec::as_slice)
    }

    /// Number of feature lists currently held
    pub fn feature_list_count(&self) -> usize {
        self.features.len()
    }

    /// Scroll every segment by `speed`, recycling any that passed the camera.
    /// Returns how many segments were recycled.
    pub fn advance<R: Rng + ?Sized>(&mut self, speed: f32, rng: &mut R) -> usize {
        let mut recycled = 0;
        for segment in &mut self.segments {
            segment.offset += speed;
            if segment.offset > TERRAIN_RECYCLE_Z {
                let old_base = segment.base_z;
                segment.offset -= TERRAIN_SPAN as f32;
                segment.base_z -= TERRAIN_SPAN;

                self.features.remove(&old_base);
                self.features.insert(segment.base_z, generate_features(rng));
                recycled += 1;

                log::debug!(
                    "Terrain segment {} recycled to {} (offset {:.2})",
                    old_base,
                    segment.base_z,
                    segment.offset
                );
            }
        }
        debug_assert_eq!(self.features.len(), TERRAIN_SEGMENT_COUNT);
        recycled
    }
}

/// 3-5 hills followed by 5-10 trees, scattered over the segment
pub fn generate_features<R: Rng + ?Sized>(rng: &mut R) -> Vec<TerrainFeature> {
    let hills = rng.random_range(3..=5);
    let trees = rng.random_range(5..=10);
    let mut features = Vec::with_capacity(hills + trees);

    for _ in 0..hills {
        let x = rng.random_range(-FEATURE_EXTENT..=FEATURE_EXTENT);
        let z = rng.random_range(-FEATURE_EXTENT..=FEATURE_EXTENT);
        let size = rng.random_range(0.5..=1.5);
        features.push(TerrainFeature::Hill { x, z, size });
    }
    for _ in 0..trees {
        let x = rng.random_range(-FEATURE_EXTENT..=FEATURE_EXTENT);
        let z = rng.random_range(-FEATURE_EXTENT..=FEATURE_EXTENT);
        features.push(TerrainFeature::Tree { x, z });
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn check_feature_list(features: &[TerrainFeature]) {
        let hills = features.iter().filter(|f| f.is_hill()).count();
        let trees = features.len() - hills;
        assert!((3..=5).contains(&hills), "hills = {}", hills);
        assert!((5..=10).contains(&trees), "trees = {}", trees);
        for feature in features {
            match *feature {
                TerrainFeature::Hill { x, z, size } => {
                    assert!(x.abs() <= FEATURE_EXTENT && z.abs() <= FEATURE_EXTENT);
                    assert!((0.5..=1.5).contains(&size));
                }
                TerrainFeature::Tree { x, z } => {
                    assert!(x.abs() <= FEATURE_EXTENT && z.abs() <= FEATURE_EXTENT);
                }
            }
        }
    }

    #[test]
    fn test_initial_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let terrain = Terrain::new(&mut rng);
        let bases: Vec<i32> = terrain.segments().iter().map(|s| s.base_z).collect();
        assert_eq!(bases, vec![0, -20, -40]);
        assert_eq!(terrain.feature_list_count(), 3);
        for s in terrain.segments() {
            assert_eq!(s.offset, s.base_z as f32);
            check_feature_list(terrain.features_for(s.base_z).unwrap());
        }
    }

    #[test]
    fn test_recycle_moves_segment_back_by_span() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut terrain = Terrain::new(&mut rng);

        // Segment 0 starts at 0 and needs to pass 20
        let mut recycled = 0;
        for _ in 0..400 {
            recycled += terrain.advance(TERRAIN_SPEED, &mut rng);
            if recycled > 0 {
                break;
            }
        }
        assert_eq!(recycled, 1);

        let first = terrain.segments()[0];
        assert_eq!(first.base_z, -60);
        assert!(first.offset <= -39.0 && first.offset > -41.0);
        assert!(terrain.features_for(0).is_none());
        check_feature_list(terrain.features_for(-60).unwrap());
        assert_eq!(terrain.feature_list_count(), 3);
    }

    #[test]
    fn test_recycle_is_deterministic_for_a_seed() {
        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut terrain = Terrain::new(&mut rng);
            terrain.advance(25.0, &mut rng);
            terrain.features_for(-60).unwrap().to_vec()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_long_run_keeps_three_lists() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut terrain = Terrain::new(&mut rng);
        for _ in 0..10_000 {
            terrain.advance(TERRAIN_SPEED, &mut rng);
        }
        assert_eq!(terrain.feature_list_count(), 3);
        let mut bases: Vec<i32> = terrain.segments().iter().map(|s| s.base_z).collect();
        bases.sort();
        bases.dedup();
        assert_eq!(bases.len(), 3);
        for s in terrain.segments() {
            assert!(terrain.features_for(s.base_z).is_some());
            assert!(s.offset <= TERRAIN_RECYCLE_Z);
        }
    }
}
