//! Infinite track illusion via segment recycling
//!
//! A fixed ring of segments is laid end to end; segments that fall behind
//! the traveled distance are relocated to the front and get a fresh
//! decoration variant. The sweep is O(segments) with a small bounded count,
//! and recycling never allocates.

use rand::Rng;

use crate::consts::*;

/// One track segment. `decor_seed` drives the presentation layer's side
/// decorations; re-randomized on recycle.
#[derive(Debug, Clone, Copy)]
pub struct TrackSegment {
    /// Front edge position along the track (world units)
    pub z: f32,
    pub decor_seed: u32,
}

/// The recycling segment ring
#[derive(Debug, Clone)]
pub struct Track {
    segments: Vec<TrackSegment>,
    traveled: f32,
}

impl Track {
    pub fn new(rng: &mut impl Rng) -> Self {
        let segments = (0..VISIBLE_SEGMENTS)
            .map(|i| TrackSegment {
                z: i as f32 * SEGMENT_LENGTH,
                decor_seed: rng.random(),
            })
            .collect();
        Self {
            segments,
            traveled: 0.0,
        }
    }

    /// Advance travel and recycle segments that fell behind
    pub fn update(&mut self, dt: f32, speed: f32, rng: &mut impl Rng) {
        self.traveled += speed * dt;

        let recycle_behind = self.traveled - SEGMENT_LENGTH * 2.0;
        for i in 0..self.segments.len() {
            if self.segments[i].z < recycle_behind {
                let max_z = self
                    .segments
                    .iter()
                    .map(|s| s.z)
                    .fold(f32::NEG_INFINITY, f32::max);
                self.segments[i].z = max_z + SEGMENT_LENGTH;
                self.segments[i].decor_seed = rng.random();
            }
        }
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    /// Re-lay segments from the origin
    pub fn reset(&mut self) {
        self.traveled = 0.0;
        for (i, segment) in self.segments.iter_mut().enumerate() {
            segment.z = i as f32 * SEGMENT_LENGTH;
        }
    }
}
