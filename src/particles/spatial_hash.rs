//! Per-tick spatial hash bucketing particles by integer cell, used by the
//! ether pass to find nearby ether particles cheaply.

use std::collections::HashMap;

use crate::particle::Particle;

pub struct SpatialHash {
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialHash {
    pub fn build(particles: &[Particle]) -> Self {
        let mut buckets: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (i, p) in particles.iter().enumerate() {
            buckets.entry((p.cell_x(), p.cell_y())).or_default().push(i);
        }
        SpatialHash { buckets }
    }

    /// Indices of particles in the 3x3 Moore block of cells around `(cx, cy)`.
    pub fn moore_block(&self, cx: i32, cy: i32) -> Vec<usize> {
        let mut out = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(bucket) = self.buckets.get(&(cx + dx, cy + dy)) {
                    out.extend(bucket.iter().copied());
                }
            }
        }
        out
    }
}
