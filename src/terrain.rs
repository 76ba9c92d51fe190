//! Terrain generation boundary.
//!
//! The renderer/application owns the real generator; this crate ships one
//! concrete, deterministic-given-a-seed implementation so `World::randomize`
//! is exercisable in tests and headless use without an external dependency.

use crate::element::CellKind;

/// One cell a generator wants placed, in grid coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CellSeed {
    pub x: usize,
    pub y: usize,
    pub kind: CellKind,
}

/// A pluggable world initialiser. Implementations should be deterministic
/// for a fixed `rng` stream so `randomize(seed)` reproduces a given layout.
pub trait TerrainGenerator: Send + Sync {
    fn generate(&self, width: usize, height: usize, rng: &mut fastrand::Rng) -> Vec<CellSeed>;
}

/// A simple layered generator: open sky down to a jittered ground line,
/// then SOIL down to a jittered stone line, then STONE to the floor, with a
/// handful of scattered CLOUD cells in the sky band. Good enough for tests
/// and headless demos; not meant to be visually interesting.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredTerrain;

impl TerrainGenerator for LayeredTerrain {
    fn generate(&self, width: usize, height: usize, rng: &mut fastrand::Rng) -> Vec<CellSeed> {
        let mut seeds = Vec::with_capacity(width * height);
        let ground_base = height * 3 / 5;
        let stone_base = height * 9 / 10;
        for x in 0..width {
            let ground = (ground_base as i64 + rng.i64(-2..=2)).clamp(0, height as i64 - 1) as usize;
            let stone = (stone_base as i64 + rng.i64(-2..=2))
                .clamp(ground as i64, height as i64 - 1) as usize;
            for y in 0..ground {
                if rng.f32() < 0.02 {
                    seeds.push(CellSeed {
                        x,
                        y,
                        kind: CellKind::Cloud,
                    });
                }
            }
            for y in ground..stone {
                seeds.push(CellSeed {
                    x,
                    y,
                    kind: CellKind::Soil,
                });
            }
            for y in stone..height {
                seeds.push(CellSeed {
                    x,
                    y,
                    kind: CellKind::Stone,
                });
            }
        }
        seeds
    }
}
