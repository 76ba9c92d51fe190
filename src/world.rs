//! World state: the grid, the particle set, registries, and the boundary
//! operations (`place`, `clear`, `randomize`, `stats`).

use std::collections::HashMap;

use crate::cell::Cell;
use crate::color::Palette;
use crate::element::{CellKind, ElementRegistry};
use crate::error::{Result, TerraspielError};
use crate::grid::Grid;
use crate::particle::{Particle, ParticleKind};
use crate::rules::RuleRegistry;
use crate::terrain::{LayeredTerrain, TerrainGenerator};

/// Construction-time parameters for a [`World`].
#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            width: 160,
            height: 90,
            seed: 0,
        }
    }
}

/// Per-kind cell and particle counts, recomputed from scratch each tick.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub cells: HashMap<CellKind, u32>,
    pub particles: HashMap<&'static str, u32>,
}

fn particle_stat_key(kind: ParticleKind) -> &'static str {
    match kind {
        ParticleKind::Ether => "ETHER",
        ParticleKind::Thunder => "THUNDER",
        ParticleKind::Fire => "FIRE",
        ParticleKind::Scattered(_) => "SCATTERED",
    }
}

/// Owns the simulation's mutable state: the double-buffered grid, the
/// particle list, the tick counter, and the read-only registries needed to
/// interpret them. `tick()` (see [`crate::scheduler`]) is the only operation
/// that should run mid-frame; `place`/`clear`/`randomize` are meant to be
/// called between ticks.
pub struct World {
    pub grid: Grid,
    pub particles: Vec<Particle>,
    pub frame_count: u64,
    pub elements: ElementRegistry,
    pub rules: RuleRegistry,
    pub rng: fastrand::Rng,
    palettes: HashMap<CellKind, Palette>,
    next_particle_id: u64,
    terrain: Box<dyn TerrainGenerator>,
}

impl World {
    pub fn new(config: WorldConfig, elements: ElementRegistry, rules: RuleRegistry) -> Self {
        Self::with_terrain(config, elements, rules, Box::new(LayeredTerrain))
    }

    pub fn with_terrain(
        config: WorldConfig,
        elements: ElementRegistry,
        rules: RuleRegistry,
        terrain: Box<dyn TerrainGenerator>,
    ) -> Self {
        let mut rng = fastrand::Rng::with_seed(config.seed);
        let palettes = build_palettes(&elements, &mut rng);
        World {
            grid: Grid::new(config.width, config.height),
            particles: Vec::new(),
            frame_count: 0,
            elements,
            rules,
            rng,
            palettes,
            next_particle_id: 0,
            terrain,
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Hand out the next strictly-increasing particle id.
    pub fn alloc_particle_id(&mut self) -> u64 {
        let id = self.next_particle_id;
        self.next_particle_id += 1;
        id
    }

    /// Assign real ids to any particle still carrying the unassigned
    /// sentinel, preserving spawn order so ids stay strictly monotonic.
    pub fn assign_pending_ids(&mut self) {
        for p in self.particles.iter_mut() {
            if p.id == crate::particle::UNASSIGNED_ID {
                p.id = self.next_particle_id;
                self.next_particle_id += 1;
            }
        }
    }

    fn colour_for(&mut self, kind: CellKind) -> crate::color::Rgb {
        match self.palettes.get(&kind) {
            Some(palette) => palette.pick(&mut self.rng),
            None => crate::color::Rgb::default(),
        }
    }

    /// Place `element` at `(x, y)` if that cell is currently empty. Writes
    /// to both buffers so the placement survives an in-flight tick. Returns
    /// an error for an unknown element name; a non-empty target is a silent
    /// no-op (returns `Ok(false)`).
    pub fn place(&mut self, x: i32, y: i32, element: &str) -> Result<bool> {
        let kind = CellKind::from_name(element)
            .ok_or_else(|| TerraspielError::UnknownElement(element.to_string()))?;
        if !self.elements.contains(kind) {
            return Err(TerraspielError::UnknownElement(element.to_string()));
        }
        if !self.grid.front.get(x, y).is_empty() || !self.grid.back.get(x, y).is_empty() {
            return Ok(false);
        }
        let cell = Cell::of_kind(kind);
        let color = self.colour_for(kind);
        self.grid
            .front
            .set(x, y, cell, color, crate::cell::LastMove::None);
        self.grid
            .back
            .set(x, y, cell, color, crate::cell::LastMove::None);
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.particles.clear();
    }

    /// Reset the world and repopulate it from the terrain generator using
    /// `seed`.
    pub fn randomize(&mut self, seed: u64) {
        self.clear();
        self.rng = fastrand::Rng::with_seed(seed);
        let width = self.width();
        let height = self.height();
        let seeds = self.terrain.generate(width, height, &mut self.rng);
        for seed in seeds {
            let kind = seed.kind;
            let cell = Cell::of_kind(kind);
            let color = self.colour_for(kind);
            let (x, y) = (seed.x as i32, seed.y as i32);
            self.grid.front.set(x, y, cell, color, crate::cell::LastMove::None);
            self.grid.back.set(x, y, cell, color, crate::cell::LastMove::None);
        }
    }

    /// Recompute per-kind cell and particle counts from scratch.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for cell in self.grid.read_buffer().cells() {
            if !cell.is_empty() {
                *stats.cells.entry(cell.kind).or_insert(0) += 1;
            }
        }
        for particle in &self.particles {
            *stats
                .particles
                .entry(particle_stat_key(particle.kind))
                .or_insert(0) += 1;
        }
        stats
    }
}

fn build_palettes(elements: &ElementRegistry, rng: &mut fastrand::Rng) -> HashMap<CellKind, Palette> {
    let mut palettes = HashMap::new();
    for def in elements.iter() {
        let palette = if def.has_color_variation {
            Palette::varied(def.color, rng)
        } else {
            Palette::uniform(def.color)
        };
        palettes.insert(def.kind, palette);
    }
    palettes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_registry() -> ElementRegistry {
        ElementRegistry::from_json(
            r#"[
                {"name": "SOIL", "color": "#6b4423", "density": 1.5},
                {"name": "WATER", "color": "#3070ff", "density": 1.0, "state": "liquid", "fluidity": {"resistance": 0.1, "spread": 0.8}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn place_into_empty_succeeds() {
        let mut world = World::new(
            WorldConfig { width: 4, height: 4, seed: 1 },
            minimal_registry(),
            RuleRegistry::default(),
        );
        assert!(world.place(1, 1, "SOIL").unwrap());
        assert_eq!(world.grid.front.get(1, 1).kind, CellKind::Soil);
        assert_eq!(world.grid.back.get(1, 1).kind, CellKind::Soil);
    }

    #[test]
    fn place_into_occupied_is_noop() {
        let mut world = World::new(
            WorldConfig { width: 4, height: 4, seed: 1 },
            minimal_registry(),
            RuleRegistry::default(),
        );
        assert!(world.place(1, 1, "SOIL").unwrap());
        assert!(!world.place(1, 1, "WATER").unwrap());
        assert_eq!(world.grid.front.get(1, 1).kind, CellKind::Soil);
    }

    #[test]
    fn place_unknown_element_errors() {
        let mut world = World::new(
            WorldConfig { width: 4, height: 4, seed: 1 },
            minimal_registry(),
            RuleRegistry::default(),
        );
        assert!(world.place(0, 0, "UNOBTAINIUM").is_err());
    }

    #[test]
    fn stats_counts_placed_cells() {
        let mut world = World::new(
            WorldConfig { width: 4, height: 4, seed: 1 },
            minimal_registry(),
            RuleRegistry::default(),
        );
        world.place(0, 0, "SOIL").unwrap();
        world.place(1, 0, "SOIL").unwrap();
        world.place(2, 0, "WATER").unwrap();
        let stats = world.stats();
        assert_eq!(stats.cells[&CellKind::Soil], 2);
        assert_eq!(stats.cells[&CellKind::Water], 1);
    }
}
