//! Fire particle propagation: adjacency quench/transform, ignition of
//! flammable neighbours, and the fire-transformation table applied on
//! death.

use crate::cell::Cell;
use crate::color::Rgb;
use crate::element::{CellKind, ElementRegistry};
use crate::grid::Grid;
use crate::neighbors::{count_surrounding, flammable_neighbors, MOORE_OFFSETS};
use crate::particle::{Particle, ParticleKind};
use crate::rng::roll;

use super::base_color;

const IGNITE_PROB: f32 = 0.15;
const SPREAD_ON_DEATH_PROB: f32 = 0.65;

/// Apply the fire-transformation table to the cell at `(x, y)`. Flammable
/// organics disappear and spawn a fresh FIRE particle (the particle-based
/// fire model); minerals convert in place.
fn ignite(grid: &mut Grid, elements: &ElementRegistry, x: i32, y: i32, rng: &mut fastrand::Rng, extra: &mut Vec<Particle>) {
    let cell = grid.front.get(x, y);
    let last_move = grid.front.last_move_at(x, y);
    match cell.kind {
        CellKind::Plant | CellKind::Oil | CellKind::Peat | CellKind::FertileSoil => {
            grid.front.set(x, y, Cell::empty(), Rgb::default(), last_move);
            extra.push(Particle::new_unassigned(
                x as f32 + 0.5,
                y as f32 + 0.5,
                0.0,
                0.0,
                ParticleKind::Fire,
                rng.i32(80..=120),
            ));
        }
        CellKind::Soil | CellKind::Sand => {
            grid.front.set(x, y, Cell::of_kind(CellKind::Magma), base_color(elements, CellKind::Magma), last_move);
        }
        CellKind::Clay => {
            grid.front.set(x, y, Cell::of_kind(CellKind::Stone), base_color(elements, CellKind::Stone), last_move);
        }
        CellKind::Stone => {
            grid.front.set(x, y, Cell::of_kind(CellKind::Magma), base_color(elements, CellKind::Magma), last_move);
        }
        _ => {}
    }
}

fn pick_neighbor(rng: &mut fastrand::Rng, neighbors: &[(i32, i32)]) -> Option<(i32, i32)> {
    if neighbors.is_empty() {
        None
    } else {
        Some(neighbors[rng.usize(0..neighbors.len())])
    }
}

pub fn run_fire_pass(
    grid: &mut Grid,
    elements: &ElementRegistry,
    particles: &mut Vec<Particle>,
    rng: &mut fastrand::Rng,
) {
    let mut extra = Vec::new();
    let mut kill = Vec::new();

    for i in 0..particles.len() {
        if particles[i].kind != ParticleKind::Fire || particles[i].is_dead() {
            continue;
        }

        let cx = particles[i].cell_x();
        let cy = particles[i].cell_y();

        if count_surrounding(&grid.front, cx, cy, CellKind::Crystal) > 0 {
            for (dx, dy) in MOORE_OFFSETS {
                let (nx, ny) = (cx + dx, cy + dy);
                if grid.front.get(nx, ny).kind == CellKind::Crystal {
                    let mut ruby = grid.front.get(nx, ny);
                    ruby.kind = CellKind::Ruby;
                    let last_move = grid.front.last_move_at(nx, ny);
                    grid.front.set(nx, ny, ruby, base_color(elements, CellKind::Ruby), last_move);
                    break;
                }
            }
            kill.push(i);
            continue;
        }

        if count_surrounding(&grid.front, cx, cy, CellKind::Water) > 0 {
            kill.push(i);
            continue;
        }

        let cell = grid.front.get(cx, cy);
        let over_flammable = elements.get(cell.kind).map(|d| d.is_flammable).unwrap_or(false);
        if over_flammable && roll(rng, IGNITE_PROB) {
            let neighbors = flammable_neighbors(&grid.front, elements, cx, cy);
            if let Some((nx, ny)) = pick_neighbor(rng, &neighbors) {
                ignite(grid, elements, nx, ny, rng, &mut extra);
            }
        }

        if particles[i].life <= 0 {
            ignite(grid, elements, cx, cy, rng, &mut extra);
            if roll(rng, SPREAD_ON_DEATH_PROB) {
                let neighbors = flammable_neighbors(&grid.front, elements, cx, cy);
                if let Some((nx, ny)) = pick_neighbor(rng, &neighbors) {
                    extra.push(Particle::new_unassigned(
                        nx as f32 + 0.5,
                        ny as f32 + 0.5,
                        0.0,
                        0.0,
                        ParticleKind::Fire,
                        rng.i32(80..=120),
                    ));
                }
            }
            kill.push(i);
        }
    }

    for idx in kill {
        particles[idx].life = 0;
    }
    particles.retain(|p| !p.is_dead());
    particles.extend(extra);
}
