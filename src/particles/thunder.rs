//! Thunder particle ballistics: falls under gravity, dies on any wall,
//! detonates water on contact, and has a chance to ignite flammable
//! ground.

use crate::cell::Cell;
use crate::color::Rgb;
use crate::element::{CellKind, ElementRegistry};
use crate::grid::Grid;
use crate::particle::{Particle, ParticleKind};
use crate::rng::{roll, uniform};

use super::{explosion, in_bounds, SCATTER_IGNITE_RADIUS, SCATTER_WATER_RADIUS};

const VX_PERTURB: f32 = 0.75;
const GRAVITY: f32 = 0.1;
const IGNITE_PROB: f32 = 0.5;

pub fn run_thunder_pass(
    grid: &mut Grid,
    elements: &ElementRegistry,
    particles: &mut Vec<Particle>,
    rng: &mut fastrand::Rng,
) {
    let mut extra = Vec::new();
    let mut kill = Vec::new();

    for i in 0..particles.len() {
        if particles[i].kind != ParticleKind::Thunder || particles[i].is_dead() {
            continue;
        }

        particles[i].vx = (particles[i].vx + uniform(rng, -VX_PERTURB, VX_PERTURB)).clamp(-2.0, 2.0);
        particles[i].vy = (particles[i].vy + GRAVITY).clamp(-1.0, 4.0);
        particles[i].px += particles[i].vx;
        particles[i].py += particles[i].vy;

        if !in_bounds(grid, particles[i].px, particles[i].py) {
            kill.push(i);
            continue;
        }

        let cx = particles[i].cell_x();
        let cy = particles[i].cell_y();
        let cell = grid.front.get(cx, cy);

        if cell.kind == CellKind::Water {
            let radius = uniform(rng, SCATTER_WATER_RADIUS.0, SCATTER_WATER_RADIUS.1);
            extra.extend(explosion(grid, cx as f32 + 0.5, cy as f32 + 0.5, radius, rng));
            kill.push(i);
            continue;
        }

        let flammable = elements.get(cell.kind).map(|d| d.is_flammable).unwrap_or(false);
        if flammable && roll(rng, IGNITE_PROB) {
            let last_move = grid.front.last_move_at(cx, cy);
            grid.front.set(cx, cy, Cell::empty(), Rgb::default(), last_move);
            extra.push(Particle::new_unassigned(
                cx as f32 + 0.5,
                cy as f32 + 0.5,
                0.0,
                0.0,
                ParticleKind::Fire,
                rng.i32(80..=120),
            ));
            let radius = uniform(rng, SCATTER_IGNITE_RADIUS.0, SCATTER_IGNITE_RADIUS.1);
            extra.extend(explosion(grid, cx as f32 + 0.5, cy as f32 + 0.5, radius, rng));
            kill.push(i);
        }
    }

    for idx in kill {
        particles[idx].life = 0;
    }
    particles.retain(|p| !p.is_dead());
    particles.extend(extra);
}
