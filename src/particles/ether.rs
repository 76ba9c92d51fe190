//! Ether particle drift and cell deepening.

use crate::cell::Cell;
use crate::element::{CellKind, ElementRegistry};
use crate::grid::Grid;
use crate::particle::{Particle, ParticleKind};
use crate::rng::{roll, uniform};
use crate::rules::ParticleRuleKind;
use crate::rules::RuleRegistry;

use super::base_color;
use super::spatial_hash::SpatialHash;

const DRIFT: f32 = 0.075;
const MAX_SPEED: f32 = 0.5;
const BOUNCE_DAMPING: f32 = 0.5;

pub fn run_ether_pass(
    grid: &mut Grid,
    elements: &ElementRegistry,
    rules: &RuleRegistry,
    particles: &mut Vec<Particle>,
    rng: &mut fastrand::Rng,
) {
    let hash = SpatialHash::build(particles);
    let mut kill: Vec<usize> = Vec::new();
    let len = particles.len();

    for i in 0..len {
        if particles[i].kind != ParticleKind::Ether || particles[i].is_dead() {
            continue;
        }

        let dvx = uniform(rng, -DRIFT, DRIFT);
        let dvy = uniform(rng, -DRIFT, DRIFT);
        particles[i].vx = (particles[i].vx + dvx).clamp(-MAX_SPEED, MAX_SPEED);
        particles[i].vy = (particles[i].vy + dvy).clamp(-MAX_SPEED, MAX_SPEED);
        particles[i].px += particles[i].vx;
        particles[i].py += particles[i].vy;

        let width = grid.width() as f32;
        let height = grid.height() as f32;
        if particles[i].px < 0.0 {
            particles[i].px = 0.0;
            particles[i].vx = -particles[i].vx * BOUNCE_DAMPING;
        } else if particles[i].px >= width {
            particles[i].px = width - f32::EPSILON;
            particles[i].vx = -particles[i].vx * BOUNCE_DAMPING;
        }
        if particles[i].py < 0.0 {
            particles[i].py = 0.0;
            particles[i].vy = -particles[i].vy * BOUNCE_DAMPING;
        } else if particles[i].py >= height {
            particles[i].py = height - f32::EPSILON;
            particles[i].vy = -particles[i].vy * BOUNCE_DAMPING;
        }

        let cx = particles[i].cell_x();
        let cy = particles[i].cell_y();
        let cell_kind = grid.front.get(cx, cy).kind;

        let matching = rules
            .particle_rules()
            .iter()
            .find(|r| r.particle == ParticleRuleKind::Ether && r.from == cell_kind);
        let Some(rule) = matching else { continue };
        if !roll(rng, rule.probability) {
            continue;
        }

        let last_move = grid.front.last_move_at(cx, cy);
        if rule.to == CellKind::Crystal {
            let block = hash.moore_block(cx, cy);
            let mut consumed = 0u32;
            for j in block {
                if j != i && particles[j].kind == ParticleKind::Ether && !particles[j].is_dead() {
                    kill.push(j);
                    consumed += 1;
                }
            }
            let mut crystal_cell = Cell::of_kind(CellKind::Crystal);
            crystal_cell.ether_storage = consumed + 1;
            grid.front.set(cx, cy, crystal_cell, base_color(elements, CellKind::Crystal), last_move);
        } else {
            let new_cell = Cell::of_kind(rule.to);
            grid.front.set(cx, cy, new_cell, base_color(elements, rule.to), last_move);
        }
        kill.push(i);
    }

    for idx in kill {
        particles[idx].life = 0;
    }
    particles.retain(|p| !p.is_dead());
}
