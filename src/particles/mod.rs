//! Passes 4-6: the particle subsystem (ether drift, thunder ballistics,
//! fire propagation) plus the shared explosion helper they all can trigger.

pub mod ether;
pub mod fire;
pub mod spatial_hash;
pub mod thunder;

use crate::cell::Cell;
use crate::color::Rgb;
use crate::element::{CellKind, ElementRegistry};
use crate::grid::Grid;
use crate::particle::{Particle, ParticleKind};
use crate::rng::roll;

pub(crate) fn base_color(elements: &ElementRegistry, kind: CellKind) -> Rgb {
    elements.get(kind).map(|d| d.color).unwrap_or_default()
}

/// Convert cells within `radius` of `(cx, cy)` into outward-scattering free
/// particles, with probability `1 - d/radius` per cell, restricted to
/// [`CellKind::is_scatterable`] kinds.
pub fn explosion(grid: &mut Grid, cx: f32, cy: f32, radius: f32, rng: &mut fastrand::Rng) -> Vec<Particle> {
    let mut scattered = Vec::new();
    if radius <= 0.0 {
        return scattered;
    }
    let r = radius.ceil() as i32;
    let icx = cx.floor() as i32;
    let icy = cy.floor() as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            let d = ((dx * dx + dy * dy) as f32).sqrt();
            if d > radius {
                continue;
            }
            let (x, y) = (icx + dx, icy + dy);
            let cell = grid.front.get(x, y);
            if cell.is_empty() || !cell.kind.is_scatterable() {
                continue;
            }
            let prob = 1.0 - d / radius;
            if roll(rng, prob) {
                let last_move = grid.front.last_move_at(x, y);
                grid.front.set(x, y, Cell::empty(), Rgb::default(), last_move);
                let (ux, uy) = if d > 0.0 {
                    (dx as f32 / d, dy as f32 / d)
                } else {
                    (0.0, 0.0)
                };
                let speed = prob * 3.0;
                scattered.push(Particle::new_unassigned(
                    x as f32 + 0.5,
                    y as f32 + 0.5,
                    ux * speed,
                    uy * speed,
                    ParticleKind::Scattered(cell.kind),
                    100,
                ));
            }
        }
    }
    scattered
}

pub(crate) fn in_bounds(grid: &Grid, x: f32, y: f32) -> bool {
    x >= 0.0 && y >= 0.0 && x < grid.width() as f32 && y < grid.height() as f32
}

pub(crate) const SCATTER_WATER_RADIUS: (f32, f32) = (1.0, 2.0);
pub(crate) const SCATTER_IGNITE_RADIUS: (f32, f32) = (1.0, 3.0);
