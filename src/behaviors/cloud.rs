//! Drifting cloud cells: rain, lightning charge, and eventual decay.

use crate::cell::{Cell, LastMove};
use crate::color::Rgb;
use crate::element::CellKind;
use crate::neighbors::count_surrounding;
use crate::particle::{Particle, ParticleKind};
use crate::rng::uniform;

use super::MovementCtx;

const RAIN_TICK_PROB: f32 = 0.1;
const CHARGE_TICK_PROB: f32 = 0.1;
const DECAY_TICK_PROB: f32 = 0.02;
const DECAY_THRESHOLD: u32 = 100;

pub fn cloud(ctx: &mut MovementCtx, x: i32, y: i32) {
    let mut cell = ctx.read.get(x, y);
    if cell.rain_threshold == 0 {
        cell.rain_threshold = (100i32 + ctx.rng.i32(-20..=20)).max(1) as u32;
    }
    if cell.charge_threshold == 0 {
        cell.charge_threshold = (800i32 + ctx.rng.i32(-200..=200)).max(1) as u32;
    }

    let has_cloud_neighbor = count_surrounding(ctx.read, x, y, CellKind::Cloud) > 0;
    if ctx.rng.f32() < RAIN_TICK_PROB || has_cloud_neighbor {
        cell.rain_counter += 1;
    }
    if ctx.rng.f32() < CHARGE_TICK_PROB || has_cloud_neighbor {
        cell.charge_counter += 1;
    }
    if ctx.rng.f32() < DECAY_TICK_PROB {
        cell.decay_counter += 1;
    }

    if cell.rain_counter >= cell.rain_threshold {
        if ctx.read.in_bounds(x, y + 1) && ctx.current(x, y + 1).is_empty() {
            let water = Cell::of_kind(CellKind::Water);
            let water_color = ctx.elements.get(CellKind::Water).map(|d| d.color).unwrap_or_default();
            ctx.write.set(x, y + 1, water, water_color, LastMove::None);
            ctx.mark_moved(x, y + 1);
            cell.rain_counter = 0;
            cell.decay_counter += 10;
        }
    }

    if cell.charge_counter >= cell.charge_threshold {
        let vx = uniform(ctx.rng, -0.5, 0.5);
        let vy = uniform(ctx.rng, 2.0, 4.0);
        ctx.spawned.push(Particle::new_unassigned(
            x as f32 + 0.5,
            y as f32 + 0.5,
            vx,
            vy,
            ParticleKind::Thunder,
            60,
        ));
        cell.charge_counter = 0;
    }

    if cell.decay_counter >= DECAY_THRESHOLD {
        ctx.write.set(x, y, Cell::empty(), Rgb::default(), LastMove::None);
        ctx.mark_moved(x, y);
        return;
    }

    let color = ctx.read.color_at(x, y);

    let above_in_bounds = ctx.read.in_bounds(x, y - 1);
    let above = ctx.current(x, y - 1);
    if above_in_bounds && above.is_empty() && ctx.rng.f32() < 0.7 {
        ctx.write.set(x, y - 1, cell, color, LastMove::None);
        ctx.write.set(x, y, Cell::empty(), Rgb::default(), LastMove::None);
        ctx.mark_moved(x, y);
        ctx.mark_moved(x, y - 1);
        return;
    }
    if above_in_bounds && above.kind == CellKind::Water && ctx.rng.f32() < 0.7 {
        let water_color = if ctx.is_moved(x, y - 1) {
            ctx.write.color_at(x, y - 1)
        } else {
            ctx.read.color_at(x, y - 1)
        };
        ctx.write.set(x, y - 1, cell, color, LastMove::None);
        ctx.write.set(x, y, above, water_color, LastMove::None);
        ctx.mark_moved(x, y);
        ctx.mark_moved(x, y - 1);
        return;
    }
    if above_in_bounds && ctx.rng.f32() < 0.5 {
        let go_right = ctx.rng.bool();
        let dx = if go_right { 1 } else { -1 };
        if ctx.read.in_bounds(x + dx, y - 1) && ctx.current(x + dx, y - 1).is_empty() {
            ctx.write.set(x + dx, y - 1, cell, color, LastMove::None);
            ctx.write.set(x, y, Cell::empty(), Rgb::default(), LastMove::None);
            ctx.mark_moved(x, y);
            ctx.mark_moved(x + dx, y - 1);
            return;
        }
        if ctx.read.in_bounds(x + dx, y) && ctx.current(x + dx, y).is_empty() {
            ctx.write.set(x + dx, y, cell, color, LastMove::None);
            ctx.write.set(x, y, Cell::empty(), Rgb::default(), LastMove::None);
            ctx.mark_moved(x, y);
            ctx.mark_moved(x + dx, y);
            return;
        }
    }

    let last_move = ctx.read.last_move_at(x, y);
    ctx.write.set(x, y, cell, color, last_move);
    ctx.mark_moved(x, y);
}
