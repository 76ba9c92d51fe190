//! Crystal cells: slow ether emission, eventual dissolution, and a fall-back
//! to granular motion so crystals still settle.

use crate::particle::{Particle, ParticleKind};
use crate::rng::random_unit_vector;

use super::{granular_with, MovementCtx};

const EMISSION_PROB: f32 = 0.001;
const STORAGE_DECREMENT_PROB: f32 = 0.95;

pub fn crystal(ctx: &mut MovementCtx, x: i32, y: i32) {
    let mut cell = ctx.read.get(x, y);
    if cell.ether_storage == 0 {
        cell.ether_storage = ctx.rng.u32(5..15);
    }

    if ctx.rng.f32() < EMISSION_PROB {
        let (dx, dy) = random_unit_vector(ctx.rng);
        ctx.spawned.push(Particle::new_unassigned(
            x as f32 + 0.5,
            y as f32 + 0.5,
            dx * 0.3,
            dy * 0.3,
            ParticleKind::Ether,
            150,
        ));
        if ctx.rng.f32() < STORAGE_DECREMENT_PROB && cell.ether_storage > 0 {
            cell.ether_storage -= 1;
        }
        if cell.ether_storage == 0 {
            ctx.write.set(
                x,
                y,
                crate::cell::Cell::empty(),
                crate::color::Rgb::default(),
                crate::cell::LastMove::None,
            );
            ctx.mark_moved(x, y);
            return;
        }
    }

    granular_with(ctx, x, y, cell, false);
}
