//! Oil: rare spontaneous combustion, otherwise granular motion.

use crate::cell::{Cell, LastMove};
use crate::color::Rgb;
use crate::particle::{Particle, ParticleKind};
use crate::rng::uniform;

use super::{granular_with, MovementCtx};

const IGNITION_PROB: f32 = 0.001;

pub fn oil(ctx: &mut MovementCtx, x: i32, y: i32) {
    if ctx.rng.f32() < IGNITION_PROB {
        ctx.write.set(x, y, Cell::empty(), Rgb::default(), LastMove::None);
        ctx.mark_moved(x, y);
        let vx = uniform(ctx.rng, -0.3, 0.3);
        let vy = uniform(ctx.rng, -0.3, 0.1);
        let life = ctx.rng.i32(40..=60);
        ctx.spawned.push(Particle::new_unassigned(
            x as f32 + 0.5,
            y as f32 + 0.5,
            vx,
            vy,
            ParticleKind::Fire,
            life,
        ));
        return;
    }

    let cell = ctx.read.get(x, y);
    granular_with(ctx, x, y, cell, false);
}
