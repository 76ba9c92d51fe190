//! Plant motion. Growth, decay, and the stem/leaf/flower/ground-cover spread
//! rules live in [`crate::plant_growth`] as a separate pass; this module
//! only decides whether a plant cell falls.

use super::{granular_with, MovementCtx};

pub fn plant(ctx: &mut MovementCtx, x: i32, y: i32) {
    let cell = ctx.read.get(x, y);
    if cell.plant_mode == crate::cell::PlantMode::Withered {
        granular_with(ctx, x, y, cell, false);
        return;
    }
    let below = ctx.current(x, y + 1);
    if below.is_empty() {
        granular_with(ctx, x, y, cell, false);
    } else {
        let color = ctx.read.color_at(x, y);
        ctx.copy_value(x, y, cell, color);
    }
}
