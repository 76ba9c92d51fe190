//! Motion for every element that declares `fluidity`: granular solids and
//! liquids alike share this one routine, distinguished only by their
//! registry-provided resistance/spread.

use crate::cell::{Cell, LastMove};
use crate::element::MatterState;

use super::MovementCtx;

/// In bounds and currently holding no cell, consulting whichever buffer
/// holds this tick's authoritative state for `(x, y)` (see
/// [`MovementCtx::current`]). Out-of-bounds coordinates are never "open" —
/// they behave like an implicit wall so granular cells at the grid's edge
/// don't fall or flow off it.
fn open(ctx: &MovementCtx, x: i32, y: i32) -> bool {
    ctx.read.in_bounds(x, y) && ctx.current(x, y).is_empty()
}

fn is_lower_density_liquid(ctx: &MovementCtx, self_density: f32, x: i32, y: i32) -> bool {
    if !ctx.read.in_bounds(x, y) {
        return false;
    }
    let cell = ctx.current(x, y);
    if cell.is_empty() {
        return false;
    }
    match ctx.elements.get(cell.kind) {
        Some(def) => def.state == MatterState::Liquid && def.density < self_density,
        None => false,
    }
}

fn available(ctx: &MovementCtx, x: i32, y: i32, density: f32) -> bool {
    open(ctx, x, y) || is_lower_density_liquid(ctx, density, x, y)
}

fn empty_run_below(ctx: &MovementCtx, x: i32, y: i32, depth: i32) -> u32 {
    (1..=depth).filter(|d| open(ctx, x, y + d)).count() as u32
}

/// Dispatch entry point: reads `(x, y)` fresh from the read buffer.
pub fn granular(ctx: &mut MovementCtx, x: i32, y: i32, chained: bool) -> bool {
    let cell = ctx.read.get(x, y);
    granular_with(ctx, x, y, cell, chained)
}

/// Core routine, parameterised over the authoritative cell value so callers
/// that mutate their own scalars first (crystal, withered plants) can chain
/// into the same motion logic without losing their edit.
///
/// Returns true if the cell moved (or swapped). If it did not move and
/// `chained` is false, the caller's unchanged cell is copied read-to-write.
pub fn granular_with(ctx: &mut MovementCtx, x: i32, y: i32, cell: Cell, chained: bool) -> bool {
    let color = ctx.read.color_at(x, y);
    let Some(def) = ctx.elements.get(cell.kind) else {
        if !chained {
            ctx.copy_value(x, y, cell, color);
        }
        return false;
    };
    let Some(fluidity) = def.fluidity else {
        if !chained {
            ctx.copy_value(x, y, cell, color);
        }
        return false;
    };
    let density = def.density;

    let below_open = open(ctx, x, y + 1);
    let below_swappable = is_lower_density_liquid(ctx, density, x, y + 1);
    let blocking = !below_open && !below_swappable;
    if blocking && ctx.rng.f32() < 0.9 {
        if !chained {
            ctx.copy_value(x, y, cell, color);
        }
        return false;
    }

    if below_open {
        ctx.move_value(x, y, x, y + 1, cell, color, LastMove::Down);
        return true;
    }
    if below_swappable {
        ctx.swap_value(x, y, x, y + 1, cell, color, LastMove::Down);
        return true;
    }

    let last_move = ctx.read.last_move_at(x, y);
    let prefer_right = match last_move {
        LastMove::Left => false,
        LastMove::Right => true,
        _ => ctx.scan_right,
    };
    let candidates = if prefer_right {
        [(1, LastMove::DownRight), (-1, LastMove::DownLeft)]
    } else {
        [(-1, LastMove::DownLeft), (1, LastMove::DownRight)]
    };
    for (dx, last_move) in candidates {
        let (tx, ty) = (x + dx, y + 1);
        if available(ctx, tx, ty, density) && ctx.rng.f32() < 1.0 - fluidity.resistance {
            if open(ctx, tx, ty) {
                ctx.move_value(x, y, tx, ty, cell, color, last_move);
            } else {
                ctx.swap_value(x, y, tx, ty, cell, color, last_move);
            }
            return true;
        }
    }

    if ctx.rng.f32() < fluidity.spread {
        let left_open = open(ctx, x - 1, y);
        let right_open = open(ctx, x + 1, y);
        let chosen = if left_open && right_open {
            let left_below = empty_run_below(ctx, x - 1, y, 3);
            let right_below = empty_run_below(ctx, x + 1, y, 3);
            if left_below == right_below {
                Some(ctx.scan_right)
            } else {
                Some(right_below > left_below)
            }
        } else if right_open {
            Some(true)
        } else if left_open {
            Some(false)
        } else {
            None
        };
        if let Some(go_right) = chosen {
            let (dx, last_move) = if go_right {
                (1, LastMove::Right)
            } else {
                (-1, LastMove::Left)
            };
            ctx.move_value(x, y, x + dx, y, cell, color, last_move);
            return true;
        }
    }

    if !chained {
        ctx.copy_value(x, y, cell, color);
    }
    false
}
