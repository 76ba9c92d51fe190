//! Pass 1 (movement) cell behaviours: one routine per element family,
//! dispatched by [`run_movement_pass`].

mod cloud;
mod crystal;
mod granular;
mod oil;
mod plant;

use crate::cell::LastMove;
use crate::color::Rgb;
use crate::element::{CellKind, ElementRegistry};
use crate::grid::{Grid, Plane};
use crate::particle::Particle;

/// Shared state for one cell's movement dispatch. Behaviours read `read`
/// and write `write`; `moved` enforces the single-mover-per-cell invariant
/// across the whole pass.
pub struct MovementCtx<'a> {
    pub read: &'a Plane,
    pub write: &'a mut Plane,
    pub moved: &'a mut [bool],
    pub elements: &'a ElementRegistry,
    pub rng: &'a mut fastrand::Rng,
    pub scan_right: bool,
    pub width: usize,
    pub height: usize,
    pub spawned: &'a mut Vec<Particle>,
}

impl MovementCtx<'_> {
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    pub fn is_moved(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return true;
        }
        self.moved[self.index(x, y)]
    }

    pub fn mark_moved(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.moved[i] = true;
    }

    /// Copy a cell from `read` to `write` unchanged, preserving its colour
    /// and last-move, and mark it as having been visited.
    pub fn copy_unchanged(&mut self, x: i32, y: i32) {
        let cell = self.read.get(x, y);
        let color = self.read.color_at(x, y);
        let last_move = self.read.last_move_at(x, y);
        self.write.set(x, y, cell, color, last_move);
        self.mark_moved(x, y);
    }

    /// The authoritative cell at `(x, y)` *as of this point in the pass*:
    /// the write buffer if this position already has a final value this
    /// tick, otherwise the frozen read buffer. Movement availability checks
    /// must use this instead of reading `read` directly, since a cell in an
    /// already-finalised row (or an already-visited position in the current
    /// row) may have a write-buffer value that disagrees with the stale
    /// read-buffer snapshot.
    pub fn current(&self, x: i32, y: i32) -> crate::cell::Cell {
        if self.is_moved(x, y) {
            self.write.get(x, y)
        } else {
            self.read.get(x, y)
        }
    }

    /// Move the cell at `(x, y)` to `(nx, ny)`, leaving EMPTY behind, and
    /// mark both as moved.
    pub fn move_cell(&mut self, x: i32, y: i32, nx: i32, ny: i32, last_move: LastMove) {
        let cell = self.read.get(x, y);
        let color = self.read.color_at(x, y);
        self.write.set(nx, ny, cell, color, last_move);
        self.write.set(x, y, crate::cell::Cell::empty(), Rgb::default(), LastMove::None);
        self.mark_moved(x, y);
        self.mark_moved(nx, ny);
    }

    /// Swap the cells at `(x, y)` and `(nx, ny)`; the mover's last-move is
    /// set, while the displaced cell inherits whatever move brought it
    /// here (its own last-move is left untouched, per the granular swap
    /// rule).
    pub fn swap_cells(&mut self, x: i32, y: i32, nx: i32, ny: i32, last_move: LastMove) {
        let mover = self.read.get(x, y);
        let mover_color = self.read.color_at(x, y);
        let (other, other_color, other_last_move) = self.current_triple(nx, ny);
        self.write.set(nx, ny, mover, mover_color, last_move);
        self.write.set(x, y, other, other_color, other_last_move);
        self.mark_moved(x, y);
        self.mark_moved(nx, ny);
    }

    /// `(cell, colour, last_move)` for `(x, y)` as of this point in the
    /// pass — see [`Self::current`] for why this can't just read `read`.
    fn current_triple(&self, x: i32, y: i32) -> (crate::cell::Cell, Rgb, LastMove) {
        if self.is_moved(x, y) {
            (self.write.get(x, y), self.write.color_at(x, y), self.write.last_move_at(x, y))
        } else {
            (self.read.get(x, y), self.read.color_at(x, y), self.read.last_move_at(x, y))
        }
    }

    /// Like [`Self::copy_unchanged`] but for a cell value a caller has
    /// already mutated in place (e.g. a crystal decrementing its ether
    /// storage before falling).
    pub fn copy_value(&mut self, x: i32, y: i32, cell: crate::cell::Cell, color: Rgb) {
        let last_move = self.read.last_move_at(x, y);
        self.write.set(x, y, cell, color, last_move);
        self.mark_moved(x, y);
    }

    /// Like [`Self::move_cell`] but moves an explicit, already-mutated cell
    /// value instead of re-reading `(x, y)` from the read buffer.
    pub fn move_value(
        &mut self,
        x: i32,
        y: i32,
        nx: i32,
        ny: i32,
        cell: crate::cell::Cell,
        color: Rgb,
        last_move: LastMove,
    ) {
        self.write.set(nx, ny, cell, color, last_move);
        self.write.set(x, y, crate::cell::Cell::empty(), Rgb::default(), LastMove::None);
        self.mark_moved(x, y);
        self.mark_moved(nx, ny);
    }

    /// Like [`Self::swap_cells`] but swaps an explicit, already-mutated cell
    /// value into `(nx, ny)`.
    pub fn swap_value(
        &mut self,
        x: i32,
        y: i32,
        nx: i32,
        ny: i32,
        cell: crate::cell::Cell,
        color: Rgb,
        last_move: LastMove,
    ) {
        let (other, other_color, other_last_move) = self.current_triple(nx, ny);
        self.write.set(nx, ny, cell, color, last_move);
        self.write.set(x, y, other, other_color, other_last_move);
        self.mark_moved(x, y);
        self.mark_moved(nx, ny);
    }

    pub fn rewrite_in_place(&mut self, x: i32, y: i32, cell: crate::cell::Cell, color: Rgb) {
        let last_move = self.write.last_move_at(x, y);
        self.write.set(x, y, cell, color, last_move);
        self.mark_moved(x, y);
    }
}

/// Run the movement pass over the whole grid, bottom-to-top, alternating
/// scan direction by `scan_right`.
pub fn run_movement_pass(grid: &mut Grid, elements: &ElementRegistry, rng: &mut fastrand::Rng, scan_right: bool) -> Vec<Particle> {
    let width = grid.width();
    let height = grid.height();
    let mut moved = vec![false; width * height];
    let mut spawned = Vec::new();
    {
        let mut ctx = MovementCtx {
            read: &grid.back,
            write: &mut grid.front,
            moved: &mut moved,
            elements,
            rng,
            scan_right,
            width,
            height,
            spawned: &mut spawned,
        };
        for y in (0..height as i32).rev() {
            let xs: Box<dyn Iterator<Item = i32>> = if scan_right {
                Box::new(0..width as i32)
            } else {
                Box::new((0..width as i32).rev())
            };
            for x in xs {
                if ctx.is_moved(x, y) {
                    continue;
                }
                dispatch(&mut ctx, x, y);
            }
        }
    }
    spawned
}

fn dispatch(ctx: &mut MovementCtx, x: i32, y: i32) {
    let cell = ctx.read.get(x, y);
    match cell.kind {
        CellKind::Empty => {
            ctx.write.set(x, y, cell, Rgb::default(), LastMove::None);
            ctx.mark_moved(x, y);
        }
        CellKind::Cloud => cloud::cloud(ctx, x, y),
        CellKind::Crystal => crystal::crystal(ctx, x, y),
        CellKind::Plant => plant::plant(ctx, x, y),
        CellKind::Oil => oil::oil(ctx, x, y),
        _ => {
            let def = ctx.elements.get(cell.kind);
            if def.map(|d| d.fluidity.is_some()).unwrap_or(false) {
                granular::granular(ctx, x, y, false);
            } else {
                ctx.copy_unchanged(x, y);
            }
        }
    }
}

pub(crate) use granular::{granular, granular_with};
