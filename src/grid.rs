//! The double-buffered cellular grid plus its parallel colour and
//! last-move fields.

use crate::cell::{Cell, LastMove};
use crate::color::Rgb;

/// One side of the double buffer: a cell plane plus its parallel colour and
/// last-move planes, all flat `Vec`s indexed by `y * width + x`.
#[derive(Debug, Clone)]
pub struct Plane {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    colors: Vec<Rgb>,
    last_move: Vec<LastMove>,
}

impl Plane {
    fn new(width: usize, height: usize) -> Self {
        let n = width * height;
        Plane {
            width,
            height,
            cells: vec![Cell::empty(); n],
            colors: vec![Rgb::default(); n],
            last_move: vec![LastMove::default(); n],
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    /// Out-of-bounds reads return a static empty cell rather than panicking,
    /// so Moore-neighbourhood scans near the border don't need edge cases.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if self.in_bounds(x, y) {
            self.cells[self.index(x, y)]
        } else {
            Cell::empty()
        }
    }

    pub fn color_at(&self, x: i32, y: i32) -> Rgb {
        if self.in_bounds(x, y) {
            self.colors[self.index(x, y)]
        } else {
            Rgb::default()
        }
    }

    pub fn last_move_at(&self, x: i32, y: i32) -> LastMove {
        if self.in_bounds(x, y) {
            self.last_move[self.index(x, y)]
        } else {
            LastMove::None
        }
    }

    /// Out-of-bounds writes are a silent no-op.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell, color: Rgb, last_move: LastMove) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.cells[i] = cell;
        self.colors[i] = color;
        self.last_move[i] = last_move;
    }

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.cells[i] = cell;
    }

    pub fn set_color(&mut self, x: i32, y: i32, color: Rgb) {
        if !self.in_bounds(x, y) {
            return;
        }
        self.colors[self.index(x, y)] = color;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    fn fill_empty(&mut self) {
        self.cells.fill(Cell::empty());
        self.colors.fill(Rgb::default());
        self.last_move.fill(LastMove::default());
    }
}

/// Front/back buffer pair. Pass 1 reads `back` (the previous tick's result)
/// and writes `front`; the scheduler swaps them after the fire pass so the
/// next tick's read buffer is this tick's output.
#[derive(Debug, Clone)]
pub struct Grid {
    pub front: Plane,
    pub back: Plane,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            front: Plane::new(width, height),
            back: Plane::new(width, height),
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    pub fn clear(&mut self) {
        self.front.fill_empty();
        self.back.fill_empty();
    }

    /// The buffer a renderer or caller should read: the result of the most
    /// recently completed tick. Every pass writes `front`; `swap` then moves
    /// that freshly written plane into `back`, so `back` (not `front`) holds
    /// the current state once a tick has run.
    pub fn read_buffer(&self) -> &Plane {
        &self.back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_get_returns_empty() {
        let plane = Plane::new(4, 4);
        assert!(plane.get(-1, 0).is_empty());
        assert!(plane.get(4, 0).is_empty());
        assert!(plane.get(0, 4).is_empty());
    }

    #[test]
    fn out_of_bounds_set_is_noop() {
        let mut plane = Plane::new(4, 4);
        plane.set(
            10,
            10,
            Cell::of_kind(crate::element::CellKind::Soil),
            Rgb::default(),
            LastMove::None,
        );
        for y in 0..4 {
            for x in 0..4 {
                assert!(plane.get(x, y).is_empty());
            }
        }
    }

    #[test]
    fn in_bounds_round_trip() {
        let mut plane = Plane::new(4, 4);
        let cell = Cell::of_kind(crate::element::CellKind::Water);
        plane.set(2, 1, cell, Rgb(1, 2, 3), LastMove::Down);
        assert_eq!(plane.get(2, 1).kind, crate::element::CellKind::Water);
        assert_eq!(plane.color_at(2, 1), Rgb(1, 2, 3));
        assert_eq!(plane.last_move_at(2, 1), LastMove::Down);
    }

    #[test]
    fn swap_exchanges_buffers() {
        let mut grid = Grid::new(2, 2);
        grid.front.set_cell(0, 0, Cell::of_kind(crate::element::CellKind::Stone));
        grid.swap();
        assert_eq!(grid.back.get(0, 0).kind, crate::element::CellKind::Stone);
        assert!(grid.front.get(0, 0).is_empty());
    }
}
