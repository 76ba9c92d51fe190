//! The per-position cell record and its small set of optional scalars.

use crate::element::CellKind;

/// Direction a cell moved (or swapped) on the last tick it was touched,
/// used by granular behaviours to bias diagonal-fall direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastMove {
    #[default]
    None,
    Down,
    DownLeft,
    DownRight,
    Left,
    Right,
}

/// Growth stage of a `PLANT` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlantMode {
    #[default]
    Stem,
    GroundCover,
    Leaf,
    Flower,
    Withered,
}

/// One grid position. Kind-specific state lives in plain `Option` fields
/// rather than a heap-allocated per-variant payload: the cell is small,
/// fixed-size, and `Copy`, so the grid can stay two flat preallocated
/// buffers instead of a vector of boxed enums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub counter: u32,
    pub burning_progress: u32,
    pub life: i32,
    pub rain_counter: u32,
    pub rain_threshold: u32,
    pub charge_counter: u32,
    pub charge_threshold: u32,
    pub decay_counter: u32,
    pub plant_mode: PlantMode,
    pub oil_counter: u32,
    pub ether_storage: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl Cell {
    pub const fn empty() -> Self {
        Cell {
            kind: CellKind::Empty,
            counter: 0,
            burning_progress: 0,
            life: 0,
            rain_counter: 0,
            rain_threshold: 0,
            charge_counter: 0,
            charge_threshold: 0,
            decay_counter: 0,
            plant_mode: PlantMode::Stem,
            oil_counter: 0,
            ether_storage: 0,
        }
    }

    /// A fresh cell of `kind` with all scalars reset, as produced by a
    /// committed transformation or a user placement.
    pub fn of_kind(kind: CellKind) -> Self {
        Cell {
            kind,
            ..Cell::empty()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    /// Reset the transformation counter and burning progress; called
    /// whenever a cell's type changes per the counter-reset invariant.
    pub fn reset_transform_counters(&mut self) {
        self.counter = 0;
        self.burning_progress = 0;
    }
}
