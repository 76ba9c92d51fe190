//! Pass 3: plant decay, withering, stem growth, and ground-cover spread.
//! Runs purely against the write buffer, in natural row-major order.

use crate::cell::{Cell, PlantMode};
use crate::color::Rgb;
use crate::element::{CellKind, ElementDef, ElementRegistry};
use crate::grid::Grid;

const DECAY_BASE: f32 = 500.0;
const OIL_BASE: f32 = 2000.0;
const GROWTH_THRESHOLD: u32 = 100;
const STEM_GROWTH_PROB: f32 = 0.1;
const LEAF_PROB: f32 = 0.2;
const FLOWER_PROB: f32 = 0.05;
const GROUND_COVER_SPREAD_PROB: f32 = 0.3;

fn part_color(def: Option<&ElementDef>, part: &str) -> Rgb {
    def.and_then(|d| d.part_colors.get(part).copied())
        .or_else(|| def.map(|d| d.color))
        .unwrap_or_default()
}

pub fn run_plant_growth_pass(grid: &mut Grid, elements: &ElementRegistry, rng: &mut fastrand::Rng) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let def = elements.get(CellKind::Plant);

    for y in 0..height {
        for x in 0..width {
            let mut cell = grid.front.get(x, y);
            if cell.kind != CellKind::Plant {
                continue;
            }

            if cell.plant_mode == PlantMode::Withered {
                cell.oil_counter += 1;
                let threshold = (OIL_BASE * (0.8 + 0.4 * rng.f32())) as u32;
                if cell.oil_counter >= threshold {
                    let oil_def = elements.get(CellKind::Oil);
                    grid.front.set(x, y, Cell::of_kind(CellKind::Oil), oil_def.map(|d| d.color).unwrap_or_default(), grid.front.last_move_at(x, y));
                } else {
                    grid.front.set_cell(x, y, cell);
                }
                continue;
            }

            cell.decay_counter += 1;
            let decay_threshold = (DECAY_BASE * (0.8 + 0.4 * rng.f32())) as u32;
            if cell.decay_counter >= decay_threshold {
                cell.plant_mode = PlantMode::Withered;
                cell.decay_counter = 0;
                grid.front.set(x, y, cell, part_color(def, "withered"), grid.front.last_move_at(x, y));
                continue;
            }

            match cell.plant_mode {
                PlantMode::Stem => {
                    cell.counter += 1;
                    if cell.counter >= GROWTH_THRESHOLD {
                        cell.counter = 0;
                        if rng.f32() < STEM_GROWTH_PROB && grid.front.get(x, y - 1).is_empty() {
                            let mut stem = Cell::of_kind(CellKind::Plant);
                            stem.plant_mode = PlantMode::Stem;
                            grid.front.set(x, y - 1, stem, part_color(def, "stem"), crate::cell::LastMove::None);
                        }
                        for dx in [-1, 1] {
                            let (nx, ny) = (x + dx, y);
                            if rng.f32() < LEAF_PROB && grid.front.get(nx, ny).is_empty() {
                                let mut leaf = Cell::of_kind(CellKind::Plant);
                                leaf.plant_mode = PlantMode::Leaf;
                                grid.front.set(nx, ny, leaf, part_color(def, "leaf"), crate::cell::LastMove::None);
                            }
                            if rng.f32() < FLOWER_PROB && grid.front.get(nx, ny).is_empty() {
                                let mut flower = Cell::of_kind(CellKind::Plant);
                                flower.plant_mode = PlantMode::Flower;
                                grid.front.set(nx, ny, flower, part_color(def, "flower"), crate::cell::LastMove::None);
                            }
                        }
                    }
                    grid.front.set_cell(x, y, cell);
                }
                PlantMode::GroundCover => {
                    if rng.f32() < GROUND_COVER_SPREAD_PROB {
                        let order = if rng.bool() { [-1, 1] } else { [1, -1] };
                        for dx in order {
                            let (nx, ny) = (x + dx, y);
                            if grid.front.get(nx, ny).is_empty() && !grid.front.get(nx, ny + 1).is_empty() {
                                let mut spread = Cell::of_kind(CellKind::Plant);
                                spread.plant_mode = PlantMode::GroundCover;
                                grid.front.set(nx, ny, spread, part_color(def, "ground_cover"), crate::cell::LastMove::None);
                                break;
                            }
                        }
                    }
                    grid.front.set_cell(x, y, cell);
                }
                _ => {
                    grid.front.set_cell(x, y, cell);
                }
            }
        }
    }
}
