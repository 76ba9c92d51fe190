//! Pass 2: rule-driven type transformations.

use crate::cell::{Cell, PlantMode};
use crate::color::Rgb;
use crate::element::{CellKind, ElementRegistry};
use crate::grid::Grid;
use crate::neighbors::{
    count_surrounding, count_surrounding_attribute, environment_present, MOORE_OFFSETS,
};
use crate::particle::{Particle, ParticleKind};
use crate::rng::{random_unit_vector, roll, shuffled_moore_offsets};
use crate::rules::{Condition, RuleRegistry, TransformRule};

const ETHER_AMBIENT_PROB: f32 = 0.001;

fn conditions_hold(grid: &Grid, elements: &ElementRegistry, x: i32, y: i32, conditions: &[Condition]) -> bool {
    conditions.iter().all(|c| match c {
        Condition::Surrounding { of, min, max } => {
            let n = count_surrounding(&grid.front, x, y, *of);
            n >= *min && n <= *max
        }
        Condition::Environment { of, radius, present } => {
            environment_present(&grid.front, x, y, *radius, *of) == *present
        }
        Condition::SurroundingAttribute {
            attribute,
            value,
            min,
            max,
        } => {
            let n = count_surrounding_attribute(&grid.front, elements, x, y, *attribute, *value);
            n >= *min && n <= *max
        }
    })
}

fn select_rule<'a>(
    grid: &Grid,
    elements: &ElementRegistry,
    rules: &'a RuleRegistry,
    x: i32,
    y: i32,
    kind: CellKind,
) -> Option<&'a TransformRule> {
    rules
        .transforms_from(kind)
        .find(|rule| conditions_hold(grid, elements, x, y, &rule.conditions))
}

fn base_color(elements: &ElementRegistry, kind: CellKind) -> Rgb {
    elements.get(kind).map(|d| d.color).unwrap_or_default()
}

fn commit_transform(
    grid: &mut Grid,
    elements: &ElementRegistry,
    rule: &TransformRule,
    x: i32,
    y: i32,
    rng: &mut fastrand::Rng,
    spawned: &mut Vec<Particle>,
) {
    if let Some(consumes) = rule.consumes {
        for (dx, dy) in shuffled_moore_offsets(rng) {
            let (nx, ny) = (x + dx, y + dy);
            if grid.front.get(nx, ny).kind == consumes {
                let last_move = grid.front.last_move_at(nx, ny);
                grid.front.set(nx, ny, Cell::empty(), Rgb::default(), last_move);
                break;
            }
        }
    }

    let mut new_cell = Cell::of_kind(rule.to);
    if rule.to == CellKind::Plant {
        let above = grid.front.get(x, y - 1);
        new_cell.plant_mode = if above.is_empty() {
            PlantMode::GroundCover
        } else {
            PlantMode::Stem
        };
    }
    if rule.to == CellKind::Cloud {
        new_cell.rain_threshold = (100i32 + rng.i32(-20..=20)).max(1) as u32;
        new_cell.charge_threshold = (800i32 + rng.i32(-200..=200)).max(1) as u32;
    }

    let last_move = grid.front.last_move_at(x, y);
    grid.front
        .set(x, y, new_cell, base_color(elements, rule.to), last_move);

    if let Some(spawn_kind) = rule.spawn_particle {
        let (dx, dy) = random_unit_vector(rng);
        spawned.push(Particle::new_unassigned(
            x as f32 + 0.5,
            y as f32 + 0.5,
            dx * 0.3,
            dy * 0.3,
            spawn_kind,
            150,
        ));
    }
}

pub fn run_transformation_pass(
    grid: &mut Grid,
    elements: &ElementRegistry,
    rules: &RuleRegistry,
    rng: &mut fastrand::Rng,
) -> Vec<Particle> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut spawned = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let mut cell = grid.front.get(x, y);
            if cell.is_empty() {
                let _ = MOORE_OFFSETS;
                continue;
            }

            if let Some(rule) = select_rule(grid, elements, rules, x, y, cell.kind) {
                let rule = rule.clone();
                if roll(rng, rule.probability) {
                    cell.counter += 1;
                    if cell.counter >= rule.threshold {
                        commit_transform(grid, elements, &rule, x, y, rng, &mut spawned);
                    } else {
                        grid.front.set_cell(x, y, cell);
                    }
                }
            } else if cell.counter != 0 || cell.burning_progress != 0 {
                cell.reset_transform_counters();
                grid.front.set_cell(x, y, cell);
            }

            if roll(rng, ETHER_AMBIENT_PROB) {
                let (dx, dy) = random_unit_vector(rng);
                spawned.push(Particle::new_unassigned(
                    x as f32 + 0.5,
                    y as f32 + 0.5,
                    dx * 0.3,
                    dy * 0.3,
                    ParticleKind::Ether,
                    150,
                ));
            }
        }
    }

    spawned
}
