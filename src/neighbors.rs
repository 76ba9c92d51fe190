//! Moore-neighbourhood queries shared by cell behaviours, the
//! transformation engine, and the fire particle.

use crate::element::{CellKind, ElementRegistry};
use crate::grid::Plane;
use crate::rules::Attribute;

pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Count of Moore neighbours of `(x, y)` whose kind equals `of`.
pub fn count_surrounding(plane: &Plane, x: i32, y: i32, of: CellKind) -> u32 {
    MOORE_OFFSETS
        .iter()
        .filter(|(dx, dy)| plane.get(x + dx, y + dy).kind == of)
        .count() as u32
}

/// Whether a cell of kind `of` exists within Chebyshev `radius` of `(x, y)`,
/// excluding the centre itself.
pub fn environment_present(plane: &Plane, x: i32, y: i32, radius: u32, of: CellKind) -> bool {
    let r = radius as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            if plane.get(x + dx, y + dy).kind == of {
                return true;
            }
        }
    }
    false
}

fn attribute_matches(elements: &ElementRegistry, kind: CellKind, attribute: Attribute, value: bool) -> bool {
    let Some(def) = elements.get(kind) else {
        return false;
    };
    let actual = match attribute {
        Attribute::IsFlammable => def.is_flammable,
        Attribute::IsStatic => def.is_static,
        Attribute::HasColorVariation => def.has_color_variation,
    };
    actual == value
}

/// Count of Moore neighbours whose element definition's `attribute` equals
/// `value`.
pub fn count_surrounding_attribute(
    plane: &Plane,
    elements: &ElementRegistry,
    x: i32,
    y: i32,
    attribute: Attribute,
    value: bool,
) -> u32 {
    MOORE_OFFSETS
        .iter()
        .filter(|(dx, dy)| {
            let cell = plane.get(x + dx, y + dy);
            !cell.is_empty() && attribute_matches(elements, cell.kind, attribute, value)
        })
        .count() as u32
}

/// Moore neighbours whose element definition is flammable, used by the fire
/// particle to pick an ignition target.
pub fn flammable_neighbors(
    plane: &Plane,
    elements: &ElementRegistry,
    x: i32,
    y: i32,
) -> Vec<(i32, i32)> {
    MOORE_OFFSETS
        .iter()
        .filter_map(|(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            let cell = plane.get(nx, ny);
            let flammable = elements.get(cell.kind).map(|d| d.is_flammable).unwrap_or(false);
            flammable.then_some((nx, ny))
        })
        .collect()
}
