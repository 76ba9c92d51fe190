//! Element definitions: the immutable, data-driven physical properties of
//! each cell kind.

use std::collections::HashMap;

use serde::Deserialize;

use crate::color::Rgb;
use crate::error::TerraspielError;

/// The closed set of material kinds a cell may hold. `Empty` is represented
/// explicitly rather than as an absence, per the grid totality invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    Empty,
    Soil,
    Sand,
    Water,
    Mud,
    Peat,
    FertileSoil,
    Clay,
    Stone,
    Magma,
    Cloud,
    Crystal,
    Ruby,
    Plant,
    Oil,
    Fire,
    Seed,
}

impl CellKind {
    pub fn name(self) -> &'static str {
        match self {
            CellKind::Empty => "EMPTY",
            CellKind::Soil => "SOIL",
            CellKind::Sand => "SAND",
            CellKind::Water => "WATER",
            CellKind::Mud => "MUD",
            CellKind::Peat => "PEAT",
            CellKind::FertileSoil => "FERTILE_SOIL",
            CellKind::Clay => "CLAY",
            CellKind::Stone => "STONE",
            CellKind::Magma => "MAGMA",
            CellKind::Cloud => "CLOUD",
            CellKind::Crystal => "CRYSTAL",
            CellKind::Ruby => "RUBY",
            CellKind::Plant => "PLANT",
            CellKind::Oil => "OIL",
            CellKind::Fire => "FIRE",
            CellKind::Seed => "SEED",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "EMPTY" => CellKind::Empty,
            "SOIL" => CellKind::Soil,
            "SAND" => CellKind::Sand,
            "WATER" => CellKind::Water,
            "MUD" => CellKind::Mud,
            "PEAT" => CellKind::Peat,
            "FERTILE_SOIL" => CellKind::FertileSoil,
            "CLAY" => CellKind::Clay,
            "STONE" => CellKind::Stone,
            "MAGMA" => CellKind::Magma,
            "CLOUD" => CellKind::Cloud,
            "CRYSTAL" => CellKind::Crystal,
            "RUBY" => CellKind::Ruby,
            "PLANT" => CellKind::Plant,
            "OIL" => CellKind::Oil,
            "FIRE" => CellKind::Fire,
            "SEED" => CellKind::Seed,
            _ => return None,
        })
    }

    /// Elements that explosions are allowed to scatter into free particles.
    pub fn is_scatterable(self) -> bool {
        matches!(
            self,
            CellKind::Soil
                | CellKind::Sand
                | CellKind::Water
                | CellKind::Mud
                | CellKind::Peat
                | CellKind::FertileSoil
                | CellKind::Clay
                | CellKind::Fire
                | CellKind::Plant
                | CellKind::Seed
                | CellKind::Oil
        )
    }
}

/// Physical state of an element, used mostly to decide motion eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatterState {
    Solid,
    Liquid,
    Gas,
    Particle,
}

/// Granular-motion tuning: resistance slows diagonal falling, spread governs
/// lateral flow.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Fluidity {
    pub resistance: f32,
    pub spread: f32,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    name: String,
    color: String,
    density: f32,
    #[serde(default)]
    state: Option<MatterState>,
    #[serde(default)]
    fluidity: Option<Fluidity>,
    #[serde(default, rename = "hasColorVariation")]
    has_color_variation: bool,
    #[serde(default, rename = "isFlammable")]
    is_flammable: bool,
    #[serde(default, rename = "isStatic")]
    is_static: bool,
    #[serde(default, rename = "partColors")]
    part_colors: HashMap<String, String>,
}

/// Immutable per-kind physical definition, parsed from the element registry.
#[derive(Debug, Clone)]
pub struct ElementDef {
    pub kind: CellKind,
    pub color: Rgb,
    pub density: f32,
    pub state: MatterState,
    pub fluidity: Option<Fluidity>,
    pub has_color_variation: bool,
    pub is_flammable: bool,
    pub is_static: bool,
    pub part_colors: HashMap<String, Rgb>,
}

/// Read-only lookup of [`ElementDef`] by [`CellKind`], built once at load
/// time from the JSON element registry.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    defs: HashMap<CellKind, ElementDef>,
}

impl ElementRegistry {
    /// Parse a JSON array of element objects. Unknown kinds are an
    /// [`TerraspielError::InvalidAsset`] since the registry is the source of
    /// truth for what kinds exist.
    pub fn from_json(json: &str) -> Result<Self, TerraspielError> {
        let raw: Vec<RawElement> = serde_json::from_str(json)
            .map_err(|e| TerraspielError::InvalidAsset(format!("element registry: {e}")))?;
        let mut defs = HashMap::with_capacity(raw.len());
        for entry in raw {
            let kind = CellKind::from_name(&entry.name).ok_or_else(|| {
                TerraspielError::InvalidAsset(format!("unknown element kind {:?}", entry.name))
            })?;
            let color = Rgb::from_hex(&entry.color)?;
            let mut part_colors = HashMap::with_capacity(entry.part_colors.len());
            for (part, hex) in entry.part_colors {
                part_colors.insert(part, Rgb::from_hex(&hex)?);
            }
            let state = entry.state.unwrap_or(MatterState::Solid);
            defs.insert(
                kind,
                ElementDef {
                    kind,
                    color,
                    density: entry.density,
                    state,
                    fluidity: entry.fluidity,
                    has_color_variation: entry.has_color_variation,
                    is_flammable: entry.is_flammable,
                    is_static: entry.is_static,
                    part_colors,
                },
            );
        }
        Ok(ElementRegistry { defs })
    }

    pub fn get(&self, kind: CellKind) -> Option<&ElementDef> {
        self.defs.get(&kind)
    }

    pub fn contains(&self, kind: CellKind) -> bool {
        self.defs.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementDef> {
        self.defs.values()
    }
}
