//! Terraspiel: a falling-sand world simulation core.
//!
//! A double-buffered cellular grid plus a free-floating particle subsystem,
//! advanced one deterministic-per-tick, stochastic-per-frame step at a
//! time. See [`scheduler::tick`] for the pipeline and [`world::World`] for
//! the state it operates on.

pub mod cell;
pub mod color;
pub mod element;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod particle;
pub mod particles;
pub mod plant_growth;
pub mod rng;
pub mod rules;
pub mod scheduler;
pub mod terrain;
pub mod transform_engine;
pub mod world;

mod behaviors;

pub use cell::{Cell, LastMove, PlantMode};
pub use element::{CellKind, ElementDef, ElementRegistry, Fluidity, MatterState};
pub use error::{Result as TerraspielResult, TerraspielError};
pub use grid::{Grid, Plane};
pub use particle::{Particle, ParticleKind};
pub use rules::{Condition, ParticleInteractionRule, RuleRegistry, TransformRule};
pub use scheduler::tick;
pub use world::{Stats, World, WorldConfig};

use bevy::app::{App, Plugin, Update};
use bevy::ecs::{resource::Resource, system::ResMut};

/// Bevy resource wrapping a [`World`]. Insert one (built with whatever
/// dimensions, seed, and registries your application needs) before adding
/// [`TerraspielPlugin`].
#[derive(Resource)]
pub struct TerraspielWorld(pub World);

/// Advances the contained [`World`] by one tick. Added to [`Update`] by
/// [`TerraspielPlugin`]; wrap it in your own fixed-timestep run condition if
/// you need ticks decoupled from frame rate.
pub fn advance_world(mut world: ResMut<TerraspielWorld>) {
    scheduler::tick(&mut world.0);
}

/// Wires [`advance_world`] into a Bevy app. Does not insert a
/// [`TerraspielWorld`] itself — construction is the caller's job, since it
/// needs the element/rule registries loaded from the surrounding
/// application's asset pipeline.
#[derive(Default)]
pub struct TerraspielPlugin;

impl Plugin for TerraspielPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_world);
    }
}
