//! The tick pipeline: movement, transformation, plant growth, ether,
//! thunder, fire, then buffer swap and id assignment.

use tracing::{debug, trace};

use crate::behaviors::run_movement_pass;
use crate::particles::{ether::run_ether_pass, fire::run_fire_pass, thunder::run_thunder_pass};
use crate::plant_growth::run_plant_growth_pass;
use crate::transform_engine::run_transformation_pass;
use crate::world::World;

/// Advance the world by one tick. Pure function of `(world, world.rng)`:
/// callers must not mutate the grid or particle list concurrently.
pub fn tick(world: &mut World) {
    let _span = tracing::debug_span!("tick", frame = world.frame_count).entered();
    let scan_right = world.frame_count % 2 == 0;

    let mut spawned = run_movement_pass(&mut world.grid, &world.elements, &mut world.rng, scan_right);
    trace!(spawned = spawned.len(), "movement pass");

    let mut transform_spawned =
        run_transformation_pass(&mut world.grid, &world.elements, &world.rules, &mut world.rng);
    trace!(spawned = transform_spawned.len(), "transformation pass");
    spawned.append(&mut transform_spawned);

    run_plant_growth_pass(&mut world.grid, &world.elements, &mut world.rng);
    trace!("plant growth pass");

    world.particles.append(&mut spawned);
    for particle in world.particles.iter_mut() {
        particle.life -= 1;
    }
    world.particles.retain(|p| !p.is_dead());

    run_ether_pass(&mut world.grid, &world.elements, &world.rules, &mut world.particles, &mut world.rng);
    run_thunder_pass(&mut world.grid, &world.elements, &mut world.particles, &mut world.rng);
    run_fire_pass(&mut world.grid, &world.elements, &mut world.particles, &mut world.rng);
    trace!(particles = world.particles.len(), "particle passes complete");

    world.grid.swap();
    world.assign_pending_ids();
    world.frame_count += 1;

    debug!(frame = world.frame_count, particles = world.particles.len(), "tick complete");
}
