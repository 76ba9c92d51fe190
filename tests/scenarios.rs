//! Concrete, hand-placed scenarios exercising one behaviour each: granular
//! settling, lateral spread, density-ordered sinking, cloud rain, thunder
//! detonation, and the plant decay/oil round trip.

#[path = "support.rs"]
mod support;

use terraspiel::{tick, CellKind, Particle, ParticleKind, PlantMode, World, WorldConfig};

fn world(width: usize, height: usize, seed: u64) -> World {
    World::new(
        WorldConfig { width, height, seed },
        support::elements(),
        support::empty_rules(),
    )
}

#[test]
fn soil_settles_to_the_floor() {
    let mut w = world(3, 3, 7);
    w.place(1, 0, "SOIL").unwrap();

    for _ in 0..5 {
        tick(&mut w);
    }

    let read = w.grid.read_buffer();
    assert_eq!(read.get(1, 2).kind, CellKind::Soil);
    assert!(read.get(1, 0).is_empty());
    assert!(read.get(1, 1).is_empty());
}

#[test]
fn water_spreads_across_the_floor() {
    let mut w = world(5, 3, 11);
    w.place(2, 0, "WATER").unwrap();
    w.place(2, 1, "WATER").unwrap();
    w.place(2, 2, "WATER").unwrap();

    for _ in 0..40 {
        tick(&mut w);
    }

    let read = w.grid.read_buffer();
    let mut xs = Vec::new();
    for y in 0..3 {
        for x in 0..5 {
            if read.get(x, y).kind == CellKind::Water {
                xs.push(x);
            }
        }
    }
    assert_eq!(xs.len(), 3, "all three water cells must survive the run");
    let distinct: std::collections::HashSet<_> = xs.into_iter().collect();
    assert!(
        distinct.len() > 1,
        "a standing column should spread across more than one column once it hits the floor"
    );
}

#[test]
fn denser_material_sinks_through_a_liquid() {
    let mut w = world(1, 3, 3);
    w.place(0, 0, "SAND").unwrap();
    w.place(0, 1, "WATER").unwrap();

    tick(&mut w);
    tick(&mut w);

    let read = w.grid.read_buffer();
    assert_eq!(read.get(0, 2).kind, CellKind::Sand, "denser sand should settle at the floor");
    assert_eq!(read.get(0, 1).kind, CellKind::Water, "displaced water should rise above it");
    assert!(read.get(0, 0).is_empty());
}

#[test]
fn cloud_rains_once_threshold_is_reached() {
    let mut w = world(3, 3, 5);
    w.place(1, 0, "CLOUD").unwrap();

    let mut cell = w.grid.front.get(1, 0);
    cell.rain_threshold = 50;
    cell.rain_counter = 50;
    w.grid.front.set_cell(1, 0, cell);
    w.grid.back.set_cell(1, 0, cell);

    tick(&mut w);

    let read = w.grid.read_buffer();
    assert_eq!(read.get(1, 1).kind, CellKind::Water, "rain should fall into the empty cell below");
    let cloud = read.get(1, 0);
    assert_eq!(cloud.kind, CellKind::Cloud, "the cloud itself should persist after raining");
    assert_eq!(cloud.rain_counter, 0, "the rain counter resets once it discharges");
    assert_eq!(cloud.decay_counter, 10, "raining nudges the cloud ten steps closer to dissolving");
}

#[test]
fn thunder_detonates_on_water_contact() {
    let mut w = world(5, 5, 13);
    for y in 0..5i32 {
        for x in 0..5i32 {
            let kind = if (1..=3).contains(&x) && (1..=3).contains(&y) {
                "WATER"
            } else {
                "STONE"
            };
            w.place(x, y, kind).unwrap();
        }
    }

    w.particles.push(Particle {
        id: 0,
        px: 2.5,
        py: 2.5,
        vx: 0.0,
        vy: 0.0,
        kind: ParticleKind::Thunder,
        life: 60,
    });

    tick(&mut w);

    assert!(
        !w.particles.iter().any(|p| p.kind == ParticleKind::Thunder),
        "the thunder particle should be consumed by the detonation"
    );
    let scattered = w
        .particles
        .iter()
        .filter(|p| matches!(p.kind, ParticleKind::Scattered(_)))
        .count();
    assert!(scattered >= 1, "the explosion epicentre always scatters at least one cell");
    assert!(scattered <= 9, "only the nine water cells in the pool are eligible to scatter");

    let read = w.grid.read_buffer();
    let remaining_water = (0..5)
        .flat_map(|y| (0..5).map(move |x| (x, y)))
        .filter(|&(x, y)| read.get(x, y).kind == CellKind::Water)
        .count();
    assert!(remaining_water < 9, "the detonation must consume at least the impact cell");
}

#[test]
fn withered_plant_eventually_becomes_oil() {
    let mut w = world(3, 3, 17);
    w.place(1, 2, "PLANT").unwrap();

    let mut growing = w.grid.front.get(1, 2);
    growing.decay_counter = 600;
    w.grid.front.set_cell(1, 2, growing);
    w.grid.back.set_cell(1, 2, growing);

    tick(&mut w);

    let withered = w.grid.read_buffer().get(1, 2);
    assert_eq!(withered.kind, CellKind::Plant);
    assert_eq!(withered.plant_mode, PlantMode::Withered, "a fully decayed plant withers");

    let mut dying = withered;
    dying.oil_counter = 2400;
    w.grid.front.set_cell(1, 2, dying);
    w.grid.back.set_cell(1, 2, dying);

    tick(&mut w);

    let final_cell = w.grid.read_buffer().get(1, 2);
    assert_eq!(final_cell.kind, CellKind::Oil, "a withered plant eventually rots into oil");
}
