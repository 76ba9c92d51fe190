//! RNG helpers shared across behaviours and passes.

use std::f32::consts::PI;

/// Create a [`fastrand::Rng`] seeded from a world seed and a per-call stream id,
/// so independent passes drawing from the same world seed don't correlate.
pub fn rng_for_stream(seed: u64, stream: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed ^ stream.wrapping_mul(0x9E3779B97F4A7C15))
}

/// Uniform float in `[lo, hi)`.
pub fn uniform(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    lo + rng.f32() * (hi - lo)
}

/// Roll against a probability in `[0, 1]`. Values outside the range are
/// clamped and logged, since they usually mean a registry or rule authored
/// a bad number rather than anything the engine intended.
pub fn roll(rng: &mut fastrand::Rng, probability: f32) -> bool {
    let clamped = probability.clamp(0.0, 1.0);
    if clamped != probability {
        tracing::warn!(probability, clamped, "clamped out-of-range probability");
    }
    rng.f32() < clamped
}

/// Random unit vector, angle drawn uniformly over a full turn.
pub fn random_unit_vector(rng: &mut fastrand::Rng) -> (f32, f32) {
    let angle = rng.f32() * 2.0 * PI;
    (angle.cos(), angle.sin())
}

/// Fisher-Yates shuffle of the eight Moore-neighbourhood offsets, used by
/// rules that need to visit neighbours in a random order without bias.
pub fn shuffled_moore_offsets(rng: &mut fastrand::Rng) -> [(i32, i32); 8] {
    let mut offsets = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];
    for i in (1..offsets.len()).rev() {
        let j = rng.usize(0..=i);
        offsets.swap(i, j);
    }
    offsets
}
