//! Particle swarm velocity and position updates.
//!
//! One PSO step per particle per iteration: the velocity accumulates
//! inertia plus random cognitive (personal-best) and social (global-best)
//! pulls, is clipped to a position-dependent bound, and the displaced
//! position is projected back into the encoding domain by the codec.

use crate::codec::LehmerCodec;
use crate::hybrid::config::HybridConfig;
use rand::Rng;

/// Maximum velocity magnitude at `position` for a vector of length `dim`.
///
/// The bound shrinks toward the tail of the vector, reflecting the tail
/// positions' smaller domains, and never drops below 1 so every position
/// can still move by at least one step.
pub(crate) fn velocity_bound(dim: usize, position: usize) -> f64 {
    ((dim - position) as f64 * 0.5).max(1.0)
}

/// Performs one velocity + position update for a single particle.
///
/// Returns the repaired new position and the clipped new velocity. The
/// caller's `personal_best` and `global_best` are read-only snapshots; this
/// function has no side effects beyond consuming random draws.
pub fn update_particle<R: Rng>(
    codec: &LehmerCodec,
    position: &[usize],
    velocity: &[f64],
    personal_best: &[usize],
    global_best: &[usize],
    config: &HybridConfig,
    rng: &mut R,
) -> (Vec<usize>, Vec<f64>) {
    let dim = codec.dim();

    let r1: Vec<f64> = (0..dim).map(|_| rng.random_range(0.0..1.0)).collect();
    let r2: Vec<f64> = (0..dim).map(|_| rng.random_range(0.0..1.0)).collect();

    let mut new_velocity = Vec::with_capacity(dim);
    let mut candidate = Vec::with_capacity(dim);

    for i in 0..dim {
        let x = position[i] as f64;
        let cognitive = config.cognitive * r1[i] * (personal_best[i] as f64 - x);
        let social = config.social * r2[i] * (global_best[i] as f64 - x);

        let bound = velocity_bound(dim, i);
        let v = (config.inertia * velocity[i] + cognitive + social).clamp(-bound, bound);

        new_velocity.push(v);
        candidate.push(x + v);
    }

    (codec.repair(&candidate), new_velocity)
}
