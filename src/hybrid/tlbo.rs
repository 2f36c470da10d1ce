//! Teaching-learning phases applied to an injection subset.
//!
//! TLBO models a classroom: the **teacher phase** pulls selected learners
//! toward the best member of the population relative to the class mean, and
//! the **learner phase** moves each selected learner toward a randomly
//! chosen better partner (or away from a worse one). Both phases operate on
//! real-valued arithmetic and rely on [`LehmerCodec::repair`] to project
//! results back into the encoding domain.
//!
//! # References
//!
//! Rao, Savsani & Vakharia (2011), "Teaching-learning-based optimization",
//! *Computer-Aided Design* 43(3), 303-315

use crate::codec::LehmerCodec;
use crate::hybrid::types::HybridError;
use rand::Rng;

/// Position-weighted elementwise difference `w[i] * (a[i] - b[i])`.
///
/// Weights are linearly spaced from `1.0` at position 0 down to `0.2` at
/// the last position (a single-position vector gets weight `1.0`). Early
/// positions have the largest domains and the largest influence on the
/// decoded assignment, so they receive the strongest updates while the
/// narrow tail positions get gentler nudges.
pub fn weighted_diff(a: &[f64], b: &[f64]) -> Vec<f64> {
    let d = a.len();
    debug_assert_eq!(d, b.len());

    a.iter()
        .zip(b.iter())
        .enumerate()
        .map(|(i, (&ai, &bi))| {
            let w = if d <= 1 {
                1.0
            } else {
                1.0 - 0.8 * i as f64 / (d - 1) as f64
            };
            w * (ai - bi)
        })
        .collect()
}

/// Index of the lowest-fitness member.
fn argmin(fitness: &[f64]) -> usize {
    fitness
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .expect("population must not be empty")
}

/// Applies one teacher-phase step to the members named in `subset`.
///
/// The teacher is the lowest-fitness member of the **whole** population and
/// the class mean is taken over the whole population; both are snapshotted
/// before any member is rewritten. Members outside `subset` pass through
/// unchanged.
pub fn teacher_phase<R: Rng>(
    codec: &LehmerCodec,
    population: &mut [Vec<usize>],
    fitness: &[f64],
    subset: &[usize],
    rng: &mut R,
) {
    let dim = codec.dim();
    let teacher: Vec<f64> = population[argmin(fitness)]
        .iter()
        .map(|&v| v as f64)
        .collect();

    let mut mean = vec![0.0; dim];
    for member in population.iter() {
        for (m, &v) in mean.iter_mut().zip(member.iter()) {
            *m += v as f64;
        }
    }
    for m in &mut mean {
        *m /= population.len() as f64;
    }

    for &idx in subset {
        // teaching factor: how aggressively to discount the class mean
        let tf = rng.random_range(1..=2) as f64;
        let alpha: f64 = rng.random_range(0.4..0.9);

        let scaled_mean: Vec<f64> = mean.iter().map(|&m| tf * m).collect();
        let diff = weighted_diff(&teacher, &scaled_mean);

        let candidate: Vec<f64> = population[idx]
            .iter()
            .zip(diff.iter())
            .map(|(&x, &d)| x as f64 + alpha * d)
            .collect();
        population[idx] = codec.repair(&candidate);
    }
}

/// Applies one learner-phase step to the members named in `subset`.
///
/// Each selected learner picks a partner uniformly from the full population
/// (excluding itself). A strictly better partner attracts the learner; any
/// other partner repels it. `fitness` is read as a snapshot for the whole
/// phase, while partner positions reflect earlier writes within the phase.
///
/// # Errors
///
/// Returns [`HybridError::DegeneratePopulation`] if the population has
/// fewer than 2 members, since partner selection has no valid choice.
pub fn learner_phase<R: Rng>(
    codec: &LehmerCodec,
    population: &mut [Vec<usize>],
    fitness: &[f64],
    subset: &[usize],
    rng: &mut R,
) -> Result<(), HybridError> {
    let len = population.len();
    if len < 2 {
        return Err(HybridError::DegeneratePopulation(len));
    }

    for &idx in subset {
        let j = {
            let k = rng.random_range(0..len - 1);
            if k >= idx {
                k + 1
            } else {
                k
            }
        };

        let learner: Vec<f64> = population[idx].iter().map(|&v| v as f64).collect();
        let partner: Vec<f64> = population[j].iter().map(|&v| v as f64).collect();
        let beta: f64 = rng.random_range(0.3..0.8);

        let candidate: Vec<f64> = if fitness[j] < fitness[idx] {
            let diff = weighted_diff(&partner, &learner);
            learner
                .iter()
                .zip(diff.iter())
                .map(|(&x, &d)| x + beta * d)
                .collect()
        } else {
            let diff = weighted_diff(&learner, &partner);
            learner
                .iter()
                .zip(diff.iter())
                .map(|(&x, &d)| x - beta * d)
                .collect()
        };
        population[idx] = codec.repair(&candidate);
    }

    Ok(())
}
