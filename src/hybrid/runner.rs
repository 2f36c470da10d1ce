//! Hybrid loop execution.
//!
//! [`HybridRunner`] orchestrates the complete run: initialization → PSO
//! pass → evaluation → strict best update → periodic TLBO injection →
//! repeat for a fixed iteration count. It owns all population-level state;
//! the engines in [`pso`](crate::hybrid::pso) and
//! [`tlbo`](crate::hybrid::tlbo) receive borrows for the duration of a call
//! and hold nothing between calls.

use crate::codec::LehmerCodec;
use crate::hybrid::background::ProgressEvent;
use crate::hybrid::config::HybridConfig;
use crate::hybrid::types::{ConvergenceHistory, FitnessOracle, HybridError};
use crate::hybrid::{pso, tlbo};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

/// Result of a hybrid PSO-TLBO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridResult {
    /// The best encoded vector found during the entire run.
    pub best: Vec<usize>,

    /// Fitness of `best` (lower is better).
    pub best_fitness: f64,

    /// Number of iterations completed.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Global-best fitness per iteration: the initial best followed by one
    /// entry per completed iteration (`iterations + 1` entries total).
    pub history: ConvergenceHistory,
}

/// Executes the hybrid optimization loop.
///
/// # Usage
///
/// ```
/// use pso_tlbo::hybrid::{HybridConfig, HybridRunner};
///
/// let oracle = |v: &[usize]| v.iter().sum::<usize>() as f64;
/// let config = HybridConfig::default()
///     .with_population_size(10)
///     .with_max_iter(20)
///     .with_seed(42);
/// let result = HybridRunner::run(&oracle, 6, &config).unwrap();
/// assert_eq!(result.history.len(), 21);
/// ```
pub struct HybridRunner;

impl HybridRunner {
    /// Runs the hybrid optimization.
    ///
    /// `num_items` is the number of entities being assigned; the encoded
    /// vectors handed to the oracle have length `num_items - 1`.
    pub fn run<O: FitnessOracle>(
        oracle: &O,
        num_items: usize,
        config: &HybridConfig,
    ) -> Result<HybridResult, HybridError> {
        Self::run_with_cancel(oracle, num_items, config, None)
    }

    /// Runs the hybrid optimization with an optional cancellation token.
    ///
    /// The flag is consulted only at iteration boundaries — never
    /// mid-update — and a cancelled run still returns a well-formed result
    /// covering every iteration completed before the flag was observed.
    pub fn run_with_cancel<O: FitnessOracle>(
        oracle: &O,
        num_items: usize,
        config: &HybridConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HybridResult, HybridError> {
        run_inner(oracle, num_items, config, cancel, None)
    }
}

pub(crate) fn run_inner<O: FitnessOracle>(
    oracle: &O,
    num_items: usize,
    config: &HybridConfig,
    cancel: Option<Arc<AtomicBool>>,
    progress: Option<&SyncSender<ProgressEvent>>,
) -> Result<HybridResult, HybridError> {
    config.validate()?;
    if num_items < 2 {
        return Err(HybridError::ItemCountTooSmall(num_items));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    };

    let codec = LehmerCodec::new(num_items);
    let dim = codec.dim();
    let pop_size = config.population_size;

    // 1. Initialize population and velocities
    let mut population: Vec<Vec<usize>> = (0..pop_size)
        .map(|_| codec.random_vector(&mut rng))
        .collect();
    let mut velocities: Vec<Vec<f64>> = vec![vec![0.0; dim]; pop_size];

    // 2. Evaluate and seed the bests
    let mut fitness = evaluate_population(oracle, &population, config.parallel)?;

    let mut pbest = population.clone();
    let mut pbest_fitness = fitness.clone();

    let seed_idx = argmin(&pbest_fitness);
    let mut gbest = pbest[seed_idx].clone();
    let mut gbest_fitness = pbest_fitness[seed_idx];

    let mut history = ConvergenceHistory::new();
    history.record(gbest_fitness);

    let tlbo_count = config.tlbo_count();
    let report_every = (config.max_iter / 20).max(1);
    let mut cancelled = false;

    // 3. Main loop
    for it in 1..=config.max_iter {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
        }

        // PSO pass: every slot reads this iteration's snapshot of the bests
        for i in 0..pop_size {
            let (position, velocity) = pso::update_particle(
                &codec,
                &population[i],
                &velocities[i],
                &pbest[i],
                &gbest,
                config,
                &mut rng,
            );
            population[i] = position;
            velocities[i] = velocity;
        }

        fitness = evaluate_population(oracle, &population, config.parallel)?;

        // Strict personal/global best update
        for i in 0..pop_size {
            if fitness[i] < pbest_fitness[i] {
                pbest[i] = population[i].clone();
                pbest_fitness[i] = fitness[i];
            }
        }
        let cur_idx = argmin(&pbest_fitness);
        if pbest_fitness[cur_idx] < gbest_fitness {
            gbest_fitness = pbest_fitness[cur_idx];
            gbest = pbest[cur_idx].clone();
        }
        history.record(gbest_fitness);

        // Periodic TLBO injection
        if it.is_multiple_of(config.tlbo_interval) {
            let subset = injection_subset(&fitness, tlbo_count, &mut rng);

            tlbo::teacher_phase(&codec, &mut population, &fitness, &subset, &mut rng);
            for &idx in &subset {
                let f = oracle
                    .evaluate(&population[idx])
                    .map_err(HybridError::Oracle)?;
                fitness[idx] = f;
                if f < pbest_fitness[idx] {
                    pbest[idx] = population[idx].clone();
                    pbest_fitness[idx] = f;
                }
            }
            let cur_idx = argmin(&pbest_fitness);
            if pbest_fitness[cur_idx] < gbest_fitness {
                gbest_fitness = pbest_fitness[cur_idx];
                gbest = pbest[cur_idx].clone();
            }

            tlbo::learner_phase(&codec, &mut population, &fitness, &subset, &mut rng)?;
            for &idx in &subset {
                let f = oracle
                    .evaluate(&population[idx])
                    .map_err(HybridError::Oracle)?;
                fitness[idx] = f;
                if f < pbest_fitness[idx] {
                    pbest[idx] = population[idx].clone();
                    pbest_fitness[idx] = f;
                }
            }
            let cur_idx = argmin(&pbest_fitness);
            if pbest_fitness[cur_idx] < gbest_fitness {
                gbest_fitness = pbest_fitness[cur_idx];
                gbest = pbest[cur_idx].clone();
            }
        }

        oracle.on_iteration(it, gbest_fitness);
        if let Some(sender) = progress {
            // presentation must never stall or alter the loop
            let _ = sender.try_send(ProgressEvent {
                iteration: it,
                best_fitness: gbest_fitness,
            });
        }
        if it.is_multiple_of(report_every) {
            log::info!("Iteration {it}: Best Score = {gbest_fitness}");
        }
    }

    Ok(HybridResult {
        best: gbest,
        best_fitness: gbest_fitness,
        iterations: history.len() - 1,
        cancelled,
        history,
    })
}

/// Builds the TLBO injection subset: the `count` worst-fitness indices
/// interleaved with `count` uniformly-sampled distinct indices, deduplicated
/// in first-seen order and truncated to `count`.
///
/// The interleaving keeps both halves represented: the worst list alone
/// would fill every slot under plain concatenation.
fn injection_subset<R: Rng>(fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    let pop_size = fitness.len();
    let count = count.min(pop_size);

    let mut worst: Vec<usize> = (0..pop_size).collect();
    worst.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    worst.truncate(count);

    let random = rand::seq::index::sample(rng, pop_size, count).into_vec();

    let mut subset = Vec::with_capacity(count);
    for pair in worst.iter().zip(random.iter()) {
        for &idx in [pair.0, pair.1] {
            if subset.len() < count && !subset.contains(&idx) {
                subset.push(idx);
            }
        }
    }
    subset
}

/// Evaluate every member of the population.
fn evaluate_population<O: FitnessOracle>(
    oracle: &O,
    population: &[Vec<usize>],
    parallel: bool,
) -> Result<Vec<f64>, HybridError> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return population
                .par_iter()
                .map(|member| oracle.evaluate(member).map_err(HybridError::Oracle))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population
        .iter()
        .map(|member| oracle.evaluate(member).map_err(HybridError::Oracle))
        .collect()
}

/// Index of the lowest fitness value.
fn argmin(fitness: &[f64]) -> usize {
    fitness
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .expect("population must not be empty")
}
