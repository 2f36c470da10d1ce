//! Whole-population TLBO loop execution.
//!
//! Unlike the hybrid runner, which injects teaching steps on a small subset
//! between PSO iterations, [`TlboRunner`] applies the teacher and learner
//! phases to every member of the population on every iteration. Both phases
//! are synchronous: candidates are built against a snapshot of the current
//! population, then the whole population is replaced at once.

use crate::codec::LehmerCodec;
use crate::hybrid::{ConvergenceHistory, FitnessOracle, OracleError};
use crate::tlbo::config::{TlboConfig, TlboConfigError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Errors produced by a standalone TLBO run.
#[derive(Debug, thiserror::Error)]
pub enum TlboError {
    /// The configuration failed validation before any state was built.
    #[error(transparent)]
    Config(#[from] TlboConfigError),

    /// The item count cannot support a Lehmer encoding.
    #[error("item count must be at least 2 to encode an assignment, got {0}")]
    ItemCountTooSmall(usize),

    /// A fitness evaluation failed; the run is aborted.
    #[error("fitness evaluation failed: {0}")]
    Oracle(#[source] OracleError),
}

/// Result of a standalone TLBO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TlboResult {
    /// The best encoded vector found during the entire run.
    pub best: Vec<usize>,

    /// Fitness of `best` (lower is better).
    pub best_fitness: f64,

    /// Number of iterations completed.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness seen per iteration: the initial best followed by one
    /// entry per completed iteration (`iterations + 1` entries total).
    pub history: ConvergenceHistory,
}

/// Executes the whole-population TLBO loop.
///
/// # Usage
///
/// ```
/// use pso_tlbo::tlbo::{TlboConfig, TlboRunner};
///
/// let oracle = |v: &[usize]| v.iter().sum::<usize>() as f64;
/// let config = TlboConfig::default()
///     .with_population_size(10)
///     .with_max_iter(20)
///     .with_seed(42);
/// let result = TlboRunner::run(&oracle, 6, &config).unwrap();
/// assert_eq!(result.history.len(), 21);
/// ```
pub struct TlboRunner;

impl TlboRunner {
    /// Runs the TLBO optimization.
    ///
    /// `num_items` is the number of entities being assigned; the encoded
    /// vectors handed to the oracle have length `num_items - 1`.
    pub fn run<O: FitnessOracle>(
        oracle: &O,
        num_items: usize,
        config: &TlboConfig,
    ) -> Result<TlboResult, TlboError> {
        Self::run_with_cancel(oracle, num_items, config, None)
    }

    /// Runs the TLBO optimization with an optional cancellation token.
    ///
    /// The flag is consulted only at iteration boundaries; a cancelled run
    /// still returns a well-formed result covering every iteration
    /// completed before the flag was observed.
    pub fn run_with_cancel<O: FitnessOracle>(
        oracle: &O,
        num_items: usize,
        config: &TlboConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TlboResult, TlboError> {
        config.validate()?;
        if num_items < 2 {
            return Err(TlboError::ItemCountTooSmall(num_items));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let codec = LehmerCodec::new(num_items);

        let mut population: Vec<Vec<usize>> = (0..config.population_size)
            .map(|_| codec.random_vector(&mut rng))
            .collect();
        let mut fitness = evaluate_population(oracle, &population)?;

        let seed_idx = argmin(&fitness);
        let mut best = population[seed_idx].clone();
        let mut best_fitness = fitness[seed_idx];

        let mut history = ConvergenceHistory::new();
        history.record(best_fitness);

        let mut cancelled = false;

        for it in 1..=config.max_iter {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            population = teacher_step(&codec, &population, &fitness, &mut rng);
            fitness = evaluate_population(oracle, &population)?;

            population = learner_step(&codec, &population, &fitness, &mut rng);
            fitness = evaluate_population(oracle, &population)?;

            // The phases carry no elitism of their own, so the running best
            // is tracked here on strict improvement only.
            let cur_idx = argmin(&fitness);
            if fitness[cur_idx] < best_fitness {
                best_fitness = fitness[cur_idx];
                best = population[cur_idx].clone();
            }
            history.record(best_fitness);

            oracle.on_iteration(it, best_fitness);
            if it.is_multiple_of(20) {
                log::info!("Iteration {it}: Best Score = {best_fitness}");
            }
        }

        Ok(TlboResult {
            best,
            best_fitness,
            iterations: history.len() - 1,
            cancelled,
            history,
        })
    }
}

/// One teacher phase over the whole population.
///
/// Every learner moves by the integer-rounded difference between the
/// teacher (the current best member) and `TF` times the class mean, with
/// `TF` drawn fresh per learner from `{1, 2}`.
fn teacher_step<R: Rng>(
    codec: &LehmerCodec,
    population: &[Vec<usize>],
    fitness: &[f64],
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let dim = codec.dim();
    let teacher: Vec<f64> = population[argmin(fitness)]
        .iter()
        .map(|&v| v as f64)
        .collect();

    let mut mean = vec![0.0; dim];
    for member in population {
        for (m, &v) in mean.iter_mut().zip(member.iter()) {
            *m += v as f64;
        }
    }
    for m in &mut mean {
        *m /= population.len() as f64;
    }

    population
        .iter()
        .map(|learner| {
            let tf = rng.random_range(1..=2) as f64;
            let candidate: Vec<f64> = learner
                .iter()
                .zip(teacher.iter().zip(mean.iter()))
                .map(|(&x, (&t, &m))| x as f64 + (t - tf * m).round())
                .collect();
            codec.repair(&candidate)
        })
        .collect()
}

/// One learner phase over the whole population.
///
/// Each learner picks a partner uniformly among the other members and moves
/// an integer-rounded random step toward a strictly better partner, or the
/// same step away from any other.
fn learner_step<R: Rng>(
    codec: &LehmerCodec,
    population: &[Vec<usize>],
    fitness: &[f64],
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let len = population.len();

    population
        .iter()
        .enumerate()
        .map(|(i, learner)| {
            let j = {
                let k = rng.random_range(0..len - 1);
                if k >= i {
                    k + 1
                } else {
                    k
                }
            };
            let r: f64 = rng.random();
            let toward = fitness[j] < fitness[i];

            let candidate: Vec<f64> = learner
                .iter()
                .zip(population[j].iter())
                .map(|(&x, &p)| {
                    let x = x as f64;
                    let step = (r * (p as f64 - x)).round();
                    if toward {
                        x + step
                    } else {
                        x - step
                    }
                })
                .collect();
            codec.repair(&candidate)
        })
        .collect()
}

/// Evaluate every member of the population.
fn evaluate_population<O: FitnessOracle>(
    oracle: &O,
    population: &[Vec<usize>],
) -> Result<Vec<f64>, TlboError> {
    population
        .iter()
        .map(|member| oracle.evaluate(member).map_err(TlboError::Oracle))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_oracle(v: &[usize]) -> f64 {
        v.iter().sum::<usize>() as f64
    }

    #[test]
    fn test_end_to_end_sum_minimization() {
        let config = TlboConfig::default()
            .with_population_size(10)
            .with_max_iter(30)
            .with_seed(42);

        let result = TlboRunner::run(&sum_oracle, 6, &config).unwrap();

        assert_eq!(result.history.len(), 31);
        assert_eq!(result.iterations, 30);
        assert!(!result.cancelled);
        assert_eq!(result.best_fitness, result.history.latest().unwrap());
        assert!(LehmerCodec::new(6).contains(&result.best));

        for window in result.history.values().windows(2) {
            assert!(
                window[1] <= window[0],
                "running best must be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_deterministic_replay() {
        let config = TlboConfig::default()
            .with_population_size(15)
            .with_max_iter(40)
            .with_seed(1234);

        let a = TlboRunner::run(&sum_oracle, 7, &config).unwrap();
        let b = TlboRunner::run(&sum_oracle, 7, &config).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_improves_over_initial_best() {
        let config = TlboConfig::default()
            .with_population_size(30)
            .with_max_iter(200)
            .with_seed(42);

        let result = TlboRunner::run(&sum_oracle, 10, &config).unwrap();

        let initial = result.history.values()[0];
        assert!(
            result.best_fitness < initial,
            "expected improvement over initial best {initial}, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_phases_preserve_domain() {
        let codec = LehmerCodec::new(9);
        let mut rng = StdRng::seed_from_u64(77);
        let mut population: Vec<Vec<usize>> =
            (0..12).map(|_| codec.random_vector(&mut rng)).collect();

        for round in 0..100 {
            let fitness: Vec<f64> = (0..12).map(|i| ((i + round) % 12) as f64).collect();
            population = teacher_step(&codec, &population, &fitness, &mut rng);
            population = learner_step(&codec, &population, &fitness, &mut rng);
            for member in &population {
                assert!(codec.contains(member));
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_evaluation() {
        struct PanickingOracle;
        impl FitnessOracle for PanickingOracle {
            fn evaluate(&self, _vector: &[usize]) -> Result<f64, OracleError> {
                panic!("oracle must not be called for an invalid configuration");
            }
        }

        let config = TlboConfig::default().with_population_size(1);
        let err = TlboRunner::run(&PanickingOracle, 4, &config).unwrap_err();
        assert!(matches!(err, TlboError::Config(_)));
    }

    #[test]
    fn test_item_count_too_small() {
        let config = TlboConfig::default().with_seed(0);
        let err = TlboRunner::run(&sum_oracle, 1, &config).unwrap_err();
        assert!(matches!(err, TlboError::ItemCountTooSmall(1)));
    }

    #[test]
    fn test_oracle_failure_aborts_run() {
        struct FlakyOracle;
        impl FitnessOracle for FlakyOracle {
            fn evaluate(&self, vector: &[usize]) -> Result<f64, OracleError> {
                if vector[0] == 0 {
                    Err("row 0 has no preference data".into())
                } else {
                    Ok(vector.iter().sum::<usize>() as f64)
                }
            }
        }

        let config = TlboConfig::default()
            .with_population_size(20)
            .with_max_iter(50)
            .with_seed(3);

        let err = TlboRunner::run(&FlakyOracle, 4, &config).unwrap_err();
        match err {
            TlboError::Oracle(cause) => {
                assert_eq!(cause.to_string(), "row 0 has no preference data")
            }
            other => panic!("expected oracle error, got {other:?}"),
        }
    }

    #[test]
    fn test_cancellation_returns_wellformed_prefix() {
        let config = TlboConfig::default()
            .with_population_size(5)
            .with_max_iter(1000)
            .with_seed(21);

        let cancel = Arc::new(AtomicBool::new(true));
        let result = TlboRunner::run_with_cancel(&sum_oracle, 5, &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.history.len(), 1);
        assert_eq!(result.best_fitness, result.history.latest().unwrap());
        assert!(LehmerCodec::new(5).contains(&result.best));
    }
}
