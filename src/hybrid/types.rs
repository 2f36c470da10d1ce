//! Core trait and type definitions for the hybrid optimizer.
//!
//! [`FitnessOracle`] is the contract between the generic hybrid engine and
//! domain-specific scoring logic. The engine never computes fitness itself:
//! it hands an encoded vector to the oracle and trusts the returned score
//! (lower is better).

use crate::hybrid::config::HybridConfigError;

/// Opaque error produced by a fitness oracle.
///
/// Oracle failures are never retried or suppressed; they abort the run and
/// surface as [`HybridError::Oracle`] with the original cause preserved.
pub type OracleError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Scores encoded vectors. Lower fitness is better (minimization).
///
/// This is the **only** trait a user must implement to run the hybrid
/// optimizer. The vector handed to [`evaluate`](FitnessOracle::evaluate)
/// always satisfies its per-position domain (`vector[i] <= n - i - 2`).
///
/// Infallible scoring functions can be passed directly as closures:
///
/// ```
/// use pso_tlbo::hybrid::FitnessOracle;
///
/// let oracle = |v: &[usize]| v.iter().sum::<usize>() as f64;
/// assert_eq!(oracle.evaluate(&[2, 1, 0]).unwrap(), 3.0);
/// ```
///
/// # Thread Safety
///
/// `FitnessOracle` must be `Send + Sync` because the runner may evaluate
/// the population in parallel using rayon.
pub trait FitnessOracle: Send + Sync {
    /// Evaluates an encoded vector and returns its fitness.
    ///
    /// This is typically the most expensive operation of a run. Errors
    /// propagate uncaught to the caller of the optimizer.
    fn evaluate(&self, vector: &[usize]) -> Result<f64, OracleError>;

    /// Called once per completed iteration with the current global best.
    ///
    /// Useful for logging, adaptive parameter control, or external
    /// communication. The default implementation is a no-op.
    fn on_iteration(&self, _iteration: usize, _best_fitness: f64) {}
}

impl<F> FitnessOracle for F
where
    F: Fn(&[usize]) -> f64 + Send + Sync,
{
    fn evaluate(&self, vector: &[usize]) -> Result<f64, OracleError> {
        Ok(self(vector))
    }
}

/// Errors produced by a hybrid optimization run.
#[derive(Debug, thiserror::Error)]
pub enum HybridError {
    /// The configuration failed validation before any state was built.
    #[error(transparent)]
    Config(#[from] HybridConfigError),

    /// The item count cannot support a Lehmer encoding.
    #[error("item count must be at least 2 to encode an assignment, got {0}")]
    ItemCountTooSmall(usize),

    /// The learner phase has no valid partner to select.
    #[error("learner phase requires a population of at least 2 members, got {0}")]
    DegeneratePopulation(usize),

    /// A fitness evaluation failed; the run is aborted.
    #[error("fitness evaluation failed: {0}")]
    Oracle(#[source] OracleError),
}

/// Append-only record of the global-best fitness per iteration.
///
/// The first entry is the best fitness of the initial population; one entry
/// is appended per completed iteration, so a full run of `max_iter`
/// iterations yields `max_iter + 1` entries in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceHistory(Vec<f64>);

impl ConvergenceHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the global-best fitness for a completed iteration.
    pub fn record(&mut self, best_fitness: f64) {
        self.0.push(best_fitness);
    }

    /// The recorded values, oldest first.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recently recorded value.
    pub fn latest(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Consumes the history, returning the raw values.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_oracle() {
        let oracle = |v: &[usize]| v.iter().sum::<usize>() as f64;
        assert_eq!(oracle.evaluate(&[1, 2, 3]).unwrap(), 6.0);
    }

    #[test]
    fn test_history_chronological() {
        let mut history = ConvergenceHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);

        history.record(5.0);
        history.record(3.0);
        history.record(3.0);

        assert_eq!(history.len(), 3);
        assert_eq!(history.values(), &[5.0, 3.0, 3.0]);
        assert_eq!(history.latest(), Some(3.0));
        assert_eq!(history.into_vec(), vec![5.0, 3.0, 3.0]);
    }

    #[test]
    fn test_oracle_error_preserves_cause() {
        struct FailingOracle;

        impl FitnessOracle for FailingOracle {
            fn evaluate(&self, _vector: &[usize]) -> Result<f64, OracleError> {
                Err("preference matrix row missing".into())
            }
        }

        let err = FailingOracle.evaluate(&[0, 0]).unwrap_err();
        assert_eq!(err.to_string(), "preference matrix row missing");

        let wrapped = HybridError::Oracle(err);
        assert!(wrapped.to_string().contains("preference matrix row missing"));
    }
}
