//! Standalone TLBO configuration.

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum TlboConfigError {
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("max_iter must be at least 1")]
    NoIterations,
}

/// Configuration for the standalone TLBO optimizer.
///
/// TLBO is parameter-light by design: beyond the population size and
/// iteration count there is nothing to tune — no inertia, no learning
/// coefficients, no injection cadence.
///
/// ```
/// use pso_tlbo::tlbo::TlboConfig;
///
/// let config = TlboConfig::default()
///     .with_population_size(80)
///     .with_max_iter(400)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TlboConfig {
    /// Number of learners in the class.
    ///
    /// Must be at least 2 (the learner phase needs a partner).
    pub population_size: usize,

    /// Number of iterations to run; each iteration applies one teacher
    /// phase and one learner phase to the whole population.
    pub max_iter: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for TlboConfig {
    fn default() -> Self {
        Self {
            population_size: 60,
            max_iter: 300,
            seed: None,
        }
    }
}

impl TlboConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the iteration count.
    pub fn with_max_iter(mut self, n: usize) -> Self {
        self.max_iter = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` describing the first invalid parameter found.
    pub fn validate(&self) -> Result<(), TlboConfigError> {
        if self.population_size < 2 {
            return Err(TlboConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_iter == 0 {
            return Err(TlboConfigError::NoIterations);
        }
        Ok(())
    }
}
