//! Hybrid optimizer configuration.
//!
//! [`HybridConfig`] holds all parameters that control the PSO loop and the
//! periodic TLBO injection. All parameters are fixed for the duration of a
//! run and validated before any population state is built.

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum HybridConfigError {
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("max_iter must be at least 1")]
    NoIterations,
    #[error("tlbo_interval must be at least 1")]
    InvalidInterval,
    #[error("tlbo_fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),
    #[error("{name} must be finite, got {value}")]
    NonFiniteCoefficient { name: &'static str, value: f64 },
}

/// Configuration for the hybrid PSO-TLBO optimizer.
///
/// # Defaults
///
/// ```
/// use pso_tlbo::hybrid::HybridConfig;
///
/// let config = HybridConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_iter, 600);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use pso_tlbo::hybrid::HybridConfig;
///
/// let config = HybridConfig::default()
///     .with_population_size(60)
///     .with_max_iter(800)
///     .with_inertia(0.72)
///     .with_tlbo_interval(25)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridConfig {
    /// Number of particles in the swarm.
    ///
    /// Must be at least 2 (the TLBO learner phase needs a partner).
    /// Typical range: 30-100.
    pub population_size: usize,

    /// Number of iterations to run. The loop always executes exactly this
    /// many iterations; there is no convergence-based early stopping.
    pub max_iter: usize,

    /// PSO inertia weight `w` — momentum retained from the previous
    /// velocity. Typical range: 0.4-0.9.
    pub inertia: f64,

    /// PSO cognitive coefficient `c1` — attraction toward a particle's own
    /// personal best.
    pub cognitive: f64,

    /// PSO social coefficient `c2` — attraction toward the global best.
    pub social: f64,

    /// Apply a TLBO injection every this many iterations.
    pub tlbo_interval: usize,

    /// Fraction of the population injected per TLBO step, in `(0, 1]`.
    ///
    /// The injection subset size is `max(1, floor(fraction * population))`.
    pub tlbo_fraction: f64,

    /// Whether to evaluate the population in parallel using rayon.
    ///
    /// Only fitness evaluation is parallelized; no random draws happen off
    /// the main thread, so results stay identical to a sequential run.
    /// Requires the `parallel` feature; ignored otherwise.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_iter: 600,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            tlbo_interval: 30,
            tlbo_fraction: 0.2,
            parallel: false,
            seed: None,
        }
    }
}

impl HybridConfig {
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

    /// Sets the PSO inertia weight.
    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    /// Sets the PSO cognitive coefficient.
    pub fn with_cognitive(mut self, c1: f64) -> Self {
        self.cognitive = c1;
        self
    }

    /// Sets the PSO social coefficient.
    pub fn with_social(mut self, c2: f64) -> Self {
        self.social = c2;
        self
    }

    /// Sets the TLBO injection interval.
    pub fn with_tlbo_interval(mut self, interval: usize) -> Self {
        self.tlbo_interval = interval;
        self
    }

    /// Sets the TLBO injection fraction.
    pub fn with_tlbo_fraction(mut self, fraction: f64) -> Self {
        self.tlbo_fraction = fraction;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size of the TLBO injection subset for this configuration.
    pub fn tlbo_count(&self) -> usize {
        ((self.tlbo_fraction * self.population_size as f64) as usize).max(1)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` describing the first invalid parameter found.
    pub fn validate(&self) -> Result<(), HybridConfigError> {
        if self.population_size < 2 {
            return Err(HybridConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_iter == 0 {
            return Err(HybridConfigError::NoIterations);
        }
        if self.tlbo_interval == 0 {
            return Err(HybridConfigError::InvalidInterval);
        }
        if !(self.tlbo_fraction > 0.0 && self.tlbo_fraction <= 1.0) {
            return Err(HybridConfigError::InvalidFraction(self.tlbo_fraction));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() {
                return Err(HybridConfigError::NonFiniteCoefficient { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HybridConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_iter, 600);
        assert!((config.inertia - 0.7).abs() < 1e-10);
        assert!((config.cognitive - 1.5).abs() < 1e-10);
        assert!((config.social - 1.5).abs() < 1e-10);
        assert_eq!(config.tlbo_interval, 30);
        assert!((config.tlbo_fraction - 0.2).abs() < 1e-10);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = HybridConfig::default()
            .with_population_size(60)
            .with_max_iter(800)
            .with_inertia(0.72)
            .with_cognitive(1.4)
            .with_social(1.6)
            .with_tlbo_interval(25)
            .with_tlbo_fraction(0.25)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 60);
        assert_eq!(config.max_iter, 800);
        assert!((config.inertia - 0.72).abs() < 1e-10);
        assert!((config.cognitive - 1.4).abs() < 1e-10);
        assert!((config.social - 1.6).abs() < 1e-10);
        assert_eq!(config.tlbo_interval, 25);
        assert!((config.tlbo_fraction - 0.25).abs() < 1e-10);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_tlbo_count_floor_and_minimum() {
        let config = HybridConfig::default()
            .with_population_size(60)
            .with_tlbo_fraction(0.2);
        assert_eq!(config.tlbo_count(), 12);

        // floor(0.25 * 3) = 0, clamped up to 1
        let config = HybridConfig::default()
            .with_population_size(3)
            .with_tlbo_fraction(0.25);
        assert_eq!(config.tlbo_count(), 1);

        let config = HybridConfig::default()
            .with_population_size(10)
            .with_tlbo_fraction(1.0);
        assert_eq!(config.tlbo_count(), 10);
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = HybridConfig::default().with_population_size(1);
        assert!(matches!(
            config.validate(),
            Err(HybridConfigError::PopulationTooSmall(1))
        ));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = HybridConfig::default().with_max_iter(0);
        assert!(matches!(
            config.validate(),
            Err(HybridConfigError::NoIterations)
        ));
    }

    #[test]
    fn test_validate_zero_interval() {
        let config = HybridConfig::default().with_tlbo_interval(0);
        assert!(matches!(
            config.validate(),
            Err(HybridConfigError::InvalidInterval)
        ));
    }

    #[test]
    fn test_validate_fraction_bounds() {
        for bad in [0.0, -0.2, 1.5, f64::NAN] {
            let config = HybridConfig::default().with_tlbo_fraction(bad);
            assert!(
                matches!(config.validate(), Err(HybridConfigError::InvalidFraction(_))),
                "fraction {bad} should be rejected"
            );
        }

        let config = HybridConfig::default().with_tlbo_fraction(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_non_finite_coefficients() {
        let config = HybridConfig::default().with_inertia(f64::NAN);
        assert!(config.validate().is_err());

        let config = HybridConfig::default().with_cognitive(f64::INFINITY);
        assert!(config.validate().is_err());

        let config = HybridConfig::default().with_social(f64::NEG_INFINITY);
        assert!(config.validate().is_err());
    }
}
