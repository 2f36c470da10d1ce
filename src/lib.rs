//! Hybrid PSO-TLBO metaheuristic for shrinking-domain assignment problems.
//!
//! Searches for a high-quality discrete assignment (e.g. students to rooms
//! under capacity and preference constraints) encoded as a Lehmer-code
//! vector: position `i` ranges over the shrinking domain `[0, n - i - 2]`,
//! so permutation-like assignments can be manipulated with continuous-style
//! arithmetic and projected back into validity by a repair operator.
//!
//! Two cooperating engines drive the search:
//!
//! - **Particle Swarm Optimization (PSO)**: velocity-based exploration with
//!   per-particle personal bests and a single global best, using
//!   position-dependent velocity clipping matched to the encoding's
//!   shrinking domains.
//! - **Teaching-Learning-Based Optimization (TLBO)**: periodic teacher and
//!   learner phases injected on a subset of the population, using a
//!   position-weighted differential that nudges wide early positions harder
//!   than the narrow tail.
//!
//! A standalone whole-population TLBO runner
//! ([`TlboRunner`](tlbo::TlboRunner)) is available as a baseline for the
//! hybrid loop.
//!
//! Fitness scoring is external: the caller implements
//! [`FitnessOracle`](hybrid::FitnessOracle) (a closure suffices) and the
//! crate never interprets the score beyond "lower is better".
//!
//! # Example
//!
//! ```
//! use pso_tlbo::hybrid::{HybridConfig, HybridRunner};
//!
//! // toy oracle: prefer small entries
//! let oracle = |v: &[usize]| v.iter().sum::<usize>() as f64;
//!
//! let config = HybridConfig::default()
//!     .with_population_size(20)
//!     .with_max_iter(50)
//!     .with_seed(42);
//!
//! let result = HybridRunner::run(&oracle, 8, &config).unwrap();
//! assert_eq!(result.history.len(), 51);
//! ```

pub mod codec;
pub mod hybrid;
pub mod tlbo;
