//! Hybrid PSO-TLBO optimization.
//!
//! Particle Swarm Optimization drives the main loop — velocity-based
//! exploration pulled toward per-particle and global bests — while
//! Teaching-Learning-Based Optimization is injected periodically on a
//! subset of the population (the worst performers plus random picks) to
//! shake stagnating particles loose. Solutions are Lehmer-coded assignment
//! vectors kept valid by [`crate::codec::LehmerCodec`].
//!
//! # Core Trait
//!
//! - [`FitnessOracle`]: scores an encoded vector; the only trait a user
//!   must implement (closures work directly)
//!
//! # Key Types
//!
//! - [`HybridConfig`]: swarm parameters, TLBO cadence, seed
//! - [`HybridRunner`]: executes the iteration loop
//! - [`HybridResult`]: best vector, fitness, and convergence history
//! - [`BackgroundRun`]: worker-thread execution with progress polling
//!
//! # Submodules
//!
//! - [`pso`]: per-particle velocity and position updates
//! - [`tlbo`]: weighted differential, teacher and learner phases
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), *Particle Swarm Optimization*
//! - Rao, Savsani & Vakharia (2011), *Teaching-Learning-Based Optimization*

mod background;
mod config;
pub mod pso;
mod runner;
pub mod tlbo;
mod types;

pub use background::{BackgroundRun, ProgressEvent};
pub use config::{HybridConfig, HybridConfigError};
pub use runner::{HybridResult, HybridRunner};
pub use types::{ConvergenceHistory, FitnessOracle, HybridError, OracleError};
