//! Standalone Teaching-Learning-Based Optimization.
//!
//! A pure TLBO optimizer over the same Lehmer-coded assignment vectors as
//! the hybrid loop: every iteration applies one teacher phase and one
//! learner phase to the **whole** population, with no velocities and no
//! tunable coefficients. Useful as a baseline against
//! [`HybridRunner`](crate::hybrid::HybridRunner) or when the problem is
//! small enough that PSO's momentum adds nothing.
//!
//! # Key Types
//!
//! - [`TlboConfig`]: population size, iteration count, seed
//! - [`TlboRunner`]: executes the iteration loop
//! - [`TlboResult`]: best vector, fitness, and convergence history
//!
//! Fitness scoring uses the same [`FitnessOracle`](crate::hybrid::FitnessOracle)
//! trait as the hybrid optimizer.
//!
//! # References
//!
//! Rao, Savsani & Vakharia (2011), *Teaching-Learning-Based Optimization*

mod config;
mod runner;

pub use config::{TlboConfig, TlboConfigError};
pub use runner::{TlboError, TlboResult, TlboRunner};
