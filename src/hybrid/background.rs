//! Background execution with live progress polling.
//!
//! The optimization loop itself stays synchronous and sequential;
//! [`BackgroundRun`] merely moves it onto a worker thread and forwards one
//! [`ProgressEvent`] per completed iteration through a bounded channel. A
//! slow or absent consumer drops events — it can never stall the loop or
//! change the values it produces.

use crate::hybrid::config::HybridConfig;
use crate::hybrid::runner::{run_inner, HybridResult};
use crate::hybrid::types::{FitnessOracle, HybridError};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Events buffered between the worker and a polling consumer. Sized so a
/// consumer polling every few iterations never misses an event on typical
/// reporting cadences.
const PROGRESS_CAPACITY: usize = 64;

/// Global-best snapshot emitted after each completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressEvent {
    /// 1-based iteration counter.
    pub iteration: usize,

    /// Global-best fitness after this iteration.
    pub best_fitness: f64,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Iteration {}: Best Score = {}",
            self.iteration, self.best_fitness
        )
    }
}

/// A hybrid optimization running on a worker thread.
///
/// # Usage
///
/// ```
/// use pso_tlbo::hybrid::{BackgroundRun, HybridConfig};
///
/// let oracle = |v: &[usize]| v.iter().sum::<usize>() as f64;
/// let config = HybridConfig::default()
///     .with_population_size(8)
///     .with_max_iter(10)
///     .with_seed(42);
///
/// let run = BackgroundRun::spawn(oracle, 5, config);
/// for event in run.progress() {
///     println!("{event}");
/// }
/// let result = run.join().unwrap();
/// assert_eq!(result.iterations, 10);
/// ```
pub struct BackgroundRun {
    handle: JoinHandle<Result<HybridResult, HybridError>>,
    progress: Receiver<ProgressEvent>,
    cancel: Arc<AtomicBool>,
}

impl BackgroundRun {
    /// Spawns the optimizer on a new worker thread.
    pub fn spawn<O>(oracle: O, num_items: usize, config: HybridConfig) -> Self
    where
        O: FitnessOracle + 'static,
    {
        let (sender, progress) = sync_channel(PROGRESS_CAPACITY);
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        let handle = std::thread::spawn(move || {
            run_inner(
                &oracle,
                num_items,
                &config,
                Some(worker_cancel),
                Some(&sender),
            )
        });

        Self {
            handle,
            progress,
            cancel,
        }
    }

    /// The progress channel, one event per completed iteration.
    ///
    /// Iterating the receiver ends once the worker finishes and the sender
    /// is dropped.
    pub fn progress(&self) -> &Receiver<ProgressEvent> {
        &self.progress
    }

    /// Requests cancellation at the next iteration boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// `true` once the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker and returns its result.
    ///
    /// # Panics
    /// Panics if the worker thread itself panicked (which only an oracle
    /// panic can cause).
    pub fn join(self) -> Result<HybridResult, HybridError> {
        self.handle.join().expect("optimizer thread panicked")
    }
}
