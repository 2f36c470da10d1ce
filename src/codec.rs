//! Shrinking-domain vector codec.
//!
//! An assignment over `n` items is encoded as a vector of length `n - 1`
//! where position `i` ranges over `[0, n - i - 2]` — a factorial-number-system
//! (Lehmer-code) representation of an implicit permutation. The encoding
//! tolerates continuous-style arithmetic: any perturbed, possibly fractional
//! vector is projected back into the valid domain by [`LehmerCodec::repair`].

use rand::Rng;

/// Initializes and repairs Lehmer-coded vectors against their
/// position-dependent domains.
///
/// The codec is the only component that knows the encoding's bounds; the
/// PSO and TLBO engines perform unconstrained real-valued arithmetic and
/// rely on `repair` to stay inside the valid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LehmerCodec {
    n: usize,
}

impl LehmerCodec {
    /// Creates a codec for `n` items (`n >= 2`).
    pub fn new(n: usize) -> Self {
        debug_assert!(n >= 2, "Lehmer encoding needs at least 2 items");
        Self { n }
    }

    /// Length of an encoded vector (`n - 1`).
    pub fn dim(&self) -> usize {
        self.n - 1
    }

    /// Inclusive upper bound of the domain at `position`.
    ///
    /// The domain shrinks by one per position; the last position is always
    /// pinned to 0.
    pub fn domain_max(&self, position: usize) -> usize {
        self.n - position - 2
    }

    /// Draws a uniformly random valid vector.
    ///
    /// Position `i` is drawn from the full domain `[0, domain_max(i)]`, the
    /// same bound [`repair`](Self::repair) clamps to.
    pub fn random_vector<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        (0..self.dim())
            .map(|i| rng.random_range(0..=self.domain_max(i)))
            .collect()
    }

    /// Projects an arbitrary real-valued vector into the valid domain.
    ///
    /// Each component is rounded to the nearest integer, then clamped into
    /// `[0, domain_max(i)]`. Idempotent: repairing an already-valid vector
    /// returns it unchanged. Non-finite components clamp to 0.
    pub fn repair(&self, vector: &[f64]) -> Vec<usize> {
        vector
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let maxv = self.domain_max(i) as f64;
                v.round().max(0.0).min(maxv) as usize
            })
            .collect()
    }

    /// Returns `true` if every component satisfies its position domain.
    pub fn contains(&self, vector: &[usize]) -> bool {
        vector.len() == self.dim()
            && vector
                .iter()
                .enumerate()
                .all(|(i, &v)| v <= self.domain_max(i))
    }
}
