//! Identifier generation
//!
//! Produces string ids for newly created movies. Candidates that are
//! already taken are skipped, so a generated id never collides with a stored
//! record.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::StoreError;

/// Upper bound on candidates tried before giving up
pub const MAX_ATTEMPTS: usize = 64;

/// How new ids are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Monotonic counter rendered in decimal
    #[default]
    Sequential,
    /// Uniform random integer in `0..bound`
    Random,
}

#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: AtomicU64,
    random_bound: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy, random_bound: u64) -> Self {
        Self {
            strategy,
            next: AtomicU64::new(1),
            random_bound: random_bound.max(1),
        }
    }

    /// Move the sequential counter past a numeric id that is already in use
    pub fn observe(&self, id: &str) {
        if let Ok(n) = id.parse::<u64>() {
            self.next.fetch_max(n.saturating_add(1), Ordering::Relaxed);
        }
    }

    /// Generate an id for which `is_taken` returns false
    pub fn generate(&self, is_taken: impl Fn(&str) -> bool) -> Result<String, StoreError> {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.candidate();
            if !is_taken(&candidate) {
                return Ok(candidate);
            }
        }
        Err(StoreError::IdExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    fn candidate(&self) -> String {
        match self.strategy {
            IdStrategy::Sequential => self.next.fetch_add(1, Ordering::Relaxed).to_string(),
            IdStrategy::Random => rand::thread_rng()
                .gen_range(0..self.random_bound)
                .to_string(),
        }
    }
}
