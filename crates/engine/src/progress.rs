// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress increments for upload drivers

use crate::config::{UploadConfig, MAX_STEP};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Draws bounded pseudo-random progress steps.
///
/// Clones share one generator, so a seeded policy yields the same sequence
/// of steps across all drivers regardless of how many there are.
#[derive(Clone)]
pub struct ProgressPolicy {
    tick: Duration,
    min_step: u8,
    max_step: u8,
    rng: Arc<Mutex<StdRng>>,
}

impl ProgressPolicy {
    pub fn new(config: &UploadConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        // Guard against configs built in code without validation
        let min_step = config.min_step.clamp(1, MAX_STEP);
        let max_step = config.max_step.clamp(min_step, MAX_STEP);
        Self {
            tick: config.tick,
            min_step,
            max_step,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Fixed step size, for deterministic tests (capped at `MAX_STEP`)
    pub fn fixed(tick: Duration, step: u8) -> Self {
        Self::new(&UploadConfig {
            tick,
            min_step: step,
            max_step: step,
            seed: Some(0),
        })
    }

    /// Delay between progress updates
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Next increment, in `[min_step, max_step]`
    pub fn next_step(&self) -> u8 {
        if self.min_step == self.max_step {
            return self.min_step;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(self.min_step..=self.max_step)
    }
}

impl Default for ProgressPolicy {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
