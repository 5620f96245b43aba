//! Decay schedules for learning rate and neighborhood spread.
//!
//! Both decay exponentially with the epoch index `t` over a run of `T`
//! epochs:
//!
//! ```text
//! lr(t)    = lr0 * exp(-t / T)
//! sigma(t) = sigma0 * exp(-t / (T / log10(sigma0)))
//! h(d2, t) = exp(-d2 / (2 * sigma(t)^2))
//! ```
//!
//! With `T == 0` the fraction `t / T` is taken to be 1.

use crate::config::MapConfig;
use serde::{Deserialize, Serialize};

/// Gaussian neighborhood weight for a squared grid distance.
#[inline]
pub fn gaussian(grid_dist_sq: f64, sigma: f64) -> f64 {
    (-grid_dist_sq / (2.0 * sigma * sigma)).exp()
}

/// Time-decaying learning rate and neighborhood spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecaySchedule {
    /// Learning rate at epoch 0.
    pub initial_learning_rate: f64,
    /// Neighborhood spread at epoch 0.
    pub initial_standard_deviation: f64,
    /// Total number of epochs.
    pub max_iterations: usize,
}

impl DecaySchedule {
    /// Creates a schedule from map hyperparameters.
    pub fn new(config: &MapConfig) -> Self {
        Self {
            initial_learning_rate: config.learning_rate,
            initial_standard_deviation: config.standard_deviation,
            max_iterations: config.max_iterations,
        }
    }

    #[inline]
    fn progress(&self, epoch: usize) -> f64 {
        if self.max_iterations == 0 {
            1.0
        } else {
            epoch as f64 / self.max_iterations as f64
        }
    }

    /// Learning rate at the given epoch.
    #[inline]
    pub fn learning_rate(&self, epoch: usize) -> f64 {
        self.initial_learning_rate * (-self.progress(epoch)).exp()
    }

    /// Learning rate reached at the end of the run, used for LVQ.
    #[inline]
    pub fn final_learning_rate(&self) -> f64 {
        self.learning_rate(self.max_iterations)
    }

    /// Neighborhood spread at the given epoch.
    #[inline]
    pub fn standard_deviation(&self, epoch: usize) -> f64 {
        let sigma0 = self.initial_standard_deviation;
        sigma0 * (-self.progress(epoch) * sigma0.log10()).exp()
    }

    /// Neighborhood weight at the given epoch for a squared grid distance.
    #[inline]
    pub fn neighborhood(&self, grid_dist_sq: f64, epoch: usize) -> f64 {
        gaussian(grid_dist_sq, self.standard_deviation(epoch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(max_iterations: usize) -> DecaySchedule {
        DecaySchedule::new(&MapConfig {
            learning_rate: 0.5,
            standard_deviation: 4.0,
            max_iterations,
            ..Default::default()
        })
    }

    #[test]
    fn test_learning_rate_starts_at_initial_value() {
        assert_eq!(schedule(100).learning_rate(0), 0.5);
    }

    #[test]
    fn test_learning_rate_strictly_decreasing() {
        let s = schedule(50);
        for t in 1..50 {
            assert!(s.learning_rate(t) < s.learning_rate(t - 1), "epoch {}", t);
        }
    }

    #[test]
    fn test_final_learning_rate() {
        let s = schedule(20);
        let expected = 0.5 * (-1.0f64).exp();
        assert!((s.final_learning_rate() - expected).abs() < 1e-12);

        // Degenerate run length: rate after zero epochs still decays by e.
        assert!((schedule(0).final_learning_rate() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_standard_deviation_decay() {
        let s = schedule(100);
        assert_eq!(s.standard_deviation(0), 4.0);
        assert!(s.standard_deviation(50) < 4.0);
        assert!(s.standard_deviation(99) < s.standard_deviation(50));

        // sigma(T) = sigma0 * exp(-log10(sigma0))
        let at_end = 4.0 * (-(4.0f64).log10()).exp();
        assert!((s.standard_deviation(100) - at_end).abs() < 1e-12);
    }

    #[test]
    fn test_neighborhood_peaks_at_winner() {
        let s = schedule(30);
        for t in 0..30 {
            assert_eq!(s.neighborhood(0.0, t), 1.0);
        }
    }

    #[test]
    fn test_neighborhood_falls_off_with_distance() {
        let s = schedule(30);
        assert!(s.neighborhood(1.0, 0) < 1.0);
        assert!(s.neighborhood(4.0, 0) < s.neighborhood(1.0, 0));
        // Narrower spread later in the run.
        assert!(s.neighborhood(4.0, 29) < s.neighborhood(4.0, 0));
    }

    #[test]
    fn test_gaussian() {
        let g = gaussian(2.0, 1.0);
        assert!((g - (-1.0f64).exp()).abs() < 1e-12);
    }
}
