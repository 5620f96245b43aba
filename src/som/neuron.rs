//! Neuron representation for the Self-Organizing Map.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// A neuron in the Self-Organizing Map.
///
/// Each neuron has a position on the 2D grid, a weight vector (its
/// prototype in feature space) and, once the map has been labeled, the
/// class label of its nearest exemplar.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    /// Row position on the grid.
    pub row: usize,
    /// Column position on the grid.
    pub col: usize,
    /// Weight vector.
    pub weights: Vec<f64>,
    /// Class label assigned by the last labeling pass.
    pub label: Option<char>,
}

impl Neuron {
    /// Creates a new neuron with random weights.
    ///
    /// Each weight is drawn independently and uniformly from `[-1, 1]`.
    pub fn new_random<R: Rng>(row: usize, col: usize, weight_dim: usize, rng: &mut R) -> Self {
        let uniform = Uniform::new_inclusive(-1.0f64, 1.0);
        let weights: Vec<f64> = (0..weight_dim).map(|_| uniform.sample(rng)).collect();

        Self::new_with_weights(row, col, weights)
    }

    /// Creates a new neuron with zero weights.
    pub fn new_zeros(row: usize, col: usize, weight_dim: usize) -> Self {
        Self::new_with_weights(row, col, vec![0.0; weight_dim])
    }

    /// Creates a new neuron with the given weights.
    pub fn new_with_weights(row: usize, col: usize, weights: Vec<f64>) -> Self {
        Self {
            row,
            col,
            weights,
            label: None,
        }
    }

    /// Returns the 1D index for this neuron in a grid of the given dimension.
    #[inline]
    pub fn index(&self, dimension: usize) -> usize {
        self.row * dimension + self.col
    }

    /// Computes the squared Euclidean distance between the weights and an input vector.
    #[inline]
    pub fn distance_squared(&self, input: &[f64]) -> f64 {
        debug_assert_eq!(
            self.weights.len(),
            input.len(),
            "Weight and input dimensions must match"
        );

        self.weights
            .iter()
            .zip(input.iter())
            .map(|(w, i)| (i - w).powi(2))
            .sum()
    }

    /// Computes the squared grid distance to the cell at `(row, col)`.
    #[inline]
    pub fn grid_distance_squared(&self, row: usize, col: usize) -> f64 {
        let dr = self.row as f64 - row as f64;
        let dc = self.col as f64 - col as f64;
        dr * dr + dc * dc
    }

    /// Moves the weights towards an input vector.
    ///
    /// `learning_rate` is the overall learning rate, `neighborhood` the
    /// neighborhood influence. A negative rate moves the weights away.
    pub fn update_weights(&mut self, input: &[f64], learning_rate: f64, neighborhood: f64) {
        let influence = learning_rate * neighborhood;

        for (w, i) in self.weights.iter_mut().zip(input.iter()) {
            *w += influence * (i - *w);
        }
    }
}
