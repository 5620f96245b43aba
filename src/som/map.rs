//! Self-Organizing Map (SOM) implementation.

use crate::config::MapConfig;
use crate::data::Dataset;
use crate::error::{KohonenError, Result};
use crate::som::schedule::gaussian;
use crate::som::{LabelGrid, Neuron};
use log::trace;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Best Matching Unit: the neuron closest to a presented input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmu {
    /// 1D index of the neuron.
    pub index: usize,
    /// Row of the neuron.
    pub row: usize,
    /// Column of the neuron.
    pub col: usize,
    /// Squared Euclidean distance between the input and the neuron's weights.
    pub distance: f64,
}

/// Outcome counts of one LVQ correction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LvqStats {
    /// Winners whose label agreed with the input (pulled towards it).
    pub reinforced: usize,
    /// Winners whose label disagreed (pushed away from it).
    pub repelled: usize,
}

/// A square Self-Organizing Map.
///
/// The map is a `dimension x dimension` grid of neurons stored in row-major
/// order. Each neuron holds a weight vector of length `weight_dim` and an
/// optional class label.
#[derive(Debug, Clone, PartialEq)]
pub struct Som {
    /// Grid dimension (grid is dimension x dimension).
    pub dimension: usize,
    /// The neurons in the grid (row-major order).
    pub neurons: Vec<Neuron>,
    /// Weight vector dimensionality.
    pub weight_dim: usize,
}

impl Som {
    /// Creates a new SOM with weights drawn uniformly from `[-1, 1]`.
    ///
    /// All weights come from a single generator seeded from `config.seed`
    /// (or from OS entropy), so a fixed seed reproduces the map exactly.
    pub fn new(config: &MapConfig) -> Result<Self> {
        config.validate()?;

        let dimension = config.grid_size;
        let weight_dim = config.data_dimension;
        let total = config.total_neurons();

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let neurons: Vec<Neuron> = (0..total)
            .map(|i| {
                let row = i / dimension;
                let col = i % dimension;
                Neuron::new_random(row, col, weight_dim, &mut rng)
            })
            .collect();

        Ok(Self {
            dimension,
            neurons,
            weight_dim,
        })
    }

    /// Creates a new SOM with zero-initialized weights.
    pub fn new_zeros(dimension: usize, weight_dim: usize) -> Self {
        let total = dimension * dimension;
        let neurons: Vec<Neuron> = (0..total)
            .map(|i| {
                let row = i / dimension;
                let col = i % dimension;
                Neuron::new_zeros(row, col, weight_dim)
            })
            .collect();

        Self {
            dimension,
            neurons,
            weight_dim,
        }
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Gets a neuron by its 1D index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    /// Gets a neuron by its 2D position.
    #[inline]
    pub fn get_at(&self, row: usize, col: usize) -> Option<&Neuron> {
        if row < self.dimension && col < self.dimension {
            Some(&self.neurons[row * self.dimension + col])
        } else {
            None
        }
    }

    /// Converts a 1D index to 2D coordinates.
    #[inline]
    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        (index / self.dimension, index % self.dimension)
    }

    /// Converts 2D coordinates to a 1D index.
    #[inline]
    pub fn coords_to_index(&self, row: usize, col: usize) -> usize {
        row * self.dimension + col
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.weight_dim {
            return Err(KohonenError::DimensionMismatch {
                expected: self.weight_dim,
                found: input.len(),
            });
        }
        if input.iter().any(|v| !v.is_finite()) {
            return Err(KohonenError::Data("non-finite input value".to_string()));
        }
        Ok(())
    }

    /// Checks that a dataset's samples fit this map's weight dimension.
    pub fn check_dataset(&self, data: &Dataset) -> Result<()> {
        if data.dimension() != self.weight_dim {
            return Err(KohonenError::DimensionMismatch {
                expected: self.weight_dim,
                found: data.dimension(),
            });
        }
        Ok(())
    }

    /// Finds the Best Matching Unit (BMU) for an input vector.
    ///
    /// Scans the grid in row-major order; among neurons at equal distance
    /// the first one scanned wins.
    pub fn find_bmu(&self, input: &[f64]) -> Result<Bmu> {
        self.check_input(input)?;

        let mut best: Option<(usize, f64)> = None;
        for (i, neuron) in self.neurons.iter().enumerate() {
            let dist = neuron.distance_squared(input);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((i, dist)),
            }
        }

        let (index, distance) =
            best.ok_or_else(|| KohonenError::EmptyInput("Empty SOM".to_string()))?;
        let (row, col) = self.index_to_coords(index);

        Ok(Bmu {
            index,
            row,
            col,
            distance,
        })
    }

    /// Updates every neuron in response to an input.
    ///
    /// Each neuron moves towards the input by `learning_rate` scaled by its
    /// Gaussian neighborhood weight around `bmu` with spread `sigma`.
    pub fn update(&mut self, input: &[f64], bmu: &Bmu, learning_rate: f64, sigma: f64) -> Result<()> {
        self.check_input(input)?;

        for neuron in &mut self.neurons {
            let grid_dist_sq = neuron.grid_distance_squared(bmu.row, bmu.col);
            neuron.update_weights(input, learning_rate, gaussian(grid_dist_sq, sigma));
        }
        Ok(())
    }

    /// Labels every neuron with the label of its nearest dataset sample.
    ///
    /// Among samples at equal distance the first in dataset order wins. An
    /// empty dataset leaves every label unset.
    pub fn label(&mut self, data: &Dataset) -> Result<()> {
        self.check_dataset(data)?;

        for neuron in &mut self.neurons {
            let mut best: Option<(char, f64)> = None;
            for sample in data {
                let dist = neuron.distance_squared(&sample.features);
                match best {
                    Some((_, best_dist)) if dist >= best_dist => {}
                    _ => best = Some((sample.label, dist)),
                }
            }
            neuron.label = best.map(|(label, _)| label);
        }
        Ok(())
    }

    /// Snapshot of the current labels.
    pub fn labels(&self) -> LabelGrid {
        let cells = self.neurons.iter().map(|n| n.label).collect();
        LabelGrid::from_cells(self.dimension, cells)
            .unwrap_or_else(|| LabelGrid::new(self.dimension))
    }

    /// Runs one LVQ correction pass.
    ///
    /// For each sample only its BMU moves: towards the sample by `rate` if
    /// the BMU's current label matches the sample's, away from it otherwise.
    /// An unlabeled BMU never matches.
    pub fn lvq(&mut self, data: &Dataset, rate: f64) -> Result<LvqStats> {
        self.check_dataset(data)?;

        let mut stats = LvqStats::default();
        for sample in data {
            let bmu = self.find_bmu(&sample.features)?;
            let neuron = &mut self.neurons[bmu.index];

            let sign = if neuron.label == Some(sample.label) {
                stats.reinforced += 1;
                1.0
            } else {
                stats.repelled += 1;
                -1.0
            };
            trace!(
                "LVQ '{}' -> ({}, {}) label {:?}, sign {}",
                sample.label,
                bmu.row,
                bmu.col,
                neuron.label,
                sign
            );

            neuron.update_weights(&sample.features, sign * rate, 1.0);
        }
        Ok(stats)
    }

    /// Mean squared distance between each sample and its BMU.
    ///
    /// Returns `None` for an empty dataset.
    pub fn quantization_error(&self, data: &Dataset) -> Result<Option<f64>> {
        self.check_dataset(data)?;
        if data.is_empty() {
            return Ok(None);
        }

        let mut sum = 0.0;
        for sample in data {
            sum += self.find_bmu(&sample.features)?.distance;
        }
        Ok(Some(sum / data.len() as f64))
    }

    /// Classifies an input as the label of its BMU.
    pub fn classify(&self, input: &[f64]) -> Result<Option<char>> {
        let bmu = self.find_bmu(input)?;
        Ok(self.neurons[bmu.index].label)
    }

    /// Fraction of samples whose classification matches their label.
    ///
    /// Returns `None` for an empty dataset.
    pub fn accuracy(&self, data: &Dataset) -> Result<Option<f64>> {
        self.check_dataset(data)?;
        if data.is_empty() {
            return Ok(None);
        }

        let mut correct = 0usize;
        for sample in data {
            if self.classify(&sample.features)? == Some(sample.label) {
                correct += 1;
            }
        }
        Ok(Some(correct as f64 / data.len() as f64))
    }
}
