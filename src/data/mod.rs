//! Labeled datasets.
//!
//! A [`Dataset`] is an ordered sequence of [`Sample`]s sharing one feature
//! dimension. Each label appears at most once: inserting a label that is
//! already present replaces its feature vector in place, so the entry keeps
//! the position of its first occurrence and the vector of its last.
//!
//! ## Submodules
//!
//! - [`loader`] — CSV dataset loading

pub mod loader;

pub use loader::{load_dataset, read_dataset};

use crate::error::{KohonenError, Result};
use std::collections::HashMap;

/// A labeled feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Class label.
    pub label: char,
    /// Feature vector.
    pub features: Vec<f64>,
}

impl Sample {
    /// Creates a new sample.
    pub fn new(label: char, features: Vec<f64>) -> Self {
        Self { label, features }
    }
}

/// Ordered, label-keyed collection of samples with a fixed dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    dimension: usize,
    samples: Vec<Sample>,
    positions: HashMap<char, usize>,
}

impl Dataset {
    /// Creates an empty dataset of the given feature dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            samples: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Builds a dataset from `(label, features)` pairs, in order.
    pub fn from_pairs<I>(dimension: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, Vec<f64>)>,
    {
        let mut dataset = Self::new(dimension);
        for (label, features) in pairs {
            dataset.insert(label, features)?;
        }
        Ok(dataset)
    }

    /// Inserts a sample.
    ///
    /// If `label` is already present its vector is replaced and the previous
    /// vector is returned. Non-finite features are rejected.
    pub fn insert(&mut self, label: char, features: Vec<f64>) -> Result<Option<Vec<f64>>> {
        if features.len() != self.dimension {
            return Err(KohonenError::DimensionMismatch {
                expected: self.dimension,
                found: features.len(),
            });
        }
        if let Some(value) = features.iter().find(|v| !v.is_finite()) {
            return Err(KohonenError::Data(format!(
                "label '{}': non-finite feature value `{}`",
                label, value
            )));
        }

        match self.positions.get(&label) {
            Some(&pos) => Ok(Some(std::mem::replace(
                &mut self.samples[pos].features,
                features,
            ))),
            None => {
                self.positions.insert(label, self.samples.len());
                self.samples.push(Sample::new(label, features));
                Ok(None)
            }
        }
    }

    /// Feature dimension shared by every sample.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates samples in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Samples in dataset order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Gets the feature vector stored for a label.
    pub fn get(&self, label: char) -> Option<&[f64]> {
        self.positions
            .get(&label)
            .map(|&pos| self.samples[pos].features.as_slice())
    }

    /// Returns true if the label is present.
    pub fn contains(&self, label: char) -> bool {
        self.positions.contains_key(&label)
    }

    /// Labels in dataset order.
    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.samples.iter().map(|s| s.label)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
