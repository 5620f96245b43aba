//! # Kohonen - Self-Organizing Map with LVQ refinement
//!
//! Trains a square Self-Organizing Map (SOM) on labeled feature vectors,
//! then refines it with one pass of Learning Vector Quantization (LVQ).
//!
//! ## Overview
//!
//! Each epoch presents every training sample once. The neuron closest to
//! the sample (the best-matching unit) anchors a Gaussian neighborhood, and
//! every neuron moves towards the sample in proportion to its neighborhood
//! weight. Learning rate and neighborhood spread both decay exponentially
//! over the run. After each training pass the test set is measured against
//! the same map, giving per-epoch quantization error traces for both sets.
//!
//! Once all epochs are done the map is labeled (each neuron takes the label
//! of its nearest test sample), corrected by LVQ (each training sample pulls
//! its winner closer if the labels agree, pushes it away otherwise), and
//! labeled again.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kohonen::{Dataset, MapConfig, Som, SomTrainer};
//!
//! let config = MapConfig { grid_size: 2, data_dimension: 1, seed: Some(7), ..Default::default() };
//! let train = Dataset::from_pairs(1, vec![('A', vec![0.0]), ('B', vec![10.0])])?;
//!
//! let mut som = Som::new(&config)?;
//! let report = SomTrainer::new(config)?.run(&mut som, &train, &train)?;
//!
//! println!("{}", report.labels);
//! ```
//!
//! ## Architecture
//!
//! - [`som`] - map, decay schedule and training protocol
//! - [`data`] - labeled datasets and CSV loading
//! - [`config`] - hyperparameters and parameter files
//! - [`report`] - error, clustering and summary writers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod som;

// Re-export commonly used types
pub use config::{MapConfig, Parameters};
pub use data::{load_dataset, Dataset, Sample};
pub use error::{KohonenError, Result};
pub use som::{
    Bmu, DecaySchedule, EpochMode, EpochStats, LabelGrid, LvqStats, Neuron, Som, SomTrainer,
    TrainingReport,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
