//! Self-Organizing Map (SOM) module.
//!
//! - **Map**: grid of neurons, winner search, neighborhood update,
//!   labeling and LVQ correction (map.rs)
//! - **Schedule**: learning-rate and neighborhood decay (schedule.rs)
//! - **Training**: the epoch / label / LVQ / re-label protocol (training.rs)

mod labels;
mod map;
mod neuron;
pub mod schedule;
pub mod training;

pub use labels::{LabelGrid, UNSET_LABEL};
pub use map::{Bmu, LvqStats, Som};
pub use neuron::Neuron;
pub use schedule::DecaySchedule;
pub use training::{EpochMode, EpochStats, SomTrainer, TrainingReport};
