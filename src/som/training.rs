//! SOM training protocol.
//!
//! A run alternates, for each of `T` epochs, one training pass over the
//! training data (every sample moves the whole grid towards it) with one
//! evaluation pass over the test data (error only). After the last epoch
//! the map is labeled from the test data, refined with one LVQ pass over
//! the training data, and labeled again.

use crate::config::MapConfig;
use crate::data::Dataset;
use crate::error::{KohonenError, Result};
use crate::som::{DecaySchedule, LabelGrid, LvqStats, Som};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Whether an epoch mutates the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochMode {
    /// Update weights after each sample.
    Train,
    /// Measure error only.
    Evaluate,
}

/// Errors measured during one epoch, passed to progress observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Mean squared error of the training pass.
    pub train_error: Option<f64>,
    /// Mean squared error of the evaluation pass.
    pub test_error: Option<f64>,
}

/// Results of a complete training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Mean squared quantization error per epoch on the training data.
    pub train_errors: Vec<f64>,
    /// Mean squared quantization error per epoch on the test data.
    pub test_errors: Vec<f64>,
    /// Final label grid.
    pub labels: LabelGrid,
    /// Outcome of the LVQ pass.
    pub lvq: LvqStats,
    /// Classification accuracy of the final map on the training data.
    pub train_accuracy: Option<f64>,
    /// Classification accuracy of the final map on the test data.
    pub test_accuracy: Option<f64>,
}

/// SOM trainer driving the epoch / label / LVQ protocol.
pub struct SomTrainer {
    config: MapConfig,
    schedule: DecaySchedule,
}

impl SomTrainer {
    /// Creates a new trainer with the given configuration.
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let schedule = DecaySchedule::new(&config);
        Ok(Self { config, schedule })
    }

    /// The trainer's configuration.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The learning-rate and neighborhood decay schedule.
    pub fn schedule(&self) -> &DecaySchedule {
        &self.schedule
    }

    /// Runs one pass over `data` at epoch `epoch`.
    ///
    /// Returns the mean winner distance, or `None` for an empty dataset.
    pub fn epoch(
        &self,
        som: &mut Som,
        epoch: usize,
        data: &Dataset,
        mode: EpochMode,
    ) -> Result<Option<f64>> {
        som.check_dataset(data)?;
        if data.is_empty() {
            return Ok(None);
        }

        let lr = self.schedule.learning_rate(epoch);
        let sigma = self.schedule.standard_deviation(epoch);

        let mut sum_error = 0.0;
        for sample in data {
            let bmu = som.find_bmu(&sample.features)?;
            if mode == EpochMode::Train {
                som.update(&sample.features, &bmu, lr, sigma)?;
            }
            sum_error += bmu.distance;
        }

        Ok(Some(sum_error / data.len() as f64))
    }

    /// Runs the full protocol.
    pub fn run(&self, som: &mut Som, train: &Dataset, test: &Dataset) -> Result<TrainingReport> {
        self.run_with_progress(som, train, test, |_| {})
    }

    /// Runs the full protocol, calling `on_epoch` after every epoch.
    pub fn run_with_progress<F>(
        &self,
        som: &mut Som,
        train: &Dataset,
        test: &Dataset,
        mut on_epoch: F,
    ) -> Result<TrainingReport>
    where
        F: FnMut(&EpochStats),
    {
        if som.dimension != self.config.grid_size || som.weight_dim != self.config.data_dimension {
            return Err(KohonenError::Config(format!(
                "map is {}x{} with {} features, trainer expects {}x{} with {}",
                som.dimension,
                som.dimension,
                som.weight_dim,
                self.config.grid_size,
                self.config.grid_size,
                self.config.data_dimension
            )));
        }
        som.check_dataset(train)?;
        som.check_dataset(test)?;
        if train.is_empty() {
            return Err(KohonenError::EmptyInput("No training samples provided".to_string()));
        }
        if test.is_empty() {
            warn!("Test set is empty: no test error will be recorded and labels stay unset");
        }

        let epochs = self.config.max_iterations;
        info!(
            "Training SOM: {}x{} grid, {} features, {} epochs, {} train / {} test samples",
            som.dimension,
            som.dimension,
            som.weight_dim,
            epochs,
            train.len(),
            test.len()
        );

        let mut train_errors = Vec::with_capacity(epochs);
        let mut test_errors = Vec::with_capacity(epochs);

        for t in 0..epochs {
            let train_error = self.epoch(som, t, train, EpochMode::Train)?;
            let test_error = self.epoch(som, t, test, EpochMode::Evaluate)?;
            train_errors.extend(train_error);
            test_errors.extend(test_error);

            debug!(
                "Epoch {}/{}: lr={:.4}, sigma={:.3}, train={:?}, test={:?}",
                t + 1,
                epochs,
                self.schedule.learning_rate(t),
                self.schedule.standard_deviation(t),
                train_error,
                test_error
            );
            on_epoch(&EpochStats {
                epoch: t,
                train_error,
                test_error,
            });
        }

        som.label(test)?;
        let rate = self.schedule.final_learning_rate();
        let lvq = som.lvq(train, rate)?;
        info!(
            "LVQ pass (rate {:.4}): {} reinforced, {} repelled",
            rate, lvq.reinforced, lvq.repelled
        );
        som.label(test)?;

        let labels = som.labels();
        let train_accuracy = som.accuracy(train)?;
        let test_accuracy = som.accuracy(test)?;
        info!(
            "SOM training completed: {} distinct labels on the grid",
            labels.distinct_labels().len()
        );

        Ok(TrainingReport {
            train_errors,
            test_errors,
            labels,
            lvq,
            train_accuracy,
            test_accuracy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MapConfig {
        MapConfig {
            grid_size: 4,
            learning_rate: 0.5,
            max_iterations: 10,
            data_dimension: 2,
            standard_deviation: 2.0,
            seed: Some(42),
        }
    }

    fn two_clusters() -> Dataset {
        Dataset::from_pairs(
            2,
            vec![
                ('A', vec![0.0, 0.0]),
                ('B', vec![1.0, 1.0]),
                ('C', vec![0.1, 0.9]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_trainer_rejects_invalid_config() {
        let config = MapConfig {
            standard_deviation: 0.9,
            ..test_config()
        };
        assert!(SomTrainer::new(config).is_err());
    }

    #[test]
    fn test_evaluate_epoch_matches_brute_force() {
        let config = test_config();
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();
        let data = two_clusters();

        let before = som.clone();
        let error = trainer
            .epoch(&mut som, 0, &data, EpochMode::Evaluate)
            .unwrap()
            .unwrap();
        assert_eq!(before, som);

        let expected: f64 = data
            .iter()
            .map(|s| {
                som.neurons
                    .iter()
                    .map(|n| n.distance_squared(&s.features))
                    .fold(f64::INFINITY, f64::min)
            })
            .sum::<f64>()
            / data.len() as f64;
        assert!((error - expected).abs() < 1e-12);
    }

    #[test]
    fn test_train_epoch_mutates_and_reports_pre_update_error() {
        let config = test_config();
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();
        let data = Dataset::from_pairs(2, vec![('A', vec![0.5, -0.5])]).unwrap();

        let expected = som.find_bmu(&[0.5, -0.5]).unwrap().distance;
        let before = som.clone();
        let error = trainer
            .epoch(&mut som, 0, &data, EpochMode::Train)
            .unwrap()
            .unwrap();

        assert_eq!(error, expected);
        assert_ne!(before, som);
    }

    #[test]
    fn test_empty_epoch() {
        let config = test_config();
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();

        let error = trainer
            .epoch(&mut som, 0, &Dataset::new(2), EpochMode::Train)
            .unwrap();
        assert_eq!(error, None);
    }

    #[test]
    fn test_run_records_one_error_per_epoch() {
        let config = test_config();
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();
        let data = two_clusters();

        let mut seen = Vec::new();
        let report = trainer
            .run_with_progress(&mut som, &data, &data, |stats| seen.push(stats.epoch))
            .unwrap();

        assert_eq!(report.train_errors.len(), 10);
        assert_eq!(report.test_errors.len(), 10);
        assert!(report.train_errors.iter().all(|&e| e >= 0.0));
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(report.lvq.reinforced + report.lvq.repelled, data.len());
        assert_eq!(report.labels.unset_count(), 0);
        assert!(report.test_accuracy.is_some());
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let data = two_clusters();
        let run = || {
            let config = test_config();
            let mut som = Som::new(&config).unwrap();
            let report = SomTrainer::new(config).unwrap().run(&mut som, &data, &data).unwrap();
            (som, report)
        };

        let (som_a, report_a) = run();
        let (som_b, report_b) = run();
        assert_eq!(som_a, som_b);
        assert_eq!(report_a, report_b);
    }

    #[test]
    fn test_run_labels_from_test_data() {
        let config = test_config();
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();
        let train = two_clusters();
        let test = Dataset::from_pairs(2, vec![('x', vec![0.0, 0.0]), ('y', vec![1.0, 1.0])]).unwrap();

        let report = trainer.run(&mut som, &train, &test).unwrap();
        for (_, _, label) in report.labels.iter() {
            assert!(matches!(label, Some('x') | Some('y')));
        }
    }

    #[test]
    fn test_run_with_empty_test_set() {
        let config = test_config();
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();

        let report = trainer.run(&mut som, &two_clusters(), &Dataset::new(2)).unwrap();
        assert_eq!(report.train_errors.len(), 10);
        assert!(report.test_errors.is_empty());
        assert_eq!(report.labels.unset_count(), 16);
        assert_eq!(report.test_accuracy, None);
        // Every winner is unlabeled, so LVQ pushes each one away.
        assert_eq!(report.lvq.repelled, 3);
    }

    #[test]
    fn test_run_rejects_empty_training_set() {
        let config = test_config();
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();

        let err = trainer.run(&mut som, &Dataset::new(2), &two_clusters()).unwrap_err();
        assert!(matches!(err, KohonenError::EmptyInput(_)));
    }

    #[test]
    fn test_run_rejects_mismatched_map() {
        let trainer = SomTrainer::new(test_config()).unwrap();
        let mut som = Som::new_zeros(3, 2);
        assert!(trainer.run(&mut som, &two_clusters(), &two_clusters()).is_err());
    }

    #[test]
    fn test_zero_epochs_still_labels_and_refines() {
        let config = MapConfig {
            max_iterations: 0,
            ..test_config()
        };
        let mut som = Som::new(&config).unwrap();
        let trainer = SomTrainer::new(config).unwrap();
        let data = two_clusters();

        let report = trainer.run(&mut som, &data, &data).unwrap();
        assert!(report.train_errors.is_empty());
        assert!(report.test_errors.is_empty());
        assert_eq!(report.labels.unset_count(), 0);
        assert_eq!(report.lvq.reinforced + report.lvq.repelled, 3);
    }
}
