//! Kohonen CLI - trains a map from a parameter file.
//!
//! Reads the hyperparameters and dataset paths from a parameter file,
//! trains the map, and writes the error traces and the label grid.

use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use kohonen::report::{save_clustering, save_errors, save_summary};
use kohonen::{load_dataset, Parameters, Result, Som, SomTrainer};
use log::error;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kohonen")]
#[command(version)]
#[command(about = "Self-organizing map training with LVQ refinement", long_about = None)]
struct Cli {
    /// Parameter file (`name value` per line)
    params: PathBuf,

    /// Output file for per-epoch errors
    #[arg(short, long, default_value = "errors.txt")]
    errors: PathBuf,

    /// Output file for the label grid
    #[arg(short, long, default_value = "clustering.txt")]
    clustering: PathBuf,

    /// Optional JSON summary of the run
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Random seed (overrides the parameter file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(e) = train(cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn train(cli: Cli) -> Result<()> {
    let start_time = Instant::now();

    let mut params = Parameters::from_file(&cli.params)?;
    if cli.seed.is_some() {
        params.map.seed = cli.seed;
    }
    let config = params.map.clone();

    println!("Kohonen map trainer");
    println!("   Parameters: {}", cli.params.display());
    println!();

    let train_set = load_dataset(&params.train_file, config.data_dimension)?;
    let test_set = load_dataset(&params.test_file, config.data_dimension)?;
    println!(
        "✓ Loaded {} training and {} test samples",
        train_set.len(),
        test_set.len()
    );

    let mut som = Som::new(&config)?;
    let trainer = SomTrainer::new(config.clone())?;

    let pb = ProgressBar::new(config.max_iterations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} epochs {msg}")
            .unwrap()
            .progress_chars("█▓▒░  "),
    );

    let report = trainer.run_with_progress(&mut som, &train_set, &test_set, |stats| {
        if let Some(err) = stats.train_error {
            pb.set_message(format!("train error {:.4}", err));
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "✓ Trained {}x{} map for {} epochs",
        config.grid_size, config.grid_size, config.max_iterations
    );
    if let (Some(train_err), Some(test_err)) =
        (report.train_errors.last(), report.test_errors.last())
    {
        println!("   Final error: train {:.6}, test {:.6}", train_err, test_err);
    }
    println!(
        "   LVQ: {} reinforced, {} repelled",
        report.lvq.reinforced, report.lvq.repelled
    );
    if let Some(acc) = report.test_accuracy {
        println!("   Test accuracy: {:.2}%", acc * 100.0);
    }

    save_errors(&cli.errors, &report)?;
    save_clustering(&cli.clustering, &report)?;
    if let Some(path) = &cli.summary {
        save_summary(path, &config, &report)?;
    }

    println!();
    println!("✓ Wrote {} and {}", cli.errors.display(), cli.clustering.display());
    println!("  Completed in {}", HumanDuration(start_time.elapsed()));

    Ok(())
}
