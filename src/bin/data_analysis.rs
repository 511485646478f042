/// Обучение дерева решений на очищенных данных Titanic
///
/// Пример:
///   data_analysis data/cleaned/cleaned_train.csv data/cleaned/cleaned_test.csv results/

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use titanic_survival::{run_analysis, AnalysisConfig, SearchConfig};

#[derive(Parser)]
#[command(name = "data_analysis")]
#[command(about = "Cross-validate tree depth, fit a decision tree and export predictions and feature ranks")]
struct Cli {
    /// Cleaned training table
    training_data: PathBuf,
    /// Cleaned testing table
    testing_data: PathBuf,
    /// Folder for the model, predictions and reports
    output_folder: PathBuf,

    /// Number of cross-validation folds
    #[arg(long, default_value = "10")]
    folds: usize,

    /// Largest max_depth tried by the search
    #[arg(long, default_value = "49")]
    max_depth: usize,

    /// Shuffle folds with this seed
    #[arg(long)]
    shuffle_seed: Option<u64>,
}

impl From<Cli> for AnalysisConfig {
    fn from(cli: Cli) -> Self {
        Self {
            train_path: cli.training_data,
            test_path: cli.testing_data,
            output_dir: cli.output_folder,
            search: SearchConfig {
                max_depth: cli.max_depth,
                folds: cli.folds,
                shuffle_seed: cli.shuffle_seed,
                ..SearchConfig::default()
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic_survival=info,data_analysis=info".into()),
        )
        .init();

    let config = AnalysisConfig::from(Cli::parse());
    let report = run_analysis(&config).context("Analysis failed")?;

    for rank in report.feature_ranks.iter().take(3) {
        tracing::info!("#{} {} ({:.4})", rank.rank, rank.feature, rank.importance);
    }

    Ok(())
}
