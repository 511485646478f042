/// Очистка сырых данных Titanic
///
/// Пример:
///   clean_data data/raw/train.csv data/raw/test.csv data/raw/gender_submission.csv \
///       data/cleaned/cleaned_train.csv data/cleaned/cleaned_test.csv

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use titanic_survival::{run_clean, CleanConfig, LabelPolicy};

#[derive(Parser)]
#[command(name = "clean_data")]
#[command(about = "Select features, join test labels, fill missing values and encode Sex")]
struct Cli {
    /// Raw training table (train.csv)
    training_data: PathBuf,
    /// Raw testing table (test.csv)
    testing_data: PathBuf,
    /// Test labels keyed by PassengerId (gender_submission.csv)
    gender_submission: PathBuf,
    /// Output path of the cleaned training table
    cleaned_train: PathBuf,
    /// Output path of the cleaned testing table
    cleaned_test: PathBuf,

    /// Fail when a test passenger has no label instead of leaving Survived empty
    #[arg(long)]
    strict_labels: bool,
}

impl From<Cli> for CleanConfig {
    fn from(cli: Cli) -> Self {
        Self {
            train_path: cli.training_data,
            test_path: cli.testing_data,
            labels_path: cli.gender_submission,
            cleaned_train_path: cli.cleaned_train,
            cleaned_test_path: cli.cleaned_test,
            label_policy: if cli.strict_labels {
                LabelPolicy::Strict
            } else {
                LabelPolicy::Left
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic_survival=info,clean_data=info".into()),
        )
        .init();

    let config = CleanConfig::from(Cli::parse());
    let report = run_clean(&config).context("Data cleaning failed")?;

    if report.unlabeled_test_rows > 0 {
        tracing::warn!("{} test rows written without Survived", report.unlabeled_test_rows);
    }

    Ok(())
}
