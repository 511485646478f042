//! Обучение дерева, предсказания и отчёты

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::io;
use crate::models::{
    cross_validate, feature_rank, get_accuracies, predict, split_data, Classifier, TreeClassifier,
    TreeModel,
};
use crate::types::{AccuracySummary, FeatureRank};

pub const MODEL_FILE: &str = "classification_tree_model.json";
pub const TRAIN_PREDICTION_FILE: &str = "train_prediction.csv";
pub const TEST_PREDICTION_FILE: &str = "test_prediction.csv";
pub const ACCURACIES_FILE: &str = "classification_accuracies.csv";
pub const FEATURE_RANKS_FILE: &str = "feature_ranks.csv";
pub const DEPTH_SCORES_FILE: &str = "cv_depth_scores.csv";

/// Сериализуемая модель вместе с именами признаков
#[derive(Debug, Serialize)]
struct SavedModel<'a> {
    feature_names: &'a [String],
    selected_depth: usize,
    model: &'a TreeModel,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub best_depth: usize,
    pub accuracies: Vec<AccuracySummary>,
    pub feature_ranks: Vec<FeatureRank>,
    pub outputs: Vec<PathBuf>,
}

pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport> {
    let train = io::read_frame(&config.train_path)?;
    let test = io::read_frame(&config.test_path)?;
    tracing::info!("Cleaned data imported: {} train rows, {} test rows", train.nrows(), test.nrows());

    let (x_train, y_train) = split_data(&train)?;
    let (x_test, _) = split_data(&test)?;
    if x_test.columns != x_train.columns {
        return Err(Error::MissingColumn {
            column: x_train.columns.join(","),
            available: x_test.columns.clone(),
        });
    }

    let classifier = TreeClassifier::new();
    let search = cross_validate(&classifier, &x_train.values, &y_train, &config.search)?;

    let tree = classifier.fit(&x_train.values, &y_train, search.best_depth)?;
    tracing::info!("Decision tree fitted: max_depth {}, {} leaves", search.best_depth, tree.num_leaves());

    let train_prediction = predict(&tree, &x_train, &train)?;
    let test_prediction = predict(&tree, &x_test, &test)?;

    let accuracies = vec![
        get_accuracies(&train_prediction, "train")?,
        get_accuracies(&test_prediction, "test")?,
    ];
    for summary in &accuracies {
        tracing::info!(
            "{} accuracy {:.4} ({}/{})",
            summary.set,
            summary.accuracy,
            summary.n_correct_pred,
            summary.n_total
        );
    }

    let feature_ranks = feature_rank(&tree, &x_train.columns)?;

    fs::create_dir_all(&config.output_dir).map_err(|e| Error::io(&config.output_dir, e))?;
    let out = |name: &str| config.output_dir.join(name);

    io::write_json(
        &out(MODEL_FILE),
        &SavedModel {
            feature_names: &x_train.columns,
            selected_depth: search.best_depth,
            model: &tree,
        },
    )?;
    io::write_frame(&out(TRAIN_PREDICTION_FILE), &train_prediction)?;
    io::write_frame(&out(TEST_PREDICTION_FILE), &test_prediction)?;
    io::write_records(&out(ACCURACIES_FILE), &accuracies)?;
    io::write_records(&out(FEATURE_RANKS_FILE), &feature_ranks)?;
    io::write_records(&out(DEPTH_SCORES_FILE), &search.scores)?;

    let outputs: Vec<PathBuf> = [
        MODEL_FILE,
        TRAIN_PREDICTION_FILE,
        TEST_PREDICTION_FILE,
        ACCURACIES_FILE,
        FEATURE_RANKS_FILE,
        DEPTH_SCORES_FILE,
    ]
    .iter()
    .map(|name| out(*name))
    .collect();
    tracing::info!("Results exported to {}", config.output_dir.display());

    Ok(AnalysisReport {
        best_depth: search.best_depth,
        accuracies,
        feature_ranks,
        outputs,
    })
}
