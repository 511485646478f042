//! Кросс-валидация и подбор глубины дерева

use std::collections::HashMap;

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::models::tree::{Classifier, FittedClassifier};
use crate::types::DepthScore;

/// Стратифицированный K-Fold: доля классов в каждом тестовом фолде
/// примерно совпадает с долей во всей выборке. Без seed порядок строк сохраняется.
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    n_splits: usize,
    random_state: Option<u64>,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            random_state: None,
        }
    }

    pub fn with_random_state(mut self, random_state: Option<u64>) -> Self {
        self.random_state = random_state;
        self
    }

    /// Номер тестового фолда для каждой строки
    pub fn test_folds(&self, y: &Array1<usize>) -> Result<Vec<usize>> {
        let n_samples = y.len();
        let k = self.n_splits;

        if k < 2 {
            return Err(Error::CrossValidation(format!("n_splits must be at least 2, got {k}")));
        }
        if n_samples < k {
            return Err(Error::CrossValidation(format!(
                "n_samples ({n_samples}) must be >= n_splits ({k})"
            )));
        }

        // Классы нумеруются в порядке первого появления
        let mut class_of: HashMap<usize, usize> = HashMap::new();
        let encoded: Vec<usize> = y
            .iter()
            .map(|label| {
                let next = class_of.len();
                *class_of.entry(*label).or_insert(next)
            })
            .collect();
        let n_classes = class_of.len();

        let mut counts = vec![0usize; n_classes];
        for &c in &encoded {
            counts[c] += 1;
        }
        let min_count = counts.iter().copied().min().unwrap_or(0);
        if counts.iter().all(|&c| c < k) {
            return Err(Error::CrossValidation(format!(
                "n_splits ({k}) is greater than the number of members in each class"
            )));
        }
        if min_count < k {
            tracing::warn!(
                "The least populated class has only {} members, fewer than n_splits = {}",
                min_count,
                k
            );
        }

        // Отсортированные метки раздаются по фолдам по кругу
        let mut sorted = encoded.clone();
        sorted.sort_unstable();
        let mut allocation = vec![vec![0usize; n_classes]; k];
        for (i, &c) in sorted.iter().enumerate() {
            allocation[i % k][c] += 1;
        }

        let mut rng = self.random_state.map(StdRng::seed_from_u64);
        let mut folds = vec![0usize; n_samples];
        for class in 0..n_classes {
            let mut class_folds: Vec<usize> = (0..k)
                .flat_map(|fold| std::iter::repeat(fold).take(allocation[fold][class]))
                .collect();
            if let Some(rng) = rng.as_mut() {
                class_folds.shuffle(rng);
            }

            let rows = encoded.iter().enumerate().filter(|(_, &c)| c == class).map(|(i, _)| i);
            for (row, fold) in rows.zip(class_folds) {
                folds[row] = fold;
            }
        }

        Ok(folds)
    }

    /// Пары (train, test) индексов для каждого фолда
    pub fn split(&self, y: &Array1<usize>) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        let folds = self.test_folds(y)?;

        Ok((0..self.n_splits)
            .map(|fold| {
                let (test, train): (Vec<usize>, Vec<usize>) =
                    (0..folds.len()).partition(|&i| folds[i] == fold);
                (train, test)
            })
            .collect())
    }
}

/// Точность модели на каждом фолде
pub fn cross_val_score<C: Classifier>(
    classifier: &C,
    features: &Array2<f64>,
    target: &Array1<usize>,
    max_depth: usize,
    cv: &StratifiedKFold,
) -> Result<Vec<f64>> {
    if features.nrows() != target.len() {
        return Err(Error::LengthMismatch {
            expected: features.nrows(),
            actual: target.len(),
        });
    }

    let mut scores = Vec::new();
    for (train_idx, test_idx) in cv.split(target)? {
        let x_train = features.select(Axis(0), &train_idx);
        let y_train = target.select(Axis(0), &train_idx);
        let x_test = features.select(Axis(0), &test_idx);
        let y_test = target.select(Axis(0), &test_idx);

        let model = classifier.fit(&x_train, &y_train, max_depth)?;
        let predicted = model.predict(&x_test);

        let correct = predicted.iter().zip(y_test.iter()).filter(|(p, a)| p == a).count();
        scores.push(correct as f64 / test_idx.len() as f64);
    }

    Ok(scores)
}

/// Результат перебора глубины
#[derive(Debug, Clone, PartialEq)]
pub struct DepthSearch {
    pub best_depth: usize,
    pub best_score: f64,
    pub scores: Vec<DepthScore>,
}

/// Перебирает все глубины из конфигурации и выбирает глубину с максимальной
/// средней точностью. При равенстве побеждает меньшая глубина.
pub fn cross_validate<C: Classifier>(
    classifier: &C,
    features: &Array2<f64>,
    target: &Array1<usize>,
    search: &SearchConfig,
) -> Result<DepthSearch> {
    if search.min_depth == 0 || search.min_depth > search.max_depth {
        return Err(Error::CrossValidation(format!(
            "invalid depth range {}..={}",
            search.min_depth, search.max_depth
        )));
    }

    let cv = StratifiedKFold::new(search.folds).with_random_state(search.shuffle_seed);

    let mut scores = Vec::with_capacity(search.depths().count());
    let mut best: Option<DepthScore> = None;

    for depth in search.depths() {
        let fold_scores = cross_val_score(classifier, features, target, depth, &cv)?;
        let mean_accuracy = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
        tracing::debug!("max_depth={} mean CV accuracy {:.4}", depth, mean_accuracy);

        let score = DepthScore {
            max_depth: depth,
            mean_accuracy,
        };
        if best.map_or(true, |b| mean_accuracy > b.mean_accuracy) {
            best = Some(score);
        }
        scores.push(score);
    }

    let best = best.ok_or_else(|| Error::CrossValidation("no candidate depths".to_string()))?;
    tracing::info!(
        "Best max_depth {} with mean CV accuracy {:.4} over {} folds",
        best.max_depth,
        best.mean_accuracy,
        search.folds
    );

    Ok(DepthSearch {
        best_depth: best.max_depth,
        best_score: best.mean_accuracy,
        scores,
    })
}
