//! Разбиение таблиц, предсказания и метрики качества

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::models::tree::FittedClassifier;
use crate::types::{AccuracySummary, FeatureRank, PREDICTION_COLUMN, TARGET_COLUMN};

/// Делит таблицу на признаки (все колонки кроме последней) и цель (последняя, Survived)
pub fn split_data(data: &Frame) -> Result<(Frame, Array1<usize>)> {
    match data.columns.last() {
        Some(last) if last == TARGET_COLUMN => {}
        _ => {
            return Err(Error::MissingColumn {
                column: format!("{TARGET_COLUMN} (as last column)"),
                available: data.columns.clone(),
            })
        }
    }

    let target_col = data.values.column(data.ncols() - 1);
    let mut target = Array1::zeros(data.nrows());
    for (i, &value) in target_col.iter().enumerate() {
        target[i] = to_label(value).ok_or_else(|| Error::InvalidTarget {
            row: data.index[i].clone(),
            value,
        })?;
    }

    Ok((data.drop_last_column(), target))
}

fn to_label(value: f64) -> Option<usize> {
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}

/// Копия полной таблицы с колонкой Prediction
pub fn predict<M: FittedClassifier>(model: &M, features: &Frame, whole: &Frame) -> Result<Frame> {
    let predictions = model.predict(&features.values).mapv(|p| p as f64);
    whole.with_column(PREDICTION_COLUMN, &predictions)
}

/// Сводка точности; пустая выборка - ошибка
pub fn get_accuracies(predicted: &Frame, set_name: &str) -> Result<AccuracySummary> {
    let actual = predicted.column(TARGET_COLUMN)?;
    let prediction = predicted.column(PREDICTION_COLUMN)?;

    let n_correct_pred = actual.iter().zip(prediction.iter()).filter(|(a, p)| a == p).count();
    let n_incorrect_pred = actual.len() - n_correct_pred;
    let n_total = n_correct_pred + n_incorrect_pred;

    if n_total == 0 {
        return Err(Error::EmptyPredictionSet {
            set: set_name.to_string(),
        });
    }

    Ok(AccuracySummary {
        set: set_name.to_string(),
        n_total,
        n_correct_pred,
        n_incorrect_pred,
        accuracy: round4(n_correct_pred as f64 / n_total as f64),
    })
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

pub fn feature_rank<M: FittedClassifier>(model: &M, features: &[String]) -> Result<Vec<FeatureRank>> {
    rank_importances(&model.feature_importances(), features)
}

/// Сортировка по убыванию важности, стабильная: равные остаются в исходном порядке.
/// Нечисловые важности (NaN, бесконечность) отклоняются.
pub fn rank_importances(importances: &[f64], features: &[String]) -> Result<Vec<FeatureRank>> {
    if importances.len() != features.len() {
        return Err(Error::LengthMismatch {
            expected: features.len(),
            actual: importances.len(),
        });
    }
    if let Some(idx) = importances.iter().position(|v| !v.is_finite()) {
        return Err(Error::Model(format!(
            "importance of feature '{}' is not finite: {}",
            features[idx], importances[idx]
        )));
    }

    let mut order: Vec<usize> = (0..features.len()).collect();
    order.sort_by(|&a, &b| importances[b].total_cmp(&importances[a]));

    Ok(order
        .into_iter()
        .enumerate()
        .map(|(rank, idx)| FeatureRank {
            rank: rank + 1,
            feature: features[idx].clone(),
            importance: importances[idx],
        })
        .collect())
}
