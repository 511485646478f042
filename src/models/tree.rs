//! Дерево решений для классификации выживания

use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_tree::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::error::{Error, Result};

/// Обучаемый классификатор с единственным гиперпараметром - глубиной
pub trait Classifier {
    type Model: FittedClassifier;

    fn fit(&self, features: &Array2<f64>, target: &Array1<usize>, max_depth: usize) -> Result<Self::Model>;
}

pub trait FittedClassifier {
    fn predict(&self, features: &Array2<f64>) -> Array1<usize>;

    fn feature_importances(&self) -> Vec<f64>;
}

/// Обёртка над linfa-tree (критерий Gini). Обучение детерминировано, seed не нужен.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeClassifier;

impl TreeClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for TreeClassifier {
    type Model = TreeModel;

    fn fit(&self, features: &Array2<f64>, target: &Array1<usize>, max_depth: usize) -> Result<TreeModel> {
        if features.nrows() == 0 {
            return Err(Error::Model("Empty dataset".to_string()));
        }
        if features.nrows() != target.len() {
            return Err(Error::LengthMismatch {
                expected: features.nrows(),
                actual: target.len(),
            });
        }

        let dataset = Dataset::new(features.clone(), target.clone());
        let tree = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(Some(max_depth))
            .fit(&dataset)
            .map_err(model_error)?;

        Ok(TreeModel { max_depth, tree })
    }
}

fn model_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Model(e.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeModel {
    pub max_depth: usize,
    tree: DecisionTree<f64, usize>,
}

impl TreeModel {
    pub fn num_leaves(&self) -> usize {
        self.tree.num_leaves()
    }
}

impl FittedClassifier for TreeModel {
    fn predict(&self, features: &Array2<f64>) -> Array1<usize> {
        self.tree.predict(features)
    }

    /// Нормированное уменьшение impurity по признакам (сумма = 1)
    fn feature_importances(&self) -> Vec<f64> {
        let raw: Vec<f64> = self
            .tree
            .feature_importance()
            .into_iter()
            .map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
            .collect();

        let total: f64 = raw.iter().sum();
        if total > 0.0 {
            raw.into_iter().map(|v| v / total).collect()
        } else {
            raw
        }
    }
}
