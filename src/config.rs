//! Конфигурация запусков очистки и анализа

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Поведение при отсутствии метки для пассажира тестовой выборки
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Left join: цель остаётся пустой
    #[default]
    Left,
    /// Любая отсутствующая метка - ошибка
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub labels_path: PathBuf,
    pub cleaned_train_path: PathBuf,
    pub cleaned_test_path: PathBuf,
    #[serde(default)]
    pub label_policy: LabelPolicy,
}

/// Параметры перебора глубины дерева
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_depth")]
    pub min_depth: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_folds")]
    pub folds: usize,
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

fn default_min_depth() -> usize { 1 }
fn default_max_depth() -> usize { 49 }
fn default_folds() -> usize { 10 }

impl SearchConfig {
    pub fn depths(&self) -> std::ops::RangeInclusive<usize> {
        self.min_depth..=self.max_depth
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_depth: default_min_depth(),
            max_depth: default_max_depth(),
            folds: default_folds(),
            shuffle_seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub search: SearchConfig,
}
