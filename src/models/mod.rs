/// ML модели

pub mod evaluation;
pub mod selection;
pub mod tree;

pub use evaluation::{feature_rank, get_accuracies, predict, split_data};
pub use selection::{cross_val_score, cross_validate, DepthSearch, StratifiedKFold};
pub use tree::{Classifier, FittedClassifier, TreeClassifier, TreeModel};
