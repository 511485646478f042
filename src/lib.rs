//! Titanic survival - очистка данных и дерево решений

pub mod config;
pub mod error;
pub mod frame;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod types;

pub use config::{AnalysisConfig, CleanConfig, LabelPolicy, SearchConfig};
pub use error::{Error, Result};
pub use frame::Frame;
pub use types::*;

// Re-export для удобства
pub use pipeline::{run_analysis, run_clean};
