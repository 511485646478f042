/// Пакетные пайплайны: очистка и анализ

pub mod analysis;
pub mod clean;

pub use analysis::{run_analysis, AnalysisReport};
pub use clean::{clean, run_clean, CleanReport};
