//! Bankloan features - подготовка признаков для анализа кредитного риска

pub mod data;
pub mod error;
pub mod pipeline;
pub mod preprocessing;
pub mod types;

pub use error::{PipelineError, SourceError, TableError};
pub use pipeline::{FailurePolicy, Pipeline, PipelineReport, Stage};
pub use types::{Table, Value};

// Re-export для удобства
pub use data::DataLoader;
pub use preprocessing::{ColumnNormalizer, FeatureEngineer, Sanitizer};
