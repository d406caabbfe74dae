/// Модуль предобработки данных

pub mod feature_engineering;
pub mod normalization;
pub mod projection;
pub mod sanitization;

pub use feature_engineering::FeatureEngineer;
pub use normalization::ColumnNormalizer;
pub use projection::{feature_matrix, lean_projection};
pub use sanitization::{SanitizeSummary, Sanitizer};
