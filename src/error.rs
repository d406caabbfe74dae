//! Ошибки пайплайна признаков

use std::path::PathBuf;

use thiserror::Error;

/// Ошибки операций над таблицей
#[derive(Error, Debug)]
pub enum TableError {
    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("column '{column}' row {row}: expected a number, got '{value}'")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// Ошибки чтения исходного CSV
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("source has no header row")]
    NoHeader,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Ошибка этапа пайплайна. Коды 001-004 соответствуют этапам 1-4.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{source}: failed to load data from {}. Error type 001.", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    #[error("{0}: failed to standardize columns. Error type 002.")]
    Normalize(#[source] TableError),

    #[error("{0}: failed to create new features. Error type 003.")]
    Derive(#[source] TableError),

    #[error("{0}: failed to treat infinite values. Error type 004.")]
    Sanitize(#[source] TableError),

    #[error("failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to prepare {}: {source}", .path.display())]
    PersistIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Код диагностики; у ошибок сохранения кода нет
    pub fn code(&self) -> Option<&'static str> {
        match self {
            PipelineError::Load { .. } => Some("001"),
            PipelineError::Normalize(_) => Some("002"),
            PipelineError::Derive(_) => Some("003"),
            PipelineError::Sanitize(_) => Some("004"),
            PipelineError::Persist { .. } | PipelineError::PersistIo { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
