//! Пайплайн подготовки признаков
//!
//! Этапы: загрузка → нормализация колонок → признаки → обработка
//! бесконечностей → сохранение. Каждый этап работает с одной таблицей.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::data::DataLoader;
use crate::error::{PipelineError, Result};
use crate::preprocessing::projection::lean_numeric_columns;
use crate::preprocessing::{
    feature_matrix, lean_projection, ColumnNormalizer, FeatureEngineer, Sanitizer,
};
use crate::types::Table;

pub const SOURCE_PATH: &str = "data/external/bankloan.csv";
pub const DESTINATION_PATH: &str = "data/feature_store/data_with_new_features.csv";

/// Поведение при ошибке одного из этапов 1-4
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Остановиться на первой ошибке, ничего не сохраняя
    #[default]
    Abort,
    /// Записать ошибку в лог и перейти к следующему этапу
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Normalize,
    Derive,
    Sanitize,
    Persist,
}

impl Stage {
    pub fn step(self) -> u8 {
        match self {
            Stage::Load => 1,
            Stage::Normalize => 2,
            Stage::Derive => 3,
            Stage::Sanitize => 4,
            Stage::Persist => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageFailure {
    pub stage: Stage,
    pub code: Option<&'static str>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub rows_loaded: usize,
    pub infinities_replaced: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
    /// Размер матрицы сокращенного представления, если его удалось построить
    pub lean_shape: Option<(usize, usize)>,
    pub failures: Vec<StageFailure>,
}

pub struct Pipeline {
    source: PathBuf,
    destination: PathBuf,
    policy: FailurePolicy,
    normalizer: ColumnNormalizer,
}

impl Pipeline {
    pub fn new<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            policy: FailurePolicy::default(),
            normalizer: ColumnNormalizer::new(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn run(&self) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();

        // 1. Загрузка
        let mut table = match DataLoader::load(&self.source) {
            Ok(table) => {
                report.rows_loaded = table.len();
                info!(rows = table.len(), "Step 1/5 - Data loaded successfully.");
                table
            }
            Err(e) => {
                self.fail(Stage::Load, e, &mut report)?;
                Table::default()
            }
        };

        // 2. Нормализация колонок
        match self.normalizer.normalize(&mut table) {
            Ok(_) => info!("Step 2/5 - Columns standardized."),
            Err(e) => self.fail(Stage::Normalize, PipelineError::Normalize(e), &mut report)?,
        }

        // 3. Новые признаки
        match FeatureEngineer::derive(&mut table) {
            Ok(()) => info!("Step 3/5 - New features added."),
            Err(e) => self.fail(Stage::Derive, PipelineError::Derive(e), &mut report)?,
        }

        // 4. Бесконечные значения
        match Sanitizer::sanitize(&mut table) {
            Ok(summary) => {
                report.infinities_replaced = summary.infinities_replaced;
                report.rows_dropped = summary.rows_dropped;
                info!(
                    rows_dropped = summary.rows_dropped,
                    "Step 4/5 - No infinite values left."
                );
            }
            Err(e) => self.fail(Stage::Sanitize, PipelineError::Sanitize(e), &mut report)?,
        }

        // Сокращенное представление считается, но не сохраняется
        report.lean_shape = match lean_projection(&table)
            .and_then(|lean| feature_matrix(&lean, &lean_numeric_columns()))
        {
            Ok(matrix) => Some(matrix.dim()),
            Err(e) => {
                debug!("lean projection unavailable: {}", e);
                None
            }
        };

        // 5. Сохранение: ошибка всегда прерывает запуск
        DataLoader::save(&table, &self.destination)?;
        report.rows_written = table.len();
        info!(
            rows = table.len(),
            path = %self.destination.display(),
            "Step 5/5 - Data saved."
        );

        Ok(report)
    }

    fn fail(&self, stage: Stage, err: PipelineError, report: &mut PipelineReport) -> Result<()> {
        error!(step = stage.step(), "{}", err);
        match self.policy {
            FailurePolicy::Abort => Err(err),
            FailurePolicy::Continue => {
                report.failures.push(StageFailure {
                    stage,
                    code: err.code(),
                    message: err.to_string(),
                });
                Ok(())
            }
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(SOURCE_PATH, DESTINATION_PATH)
    }
}
