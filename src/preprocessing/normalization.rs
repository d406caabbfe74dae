//! Нормализация имен колонок

use tracing::debug;

use crate::error::TableError;
use crate::types::{columns, Table};

/// Исходные заголовки датасета и их канонические имена
pub const RENAME_COLUMNS: [(&str, &str); 13] = [
    ("Age", columns::AGE),
    ("Experience", columns::EXPERIENCE),
    ("Income", columns::INCOME),
    ("ZIP.Code", columns::ZIP_CODE),
    ("Family", columns::FAMILY),
    ("CCAvg", columns::CC_AVG),
    ("Education", columns::EDUCATION),
    ("Mortgage", columns::MORTGAGE),
    ("Personal.Loan", columns::PERSONAL_LOAN),
    ("Securities.Account", columns::SECURITIES_ACCOUNT),
    ("CD.Account", columns::CD_ACCOUNT),
    ("Online", columns::ONLINE),
    ("CreditCard", columns::CREDIT_CARD),
];

pub struct ColumnNormalizer {
    mapping: Vec<(String, String)>,
}

impl ColumnNormalizer {
    pub fn new() -> Self {
        Self::with_mapping(RENAME_COLUMNS.iter().copied())
    }

    pub fn with_mapping<'a, I>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            mapping: mapping
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Переименовывает известные колонки, остальные оставляет как есть.
    /// Отсутствующие исходные колонки пропускаются. Если после
    /// переименования имена повторяются, таблица не меняется.
    pub fn normalize(&self, table: &mut Table) -> Result<usize, TableError> {
        let mut renamed = 0;
        let new_columns: Vec<String> = table
            .columns()
            .iter()
            .map(|column| match self.canonical_name(column) {
                Some(canonical) => {
                    renamed += 1;
                    canonical.to_string()
                }
                None => column.clone(),
            })
            .collect();

        table.set_columns(new_columns)?;
        debug!(renamed, "columns renamed");
        Ok(renamed)
    }

    fn canonical_name(&self, column: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|(from, _)| from == column)
            .map(|(_, to)| to.as_str())
    }
}

impl Default for ColumnNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
