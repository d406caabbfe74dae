//! Обработка бесконечных значений

use serde::Serialize;
use tracing::debug;

use crate::error::TableError;
use crate::types::{Table, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeSummary {
    pub infinities_replaced: usize,
    pub rows_dropped: usize,
}

pub struct Sanitizer;

impl Sanitizer {
    /// Заменяет ±inf на пропуск и удаляет строки, где есть хотя бы один
    /// пропуск в любой колонке.
    pub fn sanitize(table: &mut Table) -> Result<SanitizeSummary, TableError> {
        table.validate()?;

        let mut infinities_replaced = 0;
        table.map_values(|value| {
            if value.is_infinite() {
                *value = Value::Missing;
                infinities_replaced += 1;
            }
        });

        let rows_dropped = table.retain_rows(|row| !row.iter().any(Value::is_missing));

        debug!(infinities_replaced, rows_dropped, "table sanitized");
        Ok(SanitizeSummary {
            infinities_replaced,
            rows_dropped,
        })
    }
}
