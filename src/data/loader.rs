//! Чтение и запись CSV
//!
//! Типы колонок выводятся по всем значениям колонки: целые, дробные или текст.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim, Writer};
use tracing::debug;

use crate::error::{PipelineError, Result, SourceError};
use crate::types::{Table, Value};

/// Значения, которые читаются как пропуск (набор по умолчанию у pandas)
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(field: &str) -> bool {
    NA_TOKENS.contains(&field)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Int,
    Float,
    Text,
}

pub struct DataLoader;

impl DataLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Table> {
        let path = path.as_ref();
        Self::read_table(path).map_err(|source| PipelineError::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Перезаписывает файл назначения; ошибки записи не перехватываются.
    pub fn save<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PipelineError::PersistIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let persist_err = |source: csv::Error| PipelineError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = Writer::from_path(path).map_err(persist_err)?;
        writer.write_record(table.columns()).map_err(persist_err)?;
        for row in table.rows() {
            writer
                .write_record(row.iter().map(|v| v.to_string()))
                .map_err(persist_err)?;
        }
        writer.flush().map_err(|source| PipelineError::PersistIo {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), rows = table.len(), "table written");
        Ok(())
    }

    fn read_table(path: &Path) -> std::result::Result<Table, SourceError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(SourceError::NoHeader);
        }

        let mut raw: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            raw.push(record.iter().map(str::to_string).collect());
        }

        let types: Vec<ColumnType> = (0..headers.len())
            .map(|idx| infer_column_type(raw.iter().map(|r| r[idx].as_str())))
            .collect();

        let rows: Vec<Vec<Value>> = raw
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .zip(&types)
                    .map(|(field, ty)| parse_field(field, *ty))
                    .collect()
            })
            .collect();

        debug!(path = %path.display(), columns = headers.len(), "table read");
        Ok(Table::from_rows(headers, rows)?)
    }
}

fn infer_column_type<'a, I>(fields: I) -> ColumnType
where
    I: Iterator<Item = &'a str>,
{
    let mut ty = ColumnType::Int;
    for field in fields.filter(|f| !is_na(f)) {
        if ty == ColumnType::Int && field.parse::<i64>().is_err() {
            ty = ColumnType::Float;
        }
        if ty == ColumnType::Float && field.parse::<f64>().is_err() {
            return ColumnType::Text;
        }
    }
    ty
}

fn parse_field(field: String, ty: ColumnType) -> Value {
    if is_na(&field) {
        return Value::Missing;
    }
    match ty {
        ColumnType::Int => field.parse().map(Value::Int).unwrap_or(Value::Missing),
        ColumnType::Float => field.parse().map(Value::Float).unwrap_or(Value::Missing),
        ColumnType::Text => Value::Text(field),
    }
}
