/// Типы данных: таблица заявителей и значения ячеек

use std::collections::HashSet;
use std::fmt;

use crate::error::TableError;

/// Канонические имена колонок (после нормализации)
pub mod columns {
    pub const AGE: &str = "age";
    pub const EXPERIENCE: &str = "experience";
    pub const INCOME: &str = "income";
    pub const ZIP_CODE: &str = "zip_code";
    pub const FAMILY: &str = "family";
    pub const CC_AVG: &str = "cc_avg";
    pub const EDUCATION: &str = "education";
    pub const MORTGAGE: &str = "mortgage";
    pub const PERSONAL_LOAN: &str = "personal_loan";
    pub const SECURITIES_ACCOUNT: &str = "securities_account";
    pub const CD_ACCOUNT: &str = "cd_account";
    pub const ONLINE: &str = "online";
    pub const CREDIT_CARD: &str = "credit_card";

    // Производные признаки
    pub const AGE_BRACKET: &str = "age_bracket";
    pub const AGE_BRACKET_NAME: &str = "age_bracket_name";
    pub const INCOME_PER_FAMILY_MEMBER: &str = "income_per_family_member";
    pub const CC_TO_INCOME_RATIO: &str = "cc_to_income_ratio";
    pub const DEBT_TO_INCOME_RATIO: &str = "debt_to_income_ratio";
    pub const FINANCIAL_MATURITY_INDEX: &str = "financial_maturity_index";
    pub const EXPERIENCE_BRACKET: &str = "experience_bracket";
    pub const EDUCATION_DEGREE: &str = "education_degree";
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Missing => Some(f64::NAN),
            Value::Text(_) => None,
        }
    }

    /// NaN считается пропуском так же, как явный `Missing`
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Value::Float(v) if v.is_infinite())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            // 50.0 пишется как "50.0", а не "50", иначе колонка прочитается как целая
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => {
                write!(f, "{:.1}", v)
            }
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
            Value::Missing => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// Таблица с упорядоченными колонками; каждая строка содержит ровно одно
/// значение на колонку.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Result<Self, TableError> {
        Self::from_rows(columns, Vec::new())
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let table = Self { columns, rows };
        table.validate()?;
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column).ok()?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Числовая колонка: пропуски становятся NaN, текст — ошибка
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, TableError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                values[idx].as_f64().ok_or_else(|| TableError::NonNumeric {
                    column: name.to_string(),
                    row,
                    value: values[idx].to_string(),
                })
            })
            .collect()
    }

    /// Переименование отсутствующей колонки ничего не делает и возвращает `false`.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<bool, TableError> {
        let Some(idx) = self.columns.iter().position(|c| c == from) else {
            return Ok(false);
        };
        if from != to && self.has_column(to) {
            return Err(TableError::DuplicateColumn(to.to_string()));
        }
        self.columns[idx] = to.to_string();
        Ok(true)
    }

    /// Заменяет все имена колонок разом.
    pub fn set_columns(&mut self, columns: Vec<String>) -> Result<(), TableError> {
        if columns.len() != self.columns.len() {
            return Err(TableError::LengthMismatch {
                column: "<header>".to_string(),
                expected: self.columns.len(),
                found: columns.len(),
            });
        }
        ensure_unique(&columns)?;
        self.columns = columns;
        Ok(())
    }

    pub fn push_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), TableError> {
        if self.has_column(name) {
            return Err(TableError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<(), TableError>
    where
        F: FnMut(&Value) -> Value,
    {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    /// Применяет `f` ко всем ячейкам таблицы.
    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        for value in self.rows.iter_mut().flatten() {
            f(value);
        }
    }

    /// Оставляет строки, для которых `keep` вернул `true`; возвращает число удаленных.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[Value]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    pub fn select(&self, names: &[&str]) -> Result<Table, TableError> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let rows: Vec<Vec<Value>> = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Table::from_rows(names.iter().map(|n| n.to_string()).collect(), rows)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        ensure_unique(&self.columns)?;
        for (row, values) in self.rows.iter().enumerate() {
            if values.len() != self.columns.len() {
                return Err(TableError::RaggedRow {
                    row,
                    expected: self.columns.len(),
                    found: values.len(),
                });
            }
        }
        Ok(())
    }
}

fn ensure_unique(columns: &[String]) -> Result<(), TableError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(TableError::DuplicateColumn(column.clone()));
        }
    }
    Ok(())
}
