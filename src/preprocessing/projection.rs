//! Сокращенное представление набора признаков

use ndarray::Array2;

use crate::error::TableError;
use crate::types::{columns, Table};

pub const LEAN_COLUMNS: [&str; 14] = [
    columns::AGE,
    columns::EXPERIENCE,
    columns::AGE_BRACKET,
    columns::EXPERIENCE_BRACKET,
    columns::INCOME,
    columns::FAMILY,
    columns::EDUCATION_DEGREE,
    columns::MORTGAGE,
    columns::PERSONAL_LOAN,
    columns::SECURITIES_ACCOUNT,
    columns::CD_ACCOUNT,
    columns::ONLINE,
    columns::CREDIT_CARD,
    columns::CC_AVG,
];

pub fn lean_projection(table: &Table) -> Result<Table, TableError> {
    table.select(&LEAN_COLUMNS)
}

/// Числовые колонки сокращенного представления (без `education_degree`)
pub fn lean_numeric_columns() -> Vec<&'static str> {
    LEAN_COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != columns::EDUCATION_DEGREE)
        .collect()
}

/// Матрица признаков (строки × колонки) из числовых колонок таблицы
pub fn feature_matrix(table: &Table, names: &[&str]) -> Result<Array2<f64>, TableError> {
    let mut matrix = Array2::zeros((table.len(), names.len()));
    for (j, name) in names.iter().enumerate() {
        for (i, value) in table.numeric_column(name)?.into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }
    Ok(matrix)
}
