//! Feature engineering для кредитного скоринга

use tracing::debug;

use crate::error::TableError;
use crate::types::{columns, Table, Value};

/// Колонки, без которых признаки не строятся
pub const REQUIRED_COLUMNS: [&str; 7] = [
    columns::AGE,
    columns::EXPERIENCE,
    columns::INCOME,
    columns::FAMILY,
    columns::CC_AVG,
    columns::EDUCATION,
    columns::MORTGAGE,
];

/// Производные колонки в порядке добавления
pub const DERIVED_COLUMNS: [&str; 8] = [
    columns::AGE_BRACKET,
    columns::AGE_BRACKET_NAME,
    columns::INCOME_PER_FAMILY_MEMBER,
    columns::CC_TO_INCOME_RATIO,
    columns::DEBT_TO_INCOME_RATIO,
    columns::FINANCIAL_MATURITY_INDEX,
    columns::EXPERIENCE_BRACKET,
    columns::EDUCATION_DEGREE,
];

/// Возрастная группа: 27, 43, 59, 78 — нижние границы групп 2..5
pub fn age_bracket(age: f64) -> i64 {
    if age >= 78.0 {
        5
    } else if age >= 59.0 {
        4
    } else if age >= 43.0 {
        3
    } else if age >= 27.0 {
        2
    } else {
        1
    }
}

pub fn age_bracket_name(bracket: i64) -> &'static str {
    match bracket {
        1 => "Generation Z",
        2 => "Millennials",
        3 => "Generation X",
        4 => "Baby boomers",
        _ => "Silent generation",
    }
}

/// Ожидаемый кредитный рейтинг по возрастной группе.
/// Значения условные и не попадают в выходную таблицу.
pub fn expected_credit_score(bracket: i64) -> i64 {
    match bracket {
        1 => 665,
        2 => 687,
        3 => 710,
        4 => 746,
        _ => 750,
    }
}

pub fn experience_bracket(experience: f64) -> i64 {
    if experience >= 40.0 {
        4
    } else if experience >= 30.0 {
        3
    } else if experience >= 10.0 {
        2
    } else {
        1
    }
}

/// Все коды кроме 1 и 2 считаются "postgraduate"
pub fn education_degree(code: f64) -> &'static str {
    if code == 1.0 {
        "high school"
    } else if code == 2.0 {
        "college"
    } else {
        "postgraduate"
    }
}

fn clamp_experience(value: &Value) -> Value {
    match value {
        Value::Int(v) if *v < 0 => Value::Int(0),
        Value::Float(v) if *v < 0.0 => Value::Float(0.0),
        other => other.clone(),
    }
}

/// Входные колонки одной таблицы
struct Inputs {
    age: Vec<f64>,
    experience: Vec<f64>,
    income: Vec<f64>,
    family: Vec<f64>,
    cc_avg: Vec<f64>,
    education: Vec<f64>,
    mortgage: Vec<f64>,
}

impl Inputs {
    fn read(table: &Table) -> Result<Self, TableError> {
        Ok(Self {
            age: table.numeric_column(columns::AGE)?,
            experience: table.numeric_column(columns::EXPERIENCE)?,
            income: table.numeric_column(columns::INCOME)?,
            family: table.numeric_column(columns::FAMILY)?,
            cc_avg: table.numeric_column(columns::CC_AVG)?,
            education: table.numeric_column(columns::EDUCATION)?,
            mortgage: table.numeric_column(columns::MORTGAGE)?,
        })
    }
}

pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Обрезает отрицательный стаж и добавляет восемь производных колонок.
    ///
    /// Деление на ноль дает бесконечность (или NaN при 0/0); такие строки
    /// удаляет санитайзер. Стаж обрезается всегда, когда колонка есть,
    /// даже если остальные входные колонки не прошли проверку; производные
    /// колонки добавляются только все вместе.
    pub fn derive(table: &mut Table) -> Result<(), TableError> {
        for column in DERIVED_COLUMNS {
            if table.has_column(column) {
                return Err(TableError::DuplicateColumn(column.to_string()));
            }
        }

        if table.has_column(columns::EXPERIENCE) {
            table.map_column(columns::EXPERIENCE, clamp_experience)?;
        }

        let inputs = Inputs::read(table)?;
        let features = Self::compute(&inputs);

        for (name, values) in DERIVED_COLUMNS.into_iter().zip(features) {
            table.push_column(name, values)?;
        }

        debug!(rows = table.len(), "derived features added");
        Ok(())
    }

    fn compute(inputs: &Inputs) -> [Vec<Value>; 8] {
        let n = inputs.age.len();
        let mut features: [Vec<Value>; 8] = Default::default();
        for column in features.iter_mut() {
            column.reserve(n);
        }

        for i in 0..n {
            let age = inputs.age[i];
            // колонка уже обрезана в derive
            let experience = inputs.experience[i];
            let income = inputs.income[i];
            let cc_avg = inputs.cc_avg[i];
            let mortgage = inputs.mortgage[i];

            let bracket = age_bracket(age);
            let row = [
                Value::Int(bracket),
                Value::from(age_bracket_name(bracket)),
                Value::Float(income / (inputs.family[i] + 1.0)),
                Value::Float(cc_avg / income),
                Value::Float((cc_avg + mortgage) / income),
                Value::Float(income / cc_avg),
                Value::Int(experience_bracket(experience)),
                Value::from(education_degree(inputs.education[i])),
            ];

            for (column, value) in features.iter_mut().zip(row) {
                column.push(value);
            }
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn float(table: &Table, row: usize, column: &str) -> f64 {
        table.get(row, column).and_then(Value::as_f64).unwrap()
    }

    fn applicants(rows: Vec<[f64; 7]>) -> Table {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|r| {
                r.iter()
                    .enumerate()
                    .map(|(i, v)| match i {
                        // cc_avg дробный, остальные целые
                        4 => Value::Float(*v),
                        _ => Value::Int(*v as i64),
                    })
                    .collect()
            })
            .collect();
        Table::from_rows(columns, rows).unwrap()
    }

    #[test]
    fn test_age_bracket_boundaries() {
        assert_eq!(age_bracket(0.0), 1);
        assert_eq!(age_bracket(26.0), 1);
        assert_eq!(age_bracket(27.0), 2);
        assert_eq!(age_bracket(42.0), 2);
        assert_eq!(age_bracket(43.0), 3);
        assert_eq!(age_bracket(58.0), 3);
        assert_eq!(age_bracket(59.0), 4);
        assert_eq!(age_bracket(77.0), 4);
        assert_eq!(age_bracket(78.0), 5);
        assert_eq!(age_bracket(120.0), 5);
    }

    #[test]
    fn test_age_bracket_monotonic() {
        let mut prev = age_bracket(-10.0);
        for age in -10..130 {
            let bracket = age_bracket(age as f64);
            assert!((1..=5).contains(&bracket));
            assert!(bracket >= prev);
            prev = bracket;
        }
    }

    #[test]
    fn test_age_bracket_name() {
        assert_eq!(age_bracket_name(1), "Generation Z");
        assert_eq!(age_bracket_name(2), "Millennials");
        assert_eq!(age_bracket_name(3), "Generation X");
        assert_eq!(age_bracket_name(4), "Baby boomers");
        assert_eq!(age_bracket_name(5), "Silent generation");
        assert_eq!(age_bracket_name(0), "Silent generation");
        assert_eq!(age_bracket_name(6), "Silent generation");
    }

    #[test]
    fn test_expected_credit_score() {
        assert_eq!(expected_credit_score(1), 665);
        assert_eq!(expected_credit_score(3), 710);
        assert_eq!(expected_credit_score(5), 750);
        assert_eq!(expected_credit_score(42), 750);
    }

    #[test]
    fn test_experience_bracket_boundaries() {
        assert_eq!(experience_bracket(0.0), 1);
        assert_eq!(experience_bracket(9.0), 1);
        assert_eq!(experience_bracket(10.0), 2);
        assert_eq!(experience_bracket(29.0), 2);
        assert_eq!(experience_bracket(30.0), 3);
        assert_eq!(experience_bracket(39.0), 3);
        assert_eq!(experience_bracket(40.0), 4);
    }

    #[test]
    fn test_education_degree() {
        assert_eq!(education_degree(1.0), "high school");
        assert_eq!(education_degree(2.0), "college");
        assert_eq!(education_degree(3.0), "postgraduate");
        assert_eq!(education_degree(0.0), "postgraduate");
        assert_eq!(education_degree(4.0), "postgraduate");
    }

    #[test]
    fn test_ratios() {
        // age, experience, income, family, cc_avg, education, mortgage
        let mut table = applicants(vec![[30.0, 5.0, 100.0, 1.0, 2.0, 1.0, 10.0]]);
        FeatureEngineer::derive(&mut table).unwrap();

        assert!(approx(float(&table, 0, columns::INCOME_PER_FAMILY_MEMBER), 50.0));
        assert!(approx(float(&table, 0, columns::CC_TO_INCOME_RATIO), 0.02));
        assert!(approx(float(&table, 0, columns::DEBT_TO_INCOME_RATIO), 0.12));
        assert!(approx(float(&table, 0, columns::FINANCIAL_MATURITY_INDEX), 50.0));
    }

    #[test]
    fn test_negative_experience_clamped() {
        let mut table = applicants(vec![[45.0, -2.0, 80.0, 3.0, 4.0, 3.0, 100.0]]);
        FeatureEngineer::derive(&mut table).unwrap();

        assert_eq!(table.get(0, columns::EXPERIENCE), Some(&Value::Int(0)));
        assert_eq!(table.get(0, columns::EXPERIENCE_BRACKET), Some(&Value::Int(1)));
        assert_eq!(table.get(0, columns::AGE_BRACKET), Some(&Value::Int(3)));
        assert_eq!(
            table.get(0, columns::AGE_BRACKET_NAME),
            Some(&Value::from("Generation X"))
        );
        assert_eq!(
            table.get(0, columns::EDUCATION_DEGREE),
            Some(&Value::from("postgraduate"))
        );
        assert!(approx(float(&table, 0, columns::INCOME_PER_FAMILY_MEMBER), 20.0));
        assert!(approx(float(&table, 0, columns::CC_TO_INCOME_RATIO), 0.05));
        assert!(approx(float(&table, 0, columns::DEBT_TO_INCOME_RATIO), 1.3));
        assert!(approx(float(&table, 0, columns::FINANCIAL_MATURITY_INDEX), 20.0));
    }

    #[test]
    fn test_zero_denominators_produce_non_finite_values() {
        let mut table = applicants(vec![
            [30.0, 5.0, 0.0, 1.0, 2.0, 1.0, 10.0],
            [30.0, 5.0, 50.0, 1.0, 0.0, 1.0, 0.0],
        ]);
        FeatureEngineer::derive(&mut table).unwrap();

        assert!(table.get(0, columns::CC_TO_INCOME_RATIO).unwrap().is_infinite());
        assert!(table.get(0, columns::DEBT_TO_INCOME_RATIO).unwrap().is_infinite());
        assert!(table.get(1, columns::FINANCIAL_MATURITY_INDEX).unwrap().is_infinite());
    }

    #[test]
    fn test_missing_column_adds_no_features_but_still_clamps() {
        let mut table = Table::from_rows(
            vec![columns::AGE.to_string(), columns::EXPERIENCE.to_string()],
            vec![vec![Value::Int(30), Value::Int(-1)]],
        )
        .unwrap();

        let err = FeatureEngineer::derive(&mut table).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(ref c) if c == columns::INCOME));
        assert_eq!(table.width(), 2);
        assert_eq!(table.get(0, columns::EXPERIENCE), Some(&Value::Int(0)));
    }

    #[test]
    fn test_table_without_experience_untouched_on_error() {
        let mut table =
            Table::from_rows(vec![columns::AGE.to_string()], vec![vec![Value::Int(30)]]).unwrap();
        let before = table.clone();

        assert!(FeatureEngineer::derive(&mut table).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_text_income_is_error() {
        let mut table = applicants(vec![[30.0, 5.0, 100.0, 1.0, 2.0, 1.0, 10.0]]);
        table
            .map_column(columns::INCOME, |_| Value::from("high"))
            .unwrap();

        let err = FeatureEngineer::derive(&mut table).unwrap_err();
        assert!(matches!(err, TableError::NonNumeric { .. }));
    }

    #[test]
    fn test_derive_twice_is_error() {
        let mut table = applicants(vec![[30.0, 5.0, 100.0, 1.0, 2.0, 1.0, 10.0]]);
        FeatureEngineer::derive(&mut table).unwrap();
        assert!(FeatureEngineer::derive(&mut table).is_err());
        assert_eq!(table.width(), REQUIRED_COLUMNS.len() + DERIVED_COLUMNS.len());
    }
}
