//! SQL assembly shared by every table.
//!
//! Column and table names only ever come from `&'static str` constants on
//! [`Record`](super::Record); user input reaches the database through bound
//! parameters, except LIMIT/OFFSET which are taken from an already clamped
//! [`PageRequest`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{postgres::PgArguments, Arguments};

use crate::models::PageRequest;

/// A value bound to a single column
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
    Date(Option<NaiveDate>),
}

impl SqlValue {
    fn add_to(&self, args: &mut PgArguments) {
        match self {
            SqlValue::Text(v) => args.add(v.clone()),
            SqlValue::Int(v) => args.add(*v),
            SqlValue::Decimal(v) => args.add(*v),
            SqlValue::Date(v) => args.add(*v),
        }
    }
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for SqlValue {
            fn from(value: $ty) -> Self {
                SqlValue::$variant(Some(value))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(value: Option<$ty>) -> Self {
                SqlValue::$variant(value)
            }
        }
    };
}

impl_from_value!(String, Text);
impl_from_value!(i32, Int);
impl_from_value!(Decimal, Decimal);
impl_from_value!(NaiveDate, Date);

/// Ordered map from column name to new value.
///
/// Iterating it once yields both the SQL fragment and the bind order, so the
/// `$n` placeholders and the arguments cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(&'static str, SqlValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column unconditionally (a `None` value stores NULL)
    pub fn with(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.0.push((column, value.into()));
        self
    }

    /// Set a column only when a value was supplied
    pub fn with_opt<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SqlValue)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.0.iter().map(|(c, _)| *c).collect()
    }

    /// `a = $first, b = $first+1, ...`
    pub fn assignments(&self, first: usize) -> String {
        self.equalities(first).join(", ")
    }

    /// `a = $first`, `b = $first+1`, ... for use in a WHERE clause
    pub fn equalities(&self, first: usize) -> Vec<String> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column, first + i))
            .collect()
    }

    /// `$first, $first+1, ...`
    pub fn placeholders(&self, first: usize) -> String {
        (0..self.0.len())
            .map(|i| format!("${}", first + i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn add_to(&self, args: &mut PgArguments) {
        for (_, value) in &self.0 {
            value.add_to(args);
        }
    }

    pub fn arguments(&self) -> PgArguments {
        let mut args = PgArguments::default();
        self.add_to(&mut args);
        args
    }
}

/// ` WHERE a AND b`, or an empty string
pub fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

pub fn count_sql(table: &str, where_clause: &str) -> String {
    format!("SELECT COUNT(*) FROM {}{}", table, where_clause)
}

pub fn page_sql(table: &str, where_clause: &str, page: PageRequest) -> String {
    format!(
        "SELECT * FROM {}{} ORDER BY created_at DESC, id DESC LIMIT {} OFFSET {}",
        table,
        where_clause,
        page.limit(),
        page.offset()
    )
}

/// `(a ILIKE $n OR b ILIKE $n)` reusing a single bound pattern
pub fn search_condition(columns: &[&str], placeholder: usize) -> String {
    let parts: Vec<String> = columns
        .iter()
        .map(|column| format!("{} ILIKE ${}", column, placeholder))
        .collect();
    format!("({})", parts.join(" OR "))
}

/// `%keyword%` with LIKE metacharacters escaped
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub fn insert_sql(table: &str, fields: &Fields) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
        table,
        fields.columns().join(", "),
        fields.placeholders(1)
    )
}

/// The id is bound after the assigned values.
pub fn update_sql(table: &str, fields: &Fields) -> String {
    format!(
        "UPDATE {} SET {}, updated_at = NOW() WHERE id = ${}",
        table,
        fields.assignments(1),
        fields.len() + 1
    )
}
