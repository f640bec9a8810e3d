use crate::format::ColumnType;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Integer(i64),
    Text(String),
    Tag(String),
    Generic(String),
}

impl Value {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Float(_) => ColumnType::Float,
            Value::Integer(_) => ColumnType::Integer,
            Value::Text(_) => ColumnType::Text,
            Value::Tag(_) => ColumnType::Tag,
            Value::Generic(_) => ColumnType::Generic,
        }
    }
}

/// One slot of a table row: a value, or a marker saying which type of value
/// would have been there.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Value(Value),
    Missing(ColumnType),
}

impl Cell {
    pub fn tag(label: impl Display) -> Self {
        Cell::Value(Value::Tag(label.to_string()))
    }

    pub fn generic(value: impl Display) -> Self {
        Cell::Value(Value::Generic(value.to_string()))
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Cell::Value(value) => value.column_type(),
            Cell::Missing(column_type) => *column_type,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing(_))
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Cell::Value(value)
    }
}

impl From<ColumnType> for Cell {
    fn from(column_type: ColumnType) -> Self {
        Cell::Missing(column_type)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Value(Value::Float(value))
    }
}

impl From<f32> for Cell {
    fn from(value: f32) -> Self {
        Cell::Value(Value::Float(value.into()))
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Value(Value::Integer(value.into()))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Value(Value::Integer(value))
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Value(Value::Integer(value.into()))
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Value(Value::Integer(i64::try_from(value).unwrap_or(i64::MAX)))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Value(Value::Text(value.to_owned()))
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Value(Value::Text(value))
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing(ColumnType::Float), Cell::from)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Missing(ColumnType::Integer), Cell::from)
    }
}
