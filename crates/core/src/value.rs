use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A solver-specific entry stored in `ExecutionStats::solver_specific`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolverValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Vector(Vec<f64>),
    Map(IndexMap<String, SolverValue>),
}

impl SolverValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SolverValue::Float(v) => Some(*v),
            SolverValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SolverValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SolverValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for SolverValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverValue::Bool(v) => write!(f, "{v}"),
            SolverValue::Int(v) => write!(f, "{v}"),
            SolverValue::Float(v) => write!(f, "{v:e}"),
            SolverValue::Text(v) => f.write_str(v),
            SolverValue::Vector(v) => write!(f, "{v:?}"),
            SolverValue::Map(map) => {
                f.write_str("{")?;
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for SolverValue {
    fn from(value: bool) -> Self {
        SolverValue::Bool(value)
    }
}

impl From<i32> for SolverValue {
    fn from(value: i32) -> Self {
        SolverValue::Int(value.into())
    }
}

impl From<i64> for SolverValue {
    fn from(value: i64) -> Self {
        SolverValue::Int(value)
    }
}

impl From<usize> for SolverValue {
    fn from(value: usize) -> Self {
        SolverValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f32> for SolverValue {
    fn from(value: f32) -> Self {
        SolverValue::Float(value.into())
    }
}

impl From<f64> for SolverValue {
    fn from(value: f64) -> Self {
        SolverValue::Float(value)
    }
}

impl From<&str> for SolverValue {
    fn from(value: &str) -> Self {
        SolverValue::Text(value.to_owned())
    }
}

impl From<String> for SolverValue {
    fn from(value: String) -> Self {
        SolverValue::Text(value)
    }
}

impl From<Vec<f64>> for SolverValue {
    fn from(value: Vec<f64>) -> Self {
        SolverValue::Vector(value)
    }
}

impl From<IndexMap<String, SolverValue>> for SolverValue {
    fn from(value: IndexMap<String, SolverValue>) -> Self {
        SolverValue::Map(value)
    }
}
