use crate::math::RealNumber;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions<T: RealNumber> {
    pub tolerance: T,
    pub max_iterations: usize,
    pub max_time: Option<Duration>,
    /// Emit one iteration row every `log_every` iterations; 0 disables the table.
    pub log_every: usize,
    /// Repeat the table header after this many rows; 0 prints it once.
    pub header_every: usize,
}

impl<T> SolveOptions<T>
where
    T: RealNumber,
{
    pub fn with_tolerance(tolerance: T) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn quiet(mut self) -> Self {
        self.log_every = 0;
        self
    }

    /// Whether iteration `iter` gets a table row.
    pub fn logs_iteration(&self, iter: usize) -> bool {
        self.log_every > 0 && iter % self.log_every == 0
    }
}

impl<T> Default for SolveOptions<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self {
            tolerance: T::from_f64(1e-6).unwrap_or_else(T::epsilon),
            max_iterations: 10_000,
            max_time: None,
            log_every: 1,
            header_every: 20,
        }
    }
}
