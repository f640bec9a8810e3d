use crate::math::{dot, matvec, RealNumber};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

pub type ProblemResult<T> = Result<T, ProblemError>;

/// Expected vector lengths used to size the unpopulated vectors of a fresh
/// `ExecutionStats`. Nothing is checked against them afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeHints {
    pub nvar: usize,
    pub ncon: usize,
    pub nbounded: usize,
}

impl ShapeHints {
    pub fn new(nvar: usize, ncon: usize, nbounded: usize) -> Self {
        Self {
            nvar,
            ncon,
            nbounded,
        }
    }

    pub fn unconstrained(nvar: usize) -> Self {
        Self::new(nvar, 0, 0)
    }

    pub fn from_bounds<T: RealNumber>(nvar: usize, ncon: usize, bounds: &Bounds<T>) -> Self {
        Self::new(nvar, ncon, bounds.bounded_count())
    }

    pub fn is_constrained(&self) -> bool {
        self.ncon > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub lower: Vec<T>,
    pub upper: Vec<T>,
}

impl<T> Bounds<T>
where
    T: RealNumber,
{
    pub fn unbounded(dim: usize) -> Self {
        Self {
            lower: vec![T::neg_infinity(); dim],
            upper: vec![T::infinity(); dim],
        }
    }

    /// Number of variables with at least one finite bound.
    pub fn bounded_count(&self) -> usize {
        self.lower
            .iter()
            .zip(self.upper.iter())
            .filter(|(lo, hi)| lo.is_finite() || hi.is_finite())
            .count()
    }

    pub fn validate(&self) -> ProblemResult<()> {
        if self.lower.len() != self.upper.len() {
            return Err(ProblemError::DimensionMismatch(format!(
                "lower len {} != upper len {}",
                self.lower.len(),
                self.upper.len()
            )));
        }
        for (i, (lo, hi)) in self.lower.iter().zip(self.upper.iter()).enumerate() {
            if lo > hi {
                return Err(ProblemError::InvalidStructure(format!(
                    "lower bound exceeds upper bound at index {i}"
                )));
            }
        }
        Ok(())
    }
}

/// `min ½ xᵀ H x + cᵀ x` subject to optional variable bounds, with `H` stored
/// dense and row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxQp<T> {
    pub hessian: Vec<T>,
    pub linear: Vec<T>,
    #[serde(default)]
    pub bounds: Option<Bounds<T>>,
    #[serde(default)]
    pub x0: Option<Vec<T>>,
}

impl<T> BoxQp<T>
where
    T: RealNumber,
{
    pub fn nvars(&self) -> usize {
        self.linear.len()
    }

    pub fn shape_hints(&self) -> ShapeHints {
        match &self.bounds {
            Some(bounds) => ShapeHints::from_bounds(self.nvars(), 0, bounds),
            None => ShapeHints::unconstrained(self.nvars()),
        }
    }

    pub fn validate(&self) -> ProblemResult<()> {
        let n = self.nvars();
        if self.hessian.len() != n * n {
            return Err(ProblemError::DimensionMismatch(format!(
                "hessian has {} entries, expected {n}x{n}",
                self.hessian.len()
            )));
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if self.hessian[i * n + j] != self.hessian[j * n + i] {
                    return Err(ProblemError::InvalidStructure(format!(
                        "hessian is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        if let Some(bounds) = &self.bounds {
            if bounds.lower.len() != n {
                return Err(ProblemError::DimensionMismatch(format!(
                    "bounds size {} != nvars {n}",
                    bounds.lower.len()
                )));
            }
            bounds.validate()?;
        }
        if let Some(x0) = &self.x0 {
            if x0.len() != n {
                return Err(ProblemError::DimensionMismatch(format!(
                    "x0 size {} != nvars {n}",
                    x0.len()
                )));
            }
        }
        Ok(())
    }

    /// Writes `H x + c` into `out`.
    pub fn gradient(&self, x: &[T], out: &mut [T]) {
        let n = self.nvars();
        matvec(&self.hessian, n, n, x, out);
        for (g, c) in out.iter_mut().zip(self.linear.iter()) {
            *g += *c;
        }
    }

    /// Objective value given `x` and its gradient `g = H x + c`.
    pub fn objective_from_gradient(&self, x: &[T], g: &[T]) -> T {
        let half = T::from_f64(0.5).unwrap_or_else(T::zero);
        half * (dot(x, g) + dot(&self.linear, x))
    }

    pub fn objective(&self, x: &[T]) -> T {
        let mut g = vec![T::zero(); self.nvars()];
        self.gradient(x, &mut g);
        self.objective_from_gradient(x, &g)
    }
}
