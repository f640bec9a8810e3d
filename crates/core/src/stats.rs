use crate::math::RealNumber;
use crate::problem::ShapeHints;
use crate::status::{IntoStatus, Status, StatsResult};
use crate::traits::VectorLike;
use crate::value::SolverValue;
use bitflags::bitflags;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Reliability: u8 {
        const SOLUTION = 1 << 0;
        const OBJECTIVE = 1 << 1;
        /// Covers both `primal_feas` and `dual_feas`.
        const RESIDUALS = 1 << 2;
        /// Covers `multipliers`, `multipliers_L` and `multipliers_U`.
        const MULTIPLIERS = 1 << 3;
        const ITER = 1 << 4;
        const TIME = 1 << 5;
        const SOLVER_SPECIFIC = 1 << 6;
    }
}

/// Not synchronised; concurrent writers need external locking.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionStats<T, S = Vec<T>, V = Vec<T>> {
    status: Status,
    solution: V,
    objective: T,
    dual_feas: T,
    primal_feas: T,
    multipliers: S,
    #[serde(rename = "multipliers_L")]
    multipliers_l: V,
    #[serde(rename = "multipliers_U")]
    multipliers_u: V,
    iter: i64,
    elapsed_time: f64,
    solver_specific: IndexMap<String, SolverValue>,
    reliable: Reliability,
}

impl<T, S, V> ExecutionStats<T, S, V>
where
    T: RealNumber,
    S: VectorLike<Elem = T>,
    V: VectorLike<Elem = T>,
{
    pub fn new(status: impl IntoStatus, hints: ShapeHints) -> StatsResult<Self> {
        Self::builder(status, hints).build()
    }

    pub fn builder(status: impl IntoStatus, hints: ShapeHints) -> StatsBuilder<T, S, V> {
        StatsBuilder::new(status, hints)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn status_description(&self) -> &'static str {
        self.status.description()
    }

    pub fn solution(&self) -> &V {
        &self.solution
    }

    pub fn objective(&self) -> T {
        self.objective
    }

    pub fn dual_feas(&self) -> T {
        self.dual_feas
    }

    pub fn primal_feas(&self) -> T {
        self.primal_feas
    }

    pub fn multipliers(&self) -> &S {
        &self.multipliers
    }

    pub fn multipliers_l(&self) -> &V {
        &self.multipliers_l
    }

    pub fn multipliers_u(&self) -> &V {
        &self.multipliers_u
    }

    pub fn iter(&self) -> i64 {
        self.iter
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn solver_specific(&self) -> &IndexMap<String, SolverValue> {
        &self.solver_specific
    }

    pub fn solver_specific_value(&self, key: &str) -> Option<&SolverValue> {
        self.solver_specific.get(key)
    }

    pub fn reliability(&self) -> Reliability {
        self.reliable
    }

    pub fn is_reliable(&self, flags: Reliability) -> bool {
        self.reliable.contains(flags)
    }

    pub fn solution_reliable(&self) -> bool {
        self.is_reliable(Reliability::SOLUTION)
    }

    pub fn objective_reliable(&self) -> bool {
        self.is_reliable(Reliability::OBJECTIVE)
    }

    pub fn residuals_reliable(&self) -> bool {
        self.is_reliable(Reliability::RESIDUALS)
    }

    pub fn multipliers_reliable(&self) -> bool {
        self.is_reliable(Reliability::MULTIPLIERS)
    }

    pub fn iter_reliable(&self) -> bool {
        self.is_reliable(Reliability::ITER)
    }

    pub fn time_reliable(&self) -> bool {
        self.is_reliable(Reliability::TIME)
    }

    pub fn solver_specific_reliable(&self) -> bool {
        self.is_reliable(Reliability::SOLVER_SPECIFIC)
    }

    pub fn set_solution(&mut self, x: V) {
        self.solution = x;
        self.reliable.insert(Reliability::SOLUTION);
    }

    pub fn set_objective(&mut self, value: T) {
        self.objective = value;
        self.reliable.insert(Reliability::OBJECTIVE);
    }

    pub fn set_residuals(&mut self, primal: T, dual: T) {
        self.primal_feas = primal;
        self.dual_feas = dual;
        self.reliable.insert(Reliability::RESIDUALS);
    }

    pub fn set_multipliers(&mut self, y: S, zl: V, zu: V) {
        self.multipliers = y;
        self.multipliers_l = zl;
        self.multipliers_u = zu;
        self.reliable.insert(Reliability::MULTIPLIERS);
    }

    /// Negative counts are accepted and trusted like any other.
    pub fn set_iter(&mut self, iter: i64) {
        self.iter = iter;
        self.reliable.insert(Reliability::ITER);
    }

    pub fn set_time(&mut self, seconds: f64) {
        self.elapsed_time = seconds;
        self.reliable.insert(Reliability::TIME);
    }

    /// Replaces the status. An unregistered code leaves the record untouched.
    pub fn set_status(&mut self, status: impl IntoStatus) -> StatsResult<()> {
        let status = status.into_status()?;
        if status != self.status {
            debug!(from = %self.status, to = %status, "status changed");
        }
        self.status = status;
        Ok(())
    }

    pub fn set_solver_specific(&mut self, key: impl Into<String>, value: impl Into<SolverValue>) {
        self.solver_specific.insert(key.into(), value.into());
        self.reliable.insert(Reliability::SOLVER_SPECIFIC);
    }

    /// Lowers every reliability flag. Stored values are kept.
    pub fn reset(&mut self) {
        debug!(was = ?self.reliable, "reliability flags reset");
        self.reliable = Reliability::empty();
    }
}

/// Construction of an [`ExecutionStats`] with optional initial values.
pub struct StatsBuilder<T, S = Vec<T>, V = Vec<T>> {
    status: StatsResult<Status>,
    hints: ShapeHints,
    solution: Option<V>,
    objective: Option<T>,
    residuals: Option<(T, T)>,
    multipliers: Option<(S, V, V)>,
    iter: Option<i64>,
    elapsed_time: Option<f64>,
    solver_specific: IndexMap<String, SolverValue>,
}

impl<T, S, V> StatsBuilder<T, S, V>
where
    T: RealNumber,
    S: VectorLike<Elem = T>,
    V: VectorLike<Elem = T>,
{
    pub fn new(status: impl IntoStatus, hints: ShapeHints) -> Self {
        Self {
            status: status.into_status(),
            hints,
            solution: None,
            objective: None,
            residuals: None,
            multipliers: None,
            iter: None,
            elapsed_time: None,
            solver_specific: IndexMap::new(),
        }
    }

    pub fn solution(mut self, x: V) -> Self {
        self.solution = Some(x);
        self
    }

    pub fn objective(mut self, value: T) -> Self {
        self.objective = Some(value);
        self
    }

    pub fn residuals(mut self, primal: T, dual: T) -> Self {
        self.residuals = Some((primal, dual));
        self
    }

    pub fn multipliers(mut self, y: S, zl: V, zu: V) -> Self {
        self.multipliers = Some((y, zl, zu));
        self
    }

    pub fn iter(mut self, iter: i64) -> Self {
        self.iter = Some(iter);
        self
    }

    pub fn elapsed_time(mut self, seconds: f64) -> Self {
        self.elapsed_time = Some(seconds);
        self
    }

    pub fn solver_specific(mut self, key: impl Into<String>, value: impl Into<SolverValue>) -> Self {
        self.solver_specific.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> StatsResult<ExecutionStats<T, S, V>> {
        let status = self.status?;
        let hints = self.hints;
        let mut reliable = Reliability::empty();

        let default_primal = if hints.is_constrained() {
            T::infinity()
        } else {
            T::zero()
        };
        let (primal_feas, dual_feas) = match self.residuals {
            Some(pair) => {
                reliable.insert(Reliability::RESIDUALS);
                pair
            }
            None => (default_primal, T::infinity()),
        };
        let (multipliers, multipliers_l, multipliers_u) = match self.multipliers {
            Some(triple) => {
                reliable.insert(Reliability::MULTIPLIERS);
                triple
            }
            None => (
                S::unpopulated(hints.ncon),
                V::unpopulated(hints.nbounded),
                V::unpopulated(hints.nbounded),
            ),
        };
        let solution = match self.solution {
            Some(x) => {
                reliable.insert(Reliability::SOLUTION);
                x
            }
            None => V::unpopulated(hints.nvar),
        };
        if self.objective.is_some() {
            reliable.insert(Reliability::OBJECTIVE);
        }
        if self.iter.is_some() {
            reliable.insert(Reliability::ITER);
        }
        if self.elapsed_time.is_some() {
            reliable.insert(Reliability::TIME);
        }
        if !self.solver_specific.is_empty() {
            reliable.insert(Reliability::SOLVER_SPECIFIC);
        }

        Ok(ExecutionStats {
            status,
            solution,
            objective: self.objective.unwrap_or_else(T::infinity),
            dual_feas,
            primal_feas,
            multipliers,
            multipliers_l,
            multipliers_u,
            iter: self.iter.unwrap_or(-1),
            elapsed_time: self.elapsed_time.unwrap_or(f64::INFINITY),
            solver_specific: self.solver_specific,
            reliable,
        })
    }
}

const SHOWN_ENTRIES: usize = 5;

fn to_f64<T: RealNumber>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn write_vector<W: VectorLike>(f: &mut fmt::Formatter<'_>, vector: &W) -> fmt::Result {
    let len = vector.len();
    let shown = if f.alternate() {
        len
    } else {
        len.min(SHOWN_ENTRIES)
    };
    f.write_str("[")?;
    for idx in 0..shown {
        if idx > 0 {
            f.write_str(", ")?;
        }
        let value = vector.entry(idx).map(to_f64).unwrap_or(f64::NAN);
        write!(f, "{value:.6e}")?;
    }
    if shown < len {
        write!(f, ", … ({len} total)")?;
    }
    f.write_str("]")
}

/// Human-readable summary. Unreliable fields are shown as such instead of
/// their placeholder value; `{:#}` prints vectors in full.
impl<T, S, V> fmt::Display for ExecutionStats<T, S, V>
where
    T: RealNumber,
    S: VectorLike<Elem = T>,
    V: VectorLike<Elem = T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNRELIABLE: &str = "unreliable";
        writeln!(f, "Execution stats")?;
        writeln!(f, "  status: {} ({})", self.status, self.status_description())?;

        write!(f, "  objective value: ")?;
        if self.objective_reliable() {
            writeln!(f, "{:.6e}", to_f64(self.objective))?;
        } else {
            writeln!(f, "{UNRELIABLE}")?;
        }

        if self.residuals_reliable() {
            writeln!(f, "  primal feasibility: {:.6e}", to_f64(self.primal_feas))?;
            writeln!(f, "  dual feasibility: {:.6e}", to_f64(self.dual_feas))?;
        } else {
            writeln!(f, "  primal feasibility: {UNRELIABLE}")?;
            writeln!(f, "  dual feasibility: {UNRELIABLE}")?;
        }

        write!(f, "  solution: ")?;
        if self.solution_reliable() {
            write_vector(f, &self.solution)?;
            writeln!(f)?;
        } else {
            writeln!(f, "{UNRELIABLE}")?;
        }

        if self.multipliers_reliable() {
            write!(f, "  multipliers: ")?;
            write_vector(f, &self.multipliers)?;
            write!(f, "\n  multipliers_L: ")?;
            write_vector(f, &self.multipliers_l)?;
            write!(f, "\n  multipliers_U: ")?;
            write_vector(f, &self.multipliers_u)?;
            writeln!(f)?;
        } else {
            writeln!(f, "  multipliers: {UNRELIABLE}")?;
        }

        write!(f, "  iterations: ")?;
        if self.iter_reliable() {
            writeln!(f, "{}", self.iter)?;
        } else {
            writeln!(f, "{UNRELIABLE}")?;
        }

        write!(f, "  elapsed time: ")?;
        if self.time_reliable() {
            writeln!(f, "{:.3}s", self.elapsed_time)?;
        } else {
            writeln!(f, "{UNRELIABLE}")?;
        }

        if self.solver_specific_reliable() {
            write!(f, "  solver specific:")?;
            for (key, value) in &self.solver_specific {
                write!(f, "\n    {key}: {value}")?;
            }
        } else {
            write!(f, "  solver specific: {UNRELIABLE}")?;
        }
        Ok(())
    }
}
