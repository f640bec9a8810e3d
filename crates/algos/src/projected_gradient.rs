use anyhow::{Context, Result};
use optreport_core::math::{axpy, gershgorin_bound, norm_inf, project_box, RealNumber, Timer};
use optreport_core::options::SolveOptions;
use optreport_core::problem::{Bounds, BoxQp};
use optreport_core::stats::ExecutionStats;
use optreport_core::status::Status;
use optreport_core::traits::IterativeSolver;
use optreport_table::{Cell, ColumnType, Columns};
use std::fmt::Debug;
use tracing::{info, warn};

/// Target of the iteration-table events, so subscribers can filter them apart
/// from other solver logging.
pub const ITERATION_TARGET: &str = "optreport::iterations";

/// Projected gradient descent with a fixed `1 / L` step, where `L` is a
/// Gershgorin bound on the Hessian.
pub struct ProjectedGradient<T: RealNumber> {
    options: SolveOptions<T>,
}

struct Workspace<T: RealNumber> {
    lower: Vec<T>,
    upper: Vec<T>,
    x: Vec<T>,
    trial: Vec<T>,
    gradient: Vec<T>,
}

impl<T> Workspace<T>
where
    T: RealNumber,
{
    fn new(problem: &BoxQp<T>) -> Self {
        let n = problem.nvars();
        let (lower, upper) = match &problem.bounds {
            Some(bounds) => (bounds.lower.clone(), bounds.upper.clone()),
            None => {
                let free = Bounds::unbounded(n);
                (free.lower, free.upper)
            }
        };
        let mut x = match &problem.x0 {
            Some(x0) => x0.clone(),
            None => vec![T::zero(); n],
        };
        project_box(&mut x, &lower, &upper);
        let mut gradient = vec![T::zero(); n];
        problem.gradient(&x, &mut gradient);
        Self {
            lower,
            upper,
            trial: x.clone(),
            x,
            gradient,
        }
    }

    /// `‖x − P(x − ∇f(x))‖∞`, zero exactly at first-order stationary points.
    fn projected_gradient_norm(&mut self) -> T {
        self.trial.copy_from_slice(&self.x);
        axpy(-T::one(), &self.gradient, &mut self.trial);
        project_box(&mut self.trial, &self.lower, &self.upper);
        self.x
            .iter()
            .zip(self.trial.iter())
            .map(|(x, p)| (*x - *p).abs())
            .fold(T::zero(), |acc, v| acc.max(v))
    }

    /// Moves to `P(x − step ∇f(x))` and returns the length of the move.
    fn advance(&mut self, problem: &BoxQp<T>, step: T) -> T {
        self.trial.copy_from_slice(&self.x);
        axpy(-step, &self.gradient, &mut self.trial);
        project_box(&mut self.trial, &self.lower, &self.upper);
        for (old, new) in self.x.iter_mut().zip(self.trial.iter_mut()) {
            let moved = *new;
            *new = moved - *old;
            *old = moved;
        }
        problem.gradient(&self.x, &mut self.gradient);
        norm_inf(&self.trial)
    }

    /// Bound multipliers from the sign of the gradient at active bounds.
    fn bound_multipliers(&self) -> (Vec<T>, Vec<T>, usize) {
        let n = self.x.len();
        let mut zl = vec![T::zero(); n];
        let mut zu = vec![T::zero(); n];
        let mut active = 0;
        for i in 0..n {
            let g = self.gradient[i];
            if self.lower[i].is_finite() && self.x[i] <= self.lower[i] {
                zl[i] = g.max(T::zero());
                active += 1;
            } else if self.upper[i].is_finite() && self.x[i] >= self.upper[i] {
                zu[i] = (-g).max(T::zero());
                active += 1;
            }
        }
        (zl, zu, active)
    }
}

fn to_cell<T: RealNumber>(value: T) -> Cell {
    Cell::from(value.to_f64())
}

impl<T> ProjectedGradient<T>
where
    T: RealNumber,
{
    pub fn new(options: SolveOptions<T>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolveOptions<T> {
        &self.options
    }

    fn columns() -> Columns<'static> {
        Columns::standard()
            .column("iter", ColumnType::Integer)
            .column("objective", ColumnType::Float)
            .column("dual_feas", ColumnType::Float)
            .column("step", ColumnType::Float)
    }
}

impl<T> IterativeSolver<T> for ProjectedGradient<T>
where
    T: RealNumber + Debug,
{
    type Problem = BoxQp<T>;

    fn solve(&mut self, problem: &BoxQp<T>, stats: &mut ExecutionStats<T>) -> Result<()> {
        problem.validate().context("invalid box QP")?;
        stats.reset();
        let timer = Timer::start();
        let n = problem.nvars();

        let lipschitz = gershgorin_bound(&problem.hessian, n);
        let step = if lipschitz > T::zero() {
            T::one() / lipschitz
        } else {
            T::one()
        };

        let mut workspace = Workspace::new(problem);
        let columns = Self::columns();
        let tol = self.options.tolerance;
        let mut status = Status::MaxIter;
        let mut iter = 0usize;
        let mut rows = 0usize;
        let mut last_move: Option<T> = None;
        let mut objective;
        let mut dual_feas;

        loop {
            objective = problem.objective_from_gradient(&workspace.x, &workspace.gradient);
            dual_feas = workspace.projected_gradient_norm();

            if self.options.logs_iteration(iter) {
                let header_every = self.options.header_every;
                if rows == 0 || (header_every > 0 && rows % header_every == 0) {
                    info!(target: ITERATION_TARGET, "{}", columns.header()?);
                }
                let row = columns.row(&[
                    Cell::from(iter),
                    to_cell(objective),
                    to_cell(dual_feas),
                    last_move.map_or(Cell::Missing(ColumnType::Float), to_cell),
                ])?;
                info!(target: ITERATION_TARGET, "{row}");
                rows += 1;
            }

            if !objective.is_finite() {
                status = Status::Unbounded;
                break;
            }
            if dual_feas <= tol {
                status = Status::FirstOrder;
                break;
            }
            if iter >= self.options.max_iterations {
                break;
            }
            if let Some(limit) = self.options.max_time {
                if timer.elapsed() > limit {
                    status = Status::MaxTime;
                    break;
                }
            }

            let moved = workspace.advance(problem, step);
            if moved <= T::epsilon() * (T::one() + norm_inf(&workspace.x)) {
                status = Status::SmallStep;
                iter += 1;
                objective = problem.objective_from_gradient(&workspace.x, &workspace.gradient);
                dual_feas = workspace.projected_gradient_norm();
                break;
            }
            last_move = Some(moved);
            iter += 1;
        }

        if !status.is_success() {
            warn!(%status, iter, "projected gradient stopped before convergence");
        }

        let (zl, zu, active) = workspace.bound_multipliers();
        stats.set_status(status)?;
        stats.set_objective(objective);
        stats.set_residuals(T::zero(), dual_feas);
        stats.set_multipliers(Vec::new(), zl, zu);
        stats.set_solution(workspace.x);
        stats.set_iter(i64::try_from(iter).unwrap_or(i64::MAX));
        stats.set_solver_specific("step_size", step.to_f64().unwrap_or(f64::NAN));
        stats.set_solver_specific("active_bounds", active);
        stats.set_time(timer.seconds());
        Ok(())
    }
}
