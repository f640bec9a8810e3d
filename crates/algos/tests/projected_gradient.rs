use approx::assert_relative_eq;
use optreport_algos::ProjectedGradient;
use optreport_core::math::Scalar;
use optreport_core::options::SolveOptions;
use optreport_core::problem::{Bounds, BoxQp};
use optreport_core::stats::{ExecutionStats, Reliability};
use optreport_core::status::Status;
use optreport_core::traits::IterativeSolver;
use optreport_core::value::SolverValue;

fn diagonal(diag: &[Scalar]) -> Vec<Scalar> {
    let n = diag.len();
    let mut data = vec![0.0; n * n];
    for (i, value) in diag.iter().enumerate() {
        data[i * n + i] = *value;
    }
    data
}

fn unit_box(n: usize) -> Bounds<Scalar> {
    Bounds {
        lower: vec![0.0; n],
        upper: vec![1.0; n],
    }
}

fn solve(problem: &BoxQp<Scalar>, options: SolveOptions<Scalar>) -> ExecutionStats<Scalar> {
    let mut stats = ExecutionStats::new("unknown", problem.shape_hints()).expect("stats");
    ProjectedGradient::new(options)
        .solve(problem, &mut stats)
        .expect("solve");
    stats
}

#[test]
fn solves_interior_box_qp() {
    let problem = BoxQp {
        hessian: diagonal(&[4.0, 4.0]),
        linear: vec![-1.0, -1.0],
        bounds: Some(unit_box(2)),
        x0: None,
    };
    let stats = solve(&problem, SolveOptions::default());
    assert_eq!(stats.status(), Status::FirstOrder);
    for &x in stats.solution() {
        assert_relative_eq!(x, 0.25, epsilon = 1e-9);
    }
    assert_relative_eq!(stats.objective(), -0.25, epsilon = 1e-9);
    assert_eq!(stats.primal_feas(), 0.0);
    assert!(stats.dual_feas() <= 1e-6);
    assert_eq!(stats.iter(), 1);
    assert_eq!(stats.reliability(), Reliability::all());
}

#[test]
fn reports_bound_multipliers() {
    let problem = BoxQp {
        hessian: diagonal(&[2.0, 2.0]),
        linear: vec![-8.0, 1.0],
        bounds: Some(unit_box(2)),
        x0: None,
    };
    let stats = solve(&problem, SolveOptions::default());
    assert_eq!(stats.status(), Status::FirstOrder);
    assert_eq!(stats.solution(), &vec![1.0, 0.0]);
    assert_eq!(stats.multipliers_l(), &vec![0.0, 1.0]);
    assert_eq!(stats.multipliers_u(), &vec![6.0, 0.0]);
    assert!(stats.multipliers().is_empty());
    assert_eq!(
        stats.solver_specific_value("active_bounds"),
        Some(&SolverValue::Int(2))
    );
    assert_relative_eq!(
        stats
            .solver_specific_value("step_size")
            .and_then(SolverValue::as_f64)
            .unwrap(),
        0.5
    );
}

#[test]
fn converges_on_ill_conditioned_problem() {
    let problem = BoxQp {
        hessian: diagonal(&[1.0, 100.0]),
        linear: vec![-1.0, -100.0],
        bounds: None,
        x0: None,
    };
    let stats = solve(&problem, SolveOptions::default().quiet());
    assert_eq!(stats.status(), Status::FirstOrder);
    assert!(stats.iter() > 100);
    assert_relative_eq!(stats.solution()[0], 1.0, epsilon = 1e-5);
    assert_relative_eq!(stats.solution()[1], 1.0, epsilon = 1e-5);
    assert!(stats.multipliers_l().iter().all(|z| *z == 0.0));
}

#[test]
fn iteration_limit_is_reported() {
    let problem = BoxQp {
        hessian: diagonal(&[1.0, 100.0]),
        linear: vec![-1.0, -100.0],
        bounds: None,
        x0: None,
    };
    let mut options = SolveOptions::default();
    options.max_iterations = 3;
    let stats = solve(&problem, options);
    assert_eq!(stats.status(), Status::MaxIter);
    assert_eq!(stats.iter(), 3);
    assert!(stats.dual_feas() > 1e-6);
    assert!(stats.iter_reliable());
}

#[test]
fn stale_flags_are_cleared_before_publishing() {
    let problem = BoxQp {
        hessian: diagonal(&[1.0]),
        linear: vec![-0.5],
        bounds: Some(unit_box(1)),
        x0: None,
    };
    let mut stats = ExecutionStats::<Scalar>::builder("user", problem.shape_hints())
        .solver_specific("stale", true)
        .build()
        .unwrap();
    ProjectedGradient::new(SolveOptions::default())
        .solve(&problem, &mut stats)
        .unwrap();
    assert_eq!(stats.status(), Status::FirstOrder);
    // the stale entry survives, but the mapping was republished by the solver
    assert!(stats.solver_specific_value("stale").is_some());
    assert!(stats.solver_specific_reliable());
    assert!(stats.time_reliable());
    assert!(stats.elapsed_time() >= 0.0);
}

#[test]
fn rejects_invalid_problem_without_touching_stats() {
    let problem = BoxQp {
        hessian: vec![1.0, 0.0, 0.0],
        linear: vec![0.0, 0.0],
        bounds: None,
        x0: None,
    };
    let mut stats = ExecutionStats::<Scalar>::builder("unknown", Default::default())
        .objective(1.0)
        .build()
        .unwrap();
    let err = ProjectedGradient::new(SolveOptions::default())
        .solve(&problem, &mut stats)
        .unwrap_err();
    assert!(err.to_string().contains("invalid box QP"));
    assert!(stats.objective_reliable());
}
