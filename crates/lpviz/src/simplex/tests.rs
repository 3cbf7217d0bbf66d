use super::*;
use nalgebra::dvector;
use proptest::prelude::*;

fn textbook() -> (Vec<f64>, Vec<Vec<f64>>, Vec<f64>) {
    // maximize 3x1 + 2x2  s.t.  x1 + x2 <= 4, 2x1 + x2 <= 6, x >= 0
    (
        vec![3.0, 2.0],
        vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![-1.0, 0.0], vec![0.0, -1.0]],
        vec![4.0, 6.0, 0.0, 0.0],
    )
}

fn satisfies(a: &[Vec<f64>], b: &[f64], x: &nalgebra::DVector<f64>, tol: f64) -> bool {
    a.iter().zip(b).all(|(row, &bi)| {
        let lhs: f64 = row.iter().zip(x.iter()).map(|(aij, xj)| aij * xj).sum();
        lhs <= bi + tol
    })
}

#[test]
fn textbook_optimum_and_trace() {
    let (c, a, b) = textbook();
    let sol = solve(&c, &a, &b, SolveCfg::default()).unwrap();
    assert_eq!(sol.status, Status::Optimal);
    let x = sol.optimal_point().unwrap();
    assert!((x - dvector![2.0, 2.0]).norm() < 1e-9);
    assert!((sol.optimal_value().unwrap() - 10.0).abs() < 1e-9);
    assert!(satisfies(&a, &b, x, 1e-6));

    // phase I has nothing to do: origin is feasible
    assert_eq!(sol.steps[0].phase, Phase::One);
    assert!(sol.steps[0].is_optimal);
    // phase II: (3,0) then (2,2), then the terminal snapshot
    let phase_two: Vec<&Step> = sol.steps.iter().filter(|s| s.phase == Phase::Two).collect();
    assert_eq!(phase_two.len(), 3);
    assert!((phase_two[0].solution.clone() - dvector![3.0, 0.0]).norm() < 1e-9);
    assert!((phase_two[0].objective_value - 9.0).abs() < 1e-9);
    assert!(!phase_two[1].is_optimal);
    assert!(phase_two[2].is_optimal);
    assert_eq!(sol.pivot_count(), 2);
}

#[test]
fn unbounded_without_upper_bounds() {
    let sol = solve(
        &[1.0, 1.0],
        &[vec![-1.0, 0.0], vec![0.0, -1.0]],
        &[0.0, 0.0],
        SolveCfg::default(),
    )
    .unwrap();
    assert_eq!(sol.status, Status::Unbounded);
    assert!(sol.optimal_point().is_none());
    assert!(!sol.final_step().unwrap().is_optimal);
}

#[test]
fn unbounded_after_pivoting() {
    // maximize x1 + x2 s.t. x1 - x2 <= 1: x2 can grow together with x1
    let sol = solve(&[1.0, 1.0], &[vec![1.0, -1.0]], &[1.0], SolveCfg::default()).unwrap();
    assert_eq!(sol.status, Status::Unbounded);
    assert!(sol.pivot_count() >= 1);
}

#[test]
fn contradictory_bounds_are_infeasible() {
    // x1 <= 1 and x1 >= 5
    let sol = solve(
        &[1.0, 1.0],
        &[vec![1.0, 0.0], vec![-1.0, 0.0]],
        &[1.0, -5.0],
        SolveCfg::default(),
    )
    .unwrap();
    assert_eq!(sol.status, Status::Infeasible);
    assert!(sol.steps.iter().all(|s| s.phase == Phase::One));
    // remaining artificial mass is reported through the phase I objective
    assert!((sol.final_step().unwrap().objective_value + 4.0).abs() < 1e-9);
}

#[test]
fn duplicated_row_gives_same_optimum() {
    let (c, mut a, mut b) = textbook();
    let base = solve(&c, &a, &b, SolveCfg::default()).unwrap();
    a.push(a[0].clone());
    b.push(b[0]);
    let dup = solve(&c, &a, &b, SolveCfg::default()).unwrap();
    assert_eq!(dup.status, Status::Optimal);
    let (x0, x1) = (base.optimal_point().unwrap(), dup.optimal_point().unwrap());
    assert!((x0 - x1).norm() < 1e-9);
}

#[test]
fn duplicated_ge_row_still_optimal() {
    // x1 + x2 >= 2 twice, x1 + x2 <= 4, maximize x1
    let a = vec![vec![-1.0, -1.0], vec![-1.0, -1.0], vec![1.0, 1.0]];
    let b = vec![-2.0, -2.0, 4.0];
    let sol = solve(&[1.0, 0.0], &a, &b, SolveCfg::default()).unwrap();
    assert_eq!(sol.status, Status::Optimal);
    let x = sol.optimal_point().unwrap();
    assert!((x - dvector![4.0, 0.0]).norm() < 1e-9);
}

#[test]
fn artificial_left_basic_at_zero_is_evicted() {
    // x1 <= 1 and x1 >= 1: the ratio tie leaves the artificial basic at 0
    let sol = solve(&[1.0], &[vec![1.0], vec![-1.0]], &[1.0, -1.0], SolveCfg::default()).unwrap();
    assert_eq!(sol.status, Status::Optimal);
    assert!((sol.optimal_point().unwrap()[0] - 1.0).abs() < 1e-12);
    assert!((sol.optimal_value().unwrap() - 1.0).abs() < 1e-12);
    // the phase II pivot is degenerate: the point does not move
    let phase_two: Vec<&Step> = sol.steps.iter().filter(|s| s.phase == Phase::Two).collect();
    assert_eq!(phase_two.len(), 2);
    assert_eq!(phase_two[0].solution, phase_two[1].solution);
}

#[test]
fn iteration_cap_is_reported() {
    let (c, a, b) = textbook();
    let sol = solve(&c, &a, &b, SolveCfg::default().with_max_iterations(1)).unwrap();
    assert_eq!(sol.status, Status::IterationLimit);
    assert!(!sol.final_step().unwrap().is_optimal);
    assert!(sol.optimal_point().is_none());

    // a cap that is exactly large enough still converges
    let sol = solve(&c, &a, &b, SolveCfg::default().with_max_iterations(2)).unwrap();
    assert_eq!(sol.status, Status::Optimal);
}

#[test]
fn iteration_cap_in_phase_one() {
    let a = vec![vec![-1.0, 0.0], vec![0.0, -1.0], vec![1.0, 1.0]];
    let b = vec![-1.0, -1.0, 10.0];
    let sol = solve(&[1.0, 1.0], &a, &b, SolveCfg::default().with_max_iterations(0)).unwrap();
    assert_eq!(sol.status, Status::IterationLimit);
    assert_eq!(sol.steps.len(), 1);
    assert_eq!(sol.steps[0].phase, Phase::One);
}

#[test]
fn bland_reaches_the_same_optimum() {
    let (c, a, b) = textbook();
    let cfg = SolveCfg::default().with_rule(PivotRule::Bland);
    let sol = solve(&c, &a, &b, cfg).unwrap();
    assert_eq!(sol.status, Status::Optimal);
    assert!((sol.optimal_value().unwrap() - 10.0).abs() < 1e-9);
}

fn beale() -> (Vec<f64>, Vec<Vec<f64>>, Vec<f64>) {
    // degenerate at the origin; Dantzig with lowest-row ties cycles through six bases
    (
        vec![0.75, -20.0, 0.5, -6.0],
        vec![
            vec![0.25, -8.0, -1.0, 9.0],
            vec![0.5, -12.0, -0.5, 3.0],
            vec![0.0, 0.0, 1.0, 0.0],
        ],
        vec![0.0, 0.0, 1.0],
    )
}

#[test]
fn bland_escapes_beale_cycle() {
    let (c, a, b) = beale();
    let sol = solve(&c, &a, &b, SolveCfg::default().with_rule(PivotRule::Bland)).unwrap();
    assert_eq!(sol.status, Status::Optimal);
    assert!((sol.optimal_value().unwrap() - 1.25).abs() < 1e-9);
    let x = sol.optimal_point().unwrap();
    assert!((x - dvector![1.0, 0.0, 1.0, 0.0]).norm() < 1e-9);
    assert!(satisfies(&a, &b, x, 1e-9));
}

#[test]
fn dantzig_cycles_on_beale_until_the_cap() {
    let (c, a, b) = beale();
    let sol = solve(&c, &a, &b, SolveCfg::default().with_max_iterations(50)).unwrap();
    assert_eq!(sol.status, Status::IterationLimit);
    assert_eq!(sol.pivot_count(), 50);
    assert!(sol.optimal_point().is_none());
    // every degenerate pivot leaves the point at the origin
    let phase_two: Vec<&Step> = sol.steps.iter().filter(|s| s.phase == Phase::Two).collect();
    assert!(phase_two.iter().all(|s| s.solution.iter().all(|v| v.abs() < 1e-12)));
    assert!(phase_two.iter().all(|s| s.objective_value.abs() < 1e-12));
}

#[test]
fn malformed_input_is_rejected() {
    assert_eq!(
        SimplexSolver::new(&[], &[], &[]).unwrap_err(),
        SolveError::EmptyObjective
    );
    assert_eq!(
        SimplexSolver::new(&[1.0], &[vec![1.0]], &[1.0, 2.0]).unwrap_err(),
        SolveError::DimensionMismatch {
            what: "rhs",
            expected: 1,
            got: 2
        }
    );
    assert!(matches!(
        SimplexSolver::new(&[1.0, 2.0], &[vec![1.0]], &[1.0]),
        Err(SolveError::DimensionMismatch { .. })
    ));
    assert_eq!(
        SimplexSolver::new(&[1.0], &[vec![f64::NAN]], &[1.0]).unwrap_err(),
        SolveError::NonFinite {
            what: "constraint row",
            index: 0
        }
    );
    assert!(matches!(
        SimplexSolver::new(&[1.0], &[vec![1.0]], &[f64::INFINITY]),
        Err(SolveError::NonFinite { what: "rhs", .. })
    ));
}

#[test]
fn no_constraints_bounded_objective_is_optimal_at_origin() {
    // maximize -x1: origin is optimal, nothing to pivot
    let sol = solve(&[-1.0], &[], &[], SolveCfg::default()).unwrap();
    assert_eq!(sol.status, Status::Optimal);
    assert_eq!(sol.optimal_point().unwrap(), &dvector![0.0]);
}

#[test]
fn solver_reports_dimensions() {
    let (c, a, b) = textbook();
    let s = SimplexSolver::new(&c, &a, &b).unwrap();
    assert_eq!(s.num_vars(), 2);
    assert_eq!(s.num_constraints(), 4);
}

fn small_lp() -> impl Strategy<Value = (Vec<f64>, Vec<Vec<f64>>, Vec<f64>)> {
    (1usize..4, 1usize..6).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(-5i32..6, n),
            prop::collection::vec(prop::collection::vec(-5i32..6, n), m),
            prop::collection::vec(-10i32..20, m),
        )
            .prop_map(|(c, a, b)| {
                (
                    c.into_iter().map(f64::from).collect(),
                    a.into_iter()
                        .map(|r| r.into_iter().map(f64::from).collect())
                        .collect(),
                    b.into_iter().map(f64::from).collect(),
                )
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn repeated_solves_are_identical((c, a, b) in small_lp()) {
        let s1 = solve(&c, &a, &b, SolveCfg::default()).unwrap();
        let s2 = solve(&c, &a, &b, SolveCfg::default()).unwrap();
        prop_assert_eq!(s1, s2);
    }

    #[test]
    fn terminal_snapshot_is_always_present((c, a, b) in small_lp()) {
        let sol = solve(&c, &a, &b, SolveCfg::default()).unwrap();
        prop_assert!(!sol.steps.is_empty());
        prop_assert!(sol.status.is_terminal());
        // an infeasible solve ends on phase I's own (optimal) terminal snapshot
        if sol.status != Status::Infeasible {
            prop_assert_eq!(sol.final_step().unwrap().is_optimal, sol.status == Status::Optimal);
        }
        if sol.status == Status::Optimal {
            let x = sol.optimal_point().unwrap();
            prop_assert!(satisfies(&a, &b, x, 1e-6));
            prop_assert!(x.iter().all(|&v| v >= -1e-9));
            let value: f64 = c.iter().zip(x.iter()).map(|(ci, xi)| ci * xi).sum();
            prop_assert!((value - sol.optimal_value().unwrap()).abs() < 1e-6);
        }
    }
}
