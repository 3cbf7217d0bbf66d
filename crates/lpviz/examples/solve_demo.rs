//! Solve the built-in problem and print the pivot path.
//!
//! Usage:
//!   cargo run -p lpviz --example solve_demo
//!   cargo run -p lpviz --example solve_demo -- bland

use lpviz::prelude::*;

fn main() {
    let rule = match std::env::args().nth(1).as_deref() {
        Some("bland") => PivotRule::Bland,
        _ => PivotRule::Dantzig,
    };
    let problem = LpProblem::demo();
    let sol = match problem.solve(SolveCfg::default().with_rule(rule)) {
        Ok(sol) => sol,
        Err(e) => {
            eprintln!("solve failed: {e}");
            return;
        }
    };
    println!(
        "maximize {}x1 + {}x2 over {} constraints ({rule:?})",
        problem.objective.x,
        problem.objective.y,
        problem.constraints.len()
    );
    for (k, s) in sol.steps.iter().enumerate() {
        println!(
            "{k:>3} {:?} ({:>9.3}, {:>9.3}) obj={:>10.3}{}",
            s.phase,
            s.solution[0],
            s.solution[1],
            s.objective_value,
            if s.is_optimal { " *" } else { "" }
        );
    }
    println!("status: {}", sol.status);
}
