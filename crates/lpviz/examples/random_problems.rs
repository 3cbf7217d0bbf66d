//! Draw a few random problems and compare the simplex optimum with the best
//! polygon vertex.
//!
//! Usage:
//!   cargo run -p lpviz --example random_problems -- 20

use lpviz::prelude::*;

fn main() {
    let count: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let cfg = RandomProblemCfg::default();
    for index in 0..count {
        let p = draw_problem(cfg, ReplayToken::new(2025, index));
        let verts = p.feasible_polygon();
        let best = p.best_vertex().map(|(_, v)| v);
        match p.solve(SolveCfg::default()) {
            Ok(sol) => println!(
                "#{index:<3} V={:<3} steps={:<3} status={:<10} simplex={:?} vertex={:?}",
                verts.len(),
                sol.steps.len(),
                sol.status.as_str(),
                sol.optimal_value(),
                best
            ),
            Err(e) => eprintln!("#{index}: {e}"),
        }
    }
}
