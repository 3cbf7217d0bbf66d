//! JSON problem files and solve reports.
//!
//! Problem file: `{ "objective": [3, 2], "constraints": [[a, b, c], ...] }`,
//! each constraint meaning `a·x1 + b·x2 <= c`. The input name `demo` selects
//! the built-in problem.

use anyhow::{Context, Result};
use lpviz::api::{LpProblem, Solution};
use lpviz::simplex::Phase;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    pub objective: [f64; 2],
    pub constraints: Vec<[f64; 3]>,
}

impl From<&LpProblem> for ProblemFile {
    fn from(p: &LpProblem) -> Self {
        Self {
            objective: [p.objective.x, p.objective.y],
            constraints: p.constraints.iter().map(|h| h.abc()).collect(),
        }
    }
}

impl From<ProblemFile> for LpProblem {
    fn from(f: ProblemFile) -> Self {
        LpProblem::from_rows(f.objective, &f.constraints)
    }
}

/// `demo` or a path to a problem JSON file.
pub fn load(input: &str) -> Result<LpProblem> {
    if input == "demo" {
        return Ok(LpProblem::demo());
    }
    let bytes = fs::read(input).with_context(|| format!("reading problem {input}"))?;
    let file: ProblemFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing problem {input}"))?;
    Ok(file.into())
}

pub fn save<P: AsRef<Path>>(path: P, problem: &LpProblem) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let body = serde_json::to_vec_pretty(&ProblemFile::from(problem))?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub phase: u8,
    pub x: Vec<f64>,
    pub objective: f64,
    pub optimal: bool,
}

#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub status: &'static str,
    pub optimal_point: Option<Vec<f64>>,
    pub optimal_value: Option<f64>,
    pub steps: Vec<StepRecord>,
}

impl From<&Solution> for SolveReport {
    fn from(sol: &Solution) -> Self {
        Self {
            status: sol.status.as_str(),
            optimal_point: sol.optimal_point().map(|x| x.iter().copied().collect()),
            optimal_value: sol.optimal_value(),
            steps: sol
                .steps
                .iter()
                .enumerate()
                .map(|(index, s)| StepRecord {
                    index,
                    phase: phase_number(s.phase),
                    x: s.solution.iter().copied().collect(),
                    objective: s.objective_value,
                    optimal: s.is_optimal,
                })
                .collect(),
        }
    }
}

#[inline]
pub fn phase_number(phase: Phase) -> u8 {
    match phase {
        Phase::One => 1,
        Phase::Two => 2,
    }
}
