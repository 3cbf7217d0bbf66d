//! Tabular exports (CSV via polars) of solver steps and playback frames.

use anyhow::{Context, Result};
use lpviz::api::{Frame, Solution};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::problem_file::{ensure_parent, phase_number};

#[inline]
fn coord(v: &lpviz::DVector<f64>, i: usize) -> f64 {
    v.get(i).copied().unwrap_or(f64::NAN)
}

/// One row per recorded step: `step, phase, x1, x2, objective, optimal`.
pub fn steps_frame(sol: &Solution) -> PolarsResult<DataFrame> {
    let step: Vec<u32> = (0..sol.steps.len() as u32).collect();
    let phase: Vec<u32> = sol.steps.iter().map(|s| u32::from(phase_number(s.phase))).collect();
    let x1: Vec<f64> = sol.steps.iter().map(|s| coord(&s.solution, 0)).collect();
    let x2: Vec<f64> = sol.steps.iter().map(|s| coord(&s.solution, 1)).collect();
    let objective: Vec<f64> = sol.steps.iter().map(|s| s.objective_value).collect();
    let optimal: Vec<bool> = sol.steps.iter().map(|s| s.is_optimal).collect();
    df!(
        "step" => step,
        "phase" => phase,
        "x1" => x1,
        "x2" => x2,
        "objective" => objective,
        "optimal" => optimal
    )
}

/// One row per playback frame: `frame, segment, t, x1, x2, status, at_optimum`.
pub fn frames_frame(frames: &[Frame]) -> PolarsResult<DataFrame> {
    let frame: Vec<u32> = (0..frames.len() as u32).collect();
    let segment: Vec<u32> = frames.iter().map(|f| f.segment as u32).collect();
    let t: Vec<f64> = frames.iter().map(|f| f.t).collect();
    let x1: Vec<f64> = frames.iter().map(|f| coord(&f.point, 0)).collect();
    let x2: Vec<f64> = frames.iter().map(|f| coord(&f.point, 1)).collect();
    let status: Vec<&str> = frames.iter().map(|f| f.status.as_str()).collect();
    let at_optimum: Vec<bool> = frames.iter().map(|f| f.at_optimum).collect();
    df!(
        "frame" => frame,
        "segment" => segment,
        "t" => t,
        "x1" => x1,
        "x2" => x2,
        "status" => status,
        "at_optimum" => at_optimum
    )
}

pub fn write_csv<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), path = %path.display(), "csv");
    Ok(())
}
