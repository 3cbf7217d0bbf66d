use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lpviz::api::{
    draw_problem, polygon_and_viewport, CancelToken, Frame, PivotRule, Playback, PlaybackCfg,
    RandomProblemCfg, ReplayToken, SolveCfg, Speed, Status,
};
use lpviz::geom2::fit_to_viewport;
use lpviz::DVector;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod problem_file;
mod provenance;
mod tables;

use problem_file::{ensure_parent, SolveReport};
use provenance::Payload;

#[derive(Parser)]
#[command(name = "lpviz")]
#[command(about = "Two-phase simplex runner: solve, draw, replay")]
struct Cmd {
    /// Log solver internals (phase transitions, pivots at trace level)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum Rule {
    Dantzig,
    Bland,
}

impl From<Rule> for PivotRule {
    fn from(r: Rule) -> Self {
        match r {
            Rule::Dantzig => PivotRule::Dantzig,
            Rule::Bland => PivotRule::Bland,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Solve a problem and write the step trace as JSON (and optionally CSV)
    Solve {
        /// `demo` or a problem JSON file
        #[arg(long, default_value = "demo")]
        input: String,
        #[arg(long, default_value_t = 1000)]
        max_iter: usize,
        #[arg(long, value_enum, default_value_t = Rule::Dantzig)]
        rule: Rule,
        /// JSON report; printed to stdout when omitted
        #[arg(long)]
        out: Option<String>,
        #[arg(long)]
        csv: Option<String>,
    },
    /// Feasible polygon and its viewport mapping
    Hull {
        #[arg(long, default_value = "demo")]
        input: String,
        #[arg(long, default_value_t = 600.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Overrides the canvas padding; the origin is then not forced into view
        #[arg(long)]
        padding: Option<f64>,
        #[arg(long)]
        out: Option<String>,
    },
    /// Draw a reproducible random problem and write it as a problem file
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        out: String,
    },
    /// Solve, then export playback frames from the origin as CSV
    Frames {
        #[arg(long, default_value = "demo")]
        input: String,
        #[arg(long, default_value_t = 5)]
        speed: u8,
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Solve {
            input,
            max_iter,
            rule,
            out,
            csv,
        } => solve(&input, max_iter, rule, out.as_deref(), csv.as_deref()),
        Action::Hull {
            input,
            width,
            height,
            padding,
            out,
        } => hull(&input, width, height, padding, out.as_deref()),
        Action::Random { seed, index, out } => random(seed, index, &out),
        Action::Frames {
            input,
            speed,
            frame_ms,
            out,
        } => frames(&input, speed, frame_ms, &out),
        Action::Report => report(),
    }
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn solve(input: &str, max_iter: usize, rule: Rule, out: Option<&str>, csv: Option<&str>) -> Result<()> {
    let problem = problem_file::load(input)?;
    let cfg = SolveCfg::default()
        .with_max_iterations(max_iter)
        .with_rule(rule.into());
    tracing::info!(input, constraints = problem.constraints.len(), max_iter, "solve");
    let sol = problem.solve(cfg)?;
    tracing::info!(
        status = %sol.status,
        steps = sol.steps.len(),
        pivots = sol.pivot_count(),
        value = ?sol.optimal_value(),
        "solved"
    );

    let report = serde_json::to_value(SolveReport::from(&sol))?;
    let params = json!({
        "max_iterations": max_iter,
        "rule": format!("{:?}", PivotRule::from(rule)),
    });
    match out {
        Some(out) => {
            write_json(Path::new(out), &report)?;
            provenance::write_sidecar(out, Payload::new("solve", params.clone()).with_input(input))?;
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    if let Some(csv) = csv {
        let mut df = tables::steps_frame(&sol)?;
        tables::write_csv(&mut df, csv)?;
        provenance::write_sidecar(csv, Payload::new("solve", params).with_input(input))?;
    }
    Ok(())
}

fn hull(input: &str, width: f64, height: f64, padding: Option<f64>, out: Option<&str>) -> Result<()> {
    if !(width > 0.0 && height > 0.0) {
        bail!("canvas must have positive size, got {width}x{height}");
    }
    let problem = problem_file::load(input)?;
    let (polygon, vp) = match padding {
        Some(padding) => {
            let polygon = problem.feasible_polygon();
            let vp = fit_to_viewport(&polygon, width, height, padding);
            (polygon, vp)
        }
        None => polygon_and_viewport(&problem, width, height),
    };
    tracing::info!(input, vertices = polygon.len(), scale = vp.scale, "hull");
    if polygon.is_empty() {
        tracing::warn!(input, "feasible region is empty or degenerate");
    }

    let vertices: Vec<[f64; 2]> = polygon.iter().map(|p| [p.x, p.y]).collect();
    let screen: Vec<[f64; 2]> = polygon
        .iter()
        .map(|p| {
            let q = vp.to_screen(*p);
            [q.x, q.y]
        })
        .collect();
    let doc = json!({
        "vertices": vertices,
        "screen": screen,
        "viewport": {
            "scale": vp.scale,
            "origin": [vp.origin.x, vp.origin.y],
            "width": width,
            "height": height,
        },
    });
    match out {
        Some(out) => {
            write_json(Path::new(out), &doc)?;
            let params = json!({ "width": width, "height": height, "padding": padding });
            provenance::write_sidecar(out, Payload::new("hull", params).with_input(input))?;
        }
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}

fn random(seed: u64, index: u64, out: &str) -> Result<()> {
    let tok = ReplayToken::new(seed, index);
    let problem = draw_problem(RandomProblemCfg::default(), tok);
    tracing::info!(seed, index, constraints = problem.constraints.len(), "random problem");
    problem_file::save(out, &problem)?;
    let params = json!({ "seed": seed, "index": index });
    provenance::write_sidecar(
        out,
        Payload::new("random", params).with_input(format!("replay:{seed}:{index}")),
    )?;
    Ok(())
}

fn frames(input: &str, speed: u8, frame_ms: f64, out: &str) -> Result<()> {
    if !(frame_ms.is_finite() && frame_ms > 0.0) {
        bail!("frame interval must be positive, got {frame_ms}");
    }
    let problem = problem_file::load(input)?;
    let sol = problem.solve(SolveCfg::default())?;
    let speed = Speed::new(speed);
    let cfg = PlaybackCfg {
        frame_ms,
        ..PlaybackCfg::default()
    };
    let pb = Playback::new(DVector::zeros(2), &sol, speed, CancelToken::new()).with_cfg(cfg);
    let duration_ms = pb.total_duration_ms();
    let frames: Vec<Frame> = pb.collect();
    let last = frames.last().map_or(Status::Searching, |f| f.status);
    tracing::info!(
        input,
        speed = speed.get(),
        frames = frames.len(),
        duration_ms,
        status = %last,
        "frames"
    );

    let mut df = tables::frames_frame(&frames)?;
    tables::write_csv(&mut df, out)?;
    let params = json!({ "speed": speed.get(), "frame_ms": frame_ms });
    provenance::write_sidecar(out, Payload::new("frames", params).with_input(input))?;
    Ok(())
}

fn report() -> Result<()> {
    let mut doc = provenance::header();
    doc["params"] = json!({ "solve": { "max_iterations": SolveCfg::default().max_iterations } });
    doc["outputs"] = json!([]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
