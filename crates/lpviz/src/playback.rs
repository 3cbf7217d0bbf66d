//! Step playback: eased tweens between consecutive solver steps.
//!
//! The solver returns its whole trace synchronously; this module owns pacing.
//! A `Playback` yields frames from a start point to the first step, then
//! between each pair of consecutive steps. Segment durations scale with
//! `1 / speed`. A shared `CancelToken` stops playback at the next frame, also
//! in the middle of a segment.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nalgebra::DVector;

use crate::simplex::{Phase, Solution, Status, Step};

/// Cooperative cancellation flag shared between the driver and its caller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Playback speed in `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Clamped into `MIN..=MAX`.
    #[inline]
    pub fn new(v: u8) -> Self {
        Self(v.clamp(Self::MIN, Self::MAX))
    }
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(5)
    }
}

/// Timing configuration (milliseconds at speed 1).
#[derive(Clone, Copy, Debug)]
pub struct PlaybackCfg {
    pub frame_ms: f64,
    /// Start point → first step.
    pub first_segment_ms: f64,
    /// Every later segment.
    pub segment_ms: f64,
}

impl Default for PlaybackCfg {
    fn default() -> Self {
        Self {
            frame_ms: 16.0,
            first_segment_ms: 1500.0,
            segment_ms: 1200.0,
        }
    }
}

/// `t²(3 − 2t)`, clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn lerp(from: &DVector<f64>, to: &DVector<f64>, t: f64) -> DVector<f64> {
    from + (to - from) * t
}

/// One rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Index of the step this segment moves towards.
    pub segment: usize,
    /// Linear progress within the segment, in `(0, 1]`.
    pub t: f64,
    pub point: DVector<f64>,
    /// `Searching` until the very last frame, which carries the solve status.
    pub status: Status,
    /// Set on the frame that lands on a Phase II optimal step.
    pub at_optimum: bool,
}

pub struct Playback<'a> {
    start: DVector<f64>,
    steps: &'a [Step],
    final_status: Status,
    speed: Speed,
    cfg: PlaybackCfg,
    cancel: CancelToken,
    segment: usize,
    frame: usize,
}

impl<'a> Playback<'a> {
    pub fn new(start: DVector<f64>, solution: &'a Solution, speed: Speed, cancel: CancelToken) -> Self {
        Self {
            start,
            steps: &solution.steps,
            final_status: solution.status,
            speed,
            cfg: PlaybackCfg::default(),
            cancel,
            segment: 0,
            frame: 0,
        }
    }

    pub fn with_cfg(mut self, cfg: PlaybackCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.steps.len()
    }

    pub fn segment_duration_ms(&self, segment: usize) -> f64 {
        let base = if segment == 0 {
            self.cfg.first_segment_ms
        } else {
            self.cfg.segment_ms
        };
        base / f64::from(self.speed.get())
    }

    pub fn total_duration_ms(&self) -> f64 {
        (0..self.segment_count())
            .map(|k| self.segment_duration_ms(k))
            .sum()
    }

    fn frames_in(&self, segment: usize) -> usize {
        let frames = (self.segment_duration_ms(segment) / self.cfg.frame_ms).ceil();
        if frames.is_finite() && frames >= 1.0 {
            frames as usize
        } else {
            1
        }
    }

    fn endpoints(&self, segment: usize) -> (&DVector<f64>, &DVector<f64>) {
        let to = &self.steps[segment].solution;
        if segment == 0 {
            (&self.start, to)
        } else {
            (&self.steps[segment - 1].solution, to)
        }
    }
}

impl Iterator for Playback<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.cancel.is_cancelled() || self.segment >= self.steps.len() {
            return None;
        }
        let seg = self.segment;
        let total = self.frames_in(seg);
        self.frame += 1;
        let t = self.frame as f64 / total as f64;
        let end_of_segment = self.frame >= total;
        let (from, to) = self.endpoints(seg);
        let point = if end_of_segment {
            to.clone()
        } else {
            lerp(from, to, smoothstep(t))
        };

        let step = &self.steps[seg];
        let last = end_of_segment && seg + 1 == self.steps.len();
        let frame = Frame {
            segment: seg,
            t,
            point,
            status: if last {
                self.final_status
            } else {
                Status::Searching
            },
            at_optimum: end_of_segment && step.is_optimal && step.phase == Phase::Two,
        };
        if end_of_segment {
            self.segment += 1;
            self.frame = 0;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::{solve, SolveCfg};
    use nalgebra::dvector;

    fn textbook_solution() -> Solution {
        solve(
            &[3.0, 2.0],
            &[vec![1.0, 1.0], vec![2.0, 1.0]],
            &[4.0, 6.0],
            SolveCfg::default(),
        )
        .unwrap()
    }

    fn cfg() -> PlaybackCfg {
        PlaybackCfg {
            frame_ms: 60.0,
            ..PlaybackCfg::default()
        }
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(2.0), 1.0);
    }

    #[test]
    fn speed_is_clamped() {
        assert_eq!(Speed::new(0).get(), 1);
        assert_eq!(Speed::new(42).get(), 10);
        assert_eq!(Speed::default().get(), 5);
    }

    #[test]
    fn frames_cover_every_segment_and_end_on_optimum() {
        let sol = textbook_solution();
        assert_eq!(sol.steps.len(), 4);
        let pb = Playback::new(dvector![0.0, 0.0], &sol, Speed::new(5), CancelToken::new())
            .with_cfg(cfg());
        // 1500/5 = 300ms, 1200/5 = 240ms
        assert!((pb.total_duration_ms() - (300.0 + 3.0 * 240.0)).abs() < 1e-9);
        let frames: Vec<Frame> = pb.collect();
        assert_eq!(frames.len(), 5 + 3 * 4);

        let last = frames.last().unwrap();
        assert_eq!(last.status, Status::Optimal);
        assert!(last.at_optimum);
        assert!((last.point.clone() - dvector![2.0, 2.0]).norm() < 1e-12);
        assert!(frames[..frames.len() - 1]
            .iter()
            .all(|f| f.status == Status::Searching && !f.at_optimum));
        // segment ends land exactly on the step solutions
        for (k, step) in sol.steps.iter().enumerate() {
            let end = frames.iter().filter(|f| f.segment == k).last().unwrap();
            assert_eq!(end.t, 1.0);
            assert_eq!(end.point, step.solution);
        }
    }

    #[test]
    fn cancel_stops_mid_segment() {
        let sol = textbook_solution();
        let token = CancelToken::new();
        let mut pb = Playback::new(dvector![0.0, 0.0], &sol, Speed::new(1), token.clone())
            .with_cfg(cfg());
        let first = pb.next().unwrap();
        assert_eq!(first.segment, 0);
        assert!(first.t < 1.0);
        token.cancel();
        assert!(pb.next().is_none());
        assert!(token.is_cancelled());
    }

    #[test]
    fn unbounded_playback_ends_with_status() {
        let sol = solve(
            &[1.0, 1.0],
            &[vec![-1.0, 0.0], vec![0.0, -1.0]],
            &[0.0, 0.0],
            SolveCfg::default(),
        )
        .unwrap();
        let frames: Vec<Frame> =
            Playback::new(dvector![0.0, 0.0], &sol, Speed::new(10), CancelToken::new()).collect();
        let last = frames.last().unwrap();
        assert_eq!(last.status, Status::Unbounded);
        assert!(!last.at_optimum);
    }
}
