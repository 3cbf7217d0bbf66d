//! Dense tableau with named rows and explicit column kinds.
//!
//! Layout
//! - `rows[i]`: constraint row `i` (coefficients + RHS), `basis[i]` its basic column.
//! - `objective`: reduced-cost row; `objective.rhs` is the current objective value.
//! - Columns `0..n` are the decision variables; slack/surplus/artificial columns
//!   follow in constraint order. The column count is fixed per phase.
//!
//! Invariant: after every pivot each basic column is the unit vector of its row
//! (restricted to constraint rows) and has reduced cost 0.

use nalgebra::DVector;

use super::types::PivotRule;

/// Tolerance for entering/leaving comparisons.
pub(crate) const EPS_PIVOT: f64 = 1e-12;
/// Minimum magnitude of a replacement pivot when evicting artificials.
pub(crate) const EPS_CLEANUP: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Decision,
    Slack,
    Surplus,
    Artificial,
}

/// One tableau row; the RHS is kept apart from the coefficients.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Row {
    pub coeffs: DVector<f64>,
    pub rhs: f64,
}

impl Row {
    #[inline]
    pub fn zeros(cols: usize) -> Self {
        Self {
            coeffs: DVector::zeros(cols),
            rhs: 0.0,
        }
    }

    #[inline]
    fn divide(&mut self, p: f64) {
        self.coeffs /= p;
        self.rhs /= p;
    }

    /// `self -= k * other`
    #[inline]
    pub fn sub_scaled(&mut self, other: &Row, k: f64) {
        self.coeffs.axpy(-k, &other.coeffs, 1.0);
        self.rhs -= k * other.rhs;
    }
}

/// Outcome of the entering-column scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entering {
    Column(usize),
    /// No improving column remains.
    Optimal,
    /// Improving column with no positive entry: the objective grows without bound along it.
    Ray(usize),
}

#[derive(Clone, Debug)]
pub(crate) struct Tableau {
    pub rows: Vec<Row>,
    pub objective: Row,
    pub basis: Vec<usize>,
    pub kinds: Vec<ColumnKind>,
    /// Number of decision variables.
    pub n: usize,
}

impl Tableau {
    /// Phase I tableau for `A x <= b`.
    ///
    /// Rows with `b_i < 0` are negated; they get a surplus column and a basic
    /// artificial column. Other rows get a basic slack column. The objective row
    /// maximizes minus the artificial sum and is priced out against the basis.
    pub fn phase_one(matrix: &[Vec<f64>], rhs: &[f64], n: usize) -> Self {
        let extra: usize = rhs.iter().map(|&b| if b < 0.0 { 2 } else { 1 }).sum();
        let cols = n + extra;
        let mut kinds = vec![ColumnKind::Decision; n];
        kinds.reserve(extra);
        let mut rows = Vec::with_capacity(rhs.len());
        let mut basis = Vec::with_capacity(rhs.len());

        for (a, &b) in matrix.iter().zip(rhs) {
            let flip = b < 0.0;
            let sign = if flip { -1.0 } else { 1.0 };
            let mut row = Row::zeros(cols);
            for (j, &aij) in a.iter().enumerate() {
                row.coeffs[j] = sign * aij;
            }
            row.rhs = sign * b;
            if flip {
                let t = kinds.len();
                kinds.push(ColumnKind::Surplus);
                row.coeffs[t] = -1.0;
                let art = kinds.len();
                kinds.push(ColumnKind::Artificial);
                row.coeffs[art] = 1.0;
                basis.push(art);
            } else {
                let s = kinds.len();
                kinds.push(ColumnKind::Slack);
                row.coeffs[s] = 1.0;
                basis.push(s);
            }
            rows.push(row);
        }
        debug_assert_eq!(kinds.len(), cols);

        let mut objective = Row::zeros(cols);
        for (j, kind) in kinds.iter().enumerate() {
            if *kind == ColumnKind::Artificial {
                objective.coeffs[j] = 1.0;
            }
        }
        for (row, &bv) in rows.iter().zip(&basis) {
            if kinds[bv] == ColumnKind::Artificial {
                let coeff = objective.coeffs[bv];
                objective.sub_scaled(row, coeff);
            }
        }

        Self {
            rows,
            objective,
            basis,
            kinds,
            n,
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn objective_value(&self) -> f64 {
        self.objective.rhs
    }

    /// Remaining artificial mass; meaningful while the Phase I objective is installed.
    #[inline]
    pub fn artificial_mass(&self) -> f64 {
        -self.objective.rhs
    }

    #[inline]
    pub fn has_artificial(&self) -> bool {
        self.kinds.contains(&ColumnKind::Artificial)
    }

    /// Current basic solution restricted to the decision variables.
    pub fn solution(&self) -> DVector<f64> {
        let mut x = DVector::zeros(self.n);
        for (row, &bv) in self.rows.iter().zip(&self.basis) {
            if bv < self.n {
                x[bv] = row.rhs;
            }
        }
        x
    }

    #[inline]
    fn column_has_positive(&self, j: usize) -> bool {
        self.rows.iter().any(|r| r.coeffs[j] > EPS_PIVOT)
    }

    /// Entering column among non-artificial columns.
    ///
    /// Columns without a positive entry are never pivot columns. Under Dantzig
    /// such an improving column is reported as a ray only if nothing pivotable
    /// improves; Bland reports the first improving column as a ray as soon as it
    /// has no positive entry.
    pub fn select_entering(&self, rule: PivotRule) -> Entering {
        let mut best: Option<usize> = None;
        let mut most_negative = 0.0;
        let mut ray: Option<usize> = None;
        for j in 0..self.cols() {
            if self.kinds[j] == ColumnKind::Artificial {
                continue;
            }
            let r = self.objective.coeffs[j];
            if r >= -EPS_PIVOT {
                continue;
            }
            if !self.column_has_positive(j) {
                if rule == PivotRule::Bland {
                    return Entering::Ray(j);
                }
                ray.get_or_insert(j);
                continue;
            }
            match rule {
                PivotRule::Dantzig => {
                    if r < most_negative - EPS_PIVOT {
                        most_negative = r;
                        best = Some(j);
                    }
                }
                PivotRule::Bland => return Entering::Column(j),
            }
        }
        match (best, ray) {
            (Some(j), _) => Entering::Column(j),
            (None, Some(j)) => Entering::Ray(j),
            (None, None) => Entering::Optimal,
        }
    }

    /// Minimum-ratio row for `enter`; `None` means no row bounds the step.
    pub fn select_leaving(&self, enter: usize, rule: PivotRule) -> Option<usize> {
        let mut leave: Option<usize> = None;
        let mut best = f64::INFINITY;
        for (i, row) in self.rows.iter().enumerate() {
            let a = row.coeffs[enter];
            if a <= EPS_PIVOT || row.rhs < -EPS_PIVOT {
                continue;
            }
            let ratio = row.rhs / a;
            let better = ratio < best - EPS_PIVOT
                || (rule == PivotRule::Bland
                    && leave.is_some_and(|l| {
                        (ratio - best).abs() <= EPS_PIVOT && self.basis[i] < self.basis[l]
                    }));
            if better {
                best = ratio;
                leave = Some(i);
            }
        }
        leave
    }

    /// Exchange `basis[leave]` for `enter` and restore canonical form.
    pub fn pivot(&mut self, enter: usize, leave: usize) {
        let p = self.rows[leave].coeffs[enter];
        debug_assert!(p != 0.0, "zero pivot element");
        self.rows[leave].divide(p);
        let pivot_row = self.rows[leave].clone();
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == leave {
                continue;
            }
            let k = row.coeffs[enter];
            if k != 0.0 {
                row.sub_scaled(&pivot_row, k);
            }
        }
        let k = self.objective.coeffs[enter];
        if k != 0.0 {
            self.objective.sub_scaled(&pivot_row, k);
        }
        self.basis[leave] = enter;
    }

    /// Evict basic artificials, delete redundant rows, then compact artificial
    /// columns away and remap the basis. Returns the number of deleted rows.
    pub fn drop_artificial(&mut self) -> usize {
        if !self.has_artificial() {
            return 0;
        }
        let mut removed = 0;
        let mut i = 0;
        while i < self.rows.len() {
            if self.kinds[self.basis[i]] != ColumnKind::Artificial {
                i += 1;
                continue;
            }
            let replacement = (0..self.cols()).find(|&j| {
                self.kinds[j] != ColumnKind::Artificial && self.rows[i].coeffs[j].abs() > EPS_CLEANUP
            });
            match replacement {
                Some(j) => {
                    // RHS is ~0 here, so this pivot does not move the solution.
                    self.pivot(j, i);
                    i += 1;
                }
                None => {
                    self.rows.remove(i);
                    self.basis.remove(i);
                    removed += 1;
                }
            }
        }

        let keep: Vec<usize> = (0..self.cols())
            .filter(|&j| self.kinds[j] != ColumnKind::Artificial)
            .collect();
        let mut remap = vec![usize::MAX; self.cols()];
        for (new, &old) in keep.iter().enumerate() {
            remap[old] = new;
        }
        let compact = |row: &Row| Row {
            coeffs: DVector::from_iterator(keep.len(), keep.iter().map(|&j| row.coeffs[j])),
            rhs: row.rhs,
        };
        let rows: Vec<Row> = self.rows.iter().map(compact).collect();
        let objective = compact(&self.objective);
        let kinds: Vec<ColumnKind> = keep.iter().map(|&j| self.kinds[j]).collect();
        self.rows = rows;
        self.objective = objective;
        self.kinds = kinds;
        for bv in self.basis.iter_mut() {
            *bv = remap[*bv];
        }
        debug_assert!(self.basis.iter().all(|&bv| bv < self.cols()));
        removed
    }

    /// Install the true objective (maximize `cost · x`) in canonical form.
    pub fn set_phase_two_objective(&mut self, cost: &DVector<f64>) {
        let mut obj = Row::zeros(self.cols());
        for j in 0..self.n {
            obj.coeffs[j] = -cost[j];
        }
        for (row, &bv) in self.rows.iter().zip(&self.basis) {
            if bv < self.n {
                obj.sub_scaled(row, -cost[bv]);
            }
        }
        for (row, &bv) in self.rows.iter().zip(&self.basis) {
            let coeff = obj.coeffs[bv];
            if coeff.abs() > EPS_PIVOT {
                obj.sub_scaled(row, coeff);
            }
        }
        self.objective = obj;
    }
}
