//! Grid search over headcount × salary per head.
//!
//! For fixed company figures (revenue and expenses) the sweep evaluates
//! every lattice point, then normalizes the retained amounts so the
//! front-end can shade the matrix from worst to best. The matrix is rebuilt
//! from scratch on every call; the lattice is small and bounded.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::ScenarioEvaluator;
use crate::calculations::common::non_negative;
use crate::{RegimeConfig, ScenarioInput, SweepCell, SweepMatrix, SweepRow};

/// Ratio given to every cell when the matrix has no spread.
pub const FLAT_MATRIX_RATIO: Decimal = dec!(0.5);

/// Builds [`SweepMatrix`] values for a regime.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::RegimeConfig;
/// use payroll_core::calculations::OptimizationSweep;
///
/// let regime = RegimeConfig::default();
/// let sweep = OptimizationSweep::new(&regime);
///
/// let matrix = sweep.sweep(
///     dec!(5000000),
///     dec!(1000000),
///     dec!(500000),
///     &[1, 2, 3],
///     &[dec!(0), dec!(1275000)],
/// );
///
/// assert_eq!(matrix.dimensions(), (3, 2));
/// let best = matrix.best().unwrap();
/// assert_eq!(best.ratio, dec!(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OptimizationSweep<'a> {
    evaluator: ScenarioEvaluator<'a>,
}

impl<'a> OptimizationSweep<'a> {
    pub fn new(regime: &'a RegimeConfig) -> Self {
        Self {
            evaluator: ScenarioEvaluator::new(regime),
        }
    }

    /// Evaluates the full cross product and normalizes it.
    ///
    /// Rows follow `headcounts` and columns follow `salary_steps`, in the
    /// order given. Either axis may be empty, which yields an empty matrix.
    /// Negative salary steps are clamped to zero before evaluation, and the
    /// matrix records the clamped amounts.
    pub fn sweep(
        &self,
        revenue: Decimal,
        fixed_expenses: Decimal,
        flexible_expenses: Decimal,
        headcounts: &[u32],
        salary_steps: &[Decimal],
    ) -> SweepMatrix {
        let salary_steps: Vec<Decimal> = salary_steps.iter().copied().map(non_negative).collect();
        let base = ScenarioInput {
            revenue,
            fixed_expenses,
            flexible_expenses,
            headcount: 0,
            salary_per_head: Decimal::ZERO,
        };

        let mut rows: Vec<SweepRow> = headcounts
            .iter()
            .map(|&headcount| SweepRow {
                headcount,
                cells: salary_steps
                    .iter()
                    .map(|&salary| self.cell(&base, headcount, salary))
                    .collect(),
            })
            .collect();

        normalize(&mut rows);

        debug!(
            rows = headcounts.len(),
            columns = salary_steps.len(),
            %revenue,
            "built sweep matrix"
        );

        SweepMatrix::new(headcounts.to_vec(), salary_steps, rows)
    }

    fn cell(
        &self,
        base: &ScenarioInput,
        headcount: u32,
        salary_per_head: Decimal,
    ) -> SweepCell {
        let input = base.with_allocation(headcount, salary_per_head);
        let result = self.evaluator.evaluate(&input);
        SweepCell {
            headcount,
            salary_per_head,
            total_retained: result.total_retained,
            ratio: FLAT_MATRIX_RATIO,
        }
    }
}

/// Rescales every cell's `total_retained` into [0, 1] across the matrix.
///
/// A matrix with no spread has no meaningful ordering, so every cell gets
/// [`FLAT_MATRIX_RATIO`].
fn normalize(rows: &mut [SweepRow]) {
    let mut retained = rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .map(|cell| cell.total_retained);
    let Some(first) = retained.next() else {
        return;
    };
    let (min, max) = retained.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    });

    let range = max - min;
    if range.is_zero() {
        warn!(%min, "sweep matrix is flat, using midpoint ratio");
    }

    for cell in rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
        cell.ratio = if range.is_zero() {
            FLAT_MATRIX_RATIO
        } else {
            (cell.total_retained - min) / range
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(
        headcount: u32,
        retained: &[Decimal],
    ) -> SweepRow {
        SweepRow {
            headcount,
            cells: retained
                .iter()
                .map(|&total_retained| SweepCell {
                    headcount,
                    salary_per_head: Decimal::ZERO,
                    total_retained,
                    ratio: Decimal::ZERO,
                })
                .collect(),
        }
    }

    fn ratios(rows: &[SweepRow]) -> Vec<Decimal> {
        rows.iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.ratio)
            .collect()
    }

    // =========================================================================
    // normalize tests
    // =========================================================================

    #[test]
    fn normalize_maps_min_to_zero_and_max_to_one() {
        let mut rows = vec![row(1, &[dec!(100), dec!(300)]), row(2, &[dec!(200), dec!(500)])];

        normalize(&mut rows);

        assert_eq!(ratios(&rows), vec![dec!(0), dec!(0.5), dec!(0.25), dec!(1)]);
    }

    #[test]
    fn normalize_flat_matrix_uses_midpoint() {
        let mut rows = vec![row(1, &[dec!(700), dec!(700)]), row(2, &[dec!(700), dec!(700)])];

        normalize(&mut rows);

        assert_eq!(ratios(&rows), vec![FLAT_MATRIX_RATIO; 4]);
    }

    #[test]
    fn normalize_single_cell_uses_midpoint() {
        let mut rows = vec![row(1, &[dec!(42)])];

        normalize(&mut rows);

        assert_eq!(ratios(&rows), vec![FLAT_MATRIX_RATIO]);
    }

    #[test]
    fn normalize_ignores_empty_rows() {
        let mut rows = vec![row(1, &[]), row(2, &[])];

        normalize(&mut rows);

        assert!(ratios(&rows).is_empty());
    }

    // =========================================================================
    // sweep tests
    // =========================================================================

    #[test]
    fn sweep_rows_follow_headcount_order() {
        let regime = RegimeConfig::default();
        let sweep = OptimizationSweep::new(&regime);

        let matrix = sweep.sweep(
            dec!(5000000),
            dec!(1000000),
            dec!(500000),
            &[3, 1],
            &[dec!(0), dec!(1000000)],
        );

        let order: Vec<u32> = matrix.rows().iter().map(|r| r.headcount).collect();
        assert_eq!(order, vec![3, 1]);
        assert_eq!(matrix.rows()[0].cells[1].salary_per_head, dec!(1000000));
    }

    #[test]
    fn sweep_with_no_salary_steps_is_empty() {
        let regime = RegimeConfig::default();
        let sweep = OptimizationSweep::new(&regime);

        let matrix = sweep.sweep(dec!(5000000), dec!(0), dec!(0), &[1, 2], &[]);

        assert!(matrix.is_empty());
        assert_eq!(matrix.dimensions(), (2, 0));
        assert!(matrix.best().is_none());
    }

    #[test]
    fn sweep_zero_revenue_zero_salary_is_flat() {
        let regime = RegimeConfig::default();
        let sweep = OptimizationSweep::new(&regime);

        let matrix = sweep.sweep(Decimal::ZERO, dec!(0), dec!(0), &[1, 2, 3], &[Decimal::ZERO]);

        assert!(matrix.is_flat());
        assert!(matrix.cells().all(|cell| cell.ratio == FLAT_MATRIX_RATIO));
    }

    #[test]
    fn sweep_records_clamped_salary_steps() {
        let regime = RegimeConfig::default();
        let sweep = OptimizationSweep::new(&regime);

        let matrix = sweep.sweep(dec!(5000000), dec!(0), dec!(0), &[1], &[dec!(-250000), dec!(500000)]);

        assert_eq!(matrix.salary_steps(), &[Decimal::ZERO, dec!(500000)]);
        assert!(matrix.cell(1, dec!(-250000)).is_none());
        let cell = matrix.cell(1, Decimal::ZERO).unwrap();
        assert_eq!(cell.salary_per_head, Decimal::ZERO);
        assert_eq!(cell.total_retained, dec!(3741600.00));
    }
}
