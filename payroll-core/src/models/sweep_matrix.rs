use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Which end of the two-tone scale a cell leans towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Low,
    High,
}

/// Colour hint for a sweep cell.
///
/// `intensity` is in [0, 1] and grows with the distance from the midpoint,
/// so the worst cell is a full-strength `Low` and the best a full-strength
/// `High`. Mapping this to actual colours is up to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorWeight {
    pub tone: Tone,
    pub intensity: Decimal,
}

impl ColorWeight {
    /// Maps a normalized ratio in [0, 1] onto the two-tone scale.
    pub fn from_ratio(ratio: Decimal) -> Self {
        let half = dec!(0.5);
        if ratio < half {
            Self {
                tone: Tone::Low,
                intensity: (half - ratio) * Decimal::TWO,
            }
        } else {
            Self {
                tone: Tone::High,
                intensity: (ratio - half) * Decimal::TWO,
            }
        }
    }
}

/// A single (headcount, salary step) evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepCell {
    pub headcount: u32,
    pub salary_per_head: Decimal,
    pub total_retained: Decimal,

    /// Position of `total_retained` between the matrix minimum (0) and
    /// maximum (1). Exactly 0.5 for every cell of a flat matrix.
    pub ratio: Decimal,
}

impl SweepCell {
    pub fn color_weight(&self) -> ColorWeight {
        ColorWeight::from_ratio(self.ratio)
    }
}

/// All cells sharing one headcount, ordered like the salary steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRow {
    pub headcount: u32,
    pub cells: Vec<SweepCell>,
}

/// Result of an optimization sweep: rows by headcount, columns by salary step.
///
/// The matrix only depends on the company figures. Moving the current
/// headcount or salary does not rebuild it; use [`SweepMatrix::cell`] to
/// find the cell to highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepMatrix {
    headcounts: Vec<u32>,
    salary_steps: Vec<Decimal>,
    rows: Vec<SweepRow>,
}

impl SweepMatrix {
    pub(crate) fn new(
        headcounts: Vec<u32>,
        salary_steps: Vec<Decimal>,
        rows: Vec<SweepRow>,
    ) -> Self {
        Self {
            headcounts,
            salary_steps,
            rows,
        }
    }

    pub fn rows(&self) -> &[SweepRow] {
        &self.rows
    }

    pub fn headcounts(&self) -> &[u32] {
        &self.headcounts
    }

    pub fn salary_steps(&self) -> &[Decimal] {
        &self.salary_steps
    }

    /// `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.headcounts.len(), self.salary_steps.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.salary_steps.is_empty()
    }

    /// Iterates cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &SweepCell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    /// Finds the cell for an exact (headcount, salary) pair, if the pair is
    /// on the lattice.
    pub fn cell(
        &self,
        headcount: u32,
        salary_per_head: Decimal,
    ) -> Option<&SweepCell> {
        self.rows
            .iter()
            .find(|row| row.headcount == headcount)?
            .cells
            .iter()
            .find(|cell| cell.salary_per_head == salary_per_head)
    }

    /// The cell retaining the most; the first one in row-major order wins ties.
    pub fn best(&self) -> Option<&SweepCell> {
        self.cells().fold(None, |best: Option<&SweepCell>, cell| match best {
            Some(current) if current.total_retained >= cell.total_retained => Some(current),
            _ => Some(cell),
        })
    }

    pub fn min_retained(&self) -> Option<Decimal> {
        self.cells().map(|cell| cell.total_retained).min()
    }

    pub fn max_retained(&self) -> Option<Decimal> {
        self.cells().map(|cell| cell.total_retained).max()
    }

    /// True when every cell retains the same amount (including a single cell).
    pub fn is_flat(&self) -> bool {
        match (self.min_retained(), self.max_retained()) {
            (Some(min), Some(max)) => min == max,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cell(
        headcount: u32,
        salary: Decimal,
        retained: Decimal,
    ) -> SweepCell {
        SweepCell {
            headcount,
            salary_per_head: salary,
            total_retained: retained,
            ratio: dec!(0.5),
        }
    }

    fn two_by_two(retained: [Decimal; 4]) -> SweepMatrix {
        SweepMatrix::new(
            vec![1, 2],
            vec![dec!(100), dec!(200)],
            vec![
                SweepRow {
                    headcount: 1,
                    cells: vec![cell(1, dec!(100), retained[0]), cell(1, dec!(200), retained[1])],
                },
                SweepRow {
                    headcount: 2,
                    cells: vec![cell(2, dec!(100), retained[2]), cell(2, dec!(200), retained[3])],
                },
            ],
        )
    }

    // =========================================================================
    // ColorWeight tests
    // =========================================================================

    #[test]
    fn color_weight_zero_ratio_is_full_low() {
        let weight = ColorWeight::from_ratio(dec!(0));

        assert_eq!(weight.tone, Tone::Low);
        assert_eq!(weight.intensity, dec!(1.0));
    }

    #[test]
    fn color_weight_one_ratio_is_full_high() {
        let weight = ColorWeight::from_ratio(dec!(1));

        assert_eq!(weight.tone, Tone::High);
        assert_eq!(weight.intensity, dec!(1.0));
    }

    #[test]
    fn color_weight_midpoint_is_neutral_high() {
        let weight = ColorWeight::from_ratio(dec!(0.5));

        assert_eq!(weight.tone, Tone::High);
        assert_eq!(weight.intensity, Decimal::ZERO);
    }

    #[test]
    fn color_weight_quarter_is_half_low() {
        let weight = ColorWeight::from_ratio(dec!(0.25));

        assert_eq!(weight.tone, Tone::Low);
        assert_eq!(weight.intensity, dec!(0.5));
    }

    // =========================================================================
    // SweepMatrix accessor tests
    // =========================================================================

    #[test]
    fn cell_finds_exact_pair() {
        let matrix = two_by_two([dec!(1), dec!(2), dec!(3), dec!(4)]);

        let found = matrix.cell(2, dec!(100)).unwrap();

        assert_eq!(found.total_retained, dec!(3));
    }

    #[test]
    fn cell_returns_none_off_lattice() {
        let matrix = two_by_two([dec!(1), dec!(2), dec!(3), dec!(4)]);

        assert!(matrix.cell(3, dec!(100)).is_none());
        assert!(matrix.cell(1, dec!(150)).is_none());
    }

    #[test]
    fn best_prefers_first_on_ties() {
        let matrix = two_by_two([dec!(1), dec!(9), dec!(9), dec!(4)]);

        let best = matrix.best().unwrap();

        assert_eq!((best.headcount, best.salary_per_head), (1, dec!(200)));
    }

    #[test]
    fn min_and_max_span_all_cells() {
        let matrix = two_by_two([dec!(5), dec!(2), dec!(8), dec!(4)]);

        assert_eq!(matrix.min_retained(), Some(dec!(2)));
        assert_eq!(matrix.max_retained(), Some(dec!(8)));
        assert!(!matrix.is_flat());
    }

    #[test]
    fn empty_matrix_has_no_best() {
        let matrix = SweepMatrix::new(vec![], vec![dec!(100)], vec![]);

        assert!(matrix.is_empty());
        assert!(matrix.best().is_none());
        assert!(!matrix.is_flat());
        assert_eq!(matrix.dimensions(), (0, 1));
    }
}
