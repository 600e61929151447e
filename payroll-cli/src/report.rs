//! Plain-text and CSV rendering of engine results.

use std::io::{self, Write};

use payroll_core::calculations::PersonalTaxBreakdown;
use payroll_core::{ColorWeight, ScenarioInput, ScenarioResult, SweepCell, SweepMatrix, Tone};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::utils::{format_amount, format_percent};

const LABEL_WIDTH: usize = 26;
const CELL_WIDTH: usize = 15;

fn line<W: Write>(
    out: &mut W,
    label: &str,
    value: Decimal,
) -> io::Result<()> {
    writeln!(out, "{label:<LABEL_WIDTH$}{:>14}", format_amount(value))
}

/// Personal tax, with the per-slab breakdown when `explain` is set.
pub fn write_tax<W: Write>(
    out: &mut W,
    breakdown: &PersonalTaxBreakdown,
    explain: bool,
) -> io::Result<()> {
    line(out, "Gross income", breakdown.gross_income)?;
    line(out, "Taxable income", breakdown.taxable_income)?;

    if breakdown.rebate_applied {
        writeln!(out, "Rebate applied: no tax due")?;
    } else if explain {
        writeln!(out)?;
        writeln!(
            out,
            "{:<24}{:>7}{:>14}{:>14}",
            "Slab", "Rate", "Taxed", "Tax"
        )?;
        for slice in &breakdown.slices {
            let slab = match slice.upper {
                Some(upper) => format!("{} - {}", format_amount(slice.lower), format_amount(upper)),
                None => format!("above {}", format_amount(slice.lower)),
            };
            writeln!(
                out,
                "{slab:<24}{:>7}{:>14}{:>14}",
                format_percent(slice.rate),
                format_amount(slice.taxed_amount),
                format_amount(slice.tax),
            )?;
        }
        writeln!(out)?;
        line(out, "Bracket tax", breakdown.bracket_tax)?;
    }

    line(out, "Personal tax", breakdown.total_tax)
}

/// One evaluated scenario, company side first.
pub fn write_scenario<W: Write>(
    out: &mut W,
    input: &ScenarioInput,
    result: &ScenarioResult,
) -> io::Result<()> {
    writeln!(
        out,
        "{} family member(s) at {} each",
        input.headcount,
        format_amount(input.salary_per_head)
    )?;
    writeln!(out)?;
    line(out, "Revenue", input.revenue)?;
    line(out, "Salary outflow", result.total_salary_outflow)?;
    line(out, "Total expenses", result.total_expenses)?;
    line(out, "Pre-tax profit", result.pre_tax_profit)?;
    line(out, "Corporate tax", result.corporate_tax)?;
    line(out, "Post-tax profit", result.post_tax_profit)?;
    writeln!(out)?;
    line(out, "Personal tax per head", result.personal_tax_per_head)?;
    line(out, "Net salary per head", result.net_salary_per_head)?;
    line(out, "Family net salary", result.total_family_net_salary)?;
    writeln!(out)?;
    line(out, "Total retained", result.total_retained)?;
    writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>14}",
        "Efficiency",
        format_percent(result.efficiency_ratio)
    )
}

/// Text hint for a cell's colour: `--`/`-` lean low, `+`/`++` lean high.
fn shade(weight: ColorWeight) -> &'static str {
    let strong = weight.intensity >= dec!(0.5);
    match (weight.tone, strong) {
        (_, _) if weight.intensity.is_zero() => "",
        (Tone::Low, true) => "--",
        (Tone::Low, false) => "-",
        (Tone::High, false) => "+",
        (Tone::High, true) => "++",
    }
}

fn is_at(
    cell: &SweepCell,
    position: Option<(u32, Decimal)>,
) -> bool {
    position == Some((cell.headcount, cell.salary_per_head))
}

/// The sweep matrix as a table.
///
/// `[...]` marks the current allocation and `*` the best one.
pub fn write_matrix<W: Write>(
    out: &mut W,
    matrix: &SweepMatrix,
    current: Option<(u32, Decimal)>,
) -> io::Result<()> {
    if matrix.is_empty() {
        return writeln!(out, "(empty sweep)");
    }

    let best = matrix
        .best()
        .map(|cell| (cell.headcount, cell.salary_per_head));

    write!(out, "{:>8}", "heads")?;
    for step in matrix.salary_steps() {
        write!(out, "{:>CELL_WIDTH$}", format_amount(*step))?;
    }
    writeln!(out)?;

    for row in matrix.rows() {
        write!(out, "{:>8}", row.headcount)?;
        for cell in &row.cells {
            let mut text = format!(
                "{}{}",
                format_amount(cell.total_retained),
                shade(cell.color_weight())
            );
            if is_at(cell, best) {
                text.push('*');
            }
            if is_at(cell, current) {
                text = format!("[{text}]");
            }
            write!(out, "{text:>CELL_WIDTH$}")?;
        }
        writeln!(out)?;
    }

    if let Some(cell) = matrix.best() {
        writeln!(out)?;
        writeln!(
            out,
            "Best: {} family member(s) at {} each retains {}",
            cell.headcount,
            format_amount(cell.salary_per_head),
            format_amount(cell.total_retained)
        )?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CsvCell {
    headcount: u32,
    salary_per_head: Decimal,
    total_retained: Decimal,
    ratio: Decimal,
    tone: Tone,
    intensity: Decimal,
}

/// The sweep matrix as CSV, one row per cell in row-major order.
pub fn write_matrix_csv<W: Write>(
    out: W,
    matrix: &SweepMatrix,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for cell in matrix.cells() {
        let weight = cell.color_weight();
        writer.serialize(CsvCell {
            headcount: cell.headcount,
            salary_per_head: cell.salary_per_head,
            total_retained: cell.total_retained,
            ratio: cell.ratio,
            tone: weight.tone,
            intensity: weight.intensity,
        })?;
    }
    writer.flush()?;
    Ok(())
}
