//! Command dispatch, kept apart from `main` so it can run against any writer.

use std::io::Write;

use anyhow::{Context, Result};
use payroll_core::{Engine, ScenarioInput, ScenarioModel};
use tracing::{debug, info, warn};

use crate::cli::{Command, CompanyArgs, OutputFormat};
use crate::config::AppConfig;
use crate::report;
use crate::utils::format_amount;

/// Builds the engine from a loaded configuration.
pub fn build_engine(config: &AppConfig) -> Result<Engine> {
    Engine::new(config.regime.clone()).context("invalid tax regime")
}

/// Runs one command, writing its report to `out`.
pub fn run<W: Write>(
    command: &Command,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let engine = build_engine(config)?;

    match command {
        Command::Tax { gross, explain } => {
            let breakdown = engine.tax_breakdown(*gross);
            report::write_tax(out, &breakdown, *explain)?;
        }
        Command::Evaluate {
            company,
            headcount,
            salary,
        } => {
            let input = scenario_input(company, *headcount, *salary);
            let result = engine.evaluate(&input);
            report::write_scenario(out, &input, &result)?;

            let ceiling = engine.zero_tax_ceiling();
            if *salary > ceiling {
                writeln!(
                    out,
                    "\nSalary is above {}, the most each member can draw tax-free.",
                    format_amount(ceiling)
                )?;
            }
        }
        Command::Sweep {
            company,
            headcount,
            salary,
            format,
        } => {
            let grid = &config.sweep;
            let matrix = engine.sweep(
                company.revenue,
                company.fixed,
                company.flexible,
                &grid.headcounts,
                &grid.salary_steps,
            );
            let current = (*headcount).zip(*salary);
            if let Some((h, s)) = current {
                if matrix.cell(h, s).is_none() {
                    warn!(headcount = h, salary = %s, "current allocation is not on the sweep lattice");
                }
            }
            debug!(cells = matrix.cells().count(), "rendering sweep");

            match format {
                OutputFormat::Table => report::write_matrix(out, &matrix, current)?,
                OutputFormat::Csv => {
                    report::write_matrix_csv(&mut *out, &matrix).context("failed to write CSV")?
                }
            }
        }
    }

    info!(command = command.name(), "command finished");
    Ok(())
}

fn scenario_input(
    company: &CompanyArgs,
    headcount: u32,
    salary_per_head: rust_decimal::Decimal,
) -> ScenarioInput {
    ScenarioInput {
        revenue: company.revenue,
        fixed_expenses: company.fixed,
        flexible_expenses: company.flexible,
        headcount,
        salary_per_head,
    }
}
