use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::utils::parse_amount;

/// Compare paying family members a salary with keeping revenue as company
/// profit, and find the allocation that keeps the most after tax.
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about, long_about = None)]
pub struct Cli {
    /// TOML file overriding the tax regime or the sweep lattice.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Append log records to this file as well as stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Personal income tax on a gross salary.
    Tax {
        /// Gross annual salary, e.g. 12,75,000.
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        gross: Decimal,

        /// Show how each slab contributes.
        #[arg(long)]
        explain: bool,
    },

    /// Evaluate one allocation of revenue.
    Evaluate {
        #[command(flatten)]
        company: CompanyArgs,

        /// Family members on the payroll.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        headcount: u32,

        /// Gross annual salary per family member.
        #[arg(long, value_parser = parse_amount)]
        salary: Decimal,
    },

    /// Evaluate every headcount × salary pair of the sweep lattice.
    Sweep {
        #[command(flatten)]
        company: CompanyArgs,

        /// Current headcount, marked in the table.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..), requires = "salary")]
        headcount: Option<u32>,

        /// Current salary per head, marked in the table.
        #[arg(long, value_parser = parse_amount, requires = "headcount")]
        salary: Option<Decimal>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Tax { .. } => "tax",
            Command::Evaluate { .. } => "evaluate",
            Command::Sweep { .. } => "sweep",
        }
    }
}

/// Company figures that stay fixed while the salary decision varies.
#[derive(Debug, Clone, Args)]
pub struct CompanyArgs {
    /// Gross annual revenue.
    #[arg(long, value_parser = parse_amount)]
    pub revenue: Decimal,

    /// Fixed expenses.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    pub fixed: Decimal,

    /// Flexible expenses.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    pub flexible: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn evaluate_parses_grouped_amounts() {
        let cli = Cli::try_parse_from([
            "payroll",
            "evaluate",
            "--revenue",
            "50,00,000",
            "--fixed",
            "1,000,000",
            "--headcount",
            "2",
            "--salary",
            "12,00,000",
        ])
        .unwrap();

        match cli.command {
            Command::Evaluate {
                company,
                headcount,
                salary,
            } => {
                assert_eq!(company.revenue, dec!(5000000));
                assert_eq!(company.fixed, dec!(1000000));
                assert_eq!(company.flexible, Decimal::ZERO);
                assert_eq!(headcount, 2);
                assert_eq!(salary, dec!(1200000));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn evaluate_rejects_zero_headcount() {
        let result = Cli::try_parse_from([
            "payroll",
            "evaluate",
            "--revenue",
            "100",
            "--headcount",
            "0",
            "--salary",
            "10",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn sweep_current_cell_needs_both_coordinates() {
        let result = Cli::try_parse_from(["payroll", "sweep", "--revenue", "100", "--headcount", "2"]);

        assert!(result.is_err());
    }

    #[test]
    fn sweep_defaults_to_table() {
        let cli = Cli::try_parse_from(["payroll", "sweep", "--revenue", "100"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Sweep {
                format: OutputFormat::Table,
                ..
            }
        ));
    }

    #[test]
    fn command_name_matches_subcommand() {
        let cli = Cli::try_parse_from(["payroll", "tax", "1275000"]).unwrap();

        assert_eq!(cli.command.name(), "tax");
        assert_eq!(cli.log_level, "warn");
    }
}
