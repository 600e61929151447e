//! End-to-end runs of the CLI commands against an on-disk configuration
//! fixture, captured into memory instead of stdout.

use std::path::Path;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use payroll_cli::app;
use payroll_cli::cli::{Command, CompanyArgs, OutputFormat};
use payroll_cli::config::AppConfig;

/// Path to the sample regime shipped with the test fixtures.
fn fixture_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("regime.toml")
        .leak()
}

fn company() -> CompanyArgs {
    CompanyArgs {
        revenue: dec!(2000000),
        fixed: dec!(200000),
        flexible: dec!(100000),
    }
}

fn run(
    command: Command,
    config: &AppConfig,
) -> String {
    let mut out = Vec::new();
    app::run(&command, config, &mut out).expect("command should succeed");
    String::from_utf8(out).expect("report is UTF-8")
}

#[test]
fn fixture_config_loads() {
    let config = AppConfig::load(fixture_path()).expect("fixture should load");

    assert_eq!(config.regime.personal.rebate_threshold, dec!(500000));
    assert_eq!(config.regime.personal.schedule.brackets().len(), 3);
    assert_eq!(config.regime.corporate.effective_rate, dec!(0.25));
    assert_eq!(config.sweep.headcounts, vec![1, 2, 3]);
}

#[test]
fn tax_command_uses_fixture_regime() {
    let config = AppConfig::load(fixture_path()).unwrap();

    // Taxable 9,50,000: 12,500 + 45,000 = 57,500, × 1.04 = 59,800
    let text = run(
        Command::Tax {
            gross: dec!(1000000),
            explain: true,
        },
        &config,
    );

    assert!(text.contains("9,50,000"), "{text}");
    assert!(text.contains("59,800"), "{text}");
    assert!(text.contains("above 5,00,000"), "{text}");
}

#[test]
fn evaluate_command_reports_retained_and_ceiling_hint() {
    let config = AppConfig::default();

    let text = run(
        Command::Evaluate {
            company: CompanyArgs {
                revenue: dec!(5000000),
                fixed: dec!(1000000),
                flexible: dec!(500000),
            },
            headcount: 2,
            salary: dec!(3000000),
        },
        &config,
    );

    assert!(text.contains("Total retained"), "{text}");
    assert!(text.contains("12,75,000"), "{text}");
}

#[test]
fn sweep_table_marks_current_and_best() {
    let config = AppConfig::load(fixture_path()).unwrap();

    let text = run(
        Command::Sweep {
            company: company(),
            headcount: Some(1),
            salary: Some(dec!(550000)),
            format: OutputFormat::Table,
        },
        &config,
    );

    let lines: Vec<&str> = text.lines().collect();
    // Header plus three headcount rows, a blank line and the summary.
    assert_eq!(lines.len(), 6, "{text}");
    assert!(lines[1].contains('['), "{text}");
    assert!(text.contains('*'), "{text}");
    assert!(lines[5].starts_with("Best:"), "{text}");
}

#[test]
fn sweep_csv_has_one_record_per_cell() {
    let config = AppConfig::load(fixture_path()).unwrap();

    let text = run(
        Command::Sweep {
            company: company(),
            headcount: None,
            salary: None,
            format: OutputFormat::Csv,
        },
        &config,
    );

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "headcount",
            "salary_per_head",
            "total_retained",
            "ratio",
            "tone",
            "intensity"
        ]
    );
    assert_eq!(reader.records().count(), 9);
}
