/// Report generation for regression runs: terminal table and JSON.
use serde::Serialize;

/// Outcome of all trials of one check.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub name: String,
    pub category: String,
    pub passed: bool,
    pub trials: usize,
    pub failures: usize,
    /// Message from the first failing trial, with its seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_failure: Option<String>,
    pub elapsed_us: u64,
}

/// Full report across all checks.
#[derive(Debug, Serialize)]
pub struct FullReport {
    pub checks: Vec<CheckReport>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl FullReport {
    pub fn from_checks(checks: Vec<CheckReport>) -> Self {
        let total = checks.len();
        let passed = checks.iter().filter(|c| c.passed).count();
        let failed = total - passed;
        Self {
            checks,
            total,
            passed,
            failed,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Build a report from per-trial results, `(seed, outcome)`.
pub fn check_report(
    name: &str,
    category: &str,
    results: &[(u64, Result<(), String>)],
    elapsed_us: u64,
) -> CheckReport {
    let failures: Vec<_> = results
        .iter()
        .filter_map(|(seed, r)| r.as_ref().err().map(|msg| (seed, msg)))
        .collect();
    CheckReport {
        name: name.to_string(),
        category: category.to_string(),
        passed: failures.is_empty(),
        trials: results.len(),
        failures: failures.len(),
        first_failure: failures
            .first()
            .map(|(seed, msg)| format!("seed {seed}: {msg}")),
        elapsed_us,
    }
}

pub fn print_terminal(report: &FullReport) {
    println!(
        "{:<28} {:<10} {:>7} {:>8} {:>10} {:>6}",
        "Check", "Category", "Trials", "Failed", "Time(ms)", "Status"
    );
    println!("{}", "-".repeat(75));

    for c in &report.checks {
        let status = if c.passed { "PASS" } else { "FAIL" };
        println!(
            "{:<28} {:<10} {:>7} {:>8} {:>10.1} {:>6}",
            truncate(&c.name, 28),
            truncate(&c.category, 10),
            c.trials,
            c.failures,
            c.elapsed_us as f64 / 1000.0,
            status,
        );
        if let Some(msg) = &c.first_failure {
            println!("    {msg}");
        }
    }

    println!("{}", "-".repeat(75));
    println!(
        "Total: {} | Passed: {} | Failed: {}",
        report.total, report.passed, report.failed
    );
}

pub fn to_json(report: &FullReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}
