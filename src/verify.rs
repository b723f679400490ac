//! @ai:module:intent Installation smoke checks run as shell commands
//! @ai:module:layer infrastructure
//! @ai:module:public_api SetupVerifier, VerifyReport, CheckResult
//! @ai:module:stateless true

use crate::config::VerifyCheck;
use colored::Colorize;
use std::process::Command;
use tracing::warn;

/// @ai:intent Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub description: String,
    pub passed: bool,
    /// stderr, or the spawn error, when the check failed
    pub error: Option<String>,
}

/// @ai:intent Outcome of all checks
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub results: Vec<CheckResult>,
}

impl VerifyReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// @ai:intent True when every check succeeded
    /// @ai:effects pure
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

/// @ai:intent Runs configured checks through `sh -c`
pub struct SetupVerifier {
    checks: Vec<VerifyCheck>,
}

impl SetupVerifier {
    pub fn new(checks: Vec<VerifyCheck>) -> Self {
        Self { checks }
    }

    /// @ai:intent Run one command; a spawn failure counts as a failed check
    /// @ai:effects io
    fn run_check(check: &VerifyCheck) -> CheckResult {
        match Command::new("sh").arg("-c").arg(&check.command).output() {
            Ok(output) if output.status.success() => CheckResult {
                description: check.description.clone(),
                passed: true,
                error: None,
            },
            Ok(output) => CheckResult {
                description: check.description.clone(),
                passed: false,
                error: Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
            },
            Err(e) => CheckResult {
                description: check.description.clone(),
                passed: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// @ai:intent Run every check in order, printing status as it goes
    /// @ai:effects io
    pub fn run(&self) -> VerifyReport {
        let mut results = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            println!("Checking: {}...", check.description);
            let result = Self::run_check(check);
            if result.passed {
                println!("{} {}", "OK".green().bold(), check.description);
            } else {
                println!("{} {}", "FAIL".red().bold(), check.description);
                if let Some(error) = &result.error {
                    println!("Error: {}", error);
                }
                warn!(check = %check.description, "Verification check failed");
            }
            results.push(result);
        }

        VerifyReport { results }
    }
}
