//! Batch validation of the integrator against reference cases
//!
//! Cases are independent: each runs its own integration with no shared
//! mutable state, so a batch fans out over rayon and the results are merged
//! once at the end. A failing case (mismatch, non-convergence, bad input) is
//! recorded and the run carries on.

use crate::config::FlightConfig;
use crate::error::{ensure_non_negative, ensure_positive, FlightError, Result};
use crate::flight::{integrate_with, FlightMetrics, DEFAULT_TIME_STEP};
use crate::validation::cases::ValidationCase;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Default relative tolerance per metric (5%)
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Relative difference `|actual − expected| / max(|expected|, 1)`
///
/// The floor of 1 makes near-zero expectations (a launch direction of 0°)
/// compare absolutely instead of dividing by zero.
pub fn relative_difference(expected: f64, actual: f64) -> f64 {
    (actual - expected).abs() / expected.abs().max(1.0)
}

/// Expected against computed metrics for one case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Metrics the case expects
    pub expected: FlightMetrics,
    /// Metrics the integrator produced
    pub actual: FlightMetrics,
    /// Largest relative difference over all metrics
    pub difference: f64,
}

/// Outcome of one case
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Case name
    pub test_name: String,
    /// Name prefix the case is tallied under
    pub category: String,
    /// Every metric within tolerance
    pub passed: bool,
    /// Why the case failed, if it did
    pub error: Option<String>,
    /// One `ValidationMismatch` per metric outside tolerance
    pub mismatches: Vec<FlightError>,
    /// Present whenever the integration completed
    pub metrics: Option<MetricComparison>,
}

/// Pass/fail counts for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTally {
    /// Cases run
    pub total: usize,
    /// Cases within tolerance
    pub passed: usize,
    /// Cases with a mismatch or an error
    pub failed: usize,
}

/// Aggregate of a harness run
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Per-case results in input order (skipped cases omitted)
    pub results: Vec<ValidationResult>,
    /// Cases run
    pub total: usize,
    /// Cases within tolerance
    pub passed: usize,
    /// Cases with a mismatch or an error
    pub failed: usize,
    /// Cases not run because the run was cancelled
    pub skipped: usize,
    /// Tallies keyed by case category
    pub by_category: FxHashMap<String, CategoryTally>,
    /// Largest relative difference seen across all completed cases
    pub max_difference: f64,
}

impl ValidationReport {
    fn from_results(outcomes: Vec<Option<ValidationResult>>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            let Some(result) = outcome else {
                report.skipped += 1;
                continue;
            };
            let tally = report.by_category.entry(result.category.clone()).or_default();
            tally.total += 1;
            report.total += 1;
            if result.passed {
                tally.passed += 1;
                report.passed += 1;
            } else {
                tally.failed += 1;
                report.failed += 1;
            }
            if let Some(comparison) = &result.metrics {
                report.max_difference = report.max_difference.max(comparison.difference);
            }
            report.results.push(result);
        }
        report
    }

    /// Passed over executed cases (0 when nothing ran)
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }

    /// Every metric mismatch, tagged with its case name
    pub fn mismatches(&self) -> impl Iterator<Item = (&str, &FlightError)> {
        self.results
            .iter()
            .flat_map(|r| r.mismatches.iter().map(move |m| (r.test_name.as_str(), m)))
    }

    /// Result for a case by name
    pub fn result(&self, name: &str) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.test_name == name)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}/{} passed ({:.1}%), {} failed, {} skipped, max difference {:.2}%",
            self.passed,
            self.total,
            self.pass_rate() * 100.0,
            self.failed,
            self.skipped,
            self.max_difference * 100.0
        )?;
        let mut categories: Vec<_> = self.by_category.iter().collect();
        categories.sort_by(|a, b| a.0.cmp(b.0));
        for (name, tally) in categories {
            writeln!(f, "  {name}: {}/{} passed", tally.passed, tally.total)?;
        }
        for result in &self.results {
            let status = if result.passed { "PASS" } else { "FAIL" };
            write!(f, "  [{status}] {}", result.test_name)?;
            if let Some(error) = &result.error {
                write!(f, ": {error}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Runs validation cases through the integrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationHarness {
    /// Maximum relative difference per metric
    pub tolerance: f64,
    /// Integration time step (s)
    pub dt: f64,
    /// Flight model parameters
    pub config: FlightConfig,
}

impl Default for ValidationHarness {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            dt: DEFAULT_TIME_STEP,
            config: FlightConfig::default(),
        }
    }
}

impl ValidationHarness {
    /// Harness with explicit tolerance, time step and model parameters
    pub fn new(tolerance: f64, dt: f64, config: FlightConfig) -> Result<Self> {
        ensure_non_negative("tolerance", tolerance)?;
        ensure_positive("dt", dt)?;
        config.validate()?;
        Ok(Self {
            tolerance,
            dt,
            config,
        })
    }

    /// Run one case
    pub fn run_case(&self, case: &ValidationCase) -> ValidationResult {
        let test_name = case.name.clone();
        let category = case.category().to_string();

        let flight = match integrate_with(
            case.initial_state,
            &case.environment,
            &case.properties,
            self.dt,
            &self.config,
        ) {
            Ok(flight) => flight,
            Err(err) => {
                warn!("Validation case '{}' did not complete: {}", test_name, err);
                return ValidationResult {
                    test_name,
                    category,
                    passed: false,
                    error: Some(err.to_string()),
                    mismatches: Vec::new(),
                    metrics: None,
                };
            }
        };

        let actual = flight.metrics;
        let mut difference: f64 = 0.0;
        let mut mismatches = Vec::new();
        for ((metric, expected), (_, computed)) in
            case.expected.values().into_iter().zip(actual.values())
        {
            let diff = relative_difference(expected, computed);
            difference = difference.max(diff);
            if diff > self.tolerance {
                mismatches.push(FlightError::ValidationMismatch {
                    metric,
                    expected,
                    actual: computed,
                    difference: diff,
                    tolerance: self.tolerance,
                });
            }
        }

        let passed = mismatches.is_empty();
        let error = if passed {
            debug!(
                "Validation case '{}' passed (max difference {:.2}%)",
                test_name,
                difference * 100.0
            );
            None
        } else {
            let messages: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
            warn!("Validation case '{}' failed: {}", test_name, messages.join("; "));
            Some(messages.join("; "))
        };

        ValidationResult {
            test_name,
            category,
            passed,
            error,
            mismatches,
            metrics: Some(MetricComparison {
                expected: case.expected,
                actual,
                difference,
            }),
        }
    }

    /// Run every case in parallel
    pub fn run(&self, cases: &[ValidationCase]) -> ValidationReport {
        self.run_with_cancellation(cases, &AtomicBool::new(false))
    }

    /// Run cases in parallel, checking `cancel` before each case starts
    ///
    /// Cases already running finish normally; cases not yet started when the
    /// flag is raised are counted as skipped.
    pub fn run_with_cancellation(
        &self,
        cases: &[ValidationCase],
        cancel: &AtomicBool,
    ) -> ValidationReport {
        let outcomes: Vec<Option<ValidationResult>> = cases
            .par_iter()
            .map(|case| {
                if cancel.load(Ordering::Relaxed) {
                    None
                } else {
                    Some(self.run_case(case))
                }
            })
            .collect();

        let report = ValidationReport::from_results(outcomes);
        info!(
            "Validation run: {}/{} passed ({:.1}%), {} skipped, max difference {:.2}%",
            report.passed,
            report.total,
            report.pass_rate() * 100.0,
            report.skipped,
            report.max_difference * 100.0
        );
        report
    }
}

/// Run cases with the default harness
pub fn run_validation(cases: &[ValidationCase]) -> ValidationReport {
    ValidationHarness::default().run(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::cases::{canonical_weather_cases, scenario_cases};
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_difference_floor() {
        assert_relative_eq!(relative_difference(200.0, 210.0), 0.05, epsilon = 1e-12);
        assert_relative_eq!(relative_difference(0.0, 0.03), 0.03, epsilon = 1e-12);
        assert_relative_eq!(relative_difference(-4.0, -3.0), 0.25, epsilon = 1e-12);
        assert_eq!(relative_difference(5.0, 5.0), 0.0);
    }

    #[test]
    fn test_weather_cases_pass() {
        let report = run_validation(&canonical_weather_cases());
        assert_eq!(report.total, 5);
        assert_eq!(report.passed, 5, "{report}");
        assert_relative_eq!(report.pass_rate(), 1.0);
        assert!(report.max_difference < 0.01);
        assert_eq!(report.by_category["weather"].passed, 5);
    }

    #[test]
    fn test_results_keep_input_order() {
        let cases = canonical_weather_cases();
        let report = run_validation(&cases);
        let names: Vec<_> = report.results.iter().map(|r| r.test_name.as_str()).collect();
        let expected: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_non_convergent_case_does_not_abort_run() {
        let harness = ValidationHarness::new(
            DEFAULT_TOLERANCE,
            DEFAULT_TIME_STEP,
            FlightConfig {
                max_steps: 50,
                ..FlightConfig::default()
            },
        )
        .unwrap();
        let report = harness.run(&scenario_cases());
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 2);
        for result in &report.results {
            assert!(result.metrics.is_none());
            assert!(result.error.as_deref().unwrap_or("").contains("did not converge"));
        }
    }

    #[test]
    fn test_invalid_case_is_recorded() {
        let mut case = canonical_weather_cases().remove(0);
        case.properties.mass = 0.0;
        let result = ValidationHarness::default().run_case(&case);
        assert!(!result.passed);
        assert!(result.error.unwrap().contains("mass"));
    }

    #[test]
    fn test_cancelled_run_skips_everything() {
        let cancel = AtomicBool::new(true);
        let report =
            ValidationHarness::default().run_with_cancellation(&canonical_weather_cases(), &cancel);
        assert_eq!(report.total, 0);
        assert_eq!(report.skipped, 5);
        assert_eq!(report.pass_rate(), 0.0);
    }

    #[test]
    fn test_harness_rejects_negative_tolerance() {
        assert!(ValidationHarness::new(-0.1, DEFAULT_TIME_STEP, FlightConfig::default()).is_err());
    }
}
