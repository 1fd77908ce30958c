//! Validation harness and reference cases

pub mod cases;
pub mod harness;

pub use cases::{canonical_weather_cases, load_cases, save_cases, scenario_cases, ValidationCase};
pub use harness::{
    relative_difference, run_validation, CategoryTally, MetricComparison, ValidationHarness,
    ValidationReport, ValidationResult, DEFAULT_TOLERANCE,
};
