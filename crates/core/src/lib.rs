//! Golf Ball Flight Core Library
//!
//! Physics engine for golf ball flight under real weather: air density from
//! temperature, pressure, humidity and altitude; drag, lift and Magnus forces
//! on a spinning ball; fixed-step trajectory integration; a fast heuristic
//! shot-adjustment model; and a validation harness that checks integrated
//! flights against labeled reference cases.
//!
//! ## Data flow
//!
//! ```text
//! Environment ─► condition ─► forces ─► integrate ─► ValidationHarness
//!
//! resolve_wind, adjust_shot: independent pure transforms
//! ```
//!
//! Every entry point takes complete, immutable inputs and returns a value or a
//! structured [`FlightError`]; there is no ambient state. Internal units are
//! SI, with declared-unit newtypes in [`core_types::units`] at the boundary.

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod error;

// Physics and flight models
pub mod flight;
pub mod physics;

// Reference cases and batch validation
pub mod validation;

// Re-export core types
pub use core_types::{
    BallProperties, BallState, Construction, Degrees, Environment, Fahrenheit, Feet, Meters,
    Pressure, RelativeHumidity, Rpm, SpinState, Vec3, Yards,
};

pub use config::{AtmosphereConstants, ConfigError, FlightConfig, HeuristicConstants};
pub use error::{FlightError, Result};

// Re-export the public entry points
pub use flight::{
    adjust_shot, create_estimator, integrate, recommend_club, Club, EstimatorKind, FlightMetrics,
    FlightResult, ShotAdjustments, ShotEstimate, ShotEstimator, Trajectory, TrajectoryPoint,
};
pub use physics::{condition, forces, resolve_wind, Atmosphere, ForceSample, WindComponents};
pub use validation::{run_validation, ValidationCase, ValidationHarness, ValidationReport};
