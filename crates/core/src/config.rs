//! Tuning constants for the flight model
//!
//! Several coefficients (altitude attenuation, moisture drag, roll-out, the
//! heuristic percentages) are empirical and have no closed-form derivation.
//! They live here as named, overridable values rather than literals buried in
//! the physics. Every struct implements `Default` with the calibrated values
//! and round-trips through JSON so a deployment can ship its own tuning.

use crate::error::{ensure_non_negative, ensure_positive, FlightError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Corrections applied by the environmental conditioner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConstants {
    /// Fractional density reduction per 1000 ft of altitude
    pub altitude_attenuation_per_1000ft: f64,
    /// Ceiling on the altitude attenuation. Keeps density positive; the
    /// linear model is not physical beyond this point.
    pub altitude_attenuation_cap: f64,
    /// Drag multiplier increase per unit relative humidity (wet ball surface
    /// and airborne moisture)
    pub moisture_drag_per_humidity: f64,
}

impl Default for AtmosphereConstants {
    fn default() -> Self {
        Self {
            altitude_attenuation_per_1000ft: 0.03,
            altitude_attenuation_cap: 0.30,
            moisture_drag_per_humidity: 0.40,
        }
    }
}

/// Parameters of the integrated flight model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Conditioner corrections
    pub atmosphere: AtmosphereConstants,
    /// Spin parameter (surface speed / airspeed) at which lift reaches the
    /// ball's peak lift coefficient
    pub lift_saturation_spin_parameter: f64,
    /// Roll-out as a fraction of carry: total = carry × (1 + `roll_fraction`)
    pub roll_fraction: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Simulated seconds a flight may run before it is declared non-convergent
    pub max_flight_time: f64,
    /// Hard ceiling on integration steps, whatever the time step
    pub max_steps: usize,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            atmosphere: AtmosphereConstants::default(),
            lift_saturation_spin_parameter: 0.30,
            roll_fraction: 0.04,
            gravity: 9.80665,
            max_flight_time: 60.0,
            max_steps: 1_000_000,
        }
    }
}

impl FlightConfig {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeFailed(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))
    }

    /// Reject configurations the integrator cannot run with
    pub fn validate(&self) -> crate::error::Result<()> {
        ensure_non_negative(
            "atmosphere.altitude_attenuation_per_1000ft",
            self.atmosphere.altitude_attenuation_per_1000ft,
        )?;
        let cap = ensure_non_negative(
            "atmosphere.altitude_attenuation_cap",
            self.atmosphere.altitude_attenuation_cap,
        )?;
        if cap >= 1.0 {
            return Err(FlightError::invalid(
                "atmosphere.altitude_attenuation_cap",
                cap,
                "must be below 1",
            ));
        }
        ensure_non_negative(
            "atmosphere.moisture_drag_per_humidity",
            self.atmosphere.moisture_drag_per_humidity,
        )?;
        ensure_positive(
            "lift_saturation_spin_parameter",
            self.lift_saturation_spin_parameter,
        )?;
        ensure_non_negative("roll_fraction", self.roll_fraction)?;
        ensure_non_negative("gravity", self.gravity)?;
        ensure_positive("max_flight_time", self.max_flight_time)?;
        if self.max_steps == 0 {
            return Err(FlightError::invalid("max_steps", 0, "must be positive"));
        }
        Ok(())
    }

    /// Steps a flight at time step `dt` may take before it is abandoned
    ///
    /// Covers `max_flight_time` of simulated flight, never more than
    /// `max_steps`.
    pub fn step_budget(&self, dt: f64) -> usize {
        ((self.max_flight_time / dt).ceil() as usize).min(self.max_steps)
    }
}

/// Coefficients of the simplified shot-adjustment model
///
/// All effects are percentages of carry (positive = the ball flies farther)
/// except where noted, and each is clamped to its cap so inputs outside the
/// calibration range cannot extrapolate without bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConstants {
    /// Temperature with zero temperature effect (°F)
    pub reference_temperature_f: f64,
    /// Carry change per 20°F above the reference
    pub temperature_percent_per_20f: f64,
    /// Cap on the temperature effect (± %)
    pub temperature_cap_percent: f64,
    /// Scale from density deficit (%) to carry gain (%)
    pub density_effect_scale: f64,
    /// Band on the density effect (± %)
    pub density_band_percent: f64,
    /// Carry gain per 1000 ft of altitude
    pub altitude_percent_per_1000ft: f64,
    /// Cap on the altitude effect (%)
    pub altitude_cap_percent: f64,
    /// Humidity with zero humidity effect (fraction)
    pub reference_humidity: f64,
    /// Carry loss per unit humidity above the reference
    pub humidity_percent_per_unit: f64,
    /// Cap on the humidity effect (± %)
    pub humidity_cap_percent: f64,
    /// Carry loss per m/s of headwind
    pub headwind_percent_per_mps: f64,
    /// Carry gain per m/s of tailwind
    pub tailwind_percent_per_mps: f64,
    /// Cap on the along-line wind effect (± %)
    pub wind_cap_percent: f64,
    /// Lateral drift per m/s of crosswind, as a fraction of the target distance
    pub crosswind_drift_per_mps: f64,
    /// Cap on lateral drift as a fraction of the target distance
    pub crosswind_drift_cap: f64,
    /// Spin change per m/s of headwind (%); into the wind, spin less
    pub spin_percent_per_mps_headwind: f64,
    /// Cap on the spin adjustment (± %)
    pub spin_cap_percent: f64,
    /// Launch angle change per m/s of headwind (degrees); into the wind, launch lower
    pub launch_degrees_per_mps_headwind: f64,
    /// Cap on the launch angle adjustment (± degrees)
    pub launch_cap_degrees: f64,
    /// Clamp on the summed distance adjustment (± %)
    pub total_cap_percent: f64,
}

impl Default for HeuristicConstants {
    fn default() -> Self {
        Self {
            reference_temperature_f: 70.0,
            temperature_percent_per_20f: 1.0,
            temperature_cap_percent: 4.0,
            density_effect_scale: 0.5,
            density_band_percent: 6.0,
            altitude_percent_per_1000ft: 2.0,
            altitude_cap_percent: 10.0,
            reference_humidity: 0.5,
            humidity_percent_per_unit: 15.0,
            humidity_cap_percent: 8.0,
            headwind_percent_per_mps: 2.2,
            tailwind_percent_per_mps: 1.1,
            wind_cap_percent: 20.0,
            crosswind_drift_per_mps: 0.01,
            crosswind_drift_cap: 0.20,
            spin_percent_per_mps_headwind: 2.0,
            spin_cap_percent: 15.0,
            launch_degrees_per_mps_headwind: 0.2,
            launch_cap_degrees: 3.0,
            total_cap_percent: 50.0,
        }
    }
}

/// Error type for configuration file operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Failed to read the file
    #[error("Failed to load: {0}")]
    LoadFailed(String),
    /// Failed to parse the JSON
    #[error("Failed to parse: {0}")]
    ParseFailed(String),
    /// Failed to serialize the configuration
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to write the file
    #[error("Failed to save: {0}")]
    SaveFailed(String),
}
