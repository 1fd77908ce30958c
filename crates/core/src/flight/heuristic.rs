//! Simplified shot adjustment model
//!
//! A fast, non-integrated estimate of how conditions change a shot. Each
//! effect is an additive percentage of carry with its own cap, so the model
//! never extrapolates far outside the conditions it was tuned on. Use
//! [`crate::flight::integrate`] when fidelity matters more than latency.
//!
//! # Effects
//! ```text
//! density     = clamp((ρ_std / ρ − 1) · 100 · k_ρ, ±band)
//! temperature = clamp((T − T_ref) / 20 °F · k_T, ±cap)
//! altitude    = min(alt / 1000 ft · k_alt, cap)
//! humidity    = clamp(−(RH − RH_ref) · k_RH, ±cap)
//! wind        = clamp(−headwind · k_head  or  +tailwind · k_tail, ±cap)
//! ```
//!
//! Density, temperature and altitude overlap physically (warm or high air is
//! thin air); the terms are tuned as a set and are not independent.

use crate::config::HeuristicConstants;
use crate::core_types::units::{Degrees, Yards};
use crate::core_types::{BallProperties, Environment};
use crate::error::{ensure_non_negative, Result};
use crate::physics::atmosphere::condition;
use crate::physics::wind::resolve_environment_wind;
use serde::{Deserialize, Serialize};

/// Individual contributions to the distance adjustment (% of carry)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectBreakdown {
    /// Air density relative to sea-level standard
    pub density: f64,
    /// Ball and air temperature away from the reference
    pub temperature: f64,
    /// Course altitude
    pub altitude: f64,
    /// Humidity away from the reference
    pub humidity: f64,
    /// Along-line wind
    pub wind: f64,
}

impl EffectBreakdown {
    /// Sum of all contributions before the total clamp
    pub fn sum(&self) -> f64 {
        self.density + self.temperature + self.altitude + self.humidity + self.wind
    }
}

/// How conditions change a shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotAdjustments {
    /// Change in carry (%); positive means the ball flies farther
    pub distance_adjustment: f64,
    /// Lateral drift at the target (+ right, − left)
    pub trajectory_shift: Yards,
    /// Suggested change in spin (%)
    pub spin_adjustment: f64,
    /// Suggested change in launch angle
    pub launch_angle_adjustment: Degrees,
    /// Per-effect contributions to `distance_adjustment`, when the model
    /// that produced the adjustments decomposes them
    pub breakdown: Option<EffectBreakdown>,
}

impl ShotAdjustments {
    /// Distance to play for a target under these adjustments
    ///
    /// A ball that flies 10% farther plays a 165 yd target like 150 yd.
    pub fn plays_like(&self, target: Yards) -> Yards {
        Yards::new(*target / (1.0 + self.distance_adjustment / 100.0))
    }
}

fn clamp_symmetric(value: f64, cap: f64) -> f64 {
    value.clamp(-cap, cap)
}

/// Adjust a shot along bearing 0° with the default coefficients
///
/// # Example
/// ```
/// use golf_flight_core::core_types::{BallProperties, Environment, Yards};
/// use golf_flight_core::flight::adjust_shot;
///
/// let into_wind = Environment::standard().with_wind_from(5.0, 0.0);
/// let adj = adjust_shot(Yards::new(150.0), &into_wind, &BallProperties::standard()).unwrap();
/// assert!(adj.distance_adjustment < 0.0);
/// assert!(*adj.plays_like(Yards::new(150.0)) > 150.0);
/// ```
pub fn adjust_shot(
    target: Yards,
    env: &Environment,
    props: &BallProperties,
) -> Result<ShotAdjustments> {
    adjust_shot_with(target, env, props, 0.0, &HeuristicConstants::default())
}

/// Adjust a shot played along `shot_direction_deg` with explicit coefficients
///
/// The coefficients are calibrated for a regulation ball; `props` is
/// validated but does not otherwise enter the estimate.
///
/// # Errors
/// `InvalidInput` for a negative or non-finite target, non-physical ball
/// properties, or an environment the conditioner rejects.
pub fn adjust_shot_with(
    target: Yards,
    env: &Environment,
    props: &BallProperties,
    shot_direction_deg: f64,
    constants: &HeuristicConstants,
) -> Result<ShotAdjustments> {
    let target = ensure_non_negative("target", *target)?;
    props.validate()?;

    let air = condition(env)?;
    let reference = condition(&Environment::standard())?;
    let wind = resolve_environment_wind(env, shot_direction_deg)?;

    let density = clamp_symmetric(
        (reference.air_density / air.air_density - 1.0) * 100.0 * constants.density_effect_scale,
        constants.density_band_percent,
    );
    let temperature = clamp_symmetric(
        (*env.temperature - constants.reference_temperature_f) / 20.0
            * constants.temperature_percent_per_20f,
        constants.temperature_cap_percent,
    );
    let altitude = (env.altitude.max(0.0) / 1000.0 * constants.altitude_percent_per_1000ft)
        .min(constants.altitude_cap_percent);
    let humidity = clamp_symmetric(
        -(air.humidity - constants.reference_humidity) * constants.humidity_percent_per_unit,
        constants.humidity_cap_percent,
    );
    let wind_effect = if wind.headwind > 0.0 {
        -wind.headwind * constants.headwind_percent_per_mps
    } else {
        wind.tailwind() * constants.tailwind_percent_per_mps
    };

    let breakdown = EffectBreakdown {
        density,
        temperature,
        altitude,
        humidity,
        wind: clamp_symmetric(wind_effect, constants.wind_cap_percent),
    };

    Ok(ShotAdjustments {
        distance_adjustment: clamp_symmetric(breakdown.sum(), constants.total_cap_percent),
        trajectory_shift: Yards::new(clamp_symmetric(
            -wind.crosswind * target * constants.crosswind_drift_per_mps,
            constants.crosswind_drift_cap * target,
        )),
        spin_adjustment: clamp_symmetric(
            -wind.headwind * constants.spin_percent_per_mps_headwind,
            constants.spin_cap_percent,
        ),
        launch_angle_adjustment: Degrees::new(clamp_symmetric(
            -wind.headwind * constants.launch_degrees_per_mps_headwind,
            constants.launch_cap_degrees,
        )),
        breakdown: Some(breakdown),
    })
}
