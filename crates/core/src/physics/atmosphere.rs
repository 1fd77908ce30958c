//! Environmental conditioning: raw weather readings → air density
//!
//! Density follows the ideal-gas relation for a mixture of dry air and water
//! vapour, then a calibrated linear altitude attenuation is applied on top.
//!
//! # Physics Models
//!
//! 1. **Ideal gas**: `ρ = p_d / (R_d·T) + p_v / (R_v·T)` with
//!    `R_d = 287.058 J/(kg·K)` and `R_v = 461.495 J/(kg·K)`
//! 2. **Saturation vapour pressure** (Tetens): `p_sat = 610.78·exp(17.27·T_c / (T_c + 237.3))` Pa
//! 3. **Altitude attenuation**: `ρ ← ρ·(1 − min(k·alt/1000 ft, cap))`. This is a
//!    calibrated approximation, not the barometric formula; the cap keeps
//!    density positive at any altitude.
//! 4. **Moisture drag**: humid and wet conditions raise the effective drag of
//!    the ball by `1 + k_m·RH`. Moist air itself is slightly *less* dense, which
//!    item 1 captures; the drag penalty is the larger, empirical effect.
//!
//! # References
//!
//! - Tetens, O. (1930). "Über einige meteorologische Begriffe."
//! - Picard, A. et al. (2008). "Revised formula for the density of moist air (CIPM-2007)."

use crate::config::AtmosphereConstants;
use crate::core_types::units::Kelvin;
use crate::core_types::{vec3::is_finite, Environment};
use crate::error::{ensure_finite, FlightError, Result};
use serde::{Deserialize, Serialize};

/// Specific gas constant for dry air (J/(kg·K))
pub const R_DRY_AIR: f64 = 287.058;

/// Specific gas constant for water vapour (J/(kg·K))
pub const R_WATER_VAPOR: f64 = 461.495;

/// ICAO sea-level standard density (kg/m³)
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Multiplicative corrections derived from the environment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactors {
    /// Fraction of density removed by altitude (0 at sea level, at most the cap)
    pub altitude_attenuation: f64,
    /// Moist-air density over dry-air density at the same T and p (≤ 1)
    pub humidity_density_ratio: f64,
    /// Multiplier applied to the ball's drag coefficient
    pub moisture_drag_factor: f64,
    /// Final density over ICAO sea-level density
    pub density_ratio: f64,
}

/// Conditioned air for one environment snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    /// Air density after all corrections (kg/m³)
    pub air_density: f64,
    /// Absolute temperature
    pub temperature: Kelvin,
    /// Station pressure (Pa)
    pub pressure: f64,
    /// Partial pressure of water vapour (Pa)
    pub vapor_pressure: f64,
    /// Relative humidity as a fraction
    pub humidity: f64,
    /// Corrections that produced `air_density`
    pub corrections: CorrectionFactors,
}

impl Atmosphere {
    /// Dynamic pressure `½ρv²` at airspeed `speed` (Pa)
    pub fn dynamic_pressure(&self, speed: f64) -> f64 {
        0.5 * self.air_density * speed * speed
    }
}

/// Saturation vapour pressure over water (Pa), Tetens formula
pub fn saturation_vapor_pressure(celsius: f64) -> f64 {
    610.78 * (17.27 * celsius / (celsius + 237.3)).exp()
}

/// Condition an environment with the default calibration
///
/// # Example
/// ```
/// use golf_flight_core::core_types::{Environment, Fahrenheit, Feet, Pressure, RelativeHumidity};
/// use golf_flight_core::physics::condition;
///
/// let env = Environment::new(
///     Fahrenheit::new(68.0),
///     Pressure::Pascals(101_325.0),
///     Feet::new(0.0),
///     RelativeHumidity::Fraction(0.0),
/// );
/// let air = condition(&env).unwrap();
/// assert!((air.air_density - 1.2041).abs() < 1e-3);
/// ```
pub fn condition(env: &Environment) -> Result<Atmosphere> {
    condition_with(env, &AtmosphereConstants::default())
}

/// Condition an environment with explicit calibration constants
///
/// # Errors
/// `InvalidInput` for non-finite readings, temperatures at or below absolute
/// zero, non-positive pressure, humidity outside `[0, 1]`, or any combination
/// whose resulting density is non-finite or not positive.
pub fn condition_with(env: &Environment, constants: &AtmosphereConstants) -> Result<Atmosphere> {
    let fahrenheit = ensure_finite("temperature", *env.temperature)?;
    let temperature = env.temperature.to_kelvin();
    if *temperature <= 0.0 {
        return Err(FlightError::invalid(
            "temperature",
            fahrenheit,
            "must be above absolute zero",
        ));
    }

    let pressure = ensure_finite("pressure", env.pressure.to_pascals())?;
    if pressure <= 0.0 {
        return Err(FlightError::invalid(
            "pressure",
            env.pressure,
            "must be positive",
        ));
    }

    let altitude_ft = ensure_finite("altitude", *env.altitude)?;

    let humidity = ensure_finite("humidity", env.humidity.fraction())?;
    if !(0.0..=1.0).contains(&humidity) {
        return Err(FlightError::invalid(
            "humidity",
            env.humidity,
            "must be within 0-100%",
        ));
    }

    if !is_finite(&env.wind) {
        return Err(FlightError::invalid(
            "wind",
            format!("{:?}", env.wind),
            "must be finite",
        ));
    }

    // Moist air: dry-air partial pressure plus vapour partial pressure
    let vapor_pressure = humidity * saturation_vapor_pressure(*temperature.to_celsius());
    let dry_density = pressure / (R_DRY_AIR * *temperature);
    let moist_density = (pressure - vapor_pressure) / (R_DRY_AIR * *temperature)
        + vapor_pressure / (R_WATER_VAPOR * *temperature);

    // Negative altitudes are outside the calibration and receive no attenuation
    let altitude_attenuation = (altitude_ft.max(0.0) / 1000.0
        * constants.altitude_attenuation_per_1000ft)
        .clamp(0.0, constants.altitude_attenuation_cap);

    let air_density = moist_density * (1.0 - altitude_attenuation);
    if !air_density.is_finite() || air_density <= 0.0 {
        return Err(FlightError::invalid(
            "air_density",
            air_density,
            "temperature/pressure/altitude combination is non-physical",
        ));
    }

    Ok(Atmosphere {
        air_density,
        temperature,
        pressure,
        vapor_pressure,
        humidity,
        corrections: CorrectionFactors {
            altitude_attenuation,
            humidity_density_ratio: moist_density / dry_density,
            moisture_drag_factor: 1.0 + constants.moisture_drag_per_humidity * humidity,
            density_ratio: air_density / SEA_LEVEL_DENSITY,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Fahrenheit, Feet, Pressure, RelativeHumidity, Vec3};
    use approx::assert_relative_eq;

    fn env(temp_f: f64, pressure_pa: f64, altitude_ft: f64, humidity: f64) -> Environment {
        Environment::new(
            Fahrenheit::new(temp_f),
            Pressure::Pascals(pressure_pa),
            Feet::new(altitude_ft),
            RelativeHumidity::Fraction(humidity),
        )
    }

    #[test]
    fn test_dry_air_ideal_gas() {
        let air = condition(&env(68.0, 101_325.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(air.air_density, 1.20409, epsilon = 1e-4);
        assert_relative_eq!(air.corrections.humidity_density_ratio, 1.0, epsilon = 1e-12);
        assert_eq!(air.corrections.altitude_attenuation, 0.0);
        assert_eq!(air.corrections.moisture_drag_factor, 1.0);
    }

    #[test]
    fn test_humid_air_is_less_dense() {
        let dry = condition(&env(86.0, 101_325.0, 0.0, 0.0)).unwrap();
        let humid = condition(&env(86.0, 101_325.0, 0.0, 1.0)).unwrap();
        assert!(humid.air_density < dry.air_density);
        // Small effect: about 1-2% at 30°C saturation
        let drop = 1.0 - humid.air_density / dry.air_density;
        assert!(drop > 0.005 && drop < 0.03, "humidity density drop {drop}");
        assert!(humid.corrections.moisture_drag_factor > 1.0);
    }

    #[test]
    fn test_saturation_vapor_pressure_reference_points() {
        assert_relative_eq!(saturation_vapor_pressure(0.0), 610.78, epsilon = 1e-9);
        assert_relative_eq!(saturation_vapor_pressure(20.0), 2338.0, max_relative = 0.01);
        assert_relative_eq!(saturation_vapor_pressure(100.0), 101_325.0, max_relative = 0.02);
    }

    #[test]
    fn test_altitude_attenuation_is_linear_then_capped() {
        let sea = condition(&env(70.0, 101_325.0, 0.0, 0.5)).unwrap();
        let mile = condition(&env(70.0, 101_325.0, 5000.0, 0.5)).unwrap();
        assert_relative_eq!(mile.corrections.altitude_attenuation, 0.15, epsilon = 1e-12);
        assert_relative_eq!(mile.air_density, sea.air_density * 0.85, epsilon = 1e-12);

        let everest = condition(&env(70.0, 101_325.0, 29_032.0, 0.5)).unwrap();
        assert_relative_eq!(everest.corrections.altitude_attenuation, 0.30, epsilon = 1e-12);
        assert!(everest.air_density > 0.0);
    }

    #[test]
    fn test_negative_altitude_not_rejected() {
        let below = condition(&env(70.0, 101_325.0, -200.0, 0.5)).unwrap();
        let sea = condition(&env(70.0, 101_325.0, 0.0, 0.5)).unwrap();
        assert_eq!(below.air_density, sea.air_density);
    }

    #[test]
    fn test_pressure_units_agree() {
        let mut e = env(70.0, 101_325.0, 0.0, 0.5);
        let pa = condition(&e).unwrap().air_density;
        e.pressure = Pressure::Hectopascals(1013.25);
        let hpa = condition(&e).unwrap().air_density;
        e.pressure = Pressure::InchesOfMercury(101_325.0 / crate::core_types::PASCALS_PER_INHG);
        let inhg = condition(&e).unwrap().air_density;
        assert_relative_eq!(pa, hpa, epsilon = 1e-12);
        assert_relative_eq!(pa, inhg, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(matches!(
            condition(&env(-500.0, 101_325.0, 0.0, 0.5)),
            Err(FlightError::InvalidInput { field: "temperature", .. })
        ));
        assert!(matches!(
            condition(&env(70.0, 0.0, 0.0, 0.5)),
            Err(FlightError::InvalidInput { field: "pressure", .. })
        ));
        assert!(matches!(
            condition(&env(70.0, f64::NAN, 0.0, 0.5)),
            Err(FlightError::InvalidInput { field: "pressure", .. })
        ));
        assert!(matches!(
            condition(&env(70.0, 101_325.0, f64::INFINITY, 0.5)),
            Err(FlightError::InvalidInput { field: "altitude", .. })
        ));
        assert!(matches!(
            condition(&env(70.0, 101_325.0, 0.0, 1.5)),
            Err(FlightError::InvalidInput { field: "humidity", .. })
        ));

        let mut windy = env(70.0, 101_325.0, 0.0, 0.5);
        windy.wind = Vec3::new(f64::NAN, 0.0, 0.0);
        assert!(matches!(
            condition(&windy),
            Err(FlightError::InvalidInput { field: "wind", .. })
        ));
    }

    #[test]
    fn test_percent_humidity_matches_fraction() {
        let mut e = env(80.0, 101_325.0, 0.0, 0.45);
        let fraction = condition(&e).unwrap();
        e.humidity = RelativeHumidity::Percent(45.0);
        let percent = condition(&e).unwrap();
        assert_eq!(fraction, percent);
    }
}
