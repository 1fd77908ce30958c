//! Wind decomposition relative to a shot line
//!
//! Directions are compass bearings in degrees. The wind direction is the
//! bearing the wind blows *from* (meteorological convention).
//!
//! Sign convention:
//! - positive headwind blows against the shot (shortens it), negative is a tailwind
//! - positive crosswind comes from the golfer's right and pushes the ball left

use crate::core_types::Environment;
use crate::error::{ensure_finite, ensure_non_negative, Result};
use serde::{Deserialize, Serialize};

/// Wind split into along-line and cross-line components (m/s)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindComponents {
    /// Component against the shot (negative = tailwind)
    pub headwind: f64,
    /// Component from the right of the shot line (negative = from the left)
    pub crosswind: f64,
}

impl WindComponents {
    /// Magnitude of the decomposed wind
    pub fn speed(&self) -> f64 {
        self.headwind.hypot(self.crosswind)
    }

    /// Tailwind component, zero when the wind is into the shot
    pub fn tailwind(&self) -> f64 {
        (-self.headwind).max(0.0)
    }
}

/// Decompose a wind of `speed` blowing from `direction_deg` against a shot
/// travelling along `shot_direction_deg`
///
/// # Example
/// ```
/// use golf_flight_core::physics::resolve_wind;
///
/// let wind = resolve_wind(10.0, 90.0, 0.0).unwrap();
/// assert!(wind.headwind.abs() < 1e-9);
/// assert!((wind.crosswind - 10.0).abs() < 1e-9);
/// ```
///
/// # Errors
/// `InvalidInput` when any argument is non-finite or the speed is negative.
pub fn resolve_wind(
    speed: f64,
    direction_deg: f64,
    shot_direction_deg: f64,
) -> Result<WindComponents> {
    ensure_non_negative("wind_speed", speed)?;
    ensure_finite("wind_direction", direction_deg)?;
    ensure_finite("shot_direction", shot_direction_deg)?;

    let relative = (direction_deg - shot_direction_deg).to_radians();
    Ok(WindComponents {
        headwind: speed * relative.cos(),
        crosswind: speed * relative.sin(),
    })
}

/// Decompose the horizontal part of an environment's wind vector
///
/// Vertical wind is ignored.
pub fn resolve_environment_wind(
    env: &Environment,
    shot_direction_deg: f64,
) -> Result<WindComponents> {
    let speed = env.wind_speed();
    if speed == 0.0 {
        ensure_finite("shot_direction", shot_direction_deg)?;
        return Ok(WindComponents::default());
    }
    resolve_wind(speed, env.wind_from_bearing(), shot_direction_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Vec3;
    use crate::error::FlightError;
    use approx::assert_relative_eq;

    #[test]
    fn test_pure_crosswind_from_right() {
        let wind = resolve_wind(10.0, 90.0, 0.0).unwrap();
        assert_relative_eq!(wind.headwind, 0.0, epsilon = 1e-9);
        assert_relative_eq!(wind.crosswind, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_head_and_tail() {
        let into = resolve_wind(6.0, 180.0, 180.0).unwrap();
        assert_relative_eq!(into.headwind, 6.0, epsilon = 1e-9);
        assert_eq!(into.tailwind(), 0.0);

        let behind = resolve_wind(6.0, 0.0, 180.0).unwrap();
        assert_relative_eq!(behind.headwind, -6.0, epsilon = 1e-9);
        assert_relative_eq!(behind.tailwind(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_components_preserve_speed() {
        for (direction, shot) in [(0.0, 0.0), (37.0, 210.0), (-45.0, 359.0), (720.5, 13.0)] {
            let wind = resolve_wind(7.5, direction, shot).unwrap();
            assert_relative_eq!(wind.speed(), 7.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_environment_wind_matches_scalar_form() {
        let env = Environment::standard().with_wind_from(10.0, 90.0);
        let wind = resolve_environment_wind(&env, 0.0).unwrap();
        assert_relative_eq!(wind.headwind, 0.0, epsilon = 1e-9);
        assert_relative_eq!(wind.crosswind, 10.0, epsilon = 1e-9);

        // Air moving south-east: into the face and from the left for a northbound shot
        let env = Environment::standard().with_wind(Vec3::new(-4.0, 0.0, 3.0));
        let wind = resolve_environment_wind(&env, 0.0).unwrap();
        assert_relative_eq!(wind.headwind, 4.0, epsilon = 1e-9);
        assert_relative_eq!(wind.crosswind, -3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_calm_environment() {
        let wind = resolve_environment_wind(&Environment::standard(), 45.0).unwrap();
        assert_eq!(wind, WindComponents::default());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            resolve_wind(-1.0, 0.0, 0.0),
            Err(FlightError::InvalidInput { field: "wind_speed", .. })
        ));
        assert!(matches!(
            resolve_wind(5.0, f64::NAN, 0.0),
            Err(FlightError::InvalidInput { field: "wind_direction", .. })
        ));
        assert!(resolve_wind(5.0, 0.0, f64::INFINITY).is_err());
    }
}
