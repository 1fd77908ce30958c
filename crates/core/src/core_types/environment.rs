//! Environmental snapshot supplied with every flight computation
//!
//! The core never holds ambient weather state. Each call receives a complete,
//! immutable [`Environment`] value assembled by the caller (weather feed, UI,
//! test fixture) with units declared through the types in
//! [`crate::core_types::units`].

use crate::core_types::units::{Fahrenheit, Feet, Pressure, RelativeHumidity};
use crate::core_types::vec3::{bearing_of, heading_vector, Vec3};
use serde::{Deserialize, Serialize};

/// Weather conditions for one shot
///
/// # Example
/// ```
/// use golf_flight_core::core_types::{Environment, Fahrenheit, Feet, Pressure, RelativeHumidity};
///
/// let env = Environment::new(
///     Fahrenheit::new(85.0),
///     Pressure::InchesOfMercury(29.80),
///     Feet::new(5280.0),
///     RelativeHumidity::Percent(30.0),
/// )
/// .with_wind_from(6.0, 45.0);
///
/// assert!((env.wind_speed() - 6.0).abs() < 1e-9);
/// assert!((env.wind_from_bearing() - 45.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Air temperature
    pub temperature: Fahrenheit,
    /// Barometric pressure, unit declared by the variant
    pub pressure: Pressure,
    /// Course altitude above sea level. Negative values are accepted but
    /// fall outside the calibrated range.
    pub altitude: Feet,
    /// Relative humidity
    pub humidity: RelativeHumidity,
    /// Wind velocity in m/s (direction the air moves toward)
    pub wind: Vec3,
}

impl Environment {
    /// Calm-air environment from the four scalar readings
    pub fn new(
        temperature: Fahrenheit,
        pressure: Pressure,
        altitude: Feet,
        humidity: RelativeHumidity,
    ) -> Self {
        Self {
            temperature,
            pressure,
            altitude,
            humidity,
            wind: Vec3::zeros(),
        }
    }

    /// Reference conditions: 70°F, 1013.25 hPa, sea level, 50% humidity, calm
    pub fn standard() -> Self {
        Self::new(
            Fahrenheit::new(70.0),
            Pressure::Hectopascals(1013.25),
            Feet::new(0.0),
            RelativeHumidity::Fraction(0.5),
        )
    }

    /// Replace the wind vector (m/s)
    pub fn with_wind(mut self, wind: Vec3) -> Self {
        self.wind = wind;
        self
    }

    /// Set the wind from a speed (m/s) and the compass bearing it blows *from*
    pub fn with_wind_from(self, speed: f64, from_bearing_deg: f64) -> Self {
        self.with_wind(-heading_vector(from_bearing_deg) * speed)
    }

    /// Horizontal wind speed (m/s)
    pub fn wind_speed(&self) -> f64 {
        self.wind.x.hypot(self.wind.z)
    }

    /// Compass bearing the wind blows from (degrees, `(-180, 180]`)
    pub fn wind_from_bearing(&self) -> f64 {
        bearing_of(&-self.wind)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::standard()
    }
}
