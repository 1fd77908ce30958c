//! Semantic unit types for type-safe physical quantity handling
//!
//! Raw weather and launch inputs arrive in whatever units the caller works in
//! (°F, hPa, inHg, feet, yards, rpm). These newtypes make the unit part of the
//! type so conversion happens exactly once, at the boundary, and every core
//! computation sees SI values.
//!
//! # Design Philosophy
//! - All quantities use f64
//! - Display and Deref to the raw value; `Mul<f64>` only where values are scaled
//! - Explicit conversion methods between related types (`to_kelvin`, `to_meters`, ...)
//! - Serde support for serialization
//! - Constructors never panic; physical validity is checked by the functions
//!   that consume the values and reported as `FlightError::InvalidInput`
//!
//! # Usage
//! ```
//! use golf_flight_core::core_types::units::{Fahrenheit, Yards};
//!
//! let temp = Fahrenheit::new(68.0);
//! assert!((*temp.to_kelvin() - 293.15).abs() < 1e-9);
//!
//! let carry = Yards::new(245.0).to_meters();
//! assert!((*carry - 224.028).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, Mul};

/// Metres per yard (exact)
pub const METERS_PER_YARD: f64 = 0.9144;

/// Pascals per inch of mercury at 0°C
pub const PASCALS_PER_INHG: f64 = 3386.389;

/// Celsius to Kelvin conversion offset (0°C = 273.15 K)
const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Temperature in degrees Fahrenheit
///
/// The environment record carries temperature in °F; conversion to Kelvin
/// happens inside the conditioner.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fahrenheit(f64);

impl Fahrenheit {
    /// Create a new Fahrenheit temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Fahrenheit(value)
    }

    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius((self.0 - 32.0) * 5.0 / 9.0)
    }

    /// Convert to Kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        self.to_celsius().to_kelvin()
    }
}

impl Deref for Fahrenheit {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°F", self.0)
    }
}

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Celsius {
    /// Convert to Kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin(self.0 + CELSIUS_KELVIN_OFFSET)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

/// Temperature in Kelvin (absolute scale)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kelvin(f64);

impl Kelvin {
    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius(self.0 - CELSIUS_KELVIN_OFFSET)
    }
}

impl Deref for Kelvin {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Barometric pressure with its unit declared at the call site
///
/// Weather feeds disagree on units (METAR uses inHg in North America, hPa
/// elsewhere). The variant chosen by the caller is the declaration; the core
/// only ever reads [`Pressure::to_pascals`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pressure {
    /// Pascals (SI)
    Pascals(f64),
    /// Hectopascals / millibars
    Hectopascals(f64),
    /// Inches of mercury
    InchesOfMercury(f64),
}

impl Pressure {
    /// ICAO standard sea-level pressure
    pub const STANDARD: Pressure = Pressure::Pascals(101_325.0);

    /// Pressure in pascals
    #[must_use]
    pub fn to_pascals(self) -> f64 {
        match self {
            Self::Pascals(pa) => pa,
            Self::Hectopascals(hpa) => hpa * 100.0,
            Self::InchesOfMercury(inhg) => inhg * PASCALS_PER_INHG,
        }
    }
}

impl Default for Pressure {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pascals(v) => write!(f, "{v:.0} Pa"),
            Self::Hectopascals(v) => write!(f, "{v:.2} hPa"),
            Self::InchesOfMercury(v) => write!(f, "{v:.2} inHg"),
        }
    }
}

// ============================================================================
// HUMIDITY
// ============================================================================

/// Relative humidity in either fractional or percentage form
///
/// Internally the conditioner works with a fraction in `[0, 1]`;
/// [`RelativeHumidity::fraction`] is the single normalization point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RelativeHumidity {
    /// 0.0 (bone dry) to 1.0 (saturated)
    Fraction(f64),
    /// 0 to 100 %
    Percent(f64),
}

impl RelativeHumidity {
    /// Humidity as a fraction (not range-checked)
    #[must_use]
    pub fn fraction(self) -> f64 {
        match self {
            Self::Fraction(f) => f,
            Self::Percent(p) => p / 100.0,
        }
    }
}

impl Default for RelativeHumidity {
    fn default() -> Self {
        Self::Fraction(0.5)
    }
}

impl fmt::Display for RelativeHumidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.fraction() * 100.0)
    }
}

// ============================================================================
// DISTANCE TYPES
// ============================================================================

/// Distance or altitude in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Feet(f64);

impl Feet {
    /// Create a new distance in feet
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Feet(value)
    }
}

impl Deref for Feet {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Feet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} ft", self.0)
    }
}

/// Distance in metres (SI base unit for all internal geometry)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl Meters {
    /// Create a new distance in metres
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Convert to yards
    #[inline]
    #[must_use]
    pub fn to_yards(self) -> Yards {
        Yards(self.0 / METERS_PER_YARD)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m", self.0)
    }
}

/// Distance in yards (how golfers read carry and target distances)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Yards(f64);

impl Yards {
    /// Create a new distance in yards
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Yards(value)
    }

    /// Convert to metres
    #[inline]
    #[must_use]
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * METERS_PER_YARD)
    }
}

impl Deref for Yards {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<Meters> for Yards {
    fn from(m: Meters) -> Yards {
        m.to_yards()
    }
}

impl fmt::Display for Yards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} yd", self.0)
    }
}

// ============================================================================
// ROTATION AND ANGLE TYPES
// ============================================================================

/// Spin rate in revolutions per minute (launch monitor convention)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Rpm(f64);

impl Rpm {
    /// Create a new spin rate
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Rpm(value)
    }

    /// Angular velocity in rad/s
    #[inline]
    #[must_use]
    pub fn to_radians_per_second(self) -> f64 {
        self.0 * std::f64::consts::TAU / 60.0
    }
}

impl Deref for Rpm {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Mul<f64> for Rpm {
    type Output = Rpm;
    fn mul(self, rhs: f64) -> Rpm {
        Rpm(self.0 * rhs)
    }
}

impl fmt::Display for Rpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} rpm", self.0)
    }
}

/// Angle in degrees (compass bearings, launch angles)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

impl Degrees {
    /// Create a new angle
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Angle in radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_conversions() {
        assert!((*Fahrenheit::new(32.0).to_celsius()).abs() < 1e-12);
        assert!((*Fahrenheit::new(212.0).to_celsius() - 100.0).abs() < 1e-12);
        assert!((*Fahrenheit::new(68.0).to_kelvin() - 293.15).abs() < 1e-9);
        assert!((*Fahrenheit::new(-459.67).to_kelvin()).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_units() {
        assert_eq!(Pressure::Hectopascals(1013.25).to_pascals(), 101_325.0);
        let inhg = Pressure::InchesOfMercury(29.92).to_pascals();
        assert!((inhg - 101_320.8).abs() < 1.0, "29.92 inHg ≈ 1 atm, got {inhg}");
        assert_eq!(Pressure::default().to_pascals(), 101_325.0);
    }

    #[test]
    fn test_humidity_forms_agree() {
        assert_eq!(
            RelativeHumidity::Percent(45.0).fraction(),
            RelativeHumidity::Fraction(0.45).fraction()
        );
    }

    #[test]
    fn test_distance_conversions() {
        assert!((*Yards::new(100.0).to_meters() - 91.44).abs() < 1e-9);
        assert!((*Meters::new(91.44).to_yards() - 100.0).abs() < 1e-9);
        assert!((*Yards::from(Meters::new(9.144)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_spin_conversions() {
        let omega = Rpm::new(60.0).to_radians_per_second();
        assert!((omega - std::f64::consts::TAU).abs() < 1e-12);
        assert_eq!(*(Rpm::new(2500.0) * 0.5), 1250.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Fahrenheit::new(68.0)), "68.0°F");
        assert_eq!(format!("{}", Pressure::Hectopascals(1013.25)), "1013.25 hPa");
        assert_eq!(format!("{}", RelativeHumidity::Fraction(0.2)), "20%");
        assert_eq!(format!("{}", Yards::new(245.0)), "245.0 yd");
        assert_eq!(format!("{}", Rpm::new(2500.0)), "2500 rpm");
    }
}
