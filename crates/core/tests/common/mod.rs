//! Shared setup for integration tests
#![allow(dead_code)]

use golf_flight_core::core_types::{
    BallProperties, BallState, Degrees, Environment, Fahrenheit, Feet, Pressure, RelativeHumidity,
    Rpm,
};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 20 °C, 101325 Pa, sea level, calm
pub fn sea_level(humidity: f64) -> Environment {
    Environment::new(
        Fahrenheit::new(68.0),
        Pressure::Pascals(101_325.0),
        Feet::new(0.0),
        RelativeHumidity::Fraction(humidity),
    )
}

/// 70 m/s, 23°, due north with the given backspin
pub fn reference_launch(rpm: f64) -> BallState {
    BallState::launch(
        70.0,
        Degrees::new(23.0),
        0.0,
        Rpm::new(rpm),
        BallProperties::standard().mass,
    )
}
