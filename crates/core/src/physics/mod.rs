//! Physics modules for golf ball flight
//!
//! - [`atmosphere`]: weather readings → conditioned air density
//! - [`aerodynamics`]: drag, lift and Magnus forces on the ball
//! - [`wind`]: headwind/crosswind decomposition relative to a shot line

pub mod aerodynamics;
pub mod atmosphere;
pub mod wind;

pub use aerodynamics::{acceleration, forces, forces_in, ForceSample};
pub use atmosphere::{condition, condition_with, Atmosphere, CorrectionFactors};
pub use wind::{resolve_environment_wind, resolve_wind, WindComponents};
