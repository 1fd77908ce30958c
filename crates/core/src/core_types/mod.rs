//! Core types and utilities

pub mod ball;
pub mod environment;
pub mod units;
pub mod vec3;

pub use ball::{BallProperties, BallState, Construction, SpinState};
pub use environment::Environment;
pub use units::*;
pub use vec3::Vec3;
