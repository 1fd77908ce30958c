//! Summary metrics of a completed flight

use crate::core_types::units::{Degrees, Meters, Rpm};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Launch and landing summary of one flight (SI units)
///
/// The same structure carries the expected values of a validation case, so
/// computed and reference metrics compare field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightMetrics {
    /// Horizontal displacement from launch to first ground contact
    pub carry_distance: Meters,
    /// Carry plus roll-out
    pub total_distance: Meters,
    /// Peak height above the ground plane
    pub max_height: Meters,
    /// Seconds from launch to landing
    pub time_of_flight: f64,
    /// Spin rate at launch
    pub spin_rate: Rpm,
    /// Elevation of the initial velocity above horizontal
    pub launch_angle: Degrees,
    /// Compass bearing of the initial velocity
    pub launch_direction: Degrees,
    /// Initial speed (m/s)
    pub ball_speed: f64,
}

impl FlightMetrics {
    /// Metric names in comparison order
    pub const NAMES: [&'static str; 8] = [
        "carry_distance",
        "total_distance",
        "max_height",
        "time_of_flight",
        "spin_rate",
        "launch_angle",
        "launch_direction",
        "ball_speed",
    ];

    /// Every metric as a `(name, value)` pair, in [`Self::NAMES`] order
    pub fn values(&self) -> [(&'static str, f64); 8] {
        [
            (Self::NAMES[0], *self.carry_distance),
            (Self::NAMES[1], *self.total_distance),
            (Self::NAMES[2], *self.max_height),
            (Self::NAMES[3], self.time_of_flight),
            (Self::NAMES[4], *self.spin_rate),
            (Self::NAMES[5], *self.launch_angle),
            (Self::NAMES[6], *self.launch_direction),
            (Self::NAMES[7], self.ball_speed),
        ]
    }

    /// True when no metric is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.values().iter().all(|(_, v)| v.is_finite())
    }
}

impl fmt::Display for FlightMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "carry {} ({}), total {} ({}), apex {}, {:.2} s",
            self.carry_distance,
            self.carry_distance.to_yards(),
            self.total_distance,
            self.total_distance.to_yards(),
            self.max_height,
            self.time_of_flight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlightMetrics {
        FlightMetrics {
            carry_distance: Meters::new(200.0),
            total_distance: Meters::new(208.0),
            max_height: Meters::new(30.0),
            time_of_flight: 5.5,
            spin_rate: Rpm::new(2500.0),
            launch_angle: Degrees::new(23.0),
            launch_direction: Degrees::new(0.0),
            ball_speed: 70.0,
        }
    }

    #[test]
    fn test_values_follow_names() {
        let metrics = sample();
        let values = metrics.values();
        for (i, (name, _)) in values.iter().enumerate() {
            assert_eq!(*name, FlightMetrics::NAMES[i]);
        }
        assert_eq!(values[0].1, 200.0);
        assert_eq!(values[7].1, 70.0);
    }

    #[test]
    fn test_finite_check() {
        let mut metrics = sample();
        assert!(metrics.is_finite());
        metrics.time_of_flight = f64::NAN;
        assert!(!metrics.is_finite());
    }
}
