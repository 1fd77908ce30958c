//! Aerodynamic forces on a spinning golf ball
//!
//! Three forces act on the ball relative to the surrounding air:
//!
//! # Formula
//! ```text
//! q      = ½·ρ·|v_r|²·A                     (dynamic pressure × area)
//! F_drag = −v̂_r · q · C_d · k_moist
//! F_lift =  (b̂ × v̂_r) · q · C_l · f_back · min(1, S / S_sat)
//! F_mag  =  (ω_side × v_r) · ½·C_m·ρ·A·r
//! ```
//!
//! Where:
//! - **v_r** = ball velocity relative to the air (`v − wind`)
//! - **b̂** = horizontal unit vector perpendicular to `v_r` (the pure-backspin axis)
//! - **f_back** = share of the spin axis aligned with `b̂`, clamped to `[0, 1]`
//! - **S** = spin parameter `ω·r / |v_r|`; lift grows linearly until `S_sat`
//! - **ω_side** = angular velocity with its backspin component removed, so the
//!   Magnus term only carries the curving (side/gyro) part of the spin
//! - **k_moist** = moisture drag factor from the conditioner
//!
//! Lift therefore lies in the vertical plane containing the velocity, and the
//! Magnus force bends the ball out of that plane.
//!
//! # References
//! - Bearman, P.W., Harvey, J.K. (1976). "Golf ball aerodynamics." Aeronautical Quarterly 27, 112-122.
//! - Smits, A.J., Smith, D.R. (1994). "A new aerodynamic model of a golf ball in flight."
//!   Science and Golf II, 340-347.

use crate::config::FlightConfig;
use crate::core_types::vec3::is_finite;
use crate::core_types::{BallProperties, Environment, SpinState, Vec3};
use crate::error::{FlightError, Result};
use crate::physics::atmosphere::{condition_with, Atmosphere};
use serde::{Deserialize, Serialize};

/// Airspeeds below this are treated as zero (m/s)
const MIN_AIRSPEED: f64 = 1e-9;

/// Instantaneous aerodynamic forces (N), world frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceSample {
    /// Opposes the relative air velocity
    pub drag: Vec3,
    /// Backspin lift, perpendicular to the relative velocity in its vertical plane
    pub lift: Vec3,
    /// Side force from off-axis spin
    pub magnus: Vec3,
}

impl ForceSample {
    /// No aerodynamic force (ball at rest relative to the air)
    pub fn zero() -> Self {
        Self {
            drag: Vec3::zeros(),
            lift: Vec3::zeros(),
            magnus: Vec3::zeros(),
        }
    }

    /// Vector sum of all aerodynamic components
    pub fn net(&self) -> Vec3 {
        self.drag + self.lift + self.magnus
    }
}

/// Aerodynamic forces for a ball moving at `velocity` through `env`
///
/// Conditions the environment, validates every input and returns the force
/// sample. Pure: identical inputs always yield identical output.
///
/// # Errors
/// `InvalidInput` for a non-finite velocity or spin, non-physical ball
/// properties, or an environment the conditioner rejects.
pub fn forces(
    velocity: Vec3,
    spin: SpinState,
    props: &BallProperties,
    env: &Environment,
) -> Result<ForceSample> {
    let config = FlightConfig::default();
    if !is_finite(&velocity) {
        return Err(FlightError::invalid(
            "velocity",
            format!("{velocity:?}"),
            "must be finite",
        ));
    }
    let spin = SpinState::new(spin.rate, spin.axis)?;
    props.validate()?;
    let air = condition_with(env, &config.atmosphere)?;

    Ok(forces_in(&(velocity - env.wind), &spin, props, &air, &config))
}

/// Aerodynamic forces for an already-conditioned atmosphere
///
/// `air_velocity` is the ball's velocity relative to the air. No validation
/// is performed; the integrator calls this on its hot path after validating
/// once up front.
pub fn forces_in(
    air_velocity: &Vec3,
    spin: &SpinState,
    props: &BallProperties,
    air: &Atmosphere,
    config: &FlightConfig,
) -> ForceSample {
    let speed = air_velocity.norm();
    if speed < MIN_AIRSPEED {
        return ForceSample::zero();
    }
    let direction = air_velocity / speed;
    let pressure_area = air.dynamic_pressure(speed) * props.area;

    let drag = -direction
        * (pressure_area * props.drag_coefficient * air.corrections.moisture_drag_factor);

    let omega = spin.rate.to_radians_per_second();
    if omega <= 0.0 {
        return ForceSample {
            drag,
            lift: Vec3::zeros(),
            magnus: Vec3::zeros(),
        };
    }

    let mut side_spin = spin.axis * omega;
    let mut lift = Vec3::zeros();

    let lateral = air_velocity.cross(&Vec3::y());
    let lateral_norm = lateral.norm();
    if lateral_norm > MIN_AIRSPEED {
        let backspin_axis = lateral / lateral_norm;
        let backspin_fraction = spin.axis.dot(&backspin_axis).clamp(0.0, 1.0);
        let spin_parameter = omega * props.radius / speed;
        let saturation = (spin_parameter / config.lift_saturation_spin_parameter).min(1.0);

        lift = backspin_axis.cross(&direction)
            * (pressure_area * props.lift_coefficient * backspin_fraction * saturation);

        side_spin -= backspin_axis * side_spin.dot(&backspin_axis);
    }

    let magnus = side_spin.cross(air_velocity)
        * (0.5 * props.magnus_coefficient * air.air_density * props.area * props.radius);

    ForceSample { drag, lift, magnus }
}

/// Acceleration from a force sample plus gravity (m/s²)
pub fn acceleration(sample: &ForceSample, mass: f64, gravity: f64) -> Vec3 {
    sample.net() / mass - Vec3::y() * gravity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Degrees, Fahrenheit, Feet, Pressure, RelativeHumidity, Rpm};
    use crate::physics::atmosphere::condition;
    use approx::assert_relative_eq;

    fn scenario_env() -> Environment {
        Environment::new(
            Fahrenheit::new(68.0),
            Pressure::Pascals(101_325.0),
            Feet::new(0.0),
            RelativeHumidity::Fraction(0.2),
        )
    }

    fn launch_velocity() -> Vec3 {
        let angle = 23f64.to_radians();
        Vec3::new(70.0 * angle.cos(), 70.0 * angle.sin(), 0.0)
    }

    #[test]
    fn test_zero_velocity_yields_zero_forces() {
        let sample = forces(
            Vec3::zeros(),
            SpinState::backspin(Rpm::new(3000.0), 0.0),
            &BallProperties::standard(),
            &scenario_env(),
        )
        .unwrap();
        assert_eq!(sample, ForceSample::zero());
        assert_eq!(sample.net(), Vec3::zeros());
    }

    #[test]
    fn test_drag_magnitude_and_direction() {
        let env = scenario_env();
        let props = BallProperties::standard();
        let v = launch_velocity();
        let sample = forces(v, SpinState::none(), &props, &env).unwrap();

        let air = condition(&env).unwrap();
        let expected = 0.5
            * air.air_density
            * 70.0
            * 70.0
            * props.drag_coefficient
            * props.area
            * air.corrections.moisture_drag_factor;
        assert_relative_eq!(sample.drag.norm(), expected, max_relative = 1e-12);
        assert_relative_eq!(sample.drag.normalize(), -v.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_and_negative_spin_degenerate() {
        let env = scenario_env();
        let props = BallProperties::standard();
        for rate in [0.0, -1500.0] {
            let sample = forces(
                launch_velocity(),
                SpinState::backspin(Rpm::new(rate), 0.0),
                &props,
                &env,
            )
            .unwrap();
            assert_eq!(sample.lift, Vec3::zeros());
            assert_eq!(sample.magnus, Vec3::zeros());
            assert!(sample.drag.norm() > 0.0);
        }
    }

    #[test]
    fn test_backspin_lift_is_vertical_plane_perpendicular() {
        let v = launch_velocity();
        let sample = forces(
            v,
            SpinState::backspin(Rpm::new(2500.0), 0.0),
            &BallProperties::standard(),
            &scenario_env(),
        )
        .unwrap();

        assert!(sample.lift.y > 0.0);
        assert_relative_eq!(sample.lift.dot(&v), 0.0, epsilon = 1e-9);
        assert_relative_eq!(sample.lift.z, 0.0, epsilon = 1e-12);
        // Pure backspin has no side component
        assert_relative_eq!(sample.magnus.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lift_scales_with_spin_below_saturation() {
        let env = scenario_env();
        let props = BallProperties::standard();
        let lift_at = |rpm: f64| {
            forces(
                launch_velocity(),
                SpinState::backspin(Rpm::new(rpm), 0.0),
                &props,
                &env,
            )
            .unwrap()
            .lift
            .norm()
        };
        assert_relative_eq!(lift_at(1000.0) / lift_at(2500.0), 0.4, max_relative = 1e-9);

        // Far above saturation the lift stops growing
        assert_relative_eq!(lift_at(20_000.0), lift_at(40_000.0), max_relative = 1e-12);
    }

    #[test]
    fn test_axis_tilt_up_curves_left() {
        let v = launch_velocity();
        let spin = SpinState::tilted(Rpm::new(3000.0), 0.0, Degrees::new(20.0));
        let sample = forces(v, spin, &BallProperties::standard(), &scenario_env()).unwrap();
        // Heading north, left is west (−z)
        assert!(sample.magnus.z < 0.0);

        let spin = SpinState::tilted(Rpm::new(3000.0), 0.0, Degrees::new(-20.0));
        let sample = forces(v, spin, &BallProperties::standard(), &scenario_env()).unwrap();
        assert!(sample.magnus.z > 0.0);
    }

    #[test]
    fn test_headwind_increases_drag() {
        let props = BallProperties::standard();
        let spin = SpinState::backspin(Rpm::new(2500.0), 0.0);
        let calm = forces(launch_velocity(), spin, &props, &scenario_env()).unwrap();
        let into = forces(
            launch_velocity(),
            spin,
            &props,
            &scenario_env().with_wind_from(8.0, 0.0),
        )
        .unwrap();
        assert!(into.drag.norm() > calm.drag.norm());
    }

    #[test]
    fn test_forces_idempotent() {
        let env = scenario_env().with_wind(Vec3::new(-3.0, 0.0, 2.0));
        let props = BallProperties::for_construction(crate::core_types::Construction::FivePiece);
        let spin = SpinState::tilted(Rpm::new(2800.0), 10.0, Degrees::new(5.0));
        let a = forces(launch_velocity(), spin, &props, &env).unwrap();
        let b = forces(launch_velocity(), spin, &props, &env).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_non_finite_velocity() {
        let result = forces(
            Vec3::new(f64::NAN, 1.0, 0.0),
            SpinState::none(),
            &BallProperties::standard(),
            &scenario_env(),
        );
        assert!(matches!(
            result,
            Err(FlightError::InvalidInput { field: "velocity", .. })
        ));
    }

    #[test]
    fn test_acceleration_includes_gravity() {
        let a = acceleration(&ForceSample::zero(), 0.04593, 9.80665);
        assert_relative_eq!(a, Vec3::new(0.0, -9.80665, 0.0), epsilon = 1e-12);
    }
}
