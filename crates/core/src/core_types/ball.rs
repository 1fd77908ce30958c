//! Golf ball properties and kinematic state
//!
//! [`BallProperties`] describes the ball as manufactured (mass, size and
//! aerodynamic coefficients). [`BallState`] is the mutable kinematic state the
//! integrator advances one step at a time; it is never shared between
//! integrations.

use crate::core_types::units::{Degrees, Rpm};
use crate::core_types::vec3::{heading_vector, is_finite, right_of, Vec3};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, FlightError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// USGA maximum ball mass (kg)
pub const REGULATION_MASS: f64 = 0.04593;

/// USGA minimum ball radius (m)
pub const REGULATION_RADIUS: f64 = 0.02135;

/// Ball construction class
///
/// More layers means a softer cover and higher spin retention; the presets in
/// [`BallProperties::for_construction`] encode that as slightly higher lift
/// and faster spin decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Construction {
    /// Ionomer-covered distance ball
    TwoPiece,
    /// Urethane tour ball (reference construction)
    ThreePiece,
    /// Multi-mantle tour ball
    FourPiece,
    /// Five-layer premium ball
    FivePiece,
}

impl Construction {
    /// Every construction class, fewest layers first
    pub const ALL: [Construction; 4] = [
        Self::TwoPiece,
        Self::ThreePiece,
        Self::FourPiece,
        Self::FivePiece,
    ];

    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoPiece => "two-piece",
            Self::ThreePiece => "three-piece",
            Self::FourPiece => "four-piece",
            Self::FivePiece => "five-piece",
        }
    }
}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Construction {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "two-piece" | "2-piece" | "2" => Ok(Self::TwoPiece),
            "three-piece" | "3-piece" | "3" => Ok(Self::ThreePiece),
            "four-piece" | "4-piece" | "4" => Ok(Self::FourPiece),
            "five-piece" | "5-piece" | "5" => Ok(Self::FivePiece),
            _ => Err(FlightError::invalid(
                "construction",
                s,
                "unrecognized construction label",
            )),
        }
    }
}

/// Physical and aerodynamic properties of a ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallProperties {
    /// Mass (kg)
    pub mass: f64,
    /// Radius (m)
    pub radius: f64,
    /// Cross-sectional area (m²). Derived as π·r² by the constructors but
    /// may be overridden independently.
    pub area: f64,
    /// Drag coefficient
    pub drag_coefficient: f64,
    /// Peak lift coefficient reached at the lift saturation spin parameter
    pub lift_coefficient: f64,
    /// Magnus coefficient for off-axis (side) spin
    pub magnus_coefficient: f64,
    /// Fractional spin decay per second
    pub spin_decay_rate: f64,
    /// Construction class
    pub construction: Construction,
}

impl BallProperties {
    /// Regulation ball with explicit coefficients; area derived from radius
    pub fn new(
        mass: f64,
        radius: f64,
        drag_coefficient: f64,
        lift_coefficient: f64,
        magnus_coefficient: f64,
        spin_decay_rate: f64,
        construction: Construction,
    ) -> Result<Self> {
        let props = Self {
            mass,
            radius,
            area: std::f64::consts::PI * radius * radius,
            drag_coefficient,
            lift_coefficient,
            magnus_coefficient,
            spin_decay_rate,
            construction,
        };
        props.validate()?;
        Ok(props)
    }

    /// Three-piece tour ball, the reference ball the fixtures are calibrated on
    pub fn standard() -> Self {
        Self::for_construction(Construction::ThreePiece)
    }

    /// Preset coefficients for a construction class
    pub fn for_construction(construction: Construction) -> Self {
        let (drag, lift, magnus, decay) = match construction {
            Construction::TwoPiece => (0.19, 0.14, 0.25, 0.035),
            Construction::ThreePiece => (0.19, 0.15, 0.25, 0.04),
            Construction::FourPiece => (0.20, 0.16, 0.26, 0.045),
            Construction::FivePiece => (0.20, 0.17, 0.27, 0.05),
        };
        Self {
            mass: REGULATION_MASS,
            radius: REGULATION_RADIUS,
            area: std::f64::consts::PI * REGULATION_RADIUS * REGULATION_RADIUS,
            drag_coefficient: drag,
            lift_coefficient: lift,
            magnus_coefficient: magnus,
            spin_decay_rate: decay,
            construction,
        }
    }

    /// Override the cross-sectional area
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    /// Check physical validity: positive mass, radius and area; finite,
    /// non-negative coefficients.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("radius", self.radius)?;
        ensure_positive("area", self.area)?;
        ensure_non_negative("drag_coefficient", self.drag_coefficient)?;
        ensure_non_negative("lift_coefficient", self.lift_coefficient)?;
        ensure_non_negative("magnus_coefficient", self.magnus_coefficient)?;
        ensure_non_negative("spin_decay_rate", self.spin_decay_rate)?;
        Ok(())
    }
}

impl Default for BallProperties {
    fn default() -> Self {
        Self::standard()
    }
}

/// Spin rate and axis
///
/// The axis is a unit vector; angular velocity is `axis × rate`. For a ball
/// travelling along bearing θ, pure backspin has the axis pointing to the
/// golfer's right, `(−sin θ, 0, cos θ)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    /// Spin rate. Zero or negative rates produce no spin forces.
    pub rate: Rpm,
    /// Unit spin axis
    pub axis: Vec3,
}

impl SpinState {
    /// Spin about an arbitrary axis; the axis is normalized
    pub fn new(rate: Rpm, axis: Vec3) -> Result<Self> {
        ensure_finite("spin.rate", *rate)?;
        if !is_finite(&axis) {
            return Err(FlightError::invalid("spin.axis", format!("{axis:?}"), "must be finite"));
        }
        let norm = axis.norm();
        if norm < 1e-12 {
            return Err(FlightError::invalid("spin.axis", format!("{axis:?}"), "must be non-zero"));
        }
        Ok(Self {
            rate,
            axis: axis / norm,
        })
    }

    /// Pure backspin for a ball launched along `heading_deg`
    pub fn backspin(rate: Rpm, heading_deg: f64) -> Self {
        Self {
            rate,
            axis: right_of(heading_deg),
        }
    }

    /// Backspin with the axis tilted by `tilt` degrees
    ///
    /// Positive tilt raises the axis toward vertical and curves the ball
    /// left; negative tilt curves it right.
    pub fn tilted(rate: Rpm, heading_deg: f64, tilt: Degrees) -> Self {
        let t = tilt.to_radians();
        Self {
            rate,
            axis: right_of(heading_deg) * t.cos() + Vec3::y() * t.sin(),
        }
    }

    /// No spin at all
    pub fn none() -> Self {
        Self {
            rate: Rpm::new(0.0),
            axis: Vec3::z(),
        }
    }

    /// Angular velocity vector (rad/s)
    pub fn angular_velocity(&self) -> Vec3 {
        self.axis * self.rate.to_radians_per_second()
    }
}

/// Kinematic state of a ball in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    /// Position (m); y is height above the landing surface
    pub position: Vec3,
    /// Velocity (m/s)
    pub velocity: Vec3,
    /// Spin
    pub spin: SpinState,
    /// Mass (kg)
    pub mass: f64,
}

impl BallState {
    /// State at impact from launch-monitor style numbers
    ///
    /// # Arguments
    /// * `ball_speed` - Speed off the face (m/s)
    /// * `launch_angle` - Vertical launch angle above horizontal
    /// * `heading_deg` - Compass bearing of the launch direction
    /// * `spin_rate` - Backspin rate
    /// * `mass` - Ball mass (kg)
    pub fn launch(
        ball_speed: f64,
        launch_angle: Degrees,
        heading_deg: f64,
        spin_rate: Rpm,
        mass: f64,
    ) -> Self {
        let elevation = launch_angle.to_radians();
        let velocity = heading_vector(heading_deg) * (ball_speed * elevation.cos())
            + Vec3::y() * (ball_speed * elevation.sin());
        Self {
            position: Vec3::zeros(),
            velocity,
            spin: SpinState::backspin(spin_rate, heading_deg),
            mass,
        }
    }

    /// Replace the spin state
    pub fn with_spin(mut self, spin: SpinState) -> Self {
        self.spin = spin;
        self
    }

    /// Check the state is finite, the mass positive and the spin axis usable
    pub fn validate(&self) -> Result<()> {
        if !is_finite(&self.position) {
            return Err(FlightError::invalid(
                "position",
                format!("{:?}", self.position),
                "must be finite",
            ));
        }
        if !is_finite(&self.velocity) {
            return Err(FlightError::invalid(
                "velocity",
                format!("{:?}", self.velocity),
                "must be finite",
            ));
        }
        ensure_positive("state.mass", self.mass)?;
        SpinState::new(self.spin.rate, self.spin.axis)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_ball_is_valid() {
        let props = BallProperties::standard();
        assert!(props.validate().is_ok());
        assert_relative_eq!(props.area, 0.001432, epsilon = 1e-6);
        assert_eq!(props.construction, Construction::ThreePiece);
    }

    #[test]
    fn test_rejects_non_physical_properties() {
        let mut props = BallProperties::standard();
        props.mass = 0.0;
        assert!(matches!(
            props.validate(),
            Err(FlightError::InvalidInput { field: "mass", .. })
        ));

        let mut props = BallProperties::standard();
        props.drag_coefficient = -0.1;
        assert!(props.validate().is_err());

        let mut props = BallProperties::standard();
        props.radius = f64::NAN;
        assert!(props.validate().is_err());

        assert!(BallProperties::new(
            0.045,
            -0.02,
            0.2,
            0.15,
            0.25,
            0.04,
            Construction::TwoPiece
        )
        .is_err());
    }

    #[test]
    fn test_construction_labels() {
        for construction in Construction::ALL {
            assert_eq!(construction.label().parse::<Construction>(), Ok(construction));
        }
        assert_eq!("3_piece".parse::<Construction>(), Ok(Construction::ThreePiece));
        assert!(matches!(
            "wound balata".parse::<Construction>(),
            Err(FlightError::InvalidInput { field: "construction", .. })
        ));
    }

    #[test]
    fn test_launch_state() {
        let state = BallState::launch(
            70.0,
            Degrees::new(23.0),
            0.0,
            Rpm::new(2500.0),
            REGULATION_MASS,
        );
        assert_relative_eq!(state.velocity.norm(), 70.0, epsilon = 1e-9);
        assert_relative_eq!(state.velocity.y, 70.0 * 23f64.to_radians().sin(), epsilon = 1e-9);
        assert_relative_eq!(state.velocity.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(state.spin.axis, Vec3::z(), epsilon = 1e-12);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_spin_axis_normalized_and_validated() {
        let spin = SpinState::new(Rpm::new(3000.0), Vec3::new(0.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(spin.axis.norm(), 1.0, epsilon = 1e-12);
        assert!(SpinState::new(Rpm::new(3000.0), Vec3::zeros()).is_err());

        let tilted = SpinState::tilted(Rpm::new(3000.0), 0.0, Degrees::new(30.0));
        assert_relative_eq!(tilted.axis.norm(), 1.0, epsilon = 1e-12);
        assert!(tilted.axis.y > 0.0);
    }
}
