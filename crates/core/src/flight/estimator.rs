//! Interchangeable shot estimators
//!
//! [`ShotEstimator`] is the single capability both models implement, so a
//! caller picks fidelity or latency without inspecting concrete types:
//!
//! - [`HeuristicEstimator`]: the additive percentage model, microseconds per call
//! - [`IntegratedEstimator`]: flies a reference shot through the integrator in
//!   the given conditions and in standard conditions, and reports the difference

use crate::config::{FlightConfig, HeuristicConstants};
use crate::core_types::units::{Degrees, Rpm, Yards};
use crate::core_types::{BallProperties, BallState, Environment};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, Result};
use crate::flight::club::{recommend_club, Club};
use crate::flight::heuristic::{adjust_shot_with, ShotAdjustments};
use crate::flight::integrator::{integrate_with, FlightResult, DEFAULT_TIME_STEP};
use serde::{Deserialize, Serialize};

/// Result of an estimate: adjustments plus what to play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotEstimate {
    /// Raw adjustments from the estimator
    pub adjustments: ShotAdjustments,
    /// Distance the target plays like in these conditions
    pub plays_like: Yards,
    /// Recommended club for `plays_like`
    pub club: Club,
}

/// Backend-agnostic shot estimation
pub trait ShotEstimator: Send + Sync {
    /// Short name for logs and reports
    fn name(&self) -> &'static str;

    /// Adjustments for a shot at `target` in `env`
    fn adjustments(
        &self,
        target: Yards,
        env: &Environment,
        props: &BallProperties,
    ) -> Result<ShotAdjustments>;

    /// Adjustments plus plays-like distance and club
    fn estimate(
        &self,
        target: Yards,
        env: &Environment,
        props: &BallProperties,
    ) -> Result<ShotEstimate> {
        let adjustments = self.adjustments(target, env, props)?;
        let plays_like = adjustments.plays_like(target);
        Ok(ShotEstimate {
            adjustments,
            plays_like,
            club: recommend_club(plays_like)?,
        })
    }
}

/// Which estimator to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EstimatorKind {
    /// Fast additive model
    #[default]
    Heuristic,
    /// Full trajectory integration
    Integrated,
}

/// Create an estimator for shots played along `shot_direction`
///
/// `config` drives the integrated estimator; the heuristic one uses its
/// default coefficients.
pub fn create_estimator(
    kind: EstimatorKind,
    shot_direction: f64,
    config: &FlightConfig,
) -> Box<dyn ShotEstimator> {
    match kind {
        EstimatorKind::Heuristic => Box::new(HeuristicEstimator {
            shot_direction,
            ..HeuristicEstimator::default()
        }),
        EstimatorKind::Integrated => Box::new(IntegratedEstimator {
            config: *config,
            shot_direction,
            ..IntegratedEstimator::default()
        }),
    }
}

/// Heuristic model behind the estimator interface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeuristicEstimator {
    /// Effect coefficients and caps
    pub constants: HeuristicConstants,
    /// Compass bearing of the shot (degrees)
    pub shot_direction: f64,
}

impl ShotEstimator for HeuristicEstimator {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn adjustments(
        &self,
        target: Yards,
        env: &Environment,
        props: &BallProperties,
    ) -> Result<ShotAdjustments> {
        adjust_shot_with(target, env, props, self.shot_direction, &self.constants)
    }
}

/// Launch conditions of the reference shot an [`IntegratedEstimator`] flies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchProfile {
    /// Ball speed (m/s)
    pub ball_speed: f64,
    /// Vertical launch angle
    pub launch_angle: Degrees,
    /// Pure backspin at launch
    pub spin_rate: Rpm,
}

impl Default for LaunchProfile {
    /// A mid-iron to fairway-wood strike: 70 m/s, 23°, 2500 rpm
    fn default() -> Self {
        Self {
            ball_speed: 70.0,
            launch_angle: Degrees::new(23.0),
            spin_rate: Rpm::new(2500.0),
        }
    }
}

/// Trajectory integrator behind the estimator interface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratedEstimator {
    /// Reference shot flown in both environments
    pub launch: LaunchProfile,
    /// Integration time step (s)
    pub dt: f64,
    /// Flight model parameters
    pub config: FlightConfig,
    /// Compass bearing of the shot (degrees)
    pub shot_direction: f64,
}

impl Default for IntegratedEstimator {
    fn default() -> Self {
        Self {
            launch: LaunchProfile::default(),
            dt: DEFAULT_TIME_STEP,
            config: FlightConfig::default(),
            shot_direction: 0.0,
        }
    }
}

impl IntegratedEstimator {
    fn fly(&self, env: &Environment, props: &BallProperties) -> Result<FlightResult> {
        let state = BallState::launch(
            self.launch.ball_speed,
            self.launch.launch_angle,
            self.shot_direction,
            self.launch.spin_rate,
            props.mass,
        );
        integrate_with(state, env, props, self.dt, &self.config)
    }
}

/// Descent geometry proxy: angle from launch point to apex over half the carry
fn apex_angle(flight: &FlightResult) -> f64 {
    flight
        .metrics
        .max_height
        .atan2(*flight.metrics.carry_distance / 2.0)
        .to_degrees()
}

impl ShotEstimator for IntegratedEstimator {
    fn name(&self) -> &'static str {
        "integrated"
    }

    fn adjustments(
        &self,
        target: Yards,
        env: &Environment,
        props: &BallProperties,
    ) -> Result<ShotAdjustments> {
        let target = ensure_non_negative("target", *target)?;
        ensure_positive("launch.ball_speed", self.launch.ball_speed)?;
        ensure_finite("shot_direction", self.shot_direction)?;

        let actual = self.fly(env, props)?;
        let reference = self.fly(&Environment::standard(), props)?;

        let actual_carry = *actual.metrics.carry_distance;
        let reference_carry = *reference.metrics.carry_distance;
        ensure_positive("reference_carry", reference_carry)?;
        ensure_positive("carry", actual_carry)?;

        let spin_adjustment = if *reference.landing_spin > 0.0 {
            (*actual.landing_spin / *reference.landing_spin - 1.0) * 100.0
        } else {
            0.0
        };

        Ok(ShotAdjustments {
            distance_adjustment: (actual_carry / reference_carry - 1.0) * 100.0,
            trajectory_shift: Yards::new(*actual.lateral_deviation / actual_carry * target),
            spin_adjustment,
            launch_angle_adjustment: Degrees::new(apex_angle(&reference) - apex_angle(&actual)),
            breakdown: None,
        })
    }
}
