//! Trajectory integration
//!
//! A [`Trajectory`] is a lazy, finite iterator over [`TrajectoryPoint`]s. It
//! owns the only mutable [`BallState`] of the flight and advances it with a
//! fixed-step fourth-order Runge-Kutta scheme:
//!
//! ```text
//! Launch ──► Airborne ──(y ≤ 0 while descending)──► Landed
//!               │
//!               └──(flight time or step ceiling hit / non-finite state)──► Aborted
//! ```
//!
//! Spin is held constant within a step and decays exponentially between
//! steps. The final point is interpolated to the exact ground crossing.
//! [`integrate`] drives the iterator to completion and derives the summary.

use crate::config::FlightConfig;
use crate::core_types::units::{Degrees, Meters, Rpm};
use crate::core_types::vec3::{bearing_of, is_finite, right_of};
use crate::core_types::{BallProperties, BallState, Environment, Vec3};
use crate::error::{ensure_positive, FlightError, Result};
use crate::flight::metrics::FlightMetrics;
use crate::physics::aerodynamics::{acceleration, forces_in};
use crate::physics::atmosphere::{condition_with, Atmosphere};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use tracing::{debug, warn};

/// Default integration time step (s)
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// One sample of the flight path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Position (m)
    pub position: Vec3,
    /// Velocity (m/s)
    pub velocity: Vec3,
    /// Spin rate at this instant
    pub spin_rate: Rpm,
    /// Seconds since launch
    pub time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Launch,
    Airborne,
    Landed,
    Aborted,
}

/// Lazy flight path from launch to landing
///
/// Yields the launch point first, then one point per step, and finally the
/// interpolated landing point. If the flight cannot finish, the iterator
/// yields a single `Err(NonConvergent)` and then stops.
#[derive(Debug, Clone)]
pub struct Trajectory {
    state: BallState,
    props: BallProperties,
    air: Atmosphere,
    wind: Vec3,
    config: FlightConfig,
    dt: f64,
    time: f64,
    steps: usize,
    step_budget: usize,
    phase: Phase,
}

impl Trajectory {
    /// Start a flight with the default configuration
    ///
    /// # Errors
    /// `InvalidInput` if the initial state, ball, time step or environment is
    /// non-physical.
    pub fn new(
        initial: BallState,
        env: &Environment,
        props: &BallProperties,
        dt: f64,
    ) -> Result<Self> {
        Self::with_config(initial, env, props, dt, &FlightConfig::default())
    }

    /// Start a flight with explicit model parameters
    pub fn with_config(
        initial: BallState,
        env: &Environment,
        props: &BallProperties,
        dt: f64,
        config: &FlightConfig,
    ) -> Result<Self> {
        initial.validate()?;
        props.validate()?;
        ensure_positive("dt", dt)?;
        config.validate()?;
        let air = condition_with(env, &config.atmosphere)?;

        Ok(Self {
            state: initial,
            props: *props,
            air,
            wind: env.wind,
            config: *config,
            dt,
            time: 0.0,
            steps: 0,
            step_budget: config.step_budget(dt),
            phase: Phase::Launch,
        })
    }

    /// Conditioned air the flight runs through
    pub fn atmosphere(&self) -> &Atmosphere {
        &self.air
    }

    /// Integration steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// True once the landing point has been produced
    pub fn is_landed(&self) -> bool {
        self.phase == Phase::Landed
    }

    fn point(&self) -> TrajectoryPoint {
        TrajectoryPoint {
            position: self.state.position,
            velocity: self.state.velocity,
            spin_rate: self.state.spin.rate,
            time: self.time,
        }
    }

    fn acceleration_at(&self, velocity: &Vec3) -> Vec3 {
        let sample = forces_in(
            &(velocity - self.wind),
            &self.state.spin,
            &self.props,
            &self.air,
            &self.config,
        );
        acceleration(&sample, self.state.mass, self.config.gravity)
    }

    fn abort(&mut self, reason: &'static str) -> FlightError {
        self.phase = Phase::Aborted;
        warn!(
            "Integration aborted after {} steps at t={:.2}s: {}",
            self.steps, self.time, reason
        );
        FlightError::NonConvergent {
            steps: self.steps,
            elapsed: self.time,
            reason,
        }
    }

    fn step(&mut self) -> Result<TrajectoryPoint> {
        if self.steps >= self.step_budget {
            return Err(self.abort("step budget exhausted before landing"));
        }

        let dt = self.dt;
        let half = dt / 2.0;
        let p = self.state.position;
        let v = self.state.velocity;

        // RK4: position derivative is the velocity at each stage
        let k1v = self.acceleration_at(&v);
        let k1p = v;
        let k2p = v + k1v * half;
        let k2v = self.acceleration_at(&k2p);
        let k3p = v + k2v * half;
        let k3v = self.acceleration_at(&k3p);
        let k4p = v + k3v * dt;
        let k4v = self.acceleration_at(&k4p);

        let next_v = v + (k1v + k2v * 2.0 + k3v * 2.0 + k4v) * (dt / 6.0);
        let next_p = p + (k1p + k2p * 2.0 + k3p * 2.0 + k4p) * (dt / 6.0);
        self.steps += 1;

        if !is_finite(&next_v) || !is_finite(&next_p) {
            return Err(self.abort("ball state became non-finite"));
        }

        self.state.spin.rate = self.state.spin.rate * (-self.props.spin_decay_rate * dt).exp();

        if next_p.y <= 0.0 && next_v.y < 0.0 {
            let drop = p.y - next_p.y;
            let fraction = if drop > 0.0 {
                (p.y / drop).clamp(0.0, 1.0)
            } else {
                1.0
            };
            self.state.position = p + (next_p - p) * fraction;
            self.state.velocity = v + (next_v - v) * fraction;
            self.time += dt * fraction;
            self.phase = Phase::Landed;

            debug!(
                "Ball landed: t={:.3}s, steps={}, position=({:.2}, {:.2})",
                self.time, self.steps, self.state.position.x, self.state.position.z
            );
        } else {
            self.state.position = next_p;
            self.state.velocity = next_v;
            self.time += dt;
        }

        Ok(self.point())
    }
}

impl Iterator for Trajectory {
    type Item = Result<TrajectoryPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Launch => {
                self.phase = Phase::Airborne;
                Some(Ok(self.point()))
            }
            Phase::Airborne => Some(self.step()),
            Phase::Landed | Phase::Aborted => None,
        }
    }
}

impl FusedIterator for Trajectory {}

/// A completed flight: every sample plus derived summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    /// Samples in time order, launch first and landing last
    pub points: Vec<TrajectoryPoint>,
    /// Summary metrics
    pub metrics: FlightMetrics,
    /// Landing offset from the launch bearing (+ right, − left)
    pub lateral_deviation: Meters,
    /// Descent angle below horizontal at landing
    pub landing_angle: Degrees,
    /// Spin remaining at landing
    pub landing_spin: Rpm,
    /// Seconds from launch to the apex
    pub apex_time: f64,
}

impl FlightResult {
    /// Final (landing) sample
    pub fn landing(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }
}

/// Integrate a flight to landing with the default configuration
///
/// # Example
/// ```
/// use golf_flight_core::core_types::{BallProperties, BallState, Degrees, Environment, Rpm};
/// use golf_flight_core::flight::integrate;
///
/// let props = BallProperties::standard();
/// let launch = BallState::launch(70.0, Degrees::new(23.0), 0.0, Rpm::new(2500.0), props.mass);
/// let flight = integrate(launch, &Environment::standard(), &props, 0.01).unwrap();
/// assert!(*flight.metrics.carry_distance > 200.0);
/// ```
///
/// # Errors
/// `InvalidInput` for bad inputs, `NonConvergent` when the flight never lands
/// within `max_flight_time` (or `max_steps`) or its state turns non-finite.
pub fn integrate(
    initial: BallState,
    env: &Environment,
    props: &BallProperties,
    dt: f64,
) -> Result<FlightResult> {
    integrate_with(initial, env, props, dt, &FlightConfig::default())
}

/// Integrate a flight to landing with explicit model parameters
pub fn integrate_with(
    initial: BallState,
    env: &Environment,
    props: &BallProperties,
    dt: f64,
    config: &FlightConfig,
) -> Result<FlightResult> {
    let trajectory = Trajectory::with_config(initial, env, props, dt, config)?;
    let points = trajectory.collect::<Result<Vec<_>>>()?;
    summarize(&initial, points, config)
}

fn summarize(
    initial: &BallState,
    points: Vec<TrajectoryPoint>,
    config: &FlightConfig,
) -> Result<FlightResult> {
    let (Some(landing), Some(apex)) = (
        points.last().copied(),
        points
            .iter()
            .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
            .copied(),
    ) else {
        return Err(FlightError::NonConvergent {
            steps: 0,
            elapsed: 0.0,
            reason: "trajectory produced no points",
        });
    };

    let launch_velocity = initial.velocity;
    let horizontal_speed = launch_velocity.x.hypot(launch_velocity.z);
    let launch_direction = bearing_of(&launch_velocity);

    let displacement = landing.position - initial.position;
    let carry = displacement.x.hypot(displacement.z);

    let landing_horizontal = landing.velocity.x.hypot(landing.velocity.z);

    let metrics = FlightMetrics {
        carry_distance: Meters::new(carry),
        total_distance: Meters::new(carry * (1.0 + config.roll_fraction)),
        max_height: Meters::new(apex.position.y),
        time_of_flight: landing.time,
        spin_rate: initial.spin.rate,
        launch_angle: Degrees::new(launch_velocity.y.atan2(horizontal_speed).to_degrees()),
        launch_direction: Degrees::new(launch_direction),
        ball_speed: launch_velocity.norm(),
    };

    if !metrics.is_finite() {
        return Err(FlightError::NonConvergent {
            steps: points.len(),
            elapsed: landing.time,
            reason: "summary metrics are non-finite",
        });
    }

    Ok(FlightResult {
        lateral_deviation: Meters::new(displacement.dot(&right_of(launch_direction))),
        landing_angle: Degrees::new((-landing.velocity.y).atan2(landing_horizontal).to_degrees()),
        landing_spin: landing.spin_rate,
        apex_time: apex.time,
        metrics,
        points,
    })
}
