//! Ball flight: trajectory integration, summary metrics and shot estimation
//!
//! [`integrate`] is the full-fidelity path. [`adjust_shot`] is the fast
//! heuristic. Both sit behind [`ShotEstimator`] for callers that want to
//! choose at runtime.

pub mod club;
pub mod estimator;
pub mod heuristic;
pub mod integrator;
pub mod metrics;

pub use club::{recommend_club, recommend_club_from, Club, CARRY_TABLE};
pub use estimator::{
    create_estimator, EstimatorKind, HeuristicEstimator, IntegratedEstimator, LaunchProfile,
    ShotEstimate, ShotEstimator,
};
pub use heuristic::{adjust_shot, adjust_shot_with, EffectBreakdown, ShotAdjustments};
pub use integrator::{
    integrate, integrate_with, FlightResult, Trajectory, TrajectoryPoint, DEFAULT_TIME_STEP,
};
pub use metrics::FlightMetrics;
