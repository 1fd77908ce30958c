//! Vector type alias for 3D positions, velocities, wind and spin axes.

use nalgebra::Vector3;

/// 3D vector type for positions, velocities, wind and spin axes.
///
/// This is a simple alias for `nalgebra::Vector3<f64>`. The world frame is
/// right-handed with x pointing north (bearing 0°), y pointing up and z
/// pointing east (bearing 90°).
pub type Vec3 = Vector3<f64>;

/// Horizontal unit vector for a compass bearing in degrees
#[must_use]
pub fn heading_vector(bearing_deg: f64) -> Vec3 {
    let theta = bearing_deg.to_radians();
    Vec3::new(theta.cos(), 0.0, theta.sin())
}

/// Unit vector pointing to the right of a compass bearing
#[must_use]
pub fn right_of(bearing_deg: f64) -> Vec3 {
    heading_vector(bearing_deg + 90.0)
}

/// Compass bearing (degrees, `(-180, 180]`) of the horizontal part of `v`
#[must_use]
pub fn bearing_of(v: &Vec3) -> f64 {
    v.z.atan2(v.x).to_degrees()
}

/// True when every component is finite (no NaN, no infinity)
#[must_use]
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}
