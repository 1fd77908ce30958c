//! Club selection from a plays-like distance

use crate::core_types::units::Yards;
use crate::error::{ensure_finite, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clubs in the bag, longest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Club {
    /// Driver (1-wood)
    Driver,
    /// 3-wood
    Wood3,
    /// 5-wood
    Wood5,
    /// Hybrid / rescue
    Hybrid,
    /// 4-iron
    Iron4,
    /// 5-iron
    Iron5,
    /// 6-iron
    Iron6,
    /// 7-iron
    Iron7,
    /// 8-iron
    Iron8,
    /// 9-iron
    Iron9,
    /// Pitching wedge
    PitchingWedge,
    /// Gap wedge
    GapWedge,
    /// Sand wedge
    SandWedge,
    /// Lob wedge, also the pick for anything shorter than the table
    LobWedge,
}

/// Minimum carry (yd) for each club, longest first
///
/// Typical amateur carries; anything shorter than the last entry is a lob wedge.
pub const CARRY_TABLE: [(Club, f64); 13] = [
    (Club::Driver, 230.0),
    (Club::Wood3, 215.0),
    (Club::Wood5, 200.0),
    (Club::Hybrid, 190.0),
    (Club::Iron4, 180.0),
    (Club::Iron5, 170.0),
    (Club::Iron6, 160.0),
    (Club::Iron7, 150.0),
    (Club::Iron8, 140.0),
    (Club::Iron9, 130.0),
    (Club::PitchingWedge, 120.0),
    (Club::GapWedge, 105.0),
    (Club::SandWedge, 90.0),
];

impl Club {
    /// Name as printed on a scorecard
    pub fn label(&self) -> &'static str {
        match self {
            Self::Driver => "Driver",
            Self::Wood3 => "3-Wood",
            Self::Wood5 => "5-Wood",
            Self::Hybrid => "Hybrid",
            Self::Iron4 => "4-Iron",
            Self::Iron5 => "5-Iron",
            Self::Iron6 => "6-Iron",
            Self::Iron7 => "7-Iron",
            Self::Iron8 => "8-Iron",
            Self::Iron9 => "9-Iron",
            Self::PitchingWedge => "Pitching Wedge",
            Self::GapWedge => "Gap Wedge",
            Self::SandWedge => "Sand Wedge",
            Self::LobWedge => "Lob Wedge",
        }
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Club for a plays-like distance using [`CARRY_TABLE`]
///
/// Thresholds are inclusive, so a distance exactly on a boundary takes the
/// longer club.
///
/// # Errors
/// `InvalidInput` if `distance` is NaN or infinite.
pub fn recommend_club(distance: Yards) -> Result<Club> {
    recommend_club_from(distance, &CARRY_TABLE, Club::LobWedge)
}

/// Club for a distance from a caller-supplied table (longest first)
pub fn recommend_club_from(
    distance: Yards,
    table: &[(Club, f64)],
    shortest: Club,
) -> Result<Club> {
    let distance = ensure_finite("distance", *distance)?;
    Ok(table
        .iter()
        .find(|(_, min_carry)| distance >= *min_carry)
        .map_or(shortest, |(club, _)| *club))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlightError;

    #[test]
    fn test_boundaries_take_longer_club() {
        assert_eq!(recommend_club(Yards::new(230.0)).unwrap(), Club::Driver);
        assert_eq!(recommend_club(Yards::new(229.9)).unwrap(), Club::Wood3);
        assert_eq!(recommend_club(Yards::new(150.0)).unwrap(), Club::Iron7);
        assert_eq!(recommend_club(Yards::new(149.99)).unwrap(), Club::Iron8);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(recommend_club(Yards::new(320.0)).unwrap(), Club::Driver);
        assert_eq!(recommend_club(Yards::new(40.0)).unwrap(), Club::LobWedge);
        assert_eq!(recommend_club(Yards::new(0.0)).unwrap(), Club::LobWedge);
    }

    #[test]
    fn test_monotonic_over_distance() {
        let order: Vec<Club> = CARRY_TABLE
            .iter()
            .map(|(club, _)| *club)
            .chain(std::iter::once(Club::LobWedge))
            .collect();
        let rank = |club: Club| order.iter().position(|c| *c == club).unwrap();

        let mut previous = rank(recommend_club(Yards::new(0.0)).unwrap());
        for yards in 1..=300 {
            let current = rank(recommend_club(Yards::new(f64::from(yards))).unwrap());
            assert!(current <= previous, "club got longer-then-shorter at {yards} yd");
            previous = current;
        }
    }

    #[test]
    fn test_custom_table() {
        let table = [(Club::Iron7, 160.0), (Club::Iron9, 135.0)];
        let pick = |yards: f64| {
            recommend_club_from(Yards::new(yards), &table, Club::PitchingWedge).unwrap()
        };
        assert_eq!(pick(150.0), Club::Iron9);
        assert_eq!(pick(100.0), Club::PitchingWedge);
    }

    #[test]
    fn test_non_finite_distance_is_rejected() {
        for distance in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                recommend_club(Yards::new(distance)),
                Err(FlightError::InvalidInput {
                    field: "distance",
                    ..
                })
            ));
        }
    }
}
