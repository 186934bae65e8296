//! Neighbor offsets for orthogonal, isometric and hexagonal grids.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::map::Orientation;

/// Number of neighbors reachable in a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Directions {
    Four,
    Six,
    Eight,
}

impl Directions {
    pub const fn count(self) -> usize {
        match self {
            Directions::Four => 4,
            Directions::Six => 6,
            Directions::Eight => 8,
        }
    }
}

impl TryFrom<u32> for Directions {
    type Error = Error;

    fn try_from(count: u32) -> Result<Self> {
        match count {
            4 => Ok(Directions::Four),
            6 => Ok(Directions::Six),
            8 => Ok(Directions::Eight),
            _ => Err(Error::UnsupportedDirectionCount { count }),
        }
    }
}

impl From<Directions> for u32 {
    fn from(directions: Directions) -> Self {
        directions.count() as u32
    }
}

impl fmt::Display for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

// N, S, E, W
const CARDINAL: [(i32, i32); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

// N, S, E, W, then NE, SE, SW, NW
const CARDINAL_AND_DIAGONAL: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (1, 0),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

// Axial hex neighbors: E, W, S, N, NE, SW
const HEX_AXIAL: [(i32, i32); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// Validated pairing of a grid orientation with a direction count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    orientation: Orientation,
    directions: Directions,
}

impl Connectivity {
    /// Validate the pairing.
    ///
    /// Hexagonal maps require [`Directions::Six`]; orthogonal and isometric
    /// maps accept [`Directions::Four`] or [`Directions::Eight`].
    pub fn new(orientation: Orientation, directions: Directions) -> Result<Self> {
        let compatible = match orientation {
            Orientation::Hexagonal => directions == Directions::Six,
            Orientation::Orthogonal | Orientation::Isometric => directions != Directions::Six,
        };
        if !compatible {
            return Err(Error::IncompatibleDirections {
                orientation,
                directions,
            });
        }
        Ok(Self {
            orientation,
            directions,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn directions(&self) -> Directions {
        self.directions
    }

    /// Offset table in expansion order.
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self.directions {
            Directions::Four => &CARDINAL,
            Directions::Six => &HEX_AXIAL,
            Directions::Eight => &CARDINAL_AND_DIAGONAL,
        }
    }

    /// Candidate neighbors of `coord` in a fixed order. Bounds are not
    /// checked here.
    pub fn neighbors(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> {
        self.offsets().iter().map(move |&offset| coord.offset(offset))
    }

    /// Whether `to` is a single step away from `from`.
    pub fn is_adjacent(&self, from: Coordinate, to: Coordinate) -> bool {
        let delta = to.delta(from);
        self.offsets().contains(&delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexagonal_requires_six_directions() {
        assert!(Connectivity::new(Orientation::Hexagonal, Directions::Six).is_ok());
        for directions in [Directions::Four, Directions::Eight] {
            let error = Connectivity::new(Orientation::Hexagonal, directions)
                .expect_err("hexagonal rejects");
            assert!(matches!(error, Error::IncompatibleDirections { .. }));
        }
    }

    #[test]
    fn square_grids_reject_six_directions() {
        for orientation in [Orientation::Orthogonal, Orientation::Isometric] {
            assert!(Connectivity::new(orientation, Directions::Four).is_ok());
            assert!(Connectivity::new(orientation, Directions::Eight).is_ok());
            let error = Connectivity::new(orientation, Directions::Six).expect_err("rejects six");
            assert!(format!("{error}").contains("use 4 or 8"));
        }
    }

    #[test]
    fn neighbor_order_is_fixed() {
        let model = Connectivity::new(Orientation::Orthogonal, Directions::Four).unwrap();
        let neighbors: Vec<_> = model.neighbors(Coordinate::new(2, 2)).collect();
        assert_eq!(
            neighbors,
            vec![
                Coordinate::new(2, 1),
                Coordinate::new(2, 3),
                Coordinate::new(3, 2),
                Coordinate::new(1, 2),
            ]
        );
    }

    #[test]
    fn eight_directions_extend_the_cardinals() {
        let model = Connectivity::new(Orientation::Isometric, Directions::Eight).unwrap();
        assert_eq!(&model.offsets()[..4], &CARDINAL[..]);
        assert_eq!(model.neighbors(Coordinate::new(0, 0)).count(), 8);
    }

    #[test]
    fn offset_tables_are_symmetric() {
        for (orientation, directions) in [
            (Orientation::Orthogonal, Directions::Four),
            (Orientation::Hexagonal, Directions::Six),
            (Orientation::Orthogonal, Directions::Eight),
        ] {
            let model = Connectivity::new(orientation, directions).unwrap();
            assert_eq!(model.offsets().len(), directions.count());
            for &(dx, dy) in model.offsets() {
                assert!(model.offsets().contains(&(-dx, -dy)));
            }
        }
    }

    #[test]
    fn adjacency_uses_the_offset_table() {
        let hex = Connectivity::new(Orientation::Hexagonal, Directions::Six).unwrap();
        let origin = Coordinate::new(3, 3);
        assert!(hex.is_adjacent(origin, Coordinate::new(4, 2)));
        assert!(hex.is_adjacent(origin, Coordinate::new(2, 4)));
        assert!(!hex.is_adjacent(origin, Coordinate::new(4, 4)));
        assert!(!hex.is_adjacent(origin, origin));
    }

    #[test]
    fn direction_counts_convert_from_integers() {
        assert_eq!(Directions::try_from(8).unwrap(), Directions::Eight);
        assert!(matches!(
            Directions::try_from(5),
            Err(Error::UnsupportedDirectionCount { count: 5 })
        ));
    }
}
