use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::connectivity::Directions;
use crate::coord::Coordinate;
use crate::error::Error;

/// Estimate of the remaining cost from a cell to the goal.
///
/// [`Heuristic::Euclidean`] is the default. With a flat step cost it
/// overestimates under eight- and six-direction movement, so routes found
/// with it are not guaranteed to be shortest there. The other variants are
/// admissible for the connectivity named in [`Heuristic::admissible_for`];
/// choosing one changes which route is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// `floor(sqrt(dx² + dy²))`.
    #[default]
    Euclidean,
    /// `|dx| + |dy|`.
    Manhattan,
    /// `max(|dx|, |dy|)`.
    Chebyshev,
    /// Axial hex distance.
    Hex,
    /// Always zero; the search degrades to uniform-cost.
    Zero,
}

impl Heuristic {
    /// Heuristic that never overestimates for the given direction count.
    pub const fn admissible_for(directions: Directions) -> Self {
        match directions {
            Directions::Four => Heuristic::Manhattan,
            Directions::Six => Heuristic::Hex,
            Directions::Eight => Heuristic::Chebyshev,
        }
    }

    pub fn estimate(self, from: Coordinate, to: Coordinate) -> u32 {
        let (dx, dy) = to.delta(from);
        match self {
            Heuristic::Euclidean => truncated_euclidean(dx, dy),
            Heuristic::Manhattan => dx.unsigned_abs() + dy.unsigned_abs(),
            Heuristic::Chebyshev => dx.unsigned_abs().max(dy.unsigned_abs()),
            Heuristic::Hex => {
                (dx.unsigned_abs() + dy.unsigned_abs() + (dx + dy).unsigned_abs()) / 2
            }
            Heuristic::Zero => 0,
        }
    }
}

fn truncated_euclidean(dx: i32, dy: i32) -> u32 {
    let squared = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
    let mut root = (squared as f64).sqrt() as i64;
    // Correct float rounding at perfect squares.
    while root * root > squared {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= squared {
        root += 1;
    }
    root as u32
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Chebyshev => "chebyshev",
            Heuristic::Hex => "hex",
            Heuristic::Zero => "zero",
        };
        f.write_str(value)
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Heuristic::Euclidean),
            "manhattan" => Ok(Heuristic::Manhattan),
            "chebyshev" | "octile" => Ok(Heuristic::Chebyshev),
            "hex" => Ok(Heuristic::Hex),
            "zero" | "dijkstra" => Ok(Heuristic::Zero),
            _ => Err(Error::UnknownHeuristic {
                value: value.to_string(),
            }),
        }
    }
}
