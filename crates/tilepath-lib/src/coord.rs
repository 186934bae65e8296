use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Grid cell identifier.
///
/// Equality and hashing are by value. There is deliberately no `Ord`
/// implementation; search tie-breaking compares `x` and `y` explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`.
    pub const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Component-wise difference `self - other`.
    pub const fn delta(self, other: Self) -> (i32, i32) {
        (self.x - other.x, self.y - other.y)
    }

    /// Whether the cell lies inside `[0, width) x [0, height)`.
    pub const fn within(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parse `x,y` (whitespace around either part is ignored).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCoordinate {
            value: value.to_string(),
        };
        let (x, y) = value.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(x, y))
    }
}
