use thiserror::Error;

use crate::connectivity::Directions;
use crate::coord::Coordinate;
use crate::map::Orientation;

/// Convenient result alias for the tilepath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a direction count does not fit the map orientation.
    ///
    /// Hexagonal maps only accept six directions; orthogonal and isometric
    /// maps accept four or eight.
    #[error("{orientation} maps do not support {directions} directions{}", format_accepted(.orientation))]
    IncompatibleDirections {
        orientation: Orientation,
        directions: Directions,
    },

    /// Raised when converting an integer other than 4, 6 or 8 into [`Directions`].
    #[error("unsupported direction count {count}; expected 4, 6 or 8")]
    UnsupportedDirectionCount { count: u32 },

    /// Raised when parsing an orientation name fails.
    #[error("unknown map orientation '{value}'; expected orthogonal, hexagonal or isometric")]
    UnknownOrientation { value: String },

    /// Raised when parsing an `x,y` coordinate pair fails.
    #[error("invalid coordinate '{value}'; expected the form x,y")]
    InvalidCoordinate { value: String },

    /// Raised when parsing a heuristic name fails.
    #[error("unknown heuristic '{value}'")]
    UnknownHeuristic { value: String },

    /// Raised when a tile map document fails validation.
    #[error("invalid tile map: {message}")]
    InvalidMap { message: String },

    /// Raised by callers that treat an empty route as a failure.
    ///
    /// The path finder itself never returns this; an unreachable goal yields
    /// an empty route.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: Coordinate, goal: Coordinate },

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_accepted(orientation: &Orientation) -> &'static str {
    match orientation {
        Orientation::Hexagonal => "; use 6",
        Orientation::Orthogonal | Orientation::Isometric => "; use 4 or 8",
    }
}
