//! Input validation errors raised by maze implementations.

use crate::location::Location;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuilderInvalidReason {
    /// A feature like a passage was placed outside the bounds specified by `dims` on a builder.
    #[error("feature out of bounds")]
    FeatureOutOfBounds,
    /// A passage was carved between two cells which do not share a side.
    #[error("passage between non-adjacent cells")]
    NotAdjacent,
}

/// Errors surfaced by maze implementations before any reduction work begins.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// A builder entered an invalid state; every recorded reason is listed.
    #[error("builder is invalid: {0:?}")]
    InvalidBuilder(Vec<BuilderInvalidReason>),
    /// A query was made about a cell which is not in bounds.
    #[error("cell {0:?} is out of bounds")]
    CellOutOfBounds(Location),
    /// Maze text contained no rows or no columns.
    #[error("maze text is empty")]
    EmptyText,
    /// A row of maze text was not as wide as the first row.
    #[error("row {row} is {actual} cells wide, expected {expected}")]
    RaggedRow {
        /// Zero-based row number.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        actual: usize,
    },
    /// Maze text contained a character which is neither wall nor floor.
    #[error("unknown glyph {glyph:?} at {location:?}")]
    UnknownGlyph {
        /// The offending character.
        glyph: char,
        /// Where it appeared.
        location: Location,
    },
}
