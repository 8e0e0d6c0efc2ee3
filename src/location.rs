use std::cmp::Ordering;
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A maze dimension; mazes are never empty along either axis.
pub type Dimension = NonZero<Coord>;

/// A location `(x, y)` on a maze. The top left corner is `Location(0, 0)`.
///
/// Locations order in raster order: by row first, then by column.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Position of this location in a row-major scan of a maze `width` cells wide.
    pub fn raster_index(&self, width: Dimension) -> usize {
        self.1 * width.get() + self.0
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        // compare y-values, then x-values on a tie
        self.1.cmp(&other.1).then(self.0.cmp(&other.0))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
