use std::num::NonZero;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;

use crate::error::MazeError;
use crate::location::{Dimension, Location};
use crate::maze::Maze;
use crate::shape::{GridShape, SquareStep};

/// A maze where walls occupy whole cells.
///
/// Floor cells are in bounds and connect to every floor cell sharing a side with them; wall cells are not in bounds.
/// Parse one from text with `#` for walls and `.` or a space for floor:
///
/// ```
/// use maze_topology::{Maze, ThickMaze, Location};
///
/// let maze: ThickMaze = "\
/// ...
/// .#.
/// ...".parse().unwrap();
///
/// assert!(!maze.cell_in_bounds(Location(1, 1)));
/// assert_eq!(maze.neighbours(Location(0, 1)), vec![Location(0, 0), Location(0, 2)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThickMaze {
    floor: Array2<bool>,
    dims: (Dimension, Dimension),
}

impl ThickMaze {
    /// Wrap a `(row, column)` indexed floor mask, where `true` marks floor.
    ///
    /// Fails with [`MazeError::EmptyText`] if the mask has no rows or no columns.
    pub fn from_floor(floor: Array2<bool>) -> Result<Self, MazeError> {
        let (Some(width), Some(height)) = (NonZero::new(floor.ncols()), NonZero::new(floor.nrows())) else {
            return Err(MazeError::EmptyText);
        };

        Ok(Self {
            floor,
            dims: (width, height),
        })
    }
}

impl FromStr for ThickMaze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect_vec();
        // trailing blank lines are not rows
        let rows = &rows[..rows.iter().rposition(|row| !row.is_empty()).map_or(0, |last| last + 1)];

        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(MazeError::EmptyText);
        }

        let mut floor = Array2::from_elem((rows.len(), width), false);
        for (y, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(MazeError::RaggedRow { row: y, expected: width, actual });
            }

            for (x, glyph) in row.chars().enumerate() {
                floor[(y, x)] = match glyph {
                    '#' => false,
                    '.' | ' ' => true,
                    _ => return Err(MazeError::UnknownGlyph { glyph, location: Location(x, y) }),
                };
            }
        }

        Self::from_floor(floor)
    }
}

impl Maze for ThickMaze {
    fn dimensions(&self) -> (Dimension, Dimension) {
        self.dims
    }

    fn cell_in_bounds(&self, location: Location) -> bool {
        self.floor.get(location.as_index()).copied().unwrap_or(false)
    }

    fn neighbours(&self, location: Location) -> Vec<Location> {
        if !self.cell_in_bounds(location) {
            return Vec::new();
        }

        SquareStep::neighbors_of(location)
            .into_iter()
            .map(|(_, other)| other)
            .filter(|other| self.cell_in_bounds(*other))
            .sorted()
            .collect_vec()
    }
}
