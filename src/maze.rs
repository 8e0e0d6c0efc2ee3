use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;

use crate::error::MazeError;
use crate::location::{Dimension, Location};

/// The outcome of a breadth-first traversal from a single cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BfsResult {
    /// The cell the traversal started from.
    pub start: Location,
    /// Every cell reachable from `start`, level by level, each level in raster order.
    pub connected_cells: Vec<Location>,
    /// `distance_levels[d]` holds the cells exactly `d` steps away from `start`.
    pub distance_levels: Vec<BTreeSet<Location>>,
}

/// The contract every maze representation offers to room detection and topological reduction.
///
/// Implementers only need to describe the grid and its adjacency; the remaining queries are derived from those.
/// [`GridMaze`](crate::GridMaze) and [`ThickMaze`](crate::ThickMaze) are built-in implementations.
pub trait Maze {
    /// The `(width, height)` of the rectangle bounding this maze.
    fn dimensions(&self) -> (Dimension, Dimension);
    /// Whether `location` is a cell of this maze.
    ///
    /// This is `false` for locations off the grid and for wall cells of thick representations.
    fn cell_in_bounds(&self, location: Location) -> bool;
    /// Cells reachable from `location` with no wall between them, in raster order.
    ///
    /// Out-of-bounds locations have no neighbours.
    fn neighbours(&self, location: Location) -> Vec<Location>;

    /// Every in-bounds cell, in raster order.
    fn in_bounds_cells(&self) -> Vec<Location> {
        let (width, height) = self.dimensions();
        (0..height.get())
            .cartesian_product(0..width.get())
            .map(|(y, x)| Location(x, y))
            .filter(|location| self.cell_in_bounds(*location))
            .collect_vec()
    }

    /// The number of open neighbours of `location`.
    fn degree(&self, location: Location) -> usize {
        self.neighbours(location).len()
    }

    /// All in-bounds cells with exactly one neighbour.
    fn find_dead_ends(&self) -> BTreeSet<Location> {
        self.in_bounds_cells()
            .into_iter()
            .filter(|location| self.degree(*location) == 1)
            .collect()
    }

    /// Traverse breadth-first from `start`, recording the cells found at each distance.
    ///
    /// Fails with [`MazeError::CellOutOfBounds`] if `start` is not in bounds.
    fn perform_bfs_from(&self, start: Location) -> Result<BfsResult, MazeError> {
        if !self.cell_in_bounds(start) {
            return Err(MazeError::CellOutOfBounds(start));
        }

        let mut seen = HashSet::from([start]);
        let mut connected_cells = Vec::new();
        let mut distance_levels = Vec::new();
        let mut frontier = BTreeSet::from([start]);

        while !frontier.is_empty() {
            let mut next = BTreeSet::new();
            for cell in &frontier {
                connected_cells.push(*cell);
                next.extend(self.neighbours(*cell)
                    .into_iter()
                    .filter(|neighbour| seen.insert(*neighbour)));
            }

            distance_levels.push(frontier);
            frontier = next;
        }

        Ok(BfsResult {
            start,
            connected_cells,
            distance_levels,
        })
    }
}
