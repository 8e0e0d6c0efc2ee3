use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::location::{Dimension, Location};
use crate::maze::Maze;
use crate::shape::{SquareStep, Step};

/// A rectangular maze of square cells separated by walls.
///
/// Every in-bounds cell is a node of an undirected graph and every carved passage is an edge.
/// Locations dropped while building (holes) are not in bounds.
///
/// [`GridMaze`]s should be built using a [`GridMazeBuilder`](crate::builder::GridMazeBuilder).
#[derive(Clone, Debug)]
pub struct GridMaze {
    // direction from lower indexed cell
    pub(crate) passages: UnGraphMap<Location, SquareStep>,
    pub(crate) floor: Array2<bool>,
    pub(crate) dims: (Dimension, Dimension),
}

impl GridMaze {
    /// Whether a passage connects `a` and `b`.
    pub fn has_passage(&self, a: Location, b: Location) -> bool {
        self.passages.contains_edge(a, b)
    }

    /// The direction of the step from `a` to `b` if a passage connects them.
    pub fn passage_direction(&self, a: Location, b: Location) -> Option<SquareStep> {
        self.passages.edge_weight(a, b).map(|direction| {
            // stored from the lower indexed cell, so reverse it when walking the other way
            if a < b { *direction } else { direction.invert() }
        })
    }

    /// The number of carved passages.
    pub fn passage_count(&self) -> usize {
        self.passages.edge_count()
    }
}

impl Maze for GridMaze {
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

        self.passages.neighbors(location).sorted().collect_vec()
    }
}
