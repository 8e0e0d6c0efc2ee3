//! Builders which assemble mazes one passage at a time.

use std::collections::HashSet;

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::error::{BuilderInvalidReason, MazeError};
use crate::grid::GridMaze;
use crate::location::{Dimension, Location};
use crate::maze::Maze;
use crate::shape::{GridShape, SquareStep, Step};

/// Functionality all maze builders must implement.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder: Clone {
    /// The maze produced by [`Self::build`].
    type Output: Maze;

    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    /// Every cell starts walled off from all of its neighbours.
    fn with_dims(dims: (Dimension, Dimension)) -> Self;
    /// Carve a passage between the two `locations`, removing the wall between them.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either location is out of bounds,
    /// or a [`NotAdjacent`](BuilderInvalidReason::NotAdjacent) invalid state if the locations do not share a side.
    /// If the builder is already in an invalid state, this function does nothing.
    fn carve(&mut self, locations: UnorderedPair<Location>) -> &mut Self;
    /// Shorthand for multiple calls to [`Self::carve`], with the same conditions.
    ///
    /// Carves between every consecutive pair of locations in `path`.
    fn carve_path(&mut self, path: Vec<Location>) -> &mut Self {
        for (a, b) in path.into_iter().tuple_windows() {
            self.carve(UnorderedPair::from((a, b)));
        }

        self
    }
    /// Shorthand for multiple calls to [`Self::carve`], with the same conditions.
    ///
    /// Carve passages from `location` to the neighbours in each of `directions`.
    fn carve_around(&mut self, location: Location, directions: Vec<SquareStep>) -> &mut Self;
    /// Restore the wall between the two `locations`.
    /// If no passage was carved between them, this function does nothing.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    fn wall(&mut self, locations: UnorderedPair<Location>) -> &mut Self;
    /// Drop a location from the maze, leaving a hole which is not in bounds.
    /// Passages carved to this location are ignored regardless of where in the chain this method is called.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    fn drop_location(&mut self, location: Location) -> &mut Self;
    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>>;
    /// Convert the state of this builder into a maze.
    /// If the builder is invalid for any reason, [`MazeError::InvalidBuilder`] will indicate why.
    fn build(&self) -> Result<Self::Output, MazeError>;
}

/// A builder for [`GridMaze`]s, starting from a grid with every wall standing.
#[derive(Clone, Debug)]
pub struct GridMazeBuilder {
    // width, height
    dims: (Dimension, Dimension),
    invalid_reasons: Vec<BuilderInvalidReason>,
    passages: HashSet<UnorderedPair<Location>>,
    // holes
    location_blacklist: HashSet<Location>,
}

impl GridMazeBuilder {
    #[inline]
    fn contains(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Carve a passage between every pair of adjacent cells, leaving no internal walls.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn open_all(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for (y, x) in (0..self.dims.1.get()).cartesian_product(0..self.dims.0.get()) {
            let location = Location(x, y);
            for step in SquareStep::FORWARD_VARIANTS {
                let other = step.attempt_from(location);
                if self.contains(other) {
                    self.passages.insert(UnorderedPair::from((location, other)));
                }
            }
        }

        self
    }
}

impl Builder for GridMazeBuilder {
    type Output = GridMaze;

    fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            invalid_reasons: Default::default(),
            passages: Default::default(),
            location_blacklist: Default::default(),
        }
    }

    fn carve(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !self.contains(location) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if SquareStep::direction_to(locations.0, locations.1).is_none() {
            self.invalid_reasons.push(BuilderInvalidReason::NotAdjacent);
            return self;
        }

        self.passages.insert(locations);
        self
    }

    fn carve_around(&mut self, location: Location, directions: Vec<SquareStep>) -> &mut Self {
        for direction in directions {
            self.carve(UnorderedPair::from((location, direction.attempt_from(location))));
        }

        self
    }

    fn wall(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.passages.remove(&locations);
        self
    }

    fn drop_location(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.contains(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.location_blacklist.insert(location);
        self
    }

    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn build(&self) -> Result<GridMaze, MazeError> {
        if !self.invalid_reasons.is_empty() {
            return Err(MazeError::InvalidBuilder(self.invalid_reasons.clone()));
        }

        let floor = Array2::from_shape_fn(
            (self.dims.1.get(), self.dims.0.get()),
            |ind| !self.location_blacklist.contains(&Location::from(ind)),
        );

        let mut passages = UnGraphMap::with_capacity(floor.len(), self.passages.len());
        for (ind, open) in floor.indexed_iter() {
            if *open {
                passages.add_node(Location::from(ind));
            }
        }

        // add in raster order so the graph is laid out the same way on every build
        for UnorderedPair(l1, l2) in self.passages.iter().sorted_by_key(|pair| (pair.0.min(pair.1), pair.0.max(pair.1))) {
            if self.location_blacklist.contains(l1) || self.location_blacklist.contains(l2) {
                continue;
            }

            let (lower, upper) = if l1 < l2 { (*l1, *l2) } else { (*l2, *l1) };
            if let Some(direction) = SquareStep::direction_to(*l1, *l2) {
                passages.add_edge(lower, upper, direction.ensure_forward());
            }
        }

        Ok(GridMaze {
            passages,
            floor,
            dims: self.dims,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use unordered_pair::UnorderedPair;

    use crate::builder::{Builder, GridMazeBuilder};
    use crate::error::{BuilderInvalidReason, MazeError};
    use crate::location::Location;
    use crate::maze::Maze;
    use crate::shape::SquareStep;

    fn dims(width: usize, height: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    #[test]
    fn carving_out_of_bounds_invalidates() {
        let mut builder = GridMazeBuilder::with_dims(dims(3, 3));
        builder
            .carve(UnorderedPair(Location(2, 2), Location(3, 2)))
            .carve(UnorderedPair(Location(0, 0), Location(1, 0)));

        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));
        assert_eq!(builder.build().unwrap_err(), MazeError::InvalidBuilder(vec![BuilderInvalidReason::FeatureOutOfBounds]));
    }

    #[test]
    fn carving_between_distant_cells_invalidates() {
        let mut builder = GridMazeBuilder::with_dims(dims(3, 3));
        builder.carve(UnorderedPair(Location(0, 0), Location(1, 1)));

        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::NotAdjacent]));
    }

    #[test]
    fn carve_wall_and_holes() {
        let maze = GridMazeBuilder::with_dims(dims(3, 2))
            .carve_path(vec![Location(0, 0), Location(1, 0), Location(2, 0), Location(2, 1)])
            .carve_around(Location(1, 1), vec![SquareStep::Up, SquareStep::Left])
            .wall(UnorderedPair(Location(2, 0), Location(1, 0)))
            .drop_location(Location(0, 1))
            .build()
            .unwrap();

        assert!(!maze.cell_in_bounds(Location(0, 1)));
        assert!(!maze.cell_in_bounds(Location(3, 0)));
        assert_eq!(maze.passage_count(), 3);
        assert_eq!(maze.neighbours(Location(1, 0)), vec![Location(0, 0), Location(1, 1)]);
        assert!(maze.neighbours(Location(0, 1)).is_empty());
        assert_eq!(maze.passage_direction(Location(2, 1), Location(2, 0)), Some(SquareStep::Up));
        assert_eq!(maze.passage_direction(Location(2, 0), Location(2, 1)), Some(SquareStep::Down));
        assert!(!maze.has_passage(Location(1, 0), Location(2, 0)));
    }

    #[test]
    fn passages_carved_backwards_point_forward() {
        let maze = GridMazeBuilder::with_dims(dims(2, 2))
            .carve(UnorderedPair(Location(1, 1), Location(1, 0)))
            .carve(UnorderedPair(Location(1, 1), Location(0, 1)))
            .build()
            .unwrap();

        assert_eq!(maze.passage_direction(Location(1, 0), Location(1, 1)), Some(SquareStep::Down));
        assert_eq!(maze.passage_direction(Location(0, 1), Location(1, 1)), Some(SquareStep::Right));
        assert_eq!(maze.passage_direction(Location(1, 1), Location(0, 1)), Some(SquareStep::Left));
    }

    #[test]
    fn open_all_removes_internal_walls() {
        let maze = GridMazeBuilder::with_dims(dims(3, 3)).open_all().build().unwrap();

        assert_eq!(maze.passage_count(), 12);
        assert_eq!(maze.degree(Location(1, 1)), 4);
        assert!(maze.find_dead_ends().is_empty());
    }

    #[test]
    fn bfs_levels() {
        let maze = GridMazeBuilder::with_dims(dims(3, 1))
            .carve_path(vec![Location(0, 0), Location(1, 0), Location(2, 0)])
            .build()
            .unwrap();

        let bfs = maze.perform_bfs_from(Location(1, 0)).unwrap();
        assert_eq!(bfs.connected_cells, vec![Location(1, 0), Location(0, 0), Location(2, 0)]);
        assert_eq!(bfs.distance_levels.len(), 2);
        assert_eq!(maze.perform_bfs_from(Location(5, 0)).unwrap_err(), MazeError::CellOutOfBounds(Location(5, 0)));
    }
}
