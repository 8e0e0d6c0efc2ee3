use std::collections::BTreeSet;
use std::mem;

use itertools::Itertools;
use ndarray::Array2;
use tracing::{debug, trace};

use crate::location::{Dimension, Location};
use crate::maze::Maze;

/// Identifies a room within a [`RoomPartition`]. Room ids are dense, starting at 0.
pub type RoomId = usize;

/// The rooms of a maze: maximal open areas built from 2×2 blocks with no internal walls.
///
/// A cell belongs to room `r` if and only if `r`'s contents include that cell.
/// Cells outside every room (corridors, out-of-bounds and wall cells) map to [`None`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomPartition {
    cell_to_room: Array2<Option<RoomId>>,
    room_contents: Vec<BTreeSet<Location>>,
}

impl RoomPartition {
    /// A partition of `maze` with no rooms at all, so that every cell is treated as part of a corridor.
    pub fn empty<M: Maze + ?Sized>(maze: &M) -> Self {
        let (width, height) = maze.dimensions();
        Self {
            cell_to_room: Array2::from_elem((height.get(), width.get()), None),
            room_contents: Vec::new(),
        }
    }

    /// The room containing `location`, if any.
    pub fn room_of(&self, location: Location) -> Option<RoomId> {
        self.cell_to_room.get(location.as_index()).copied().flatten()
    }

    /// The cells of `room` in raster order.
    pub fn contents(&self, room: RoomId) -> Option<&BTreeSet<Location>> {
        self.room_contents.get(room)
    }

    /// Every room alongside its cells, in room id order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &BTreeSet<Location>)> {
        self.room_contents.iter().enumerate()
    }

    /// The number of rooms.
    pub fn len(&self) -> usize {
        self.room_contents.len()
    }

    /// Whether the maze has no rooms.
    pub fn is_empty(&self) -> bool {
        self.room_contents.is_empty()
    }

    /// The room of every location, indexed `(row, column)`.
    pub fn cell_to_room(&self) -> &Array2<Option<RoomId>> {
        &self.cell_to_room
    }
}

/// Partitions the cells of a maze into rooms.
///
/// Every in-bounds cell starts in a room of its own, identified by its raster index.
/// Each pass merges the rooms of every 2×2 block whose four cells are mutually connected around the block, always keeping the lowest id.
/// Passes repeat until one makes no change; every merge removes at least one id, so this terminates.
/// Rooms left with a single cell are then discarded and the survivors renumbered densely, in order of their lowest id.
pub struct RoomFinder<'a, M>
where
    M: Maze + ?Sized,
{
    maze: &'a M,
    dims: (Dimension, Dimension),
    // working ids are raster indices; None marks cells that are not in bounds
    room_of: Array2<Option<usize>>,
    contents: Vec<BTreeSet<Location>>,
}

impl<'a, M> From<&'a M> for RoomFinder<'a, M>
where
    M: Maze + ?Sized,
{
    fn from(maze: &'a M) -> Self {
        Self::new(maze)
    }
}

impl<'a, M> RoomFinder<'a, M>
where
    M: Maze + ?Sized,
{
    /// Prepare to find the rooms of `maze`, with every in-bounds cell in a room of its own.
    pub fn new(maze: &'a M) -> Self {
        let dims = maze.dimensions();
        let (width, height) = dims;

        let room_of = Array2::from_shape_fn((height.get(), width.get()), |ind| {
            let location = Location::from(ind);
            maze.cell_in_bounds(location).then(|| location.raster_index(width))
        });

        let mut contents = vec![BTreeSet::new(); width.get() * height.get()];
        for (ind, id) in room_of.indexed_iter() {
            if let Some(id) = id {
                contents[*id].insert(Location::from(ind));
            }
        }

        Self {
            maze,
            dims,
            room_of,
            contents,
        }
    }

    /// Run merge passes to a fixed point and return the resulting partition.
    pub fn find(mut self) -> RoomPartition {
        let mut passes = 1;
        while self.merge_pass() {
            passes += 1;
        }

        let partition = self.into_partition();
        debug!(passes, rooms = partition.len(), "room partition settled");
        partition
    }

    /// Whether every consecutive pair of cells around `block` is connected in both directions.
    fn is_open(&self, block: &[Location; 4]) -> bool {
        block.iter()
            .circular_tuple_windows()
            .all(|(a, b)| self.maze.neighbours(*a).contains(b) && self.maze.neighbours(*b).contains(a))
    }

    fn merge_pass(&mut self) -> bool {
        let mut changed = false;
        let (width, height) = (self.dims.0.get(), self.dims.1.get());

        for (y, x) in (0..height - 1).cartesian_product(0..width - 1) {
            // clockwise from the top left
            let block = [Location(x, y), Location(x + 1, y), Location(x + 1, y + 1), Location(x, y + 1)];

            let Some(ids) = block.iter()
                .map(|location| self.room_of[location.as_index()])
                .collect::<Option<Vec<_>>>() else {
                // some cell is not in bounds
                continue;
            };

            if ids.iter().all_equal() || !self.is_open(&block) {
                continue;
            }

            let Some(target) = ids.iter().min().copied() else {
                continue;
            };

            for source in ids.into_iter().unique().filter(|id| *id != target) {
                let moved = mem::take(&mut self.contents[source]);
                for location in &moved {
                    self.room_of[location.as_index()] = Some(target);
                }
                trace!(source, target, cells = moved.len(), "merged rooms");
                self.contents[target].extend(moved);
            }

            changed = true;
        }

        changed
    }

    fn into_partition(self) -> RoomPartition {
        let mut cell_to_room = Array2::from_elem(self.room_of.raw_dim(), None);
        let room_contents = self.contents.into_iter()
            .filter(|cells| cells.len() > 1)
            .collect_vec();

        for (room, cells) in room_contents.iter().enumerate() {
            for location in cells {
                cell_to_room[location.as_index()] = Some(room);
            }
        }

        RoomPartition {
            cell_to_room,
            room_contents,
        }
    }
}
