#![warn(missing_docs)]

//! # `maze-topology`
//!
//! Room detection and topological reduction for rectangular grid mazes.
//! Describe a maze with a builder such as [`GridMazeBuilder`](builder::GridMazeBuilder), or parse a [`ThickMaze`] from text,
//! then call [`reduce`] to obtain its [`RoomPartition`] and [`WeightedTopologyGraph`].
//!
//! Both stages work on any type implementing [`Maze`], which only has to describe bounds and adjacency.
//!
//! # Internals
//! A full maze spends most of its cells on corridors: chains of cells with exactly two open neighbours, where there is nothing to decide.
//! Reduction keeps only the cells where something happens and replaces each corridor with a single weighted edge.
//!
//! A high level overview is as follows:
//!
//! 1. [`RoomFinder`] looks for open areas. Any 2×2 block whose four cells are connected around the block is open,
//!    and overlapping open blocks merge into one room. Merging repeats until nothing changes.
//!    The lowest id always wins a merge, so the process settles instead of oscillating.
//! 2. [`TopologyReducer`] turns rooms into cliques of their entrances, weighted by the shortest walk through the room,
//!    then makes a vertex of every dead end (one open neighbour) and junction (three or more).
//!    Corridors are walked out from each vertex until they reach another, keeping the shortest corridor between any pair of vertices.
//! 3. Anything left unclaimed is a cycle with no branch point. It becomes a single anchor vertex with a loop edge.
//!
//! Every edge records the exact cells it stands for, so the original corridors can be reconstructed from the reduced graph.

pub use builder::{Builder, GridMazeBuilder};
pub use error::{BuilderInvalidReason, MazeError};
pub use grid::GridMaze;
pub use location::{Dimension, Location};
pub use maze::{BfsResult, Maze};
pub use reducer::{reduce, TopologyReducer};
pub use rooms::{RoomFinder, RoomId, RoomPartition};
pub use thick::ThickMaze;
pub use topology::{Edge, EdgeKind, Vertex, VertexId, VertexKind, WeightedTopologyGraph};

pub mod builder;
pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod maze;
pub(crate) mod reducer;
pub(crate) mod rooms;
pub mod shape;
mod tests;
pub(crate) mod thick;
pub(crate) mod topology;
