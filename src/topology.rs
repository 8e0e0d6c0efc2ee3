use std::collections::BTreeMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::location::Location;
use crate::rooms::RoomId;

/// Identifies a [`Vertex`] within a [`WeightedTopologyGraph`]; ids are dense, starting at 0.
pub type VertexId = usize;

/// Why a cell became a vertex of the reduced graph.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VertexKind {
    /// A room cell with at least one neighbour outside its room.
    RoomEntrance {
        /// The room this entrance belongs to.
        room: RoomId,
    },
    /// A cell with exactly one open neighbour.
    DeadEnd,
    /// A cell with three or more open neighbours.
    Junction,
    /// The first cell of a cycle unreachable from any other vertex.
    LoopAnchor,
    /// A cell with no open neighbours at all.
    Isolated,
}

/// A cell of interest in the reduced graph.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Vertex {
    /// Index of this vertex in [`WeightedTopologyGraph::vertices`].
    pub id: VertexId,
    /// The cell this vertex sits on.
    pub location: Location,
    /// Why this cell became a vertex.
    pub kind: VertexKind,
}

/// What part of the maze an [`Edge`] stands for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeKind {
    /// The shortest walk between two entrances of the same room, staying inside the room.
    Room {
        /// The room walked through.
        room: RoomId,
    },
    /// A chain of corridor cells between two vertices, or from a vertex back to itself.
    Corridor,
    /// An isolated cycle, attached to its anchor at both ends.
    Loop,
}

/// A corridor between two vertices (or from a vertex to itself).
///
/// `path` lists every cell walked in order, including the cells of both end vertices,
/// and `weight` is the number of grid steps from the first listed cell to the last, i.e. `path.len() - 1`.
/// Isolated loops list each of their cells once, starting from the anchor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Edge {
    /// The vertex the edge was walked from, then the vertex it reached.
    pub ends: (VertexId, VertexId),
    /// Grid steps along `path`.
    pub weight: usize,
    /// Cells walked, in order.
    pub path: Vec<Location>,
    /// What the edge stands for.
    pub kind: EdgeKind,
}

impl Edge {
    /// Whether both ends of this edge are the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.ends.0 == self.ends.1
    }

    /// Whether this edge touches `vertex`.
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.ends.0 == vertex || self.ends.1 == vertex
    }

    /// The cells of `path` strictly between the end vertices.
    pub fn interior(&self) -> &[Location] {
        match self.kind {
            // only the anchor is a vertex
            EdgeKind::Loop => self.path.get(1..).unwrap_or_default(),
            _ => self.path.get(1..self.path.len().saturating_sub(1)).unwrap_or_default(),
        }
    }
}

/// A maze reduced to its decision structure: the vertices of interest and the weighted corridors between them.
///
/// Built once by a [`TopologyReducer`](crate::TopologyReducer) and never mutated afterwards.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WeightedTopologyGraph {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) cell_to_vertex: BTreeMap<Location, VertexId>,
}

impl WeightedTopologyGraph {
    /// Every vertex, in id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Every edge, in order of discovery.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The vertex with id `id`.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// The vertex sitting on `location`, if any.
    pub fn vertex_at(&self, location: Location) -> Option<&Vertex> {
        self.cell_to_vertex.get(&location).and_then(|id| self.vertices.get(*id))
    }

    /// The vertex id of every vertex cell.
    pub fn cell_to_vertex(&self) -> &BTreeMap<Location, VertexId> {
        &self.cell_to_vertex
    }

    /// Every edge touching `vertex`, self-loops included once.
    pub fn edges_of(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.touches(vertex))
    }

    /// The first edge discovered between `a` and `b`, in either direction.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.ends == (a, b) || edge.ends == (b, a))
    }

    /// The sum of all edge weights.
    pub fn total_weight(&self) -> usize {
        self.edges.iter().map(|edge| edge.weight).sum()
    }

    /// Export as a petgraph graph weighted by corridor length.
    ///
    /// Node indices equal vertex ids. Parallel edges and self-loops are preserved.
    pub fn to_graph(&self) -> UnGraph<Vertex, usize> {
        let mut graph = UnGraph::with_capacity(self.vertices.len(), self.edges.len());
        for vertex in &self.vertices {
            graph.add_node(*vertex);
        }

        for edge in &self.edges {
            graph.add_edge(NodeIndex::new(edge.ends.0), NodeIndex::new(edge.ends.1), edge.weight);
        }

        graph
    }
}
