use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::algo::astar;
use petgraph::graphmap::UnGraphMap;
use tracing::{debug, trace};
use unordered_pair::UnorderedPair;

use crate::location::Location;
use crate::maze::Maze;
use crate::rooms::{RoomId, RoomPartition};
use crate::topology::{Edge, EdgeKind, Vertex, VertexId, VertexKind, WeightedTopologyGraph};

/// Collapses a maze into a [`WeightedTopologyGraph`], keeping only its decision structure.
///
/// Reduction runs in phases, each claiming the cells it accounts for so that every in-bounds cell is claimed exactly once:
/// 1. Every room entrance becomes a vertex, and every pair of entrances of the same room is joined by the shortest walk inside the room.
///    The remaining room cells are interior and take no further part.
/// 2. Every unclaimed dead end and junction becomes a vertex.
/// 3. Corridors are walked out from every vertex in id order until they reach another vertex.
///    Only the shortest corridor between any pair of vertices is kept; a corridor already walked from its other end is not walked again.
/// 4. Whatever is left forms components with neither vertices nor rooms, which are cycles (or lone cells).
///    Each becomes a single anchor vertex with a loop edge.
///
/// Internal inconsistencies, such as a room whose entrances cannot reach each other inside it, panic.
pub struct TopologyReducer<'a, M>
where
    M: Maze + ?Sized,
{
    maze: &'a M,
    rooms: &'a RoomPartition,
    visited: Array2<bool>,
    room_interior: Array2<bool>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    cell_to_vertex: BTreeMap<Location, VertexId>,
    // corridor edges only; room edges are never merged
    corridor_index: HashMap<UnorderedPair<VertexId>, usize>,
}

impl<'a, M> TopologyReducer<'a, M>
where
    M: Maze + ?Sized,
{
    /// Prepare to reduce `maze`, whose rooms are `rooms`.
    ///
    /// Cells which are not in bounds start out claimed.
    pub fn new(maze: &'a M, rooms: &'a RoomPartition) -> Self {
        let (width, height) = maze.dimensions();
        let shape = (height.get(), width.get());

        Self {
            maze,
            rooms,
            visited: Array2::from_shape_fn(shape, |ind| !maze.cell_in_bounds(Location::from(ind))),
            room_interior: Array2::from_elem(shape, false),
            vertices: Vec::new(),
            edges: Vec::new(),
            cell_to_vertex: BTreeMap::new(),
            corridor_index: HashMap::new(),
        }
    }

    /// Run every phase and return the reduced graph.
    pub fn build(mut self) -> WeightedTopologyGraph {
        self.claim_rooms();
        self.claim_branch_points();

        for origin in 0..self.vertices.len() {
            self.extend_from(origin);
        }

        self.claim_loops();

        assert!(self.visited.iter().all(|claimed| *claimed), "reduction left cells unclaimed");
        debug!(vertices = self.vertices.len(), edges = self.edges.len(), "maze reduced");

        WeightedTopologyGraph {
            vertices: self.vertices,
            edges: self.edges,
            cell_to_vertex: self.cell_to_vertex,
        }
    }

    #[inline]
    fn is_visited(&self, location: Location) -> bool {
        self.visited.get(location.as_index()).copied().unwrap_or(true)
    }

    #[inline]
    fn is_room_interior(&self, location: Location) -> bool {
        self.room_interior.get(location.as_index()).copied().unwrap_or(false)
    }

    fn claim(&mut self, location: Location) {
        if let Some(claimed) = self.visited.get_mut(location.as_index()) {
            *claimed = true;
        }
    }

    fn add_vertex(&mut self, location: Location, kind: VertexKind) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex { id, location, kind });
        self.cell_to_vertex.insert(location, id);
        self.claim(location);
        id
    }

    fn room_entrances(&self, room: RoomId, cells: &[Location]) -> Vec<Location> {
        cells.iter()
            .copied()
            .filter(|location| self.maze.neighbours(*location)
                .into_iter()
                .any(|neighbour| self.rooms.room_of(neighbour) != Some(room)))
            .collect_vec()
    }

    fn claim_rooms(&mut self) {
        let rooms = self.rooms;

        for (room, cells) in rooms.rooms() {
            let cells = cells.iter().copied().collect_vec();
            let entrances = self.room_entrances(room, &cells);

            let entrance_ids = entrances.iter()
                .map(|location| self.add_vertex(*location, VertexKind::RoomEntrance { room }))
                .collect_vec();

            if entrances.len() > 1 {
                // passages which stay inside the room
                let mut inside = UnGraphMap::with_capacity(cells.len(), cells.len() * 2);
                for location in &cells {
                    inside.add_node(*location);
                    for neighbour in self.maze.neighbours(*location) {
                        if rooms.room_of(neighbour) == Some(room) {
                            inside.add_edge(*location, neighbour, ());
                        }
                    }
                }

                for ((u, u_id), (v, v_id)) in entrances.iter().zip(&entrance_ids).tuple_combinations() {
                    let Some((weight, path)) = astar(&inside, *u, |location| location == *v, |_| 1, |_| 0) else {
                        panic!("entrances {u:?} and {v:?} of room {room} are not connected inside it");
                    };

                    self.edges.push(Edge {
                        ends: (*u_id, *v_id),
                        weight,
                        path,
                        kind: EdgeKind::Room { room },
                    });
                }
            }

            for location in cells {
                self.claim(location);
                if !entrances.contains(&location) {
                    self.room_interior[location.as_index()] = true;
                }
            }
        }

        debug!(rooms = rooms.len(), entrances = self.vertices.len(), room_edges = self.edges.len(), "rooms claimed");
    }

    fn claim_branch_points(&mut self) {
        let dead_ends = self.maze.find_dead_ends();

        for location in self.maze.in_bounds_cells() {
            if self.is_visited(location) {
                continue;
            }

            if dead_ends.contains(&location) {
                self.add_vertex(location, VertexKind::DeadEnd);
            } else if self.maze.degree(location) >= 3 {
                self.add_vertex(location, VertexKind::Junction);
            }
        }
    }

    /// Walk every corridor leaving `origin` that has not been walked yet.
    ///
    /// Pending walks form a stack, so one corridor is followed to its end before the next is started.
    /// A cell is claimed when a walk reaches it; walks queued towards an already claimed cell are dropped.
    fn extend_from(&mut self, origin: VertexId) {
        let origin_location = self.vertices[origin].location;
        let origin_room = self.rooms.room_of(origin_location);
        let mut pending = vec![vec![origin_location]];

        while let Some(path) = pending.pop() {
            let Some(&last) = path.last() else {
                continue;
            };

            if path.len() > 1 {
                if self.is_visited(last) {
                    continue;
                }
                self.claim(last);
            }

            for next in self.maze.neighbours(last) {
                if self.is_room_interior(next) {
                    continue;
                }
                // only the origin can be a room cell, and its own room is covered by room edges
                if origin_room.is_some() && self.rooms.room_of(next) == origin_room && path.len() == 1 {
                    continue;
                }

                // returning to the origin after going around a cycle
                let closes_loop = next == origin_location && path.len() > 2;
                if path.contains(&next) && !closes_loop {
                    continue;
                }

                let mut extended = path.clone();
                extended.push(next);

                if let Some(&target) = self.cell_to_vertex.get(&next) {
                    self.offer_corridor(origin, target, extended);
                } else if !self.is_visited(next) {
                    pending.push(extended);
                }
                // otherwise the corridor was already walked from its other end
            }
        }
    }

    /// Keep the corridor `path` from `origin` to `target` unless an equally short one is already known.
    fn offer_corridor(&mut self, origin: VertexId, target: VertexId, path: Vec<Location>) {
        let weight = path.len() - 1;
        let key = UnorderedPair(origin, target);

        match self.corridor_index.get(&key).copied() {
            None => {
                trace!(origin, target, weight, "corridor found");
                self.corridor_index.insert(key, self.edges.len());
                self.edges.push(Edge {
                    ends: (origin, target),
                    weight,
                    path,
                    kind: EdgeKind::Corridor,
                });
            }
            Some(index) if self.edges[index].weight > weight => {
                trace!(origin, target, weight, replaced = self.edges[index].weight, "shorter corridor found");
                self.edges[index] = Edge {
                    ends: (origin, target),
                    weight,
                    path,
                    kind: EdgeKind::Corridor,
                };
            }
            Some(_) => {}
        }
    }

    /// Order the cells of a cycle by walking around it from `start`.
    ///
    /// Returns [`None`] if the walk does not cover `component`.
    fn walk_cycle(&self, start: Location, component: &[Location]) -> Option<Vec<Location>> {
        let mut walk = vec![start];
        let mut current = start;

        while let Some(next) = self.maze.neighbours(current)
            .into_iter()
            .find(|neighbour| !walk.contains(neighbour)) {
            walk.push(next);
            current = next;
        }

        (walk.len() == component.len()).then_some(walk)
    }

    fn claim_loops(&mut self) {
        for location in self.maze.in_bounds_cells() {
            if self.is_visited(location) {
                continue;
            }

            let component = match self.maze.perform_bfs_from(location) {
                Ok(bfs) => bfs.connected_cells,
                Err(err) => unreachable!("in-bounds cell rejected by its own maze: {err}"),
            };

            for cell in &component {
                assert!(!self.is_visited(*cell), "cell {cell:?} claimed twice");
            }

            if component.len() == 1 {
                self.add_vertex(location, VertexKind::Isolated);
                continue;
            }

            let anchor = self.add_vertex(location, VertexKind::LoopAnchor);
            let path = self.walk_cycle(location, &component).unwrap_or_else(|| component.clone());
            for cell in &path {
                self.claim(*cell);
            }

            trace!(?location, cells = path.len(), "isolated loop found");
            self.edges.push(Edge {
                ends: (anchor, anchor),
                weight: path.len() - 1,
                path,
                kind: EdgeKind::Loop,
            });
        }
    }
}

/// Find the rooms of `maze` and reduce it, returning both results.
pub fn reduce<M: Maze + ?Sized>(maze: &M) -> (RoomPartition, WeightedTopologyGraph) {
    let rooms = crate::rooms::RoomFinder::new(maze).find();
    let graph = TopologyReducer::new(maze, &rooms).build();
    (rooms, graph)
}
