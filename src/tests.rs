#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use petgraph::algo::connected_components;

    use crate::builder::{Builder, GridMazeBuilder};
    use crate::location::{Dimension, Location};
    use crate::reducer::{reduce, TopologyReducer};
    use crate::rooms::{RoomFinder, RoomPartition};
    use crate::thick::ThickMaze;
    use crate::topology::{EdgeKind, VertexKind};

    fn dims(width: usize, height: usize) -> (Dimension, Dimension) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    #[test]
    fn straight_corridor() {
        let maze = GridMazeBuilder::with_dims(dims(4, 1))
            .carve_path(vec![Location(0, 0), Location(1, 0), Location(2, 0), Location(3, 0)])
            .build()
            .unwrap();

        let (rooms, graph) = reduce(&maze);

        assert!(rooms.is_empty());
        assert_eq!(graph.vertices().len(), 2);
        assert!(graph.vertices().iter().all(|vertex| vertex.kind == VertexKind::DeadEnd));
        assert_eq!(graph.edges().len(), 1);

        let edge = &graph.edges()[0];
        assert_eq!(edge.weight, 3);
        assert_eq!(edge.ends, (0, 1));
        assert_eq!(edge.path, vec![Location(0, 0), Location(1, 0), Location(2, 0), Location(3, 0)]);
        assert_eq!(edge.interior(), &[Location(1, 0), Location(2, 0)]);
    }

    #[test]
    fn closed_room() {
        let maze = GridMazeBuilder::with_dims(dims(2, 2)).open_all().build().unwrap();

        let (rooms, graph) = reduce(&maze);

        assert_eq!(rooms.len(), 1);
        assert_eq!(
            rooms.contents(0).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![Location(0, 0), Location(1, 0), Location(0, 1), Location(1, 1)]
        );
        assert!(graph.vertices().is_empty());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn isolated_square_loop_without_rooms() {
        let maze = GridMazeBuilder::with_dims(dims(2, 2)).open_all().build().unwrap();

        let rooms = RoomPartition::empty(&maze);
        let graph = TopologyReducer::new(&maze, &rooms).build();

        assert_eq!(graph.vertices().len(), 1);
        assert_eq!(graph.vertices()[0].kind, VertexKind::LoopAnchor);
        assert_eq!(graph.edges().len(), 1);

        let edge = &graph.edges()[0];
        assert!(edge.is_self_loop());
        assert_eq!(edge.kind, EdgeKind::Loop);
        assert_eq!(edge.weight, 3);
        assert_eq!(edge.path, vec![Location(0, 0), Location(1, 0), Location(1, 1), Location(0, 1)]);
    }

    #[test]
    fn ring_around_a_pillar() {
        let maze: ThickMaze = "\
...
.#.
...".parse().unwrap();

        let (rooms, graph) = reduce(&maze);

        assert!(rooms.is_empty());
        assert_eq!(graph.vertices().len(), 1);
        assert_eq!(graph.vertex_at(Location(0, 0)).unwrap().kind, VertexKind::LoopAnchor);

        let edge = &graph.edges()[0];
        assert_eq!(edge.weight, 7);
        assert_eq!(edge.path, vec![
            Location(0, 0), Location(1, 0), Location(2, 0), Location(2, 1),
            Location(2, 2), Location(1, 2), Location(0, 2), Location(0, 1),
        ]);
        assert_eq!(edge.interior().len(), 7);
    }

    #[test]
    fn junction_with_three_dead_ends() {
        let maze = GridMazeBuilder::with_dims(dims(3, 2))
            .carve_path(vec![Location(0, 0), Location(1, 0), Location(2, 0)])
            .carve_path(vec![Location(1, 0), Location(1, 1)])
            .drop_location(Location(0, 1))
            .drop_location(Location(2, 1))
            .build()
            .unwrap();

        let (_, graph) = reduce(&maze);

        let junction = graph.vertex_at(Location(1, 0)).unwrap();
        assert_eq!(junction.kind, VertexKind::Junction);
        assert_eq!(graph.vertices().iter().filter(|vertex| vertex.kind == VertexKind::DeadEnd).count(), 3);
        assert_eq!(graph.edges().len(), 3);
        assert_eq!(graph.edges_of(junction.id).count(), 3);
        assert_eq!(graph.total_weight(), 3);
        assert_eq!(graph.edge_between(3, junction.id).map(|edge| edge.weight), Some(1));

        let exported = graph.to_graph();
        assert_eq!(exported.node_count(), 4);
        assert_eq!(exported.edge_count(), 3);
        assert_eq!(connected_components(&exported), 1);
    }

    #[test]
    fn loop_hanging_off_a_junction() {
        let maze: ThickMaze = "\
...
.#.
...
#.#
#.#".parse().unwrap();

        let (rooms, graph) = reduce(&maze);

        assert!(rooms.is_empty());
        assert_eq!(graph.vertices().len(), 2);
        assert_eq!(graph.vertex(0).unwrap().location, Location(1, 2));
        assert_eq!(graph.vertex(0).unwrap().kind, VertexKind::Junction);
        assert_eq!(graph.vertex(1).unwrap().kind, VertexKind::DeadEnd);

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[0].ends, (0, 1));
        assert_eq!(graph.edges()[0].weight, 2);

        let cycle = &graph.edges()[1];
        assert!(cycle.is_self_loop());
        assert_eq!(cycle.kind, EdgeKind::Corridor);
        assert_eq!(cycle.weight, 8);
        assert_eq!(cycle.path.first(), Some(&Location(1, 2)));
        assert_eq!(cycle.path.last(), Some(&Location(1, 2)));
        assert_eq!(cycle.interior().len(), 7);
    }

    #[test]
    fn only_the_shortest_parallel_corridor_survives() {
        let maze: ThickMaze = "\
...
.#.
...
.#.
...".parse().unwrap();

        let (_, graph) = reduce(&maze);

        assert_eq!(graph.vertices().len(), 2);
        assert!(graph.vertices().iter().all(|vertex| vertex.kind == VertexKind::Junction));
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].weight, 2);
        assert_eq!(graph.edges()[0].path, vec![Location(0, 2), Location(1, 2), Location(2, 2)]);
    }

    #[test]
    fn room_with_two_dead_end_stubs() {
        let maze: ThickMaze = "\
#..#
#..#
....".parse().unwrap();

        let (rooms, graph) = reduce(&maze);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms.contents(0).unwrap().len(), 6);

        let entrances = graph.vertices().iter()
            .filter(|vertex| vertex.kind == VertexKind::RoomEntrance { room: 0 })
            .map(|vertex| vertex.location)
            .collect::<Vec<_>>();
        assert_eq!(entrances, vec![Location(1, 2), Location(2, 2)]);
        assert_eq!(graph.vertex_at(Location(0, 2)).unwrap().kind, VertexKind::DeadEnd);
        assert!(graph.vertex_at(Location(1, 1)).is_none());

        assert_eq!(graph.edges().len(), 3);
        assert_eq!(graph.edges()[0].kind, EdgeKind::Room { room: 0 });
        assert_eq!(graph.edges()[0].path, vec![Location(1, 2), Location(2, 2)]);
        assert!(graph.edges()[1..].iter().all(|edge| edge.kind == EdgeKind::Corridor && edge.weight == 1));
    }

    #[test]
    fn room_entrance_reaches_a_stub() {
        let maze: ThickMaze = "\
.....
.....
##.##
##.##".parse().unwrap();

        let (rooms, graph) = reduce(&maze);

        assert_eq!(rooms.len(), 1);
        // only the cell above the stub leaves the room
        assert_eq!(graph.vertex_at(Location(2, 1)).unwrap().kind, VertexKind::RoomEntrance { room: 0 });
        assert_eq!(graph.vertices().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].path, vec![Location(2, 1), Location(2, 2), Location(2, 3)]);
    }

    #[test]
    fn corridor_between_two_rooms() {
        let maze: ThickMaze = "\
..#..
.....
..#..".parse().unwrap();

        let (rooms, graph) = reduce(&maze);

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms.room_of(Location(2, 1)), None);
        assert_eq!(graph.vertices().len(), 2);
        assert_eq!(graph.vertex(0).unwrap().kind, VertexKind::RoomEntrance { room: 0 });
        assert_eq!(graph.vertex(1).unwrap().kind, VertexKind::RoomEntrance { room: 1 });

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].kind, EdgeKind::Corridor);
        assert_eq!(graph.edges()[0].path, vec![Location(1, 1), Location(2, 1), Location(3, 1)]);
    }

    #[test]
    fn room_with_many_entrances() {
        let maze: ThickMaze = "\
#.#.#
.....
#...#
#.#.#".parse().unwrap();

        let (rooms, graph) = reduce(&maze);

        assert_eq!(rooms.len(), 1);
        let room_edges = graph.edges().iter()
            .filter(|edge| matches!(edge.kind, EdgeKind::Room { .. }))
            .collect::<Vec<_>>();
        let entrances = graph.vertices().iter()
            .filter(|vertex| matches!(vertex.kind, VertexKind::RoomEntrance { .. }))
            .count();

        assert_eq!(room_edges.len(), entrances * (entrances - 1) / 2);
        for edge in room_edges {
            assert_eq!(edge.weight, edge.path.len() - 1);
            assert!(edge.path.iter().all(|location| rooms.room_of(*location) == Some(0)));
        }
    }

    #[test]
    fn lone_cells_become_isolated_vertices() {
        let maze = GridMazeBuilder::with_dims(dims(2, 1)).build().unwrap();

        let (_, graph) = reduce(&maze);

        assert_eq!(graph.vertices().len(), 2);
        assert!(graph.vertices().iter().all(|vertex| vertex.kind == VertexKind::Isolated));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn room_finding_is_deterministic() {
        let maze: ThickMaze = "\
..#...
...#..
#.....
...#.#".parse().unwrap();

        assert_eq!(RoomFinder::new(&maze).find(), RoomFinder::new(&maze).find());
        assert_eq!(reduce(&maze).1, reduce(&maze).1);
    }
}
